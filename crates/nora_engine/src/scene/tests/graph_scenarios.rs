//! Scene graph scenarios
//!
//! Ownership, transform propagation, failure isolation and capability queries
//! exercised through whole scenes rather than single types.

use std::cell::RefCell;
use std::rc::Rc;

use crate::components::{Camera, MeshRenderer, Text};
use crate::foundation::math::Vec3;
use crate::scene::{
    CameraProvider, Component, ComponentContext, ComponentError, Entity, FrameContext, GuiRenderable, OwnerSlot,
    Renderable, Scene, Transform,
};
use crate::script::{BehaviourLibrary, BridgeState, ClassDef, ScriptComponent};
use approx::assert_relative_eq;

#[cfg(test)]
mod tests {
    use super::*;

    type Journal = Rc<RefCell<Vec<String>>>;

    /// Writes "<label>:<hook>" to a shared journal, optionally failing
    struct Recorder {
        owner: OwnerSlot,
        label: &'static str,
        fail: bool,
        journal: Journal,
    }

    impl Recorder {
        fn new(label: &'static str, journal: &Journal) -> Self {
            Self {
                owner: OwnerSlot::new(),
                label,
                fail: false,
                journal: Rc::clone(journal),
            }
        }

        fn failing(label: &'static str, journal: &Journal) -> Self {
            Self {
                fail: true,
                ..Self::new(label, journal)
            }
        }

        fn record(&self, hook: &str) -> Result<(), ComponentError> {
            self.journal.borrow_mut().push(format!("{}:{}", self.label, hook));
            if self.fail {
                return Err(ComponentError::failed(self.label, "deliberate failure"));
            }
            Ok(())
        }
    }

    impl Component for Recorder {
        fn owner_slot(&self) -> &OwnerSlot {
            &self.owner
        }

        fn owner_slot_mut(&mut self) -> &mut OwnerSlot {
            &mut self.owner
        }

        fn start(&mut self, _ctx: &mut ComponentContext<'_>) -> Result<(), ComponentError> {
            self.record("start")
        }

        fn update(&mut self, _ctx: &mut ComponentContext<'_>) -> Result<(), ComponentError> {
            self.record("update")
        }
    }

    /// Records the owner's world position as seen during update
    #[derive(Default)]
    struct PositionWitness {
        owner: OwnerSlot,
        seen: Rc<RefCell<Vec<Vec3>>>,
    }

    impl Component for PositionWitness {
        fn owner_slot(&self) -> &OwnerSlot {
            &self.owner
        }

        fn owner_slot_mut(&mut self) -> &mut OwnerSlot {
            &mut self.owner
        }

        fn update(&mut self, ctx: &mut ComponentContext<'_>) -> Result<(), ComponentError> {
            self.seen.borrow_mut().push(ctx.transform().global_position());
            Ok(())
        }
    }

    fn journal() -> Journal {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn positioned(name: &str, position: Vec3) -> Entity {
        Entity::named(name).with_transform(Transform::new().with_position(position))
    }

    #[test]
    fn test_child_world_position_composes_parent() {
        let mut scene = Scene::new();
        let child = positioned("child", Vec3::new(0.0, 1.0, 0.0));
        let child_id = child.id();
        scene.add_entity(positioned("parent", Vec3::new(1.0, 0.0, 0.0)).with_child(child));

        scene.update(&FrameContext::default());

        let child = scene.find_entity(child_id).unwrap();
        assert_relative_eq!(child.transform().global_position(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_components_see_this_frames_world_matrix() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let witness = PositionWitness {
            seen: Rc::clone(&seen),
            ..PositionWitness::default()
        };

        let mut scene = Scene::new();
        scene.add_entity(
            positioned("parent", Vec3::new(2.0, 0.0, 0.0))
                .with_child(positioned("child", Vec3::new(0.0, 0.0, 3.0)).with_component(witness)),
        );

        scene.update(&FrameContext::default());
        scene.root_entities_mut()[0]
            .transform_mut()
            .set_local_position(Vec3::new(-1.0, 0.0, 0.0));
        scene.update(&FrameContext::default());

        assert_eq!(*seen.borrow(), vec![Vec3::new(2.0, 0.0, 3.0), Vec3::new(-1.0, 0.0, 3.0)]);
    }

    #[test]
    fn test_failing_component_does_not_stop_the_pass() {
        let log = journal();
        let mut scene = Scene::new();
        scene.add_entity(
            Entity::named("host")
                .with_component(Recorder::new("first", &log))
                .with_component(Recorder::failing("broken", &log))
                .with_component(Recorder::new("last", &log))
                .with_child(Entity::named("child").with_component(Recorder::new("child", &log))),
        );
        scene.add_entity(Entity::named("sibling").with_component(Recorder::new("sibling", &log)));

        scene.start(&FrameContext::default());
        scene.update(&FrameContext::default());

        let expected = [
            "first:start",
            "broken:start",
            "last:start",
            "child:start",
            "sibling:start",
            "first:update",
            "broken:update",
            "last:update",
            "child:update",
            "sibling:update",
        ];
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn test_query_finds_only_the_nested_camera() {
        let mut scene = Scene::new();
        scene.add_entity(Entity::named("first").with_child(Entity::named("first/child")));
        let grandchild = Entity::named("second/child/grandchild").with_component(Camera::new());
        let grandchild_id = grandchild.id();
        scene.add_entity(
            Entity::named("second").with_child(Entity::named("second/child").with_child(grandchild)),
        );
        scene.add_entity(Entity::named("third").with_component(MeshRenderer::cuboid()));

        let cameras = scene.entities_with_component::<dyn CameraProvider>();
        assert_eq!(cameras.len(), 1);
        assert_eq!(cameras[0].id(), grandchild_id);

        let by_type = scene.entities_with_component::<Camera>();
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].id(), grandchild_id);
        assert!(scene.entities_with_component::<dyn GuiRenderable>().is_empty());
    }

    #[test]
    fn test_query_is_pre_order_across_roots() {
        let mut scene = Scene::new();
        scene.add_entity(
            Entity::named("a")
                .with_component(Text::new("a"))
                .with_child(Entity::named("a1").with_component(Text::new("a1"))),
        );
        scene.add_entity(Entity::named("b").with_component(Text::new("b")));

        let names: Vec<_> = scene
            .entities_with_component::<dyn GuiRenderable>()
            .into_iter()
            .map(Entity::name)
            .collect();
        assert_eq!(names, ["a", "a1", "b"]);
    }

    #[test]
    fn test_parented_entity_is_not_admitted_as_root() {
        let mut scene = Scene::new();
        let root = Entity::named("root");
        let root_id = root.id();
        scene.add_entity(root);

        let mut stray = Entity::named("stray");
        stray.set_parent(Some(root_id));

        assert!(!scene.add_entity(stray));
        assert_eq!(scene.root_entities().len(), 1);
        assert_eq!(scene.root_entities()[0].id(), root_id);
        assert_eq!(scene.entity_count(), 1);
    }

    #[test]
    fn test_script_without_hooks_is_harmless() {
        let log = journal();
        let library = BehaviourLibrary::new().with_class("Empty", ClassDef::default());
        let bridge = library.instantiate_component("Empty").unwrap();

        let mut scene = Scene::new();
        scene.add_entity(
            Entity::named("scripted")
                .with_component(bridge)
                .with_component(Recorder::new("native", &log)),
        );

        scene.start(&FrameContext::default());
        scene.update(&FrameContext::default());

        assert_eq!(*log.borrow(), ["native:start", "native:update"]);
        let entity = &scene.root_entities()[0];
        let found = entity.get_component::<dyn Component>().unwrap();
        let bridge = found.foreign().unwrap();
        assert_eq!(bridge.state(), BridgeState::Started);
    }

    #[test]
    fn test_failing_script_is_contained() {
        let log = journal();
        let library = BehaviourLibrary::from_ron_str(
            r#"(classes: { "Crasher": (start: [Fail("no start")], update: [Fail("no update")]) })"#,
        )
        .unwrap();

        let mut scene = Scene::new();
        scene.add_entity(
            Entity::named("volatile")
                .with_component(library.instantiate_component("Crasher").unwrap())
                .with_component(Recorder::new("after", &log)),
        );

        scene.start(&FrameContext::default());
        scene.update(&FrameContext::default());

        assert_eq!(*log.borrow(), ["after:start", "after:update"]);
    }

    #[test]
    fn test_script_moves_its_owner() {
        let library = BehaviourLibrary::from_ron_str(
            r#"(classes: { "Lift": (start: [SetPosition(0.0, 1.0, 0.0)], update: [Translate(0.0, 2.0, 0.0)]) })"#,
        )
        .unwrap();

        let mut scene = Scene::new();
        let lifted = Entity::named("lifted").with_component(ScriptComponent::new(library.instantiate("Lift").unwrap()));
        let id = lifted.id();
        scene.add_entity(lifted);

        scene.start(&FrameContext::default());
        scene.update(&FrameContext::fixed(0.5, 1));

        // The script ran after this frame's recompute, so the move shows up
        // in the local position now and in the world matrix next frame.
        let entity = scene.find_entity(id).unwrap();
        assert_relative_eq!(entity.transform().local_position(), Vec3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(entity.transform().global_position(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_renderables_report_their_owners() {
        let child = Entity::named("C").with_component(MeshRenderer::sphere());
        let child_id = child.id();
        let parent = Entity::named("E")
            .with_component(MeshRenderer::cuboid())
            .with_child(child);
        let parent_id = parent.id();

        let mut scene = Scene::new();
        scene.add_entity(parent);
        scene.start(&FrameContext::default());
        scene.update(&FrameContext::default());

        let renderables = scene.entities_with_component::<dyn Renderable>();
        let ids: Vec<_> = renderables.iter().map(|entity| entity.id()).collect();
        assert_eq!(ids, [parent_id, child_id]);

        let r1 = renderables[0].get_component::<dyn Renderable>().unwrap();
        let r2 = renderables[1].get_component::<dyn Renderable>().unwrap();
        assert_eq!(r1.owner(), Some(parent_id));
        assert_eq!(r2.owner(), Some(child_id));
    }

    #[test]
    fn test_first_camera_is_found_in_pre_order() {
        let mut scene = Scene::new();
        scene.add_entity(Entity::named("no camera"));
        scene.add_entity(
            Entity::named("rig")
                .with_child(Entity::named("front").with_component(Camera::new()))
                .with_child(Entity::named("back").with_component(Camera::new().with_orientation(90.0, 0.0))),
        );

        let active = scene.first_entity_with_component::<dyn CameraProvider>().unwrap();
        assert_eq!(active.name(), "front");
    }
}
