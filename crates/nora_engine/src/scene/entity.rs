//! Scene graph node
//!
//! An [`Entity`] owns its transform, its components and its children. The
//! parent link is a plain [`EntityId`], so the ownership graph is a forest by
//! construction: a child is moved into its parent and cannot be reached from
//! anywhere else afterwards.
//!
//! ```compile_fail
//! use nora_engine::scene::Entity;
//!
//! let mut parent = Entity::named("parent");
//! let child = Entity::named("child");
//! parent.add_child(child);
//! // `child` now belongs to `parent`
//! child.transform();
//! ```
//!
//! ```compile_fail
//! use nora_engine::scene::Entity;
//!
//! let mut looped = Entity::named("looped");
//! looped.add_child(looped);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::capability::{match_component, Capability, ComponentRef};
use super::component::{Component, ComponentContext, FrameContext};
use super::transform::Transform;
use crate::foundation::math::Mat4;

/// Process-unique entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Allocate a fresh id
    pub fn allocate() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node of the scene graph
pub struct Entity {
    id: EntityId,
    name: String,
    transform: Transform,
    components: Vec<Box<dyn Component>>,
    children: Vec<Entity>,
    parent: Option<EntityId>,
}

impl Entity {
    /// Unnamed root entity with an identity transform
    pub fn new() -> Self {
        Self {
            id: EntityId::allocate(),
            name: String::new(),
            transform: Transform::new(),
            components: Vec::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    /// Named root entity
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// Builder pattern: Replace the transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder pattern: Attach a component
    pub fn with_component(mut self, component: impl Component) -> Self {
        self.add_component(component);
        self
    }

    /// Builder pattern: Adopt a child
    pub fn with_child(mut self, child: Entity) -> Self {
        self.add_child(child);
        self
    }

    /// Attach a component; it records this entity as its owner
    pub fn add_component(&mut self, component: impl Component) {
        self.add_boxed_component(Box::new(component));
    }

    /// Attach an already boxed component
    pub fn add_boxed_component(&mut self, mut component: Box<dyn Component>) {
        component.on_attach(self.id);
        log::debug!(
            "Attached {} to {} ({:?})",
            component.name(),
            self.label(),
            component.capabilities()
        );
        self.components.push(component);
    }

    /// First component matching `T`, in attach order
    ///
    /// Script-backed components match when their object reports `T`'s tag and
    /// are returned as [`ComponentRef::Foreign`].
    pub fn get_component<T: Capability + ?Sized>(&self) -> Option<ComponentRef<'_, T::Target>> {
        self.components
            .iter()
            .find_map(|component| match_component::<T>(&**component))
    }

    /// First native component matching `T`, mutably
    pub fn get_component_mut<T: Capability + ?Sized>(&mut self) -> Option<&mut T::Target> {
        self.components
            .iter_mut()
            .find_map(|component| T::cast_mut(&mut **component))
    }

    /// Whether any component matches `T`
    pub fn has_component<T: Capability + ?Sized>(&self) -> bool {
        self.get_component::<T>().is_some()
    }

    /// Adopt `child`, making this entity its parent
    ///
    /// Returns the child's id for later lookup.
    pub fn add_child(&mut self, mut child: Entity) -> EntityId {
        child.parent = Some(self.id);
        let id = child.id;
        self.children.push(child);
        id
    }

    /// Detach a direct child and hand it back as a root
    pub fn remove_child(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.children.iter().position(|child| child.id == id)?;
        let mut child = self.children.remove(index);
        child.parent = None;
        Some(child)
    }

    /// Start every component, then every child
    ///
    /// A failing component is logged and skipped.
    pub fn start(&mut self, frame: &FrameContext) {
        let Self {
            id,
            name,
            transform,
            components,
            children,
            ..
        } = self;

        for component in components.iter_mut() {
            let mut ctx = ComponentContext::new(*id, name, transform, frame);
            if let Err(err) = component.start(&mut ctx) {
                log::error!("Entity {} '{}': {} failed to start: {}", id, name, component.name(), err);
            }
        }

        for child in children {
            child.start(frame);
        }
    }

    /// Recompute the world matrix, update components, then children
    ///
    /// `parent_world` is the parent's world matrix for this frame and must be
    /// given whenever the entity has a parent; roots pass `None`. Children
    /// receive this entity's fresh world matrix.
    pub fn update(&mut self, frame: &FrameContext, parent_world: Option<&Mat4>) {
        match parent_world {
            Some(parent_world) => self.transform.compute_model_matrix_with_parent(parent_world),
            None => {
                if let Some(parent) = self.parent {
                    log::warn!("{} updated without the world matrix of its parent {}", self.label(), parent);
                }
                self.transform.compute_model_matrix();
            }
        }

        let Self {
            id,
            name,
            transform,
            components,
            children,
            ..
        } = self;

        for component in components.iter_mut() {
            let mut ctx = ComponentContext::new(*id, name, transform, frame);
            if let Err(err) = component.update(&mut ctx) {
                log::error!("Entity {} '{}': {} failed to update: {}", id, name, component.name(), err);
            }
        }

        let world = *transform.model_matrix();
        for child in children {
            child.update(frame, Some(&world));
        }
    }

    /// Entity id
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Human-readable name, empty when unnamed
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the entity
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Parent id, `None` for roots
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<EntityId>) {
        self.parent = parent;
    }

    /// Transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Transform, mutable
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Direct children in insertion order
    pub fn children(&self) -> &[Entity] {
        &self.children
    }

    /// Direct children, mutable
    pub fn children_mut(&mut self) -> &mut [Entity] {
        &mut self.children
    }

    /// Components in attach order
    pub fn components(&self) -> impl Iterator<Item = &dyn Component> + '_ {
        self.components.iter().map(|component| &**component as &dyn Component)
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Depth-first search below this entity
    pub fn find_descendant(&self, id: EntityId) -> Option<&Entity> {
        self.children.iter().find_map(|child| {
            if child.id == id {
                Some(child)
            } else {
                child.find_descendant(id)
            }
        })
    }

    /// Depth-first search below this entity, mutable
    pub fn find_descendant_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        for child in &mut self.children {
            if child.id == id {
                return Some(child);
            }
            if let Some(found) = child.find_descendant_mut(id) {
                return Some(found);
            }
        }
        None
    }

    /// This entity and every descendant, pre-order
    pub(crate) fn visit<'a>(&'a self, visitor: &mut impl FnMut(&'a Entity)) {
        visitor(self);
        for child in &self.children {
            child.visit(visitor);
        }
    }

    /// First entity of this subtree, pre-order, accepted by `predicate`
    ///
    /// Stops at the first match.
    pub(crate) fn find_first<'a>(&'a self, predicate: &mut impl FnMut(&Entity) -> bool) -> Option<&'a Entity> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_first(predicate))
    }

    /// Number of entities in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Entity::subtree_len).sum::<usize>()
    }

    fn label(&self) -> String {
        if self.name.is_empty() {
            self.id.to_string()
        } else {
            format!("{} '{}'", self.id, self.name)
        }
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("components", &self.components.iter().map(|c| c.name()).collect::<Vec<_>>())
            .field("children", &self.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::component::{ComponentError, OwnerSlot};
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct Tag {
        owner: OwnerSlot,
        label: &'static str,
        updates: u32,
    }

    impl Tag {
        fn labelled(label: &'static str) -> Self {
            Self {
                label,
                ..Self::default()
            }
        }
    }

    impl Component for Tag {
        fn owner_slot(&self) -> &OwnerSlot {
            &self.owner
        }

        fn owner_slot_mut(&mut self) -> &mut OwnerSlot {
            &mut self.owner
        }

        fn update(&mut self, _ctx: &mut ComponentContext<'_>) -> Result<(), ComponentError> {
            self.updates += 1;
            Ok(())
        }
    }

    crate::native_capability!(Tag, "Tag");

    #[test]
    fn test_ids_are_unique() {
        let a = Entity::new();
        let b = Entity::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_add_component_records_owner() {
        let mut entity = Entity::named("holder");
        entity.add_component(Tag::labelled("first"));

        let tag = entity.get_component::<Tag>().unwrap();
        assert_eq!(tag.owner(), Some(entity.id()));
    }

    #[test]
    fn test_get_component_returns_first_of_duplicates() {
        let entity = Entity::new()
            .with_component(Tag::labelled("first"))
            .with_component(Tag::labelled("second"));

        assert_eq!(entity.component_count(), 2);
        let tag = entity.get_component::<Tag>().and_then(ComponentRef::native).unwrap();
        assert_eq!(tag.label, "first");
    }

    #[test]
    fn test_missing_component_is_none() {
        let entity = Entity::new();
        assert!(entity.get_component::<Tag>().is_none());
        assert!(!entity.has_component::<dyn Component>());
    }

    #[test]
    fn test_get_component_mut_edits_in_place() {
        let mut entity = Entity::new().with_component(Tag::labelled("mutable"));
        entity.get_component_mut::<Tag>().unwrap().label = "edited";

        let tag = entity.get_component::<Tag>().and_then(ComponentRef::native).unwrap();
        assert_eq!(tag.label, "edited");
    }

    #[test]
    fn test_add_child_sets_parent() {
        let mut parent = Entity::named("parent");
        let child_id = parent.add_child(Entity::named("child"));

        assert_eq!(parent.children().len(), 1);
        assert_eq!(parent.children()[0].id(), child_id);
        assert_eq!(parent.children()[0].parent(), Some(parent.id()));
        assert_eq!(parent.parent(), None);
    }

    #[test]
    fn test_remove_child_returns_root() {
        let mut parent = Entity::new();
        let child_id = parent.add_child(Entity::named("leaving"));

        let child = parent.remove_child(child_id).unwrap();
        assert_eq!(child.parent(), None);
        assert!(parent.children().is_empty());
        assert!(parent.remove_child(child_id).is_none());
    }

    #[test]
    fn test_find_descendant_searches_depth_first() {
        let grandchild = Entity::named("grandchild");
        let grandchild_id = grandchild.id();
        let root = Entity::named("root").with_child(Entity::named("child").with_child(grandchild));

        assert_eq!(root.find_descendant(grandchild_id).unwrap().name(), "grandchild");
        assert!(root.find_descendant(root.id()).is_none());
        assert_eq!(root.subtree_len(), 3);
    }

    #[test]
    fn test_find_first_stops_at_match() {
        let root = Entity::named("root")
            .with_child(Entity::named("a").with_child(Entity::named("a1").with_component(Tag::default())))
            .with_child(Entity::named("b").with_component(Tag::default()))
            .with_child(Entity::named("c"));

        let mut visited = Vec::new();
        let found = root.find_first(&mut |entity| {
            visited.push(entity.name().to_string());
            entity.has_component::<Tag>()
        });

        assert_eq!(found.map(Entity::name), Some("a1"));
        assert_eq!(visited, ["root", "a", "a1"]);
    }

    #[test]
    fn test_update_reaches_components_and_children() {
        let frame = FrameContext::default();
        let mut root = Entity::new()
            .with_component(Tag::default())
            .with_child(Entity::new().with_component(Tag::default()));

        root.update(&frame, None);
        root.update(&frame, None);

        assert_eq!(root.get_component::<Tag>().and_then(ComponentRef::native).unwrap().updates, 2);
        let child = &root.children()[0];
        assert_eq!(child.get_component::<Tag>().and_then(ComponentRef::native).unwrap().updates, 2);
    }

    #[test]
    fn test_child_world_matrix_follows_parent() {
        let frame = FrameContext::default();
        let mut root = Entity::new()
            .with_transform(Transform::new().with_rotation(Vec3::new(0.0, 90.0, 0.0)))
            .with_child(Entity::new().with_transform(Transform::new().with_position(Vec3::new(1.0, 0.0, 0.0))));

        root.update(&frame, None);

        let child = &root.children()[0];
        assert_relative_eq!(child.transform().global_position(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
        assert!(!child.transform().is_dirty());
    }

    #[test]
    fn test_parented_entity_updates_under_given_parent_world() {
        let frame = FrameContext::default();
        let child = Entity::new().with_transform(Transform::new().with_position(Vec3::new(0.0, 1.0, 0.0)));
        let child_id = child.id();
        let mut root = Entity::new()
            .with_transform(Transform::new().with_position(Vec3::new(1.0, 0.0, 0.0)))
            .with_child(child);
        root.update(&frame, None);

        let parent_world = *root.transform().model_matrix();
        let child = root.find_descendant_mut(child_id).unwrap();
        child.transform_mut().set_local_position(Vec3::new(0.0, 2.0, 0.0));
        child.update(&frame, Some(&parent_world));

        assert_relative_eq!(child.transform().global_position(), Vec3::new(1.0, 2.0, 0.0));
    }
}
