//! Scene: the forest of root entities
//!
//! Passes run over roots in insertion order and recurse depth-first, so every
//! traversal (start, update, queries) sees entities in the same pre-order.

use super::capability::Capability;
use super::component::FrameContext;
use super::entity::{Entity, EntityId};

/// Ordered collection of root entities
#[derive(Debug, Default)]
pub struct Scene {
    roots: Vec<Entity>,
}

impl Scene {
    /// Empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root entity
    ///
    /// Entities that have a parent are not admitted; the call is a no-op and
    /// returns false.
    pub fn add_entity(&mut self, entity: Entity) -> bool {
        if let Some(parent) = entity.parent() {
            log::debug!("Rejected entity {} as scene root: parented to {}", entity.id(), parent);
            return false;
        }
        self.roots.push(entity);
        true
    }

    /// Remove a root entity, handing it back
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.roots.iter().position(|root| root.id() == id)?;
        Some(self.roots.remove(index))
    }

    /// Start every root (and through it, the whole forest)
    pub fn start(&mut self, frame: &FrameContext) {
        log::info!("Starting scene with {} entities", self.entity_count());
        for root in &mut self.roots {
            root.start(frame);
        }
    }

    /// Update every root (and through it, the whole forest)
    pub fn update(&mut self, frame: &FrameContext) {
        for root in &mut self.roots {
            root.update(frame, None);
        }
    }

    /// Every entity holding a component matching `T`, pre-order
    pub fn entities_with_component<T: Capability + ?Sized>(&self) -> Vec<&Entity> {
        let mut found = Vec::new();
        for root in &self.roots {
            root.visit(&mut |entity| {
                if entity.has_component::<T>() {
                    found.push(entity);
                }
            });
        }
        found
    }

    /// First entity in pre-order holding a component matching `T`
    pub fn first_entity_with_component<T: Capability + ?Sized>(&self) -> Option<&Entity> {
        self.roots
            .iter()
            .find_map(|root| root.find_first(&mut |entity| entity.has_component::<T>()))
    }

    /// Every entity, pre-order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        let mut all = Vec::with_capacity(self.entity_count());
        for root in &self.roots {
            root.visit(&mut |entity| all.push(entity));
        }
        all.into_iter()
    }

    /// Root entities in insertion order
    pub fn root_entities(&self) -> &[Entity] {
        &self.roots
    }

    /// Root entities, mutable
    pub fn root_entities_mut(&mut self) -> &mut [Entity] {
        &mut self.roots
    }

    /// Number of entities in the whole forest
    pub fn entity_count(&self) -> usize {
        self.roots.iter().map(Entity::subtree_len).sum()
    }

    /// Find any entity by id
    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.roots
            .iter()
            .find_map(|root| if root.id() == id { Some(root) } else { root.find_descendant(id) })
    }

    /// Find any entity by id, mutable
    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        for root in &mut self.roots {
            if root.id() == id {
                return Some(root);
            }
            if let Some(found) = root.find_descendant_mut(id) {
                return Some(found);
            }
        }
        None
    }

    /// Whether the scene has no entities
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Camera;
    use crate::scene::{CameraProvider, GuiRenderable};

    #[test]
    fn test_add_and_find() {
        let mut scene = Scene::new();
        let child = Entity::named("child");
        let child_id = child.id();
        let root = Entity::named("root").with_child(child);
        let root_id = root.id();

        assert!(scene.add_entity(root));
        assert_eq!(scene.entity_count(), 2);
        assert_eq!(scene.find_entity(root_id).unwrap().name(), "root");
        assert_eq!(scene.find_entity(child_id).unwrap().name(), "child");
        assert!(scene.find_entity_mut(child_id).is_some());
    }

    #[test]
    fn test_iter_is_pre_order() {
        let mut scene = Scene::new();
        scene.add_entity(Entity::named("a").with_child(Entity::named("a1")).with_child(Entity::named("a2")));
        scene.add_entity(Entity::named("b"));

        let names: Vec<_> = scene.iter().map(Entity::name).collect();
        assert_eq!(names, ["a", "a1", "a2", "b"]);
    }

    #[test]
    fn test_first_entity_with_component_searches_later_roots() {
        let mut scene = Scene::new();
        scene.add_entity(Entity::named("empty").with_child(Entity::named("empty/child")));
        scene.add_entity(
            Entity::named("rig")
                .with_child(Entity::named("rig/mount").with_child(Entity::named("lens").with_component(Camera::new())))
                .with_child(Entity::named("spare").with_component(Camera::new())),
        );

        let found = scene.first_entity_with_component::<dyn CameraProvider>().unwrap();
        assert_eq!(found.name(), "lens");
        assert!(scene.first_entity_with_component::<dyn GuiRenderable>().is_none());
    }

    #[test]
    fn test_remove_entity() {
        let mut scene = Scene::new();
        let root = Entity::named("gone");
        let id = root.id();
        scene.add_entity(root);

        assert_eq!(scene.remove_entity(id).unwrap().name(), "gone");
        assert!(scene.is_empty());
        assert!(scene.remove_entity(id).is_none());
    }
}
