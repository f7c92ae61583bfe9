//! Scene registry
//!
//! Entities live in an arena indexed by [`EntityId`]; ids are never reused
//! within a round, so a stale id simply finds nothing. A separate index list
//! keeps paint order sorted by depth, with ties in insertion order.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entities::{Ball, Basket, Entity, Hoop, Player, Renderable};

/// Stable handle to an entity in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    slots: Vec<Option<Entity>>,
    /// Live ids, back to front
    order: Vec<EntityId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id, build the entity with it and slot it into paint order
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = EntityId(self.slots.len() as u32);
        self.slots.push(Some(build(id)));
        self.order.push(id);
        self.sort();
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.slots.get_mut(id.index())?.take()?;
        self.order.retain(|&other| other != id);
        self.sort();
        Some(entity)
    }

    /// Drop every entity and start ids from zero again
    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id.index())?.as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    pub fn player(&self, id: EntityId) -> Option<&Player> {
        match self.get(id)? {
            Entity::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn player_mut(&mut self, id: EntityId) -> Option<&mut Player> {
        match self.get_mut(id)? {
            Entity::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn ball(&self, id: EntityId) -> Option<&Ball> {
        match self.get(id)? {
            Entity::Ball(b) => Some(b),
            _ => None,
        }
    }

    pub fn ball_mut(&mut self, id: EntityId) -> Option<&mut Ball> {
        match self.get_mut(id)? {
            Entity::Ball(b) => Some(b),
            _ => None,
        }
    }

    pub fn hoop(&self, id: EntityId) -> Option<&Hoop> {
        match self.get(id)? {
            Entity::Hoop(h) => Some(h),
            _ => None,
        }
    }

    pub fn basket(&self, id: EntityId) -> Option<&Basket> {
        match self.get(id)? {
            Entity::Basket(b) => Some(b),
            _ => None,
        }
    }

    /// Ids back to front
    pub fn depth_order(&self) -> &[EntityId] {
        &self.order
    }

    /// Entities back to front
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.order.iter().filter_map(|&id| self.get(id))
    }

    pub fn set_all_visible(&mut self, visible: bool) {
        for entity in self.slots.iter_mut().flatten() {
            entity.as_renderable_mut().set_visible(visible);
        }
    }

    fn sort(&mut self) {
        let slots = &self.slots;
        // Stable: equal depths keep insertion order
        self.order.sort_by_key(|id| {
            slots[id.index()]
                .as_ref()
                .map_or(i32::MAX, |e| e.as_renderable().depth())
        });
    }
}
