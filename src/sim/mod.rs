//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same settings, seed and inputs
//! the world evolves identically:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (paint order by depth, then spawn order)
//! - No platform dependencies; rendering only emits draw commands

pub mod body;
pub mod collision;
pub mod entities;
pub mod geometry;
pub mod scene;
pub mod state;
pub mod tick;

pub use body::{LinearForce, PhysicsBody};
pub use collision::{Placement, point_in_basket};
pub use entities::{Ball, Basket, Entity, Hoop, Player, Renderable, SpriteKind, Tickable};
pub use geometry::{Aabb, CenteredRotatable, Corners, OrientedRect};
pub use scene::{EntityId, Scene};
pub use state::{GameEvent, GameStage, PointerResponse, World};
pub use tick::{Carrier, DeathCause, FixedStep, TickEnv, TickOutcome};

impl World {
    /// Describe the current frame as draw commands
    pub fn render_frame(&self) -> crate::renderer::Frame {
        crate::renderer::render_frame(self)
    }
}
