//! Fixed timestep simulation tick
//!
//! One tick advances the player, then every ball. The player goes first so an
//! attached ball snaps to the corner the player has just moved to.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Placement;
use super::entities::{Renderable, Tickable};
use super::scene::EntityId;
use super::state::{GameEvent, GameStage, World};
use crate::consts::MAX_FRAME_SECS;
use crate::error::SimError;
use crate::input::Direction;
use crate::settings::Settings;

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// The player left the playfield sideways
    OffScreen,
    /// The player hit the floor tipped a quarter turn or more
    Toppled,
}

/// What a single entity tick asks of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Ball entered the basket
    Scored,
    /// Ball fell past the floor
    Lost,
    Died(DeathCause),
}

/// Player state a ball reads while attached or when let go
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Carrier {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed_angle: f32,
    pub tilt: f32,
    /// Where an attached ball sits
    pub top_left: Vec2,
}

/// Shared context for one entity tick
pub struct TickEnv<'a> {
    pub settings: &'a Settings,
    pub direction: Direction,
    pub rng: &'a mut Pcg32,
    pub carrier: Option<Carrier>,
    pub basket: Option<Placement>,
}

/// Accumulates host frame time into whole simulation ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    interval: f32,
    max_substeps: u32,
    accumulator: f32,
    running: bool,
}

impl FixedStep {
    pub fn new(settings: &Settings) -> Self {
        Self {
            interval: settings.tick_interval(),
            max_substeps: settings.max_substeps,
            accumulator: 0.0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
        self.accumulator = 0.0;
    }

    /// Stop at once; time already banked is discarded
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn max_substeps(&self) -> u32 {
        self.max_substeps
    }

    fn bank(&mut self, elapsed_secs: f32) {
        if self.running && elapsed_secs > 0.0 {
            self.accumulator += elapsed_secs.min(MAX_FRAME_SECS);
        }
    }

    fn take_tick(&mut self) -> bool {
        if self.running && self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }
}

impl World {
    /// Advance the simulation by one fixed step. Does nothing outside play.
    pub fn tick(&mut self) -> Result<(), SimError> {
        if self.stage != GameStage::Playing {
            return Ok(());
        }

        let direction = self.input.direction();
        let basket = self.basket_placement();

        let outcome = {
            let player = self
                .scene
                .player_mut(self.player)
                .ok_or(SimError::UnknownEntity(self.player))?;
            let mut env = TickEnv {
                settings: &self.settings,
                direction,
                rng: &mut self.rng,
                carrier: None,
                basket,
            };
            player.tick(&mut env)
        };
        if let TickOutcome::Died(cause) = outcome {
            self.die(cause);
            return Ok(());
        }

        let carrier = self.carrier()?;
        let mut lost = Vec::new();
        for &id in &self.balls {
            let Some(ball) = self.scene.ball_mut(id) else {
                continue;
            };
            let mut env = TickEnv {
                settings: &self.settings,
                direction,
                rng: &mut self.rng,
                carrier: Some(carrier),
                basket,
            };
            match ball.tick(&mut env) {
                TickOutcome::Scored => {
                    self.score += 1;
                    log::debug!("Ball {id} scored, total {}", self.score);
                    self.events.push(GameEvent::Scored { total: self.score });
                }
                TickOutcome::Lost => lost.push(id),
                TickOutcome::Continue | TickOutcome::Died(_) => {}
            }
        }

        for id in lost {
            self.scene.remove(id);
            self.balls.retain(|&b| b != id);
            log::debug!("Ball {id} lost, respawning on the player");
            self.events.push(GameEvent::BallLost);
            let ball = self.spawn_ball();
            self.attach(ball)?;
            if let Some(ball) = self.scene.ball_mut(ball) {
                ball.set_visible(true);
            }
        }

        self.time_ticks += 1;
        Ok(())
    }

    /// Feed host frame time to the fixed-step clock and run the ticks it
    /// covers. Returns how many ticks ran.
    pub fn advance(&mut self, elapsed_secs: f32) -> Result<u32, SimError> {
        self.clock.bank(elapsed_secs);
        let mut ticks = 0;
        while ticks < self.clock.max_substeps() && self.clock.take_tick() {
            self.tick()?;
            ticks += 1;
        }
        Ok(ticks)
    }
}
