//! World state and the game-stage machine
//!
//! The world owns everything a round needs: stage, score, scene and the
//! player/ball pairing. Hosts drive it through `tick`/`advance`, the action
//! methods and `render_frame`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::LinearForce;
use super::collision::Placement;
use super::entities::{Ball, Basket, Entity, Hoop, Player};
use super::scene::{EntityId, Scene};
use super::tick::{Carrier, DeathCause, FixedStep, TickEnv};
use crate::consts::{BALL_DEPTH, BASKET_DEPTH, HOOP_DEPTH, PLAYER_DEPTH};
use crate::error::SimError;
use crate::input::{Action, InputState, TouchZone, is_fullscreen_corner};
use crate::settings::{Settings, SpriteSizes};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStage {
    /// Waiting for the player to start
    TitleScreen,
    /// Simulation running
    Playing,
    /// Run over, cinematic showing
    Terminal,
}

/// Things that happened since the host last looked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    StageChanged { from: GameStage, to: GameStage },
    Scored { total: u32 },
    BallLost,
    /// Also the cue for the terminal cinematic
    Died(DeathCause),
}

/// Host follow-up for a pointer press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerResponse {
    Handled,
    /// Title screen corner pressed; going fullscreen is up to the host
    RequestFullscreen,
}

/// The whole game
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    pub(crate) sprites: SpriteSizes,
    pub(crate) stage: GameStage,
    pub(crate) score: u32,
    pub(crate) scene: Scene,
    pub(crate) player: EntityId,
    pub(crate) hoop: EntityId,
    pub(crate) basket: EntityId,
    /// Live balls in spawn order
    pub(crate) balls: Vec<EntityId>,
    pub(crate) input: InputState,
    pub(crate) background: usize,
    pub(crate) rng: Pcg32,
    pub(crate) clock: FixedStep,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) time_ticks: u64,
}

impl World {
    /// Build a world on the title screen. Every sprite size must be resolved.
    pub fn new(settings: Settings, sprites: SpriteSizes) -> Result<Self, SimError> {
        settings.validate()?;
        sprites.validate()?;

        let mut world = Self {
            clock: FixedStep::new(&settings),
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            sprites,
            stage: GameStage::TitleScreen,
            score: 0,
            scene: Scene::new(),
            player: EntityId(0),
            hoop: EntityId(0),
            basket: EntityId(0),
            balls: Vec::new(),
            input: InputState::default(),
            background: 0,
            events: Vec::new(),
            time_ticks: 0,
        };
        world.setup_sprites()?;
        Ok(world)
    }

    /// Build a world from settings that carry sprite sizes
    pub fn from_settings(settings: Settings) -> Result<Self, SimError> {
        let sprites = settings.sprites.ok_or(SimError::UnresolvedSprite {
            kind: super::SpriteKind::Player,
            width: f32::NAN,
            height: f32::NAN,
        })?;
        Self::new(settings, sprites)
    }

    fn setup_sprites(&mut self) -> Result<(), SimError> {
        let (width, height) = (self.settings.width, self.settings.height);
        let sprites = self.sprites;

        let player_tuning = self.settings.player;
        self.player = self.scene.spawn(|id| {
            Entity::Player(Player::new(
                id,
                Vec2::new(width / 2.0, height / 2.0),
                sprites.player,
                player_tuning,
                PLAYER_DEPTH,
            ))
        });

        let ball = self.spawn_ball();
        self.attach(ball)?;

        let hoop_pos = Vec2::new(width / 2.0 - sprites.hoop.x / 2.0, height - sprites.hoop.y);
        self.hoop = self
            .scene
            .spawn(|id| Entity::Hoop(Hoop::new(id, hoop_pos, sprites.hoop, HOOP_DEPTH)));

        let basket_pos = hoop_pos + Vec2::new(0.0, self.settings.basket_drop);
        self.basket = self.scene.spawn(|id| {
            Entity::Basket(Basket::new(id, basket_pos, sprites.basket, BASKET_DEPTH))
        });
        Ok(())
    }

    /// Add a free ball at the origin
    pub(crate) fn spawn_ball(&mut self) -> EntityId {
        let size = self.sprites.ball;
        let tuning = self.settings.ball;
        let id = self
            .scene
            .spawn(|id| Entity::Ball(Ball::new(id, Vec2::ZERO, size, tuning, BALL_DEPTH)));
        self.balls.push(id);
        id
    }

    /// Pair a ball with the player (both sides) and snap it into place
    pub fn attach(&mut self, ball_id: EntityId) -> Result<(), SimError> {
        if self.scene.ball(ball_id).is_none() {
            return Err(SimError::UnknownEntity(ball_id));
        }
        let carrier = self.carrier()?;
        let basket = self.basket_placement();

        let previous = self
            .scene
            .player_mut(self.player)
            .ok_or(SimError::UnknownEntity(self.player))?
            .attached_ball
            .replace(ball_id);
        if let Some(previous) = previous.filter(|&p| p != ball_id) {
            if let Some(old) = self.scene.ball_mut(previous) {
                old.attached_player = None;
            }
        }

        let ball = self
            .scene
            .ball_mut(ball_id)
            .ok_or(SimError::UnknownEntity(ball_id))?;
        let mut env = TickEnv {
            settings: &self.settings,
            direction: self.input.direction(),
            rng: &mut self.rng,
            carrier: Some(carrier),
            basket,
        };
        ball.attach(&mut env)
    }

    /// Release a ball from the player. Scores if it is let go inside the
    /// basket. Fails if the ball is not carried.
    pub fn detach(&mut self, ball_id: EntityId) -> Result<(), SimError> {
        let carrier = self.carrier()?;
        let basket = self.basket_placement();
        let inset = self.settings.basket_inset;

        let ball = self
            .scene
            .ball_mut(ball_id)
            .ok_or(SimError::UnknownEntity(ball_id))?;
        let scored = ball.detach(&carrier, basket, inset)?;

        if let Some(player) = self.scene.player_mut(self.player) {
            player.attached_ball = None;
        }
        if scored {
            self.score += 1;
            log::debug!("Ball {ball_id} released inside the basket, total {}", self.score);
            self.events.push(GameEvent::Scored { total: self.score });
        }
        Ok(())
    }

    /// Let go of the carried ball
    pub fn drop_ball(&mut self) -> Result<(), SimError> {
        if self.stage != GameStage::Playing {
            return Ok(());
        }
        match self.player().and_then(|p| p.attached_ball) {
            Some(ball) => self.detach(ball),
            None => Ok(()),
        }
    }

    /// Let go of the carried ball and throw it along the player's tilt
    pub fn shoot(&mut self) -> Result<(), SimError> {
        if self.stage != GameStage::Playing {
            return Ok(());
        }
        let Some(ball_id) = self.player().and_then(|p| p.attached_ball) else {
            return Ok(());
        };
        let tilt = self.carrier()?.tilt;
        self.detach(ball_id)?;

        let launch = LinearForce::new(
            self.settings.jump_force * self.settings.shoot_multiplier,
            tilt,
        );
        let ball = self
            .scene
            .ball_mut(ball_id)
            .ok_or(SimError::UnknownEntity(ball_id))?;
        ball.body.apply_impulse(launch);
        Ok(())
    }

    /// Title → Playing, Terminal → Title; ignored while playing
    pub fn advance_stage(&mut self) -> Result<GameStage, SimError> {
        match self.stage {
            GameStage::TitleScreen => self.start_game(),
            GameStage::Terminal => self.reset()?,
            GameStage::Playing => {
                log::debug!("Advance ignored while playing");
            }
        }
        Ok(self.stage)
    }

    pub fn cycle_background(&mut self) {
        if self.stage == GameStage::Playing {
            self.background = (self.background + 1) % self.settings.background_count;
        }
    }

    /// Apply a discrete action
    pub fn handle(&mut self, action: Action) -> Result<(), SimError> {
        match action {
            Action::Shoot => self.shoot(),
            Action::Drop => self.drop_ball(),
            Action::AdvanceStage => self.advance_stage().map(|_| ()),
            Action::CycleBackground => {
                self.cycle_background();
                Ok(())
            }
        }
    }

    pub fn set_left(&mut self, down: bool) {
        self.input.left_down = down;
    }

    pub fn set_right(&mut self, down: bool) {
        self.input.right_down = down;
    }

    /// Pointer press at a fraction of the screen size
    pub fn pointer_down(
        &mut self,
        x_fraction: f32,
        y_fraction: f32,
    ) -> Result<PointerResponse, SimError> {
        match self.stage {
            GameStage::TitleScreen if is_fullscreen_corner(x_fraction, y_fraction) => {
                return Ok(PointerResponse::RequestFullscreen);
            }
            GameStage::TitleScreen | GameStage::Terminal => {
                self.advance_stage()?;
            }
            GameStage::Playing => match TouchZone::classify(x_fraction, y_fraction) {
                TouchZone::HoldLeft => self.set_left(true),
                TouchZone::HoldRight => self.set_right(true),
                TouchZone::Action(action) => self.handle(action)?,
            },
        }
        Ok(PointerResponse::Handled)
    }

    /// Pointer lifted: held directions are released
    pub fn pointer_up(&mut self) {
        if self.stage == GameStage::Playing {
            self.input.release_all();
        }
    }

    fn start_game(&mut self) {
        self.scene.set_all_visible(true);
        self.clock.start();
        self.set_stage(GameStage::Playing);
    }

    /// Stop the simulation and hide the round
    pub(crate) fn die(&mut self, cause: DeathCause) {
        self.clock.stop();
        self.scene.set_all_visible(false);
        log::info!("Player died: {cause:?} with score {}", self.score);
        self.events.push(GameEvent::Died(cause));
        self.set_stage(GameStage::Terminal);
    }

    /// Tear down and rebuild the round on the title screen
    fn reset(&mut self) -> Result<(), SimError> {
        self.input.release_all();
        self.clock.stop();
        self.scene.clear();
        self.balls.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.background = self.rng.random_range(0..self.settings.background_count);
        self.setup_sprites()?;
        log::info!("Round reset");
        self.set_stage(GameStage::TitleScreen);
        Ok(())
    }

    fn set_stage(&mut self, to: GameStage) {
        let from = self.stage;
        self.stage = to;
        log::info!("Stage {from:?} -> {to:?}");
        self.events.push(GameEvent::StageChanged { from, to });
    }

    pub(crate) fn carrier(&self) -> Result<Carrier, SimError> {
        self.player()
            .map(Player::carrier)
            .ok_or(SimError::UnknownEntity(self.player))
    }

    pub(crate) fn basket_placement(&self) -> Option<Placement> {
        self.basket().map(|b| b.placement)
    }

    // --- Accessors ---

    pub fn stage(&self) -> GameStage {
        self.stage
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn background(&self) -> usize {
        self.background
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Whether the fixed-step clock is running
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn direction(&self) -> crate::input::Direction {
        self.input.direction()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn player(&self) -> Option<&Player> {
        self.scene.player(self.player)
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.scene.player_mut(self.player)
    }

    pub fn hoop(&self) -> Option<&Hoop> {
        self.scene.hoop(self.hoop)
    }

    pub fn basket(&self) -> Option<&Basket> {
        self.scene.basket(self.basket)
    }

    pub fn balls(&self) -> impl Iterator<Item = &Ball> + '_ {
        self.balls.iter().filter_map(|&id| self.scene.ball(id))
    }

    pub fn ball_mut(&mut self, id: EntityId) -> Option<&mut Ball> {
        self.scene.ball_mut(id)
    }

    /// Ball the player is holding, if any
    pub fn carried_ball(&self) -> Option<&Ball> {
        self.player()
            .and_then(|p| p.attached_ball)
            .and_then(|id| self.scene.ball(id))
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
