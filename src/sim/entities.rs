//! Player, ball, hoop and basket
//!
//! Capabilities are traits: everything on screen is [`Renderable`], and only
//! the two physics bodies are [`Tickable`].

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{LinearForce, PhysicsBody, UP};
use super::collision::{Placement, point_in_basket};
use super::geometry::CenteredRotatable;
use super::scene::EntityId;
use super::tick::{Carrier, DeathCause, TickEnv, TickOutcome};
use crate::error::SimError;
use crate::normalize_angle;
use crate::renderer::{DrawCommand, Frame, Pivot};
use crate::settings::BodyTuning;

/// The four sprite assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Ball,
    Hoop,
    Basket,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 4] = [
        SpriteKind::Player,
        SpriteKind::Ball,
        SpriteKind::Hoop,
        SpriteKind::Basket,
    ];
}

/// Something painted in depth order
pub trait Renderable {
    /// Paint order key; smaller is further back
    fn depth(&self) -> i32;
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    /// Append draw commands for this entity (only called when visible)
    fn render(&self, frame: &mut Frame);
}

/// Something advanced once per simulation tick
pub trait Tickable {
    fn tick(&mut self, env: &mut TickEnv<'_>) -> TickOutcome;
}

/// The tilting thrower
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub body: PhysicsBody,
    pub depth: i32,
    pub visible: bool,
    /// Ball currently carried (owned by the scene)
    pub attached_ball: Option<EntityId>,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2, size: Vec2, tuning: BodyTuning, depth: i32) -> Self {
        Self {
            id,
            body: PhysicsBody::new(pos, size, tuning),
            depth,
            visible: false,
            attached_ball: None,
        }
    }

    /// Tilted a quarter turn or more from upright
    pub fn is_toppled(&self) -> bool {
        normalize_angle(self.body.tilt).abs() >= FRAC_PI_2
    }

    /// Snapshot a ball needs to follow or leave this player
    pub fn carrier(&self) -> Carrier {
        Carrier {
            id: self.id,
            pos: self.body.pos,
            vel: self.body.vel,
            speed_angle: self.body.speed_angle,
            tilt: self.body.tilt,
            top_left: self.body.oriented_rect().top_left(),
        }
    }
}

impl Tickable for Player {
    fn tick(&mut self, env: &mut TickEnv<'_>) -> TickOutcome {
        let settings = env.settings;
        let margin = settings.width * settings.off_screen_margin;
        let bounds = self.body.oriented_rect().bounding_box();
        if bounds.right() < -margin || bounds.left() > settings.width + margin {
            return TickOutcome::Died(DeathCause::OffScreen);
        }

        // Spin: random wobble, player control, drag
        let fluctuation = (env.rng.random::<f32>() - 0.5) * settings.tilt_fluctuation;
        let control = env.direction.sign() * settings.tilt_control_torque;
        self.body.clear_torques();
        self.body.add_torque(fluctuation + control);
        self.body.add_torque(self.body.angular_drag());
        self.body.integrate_rotation();

        self.body.clear_forces();
        self.body.add_gravity(settings.gravity);

        let rect = self.body.oriented_rect();
        if rect.bounding_box().bottom() > settings.height {
            if self.is_toppled() {
                return TickOutcome::Died(DeathCause::Toppled);
            }
            if rect.bottom_right().y > settings.height && self.body.vel.y > 0.0 {
                // Landing: stop the fall, cancel gravity, bounce along the tilt
                self.body.vel.y = 0.0;
                let applied = self.body.compute_force_y();
                self.body.add_force(LinearForce::new(applied, UP));
                let tilt = self.body.tilt;
                self.body.add_force(LinearForce::new(
                    settings.jump_force * tilt.cos().abs(),
                    tilt,
                ));
            }
        }

        self.body.add_drag_x();
        self.body.integrate_x();
        self.body.add_drag_y();
        self.body.integrate_y();

        TickOutcome::Continue
    }
}

impl Renderable for Player {
    fn depth(&self) -> i32 {
        self.depth
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn render(&self, frame: &mut Frame) {
        frame.push(DrawCommand::Sprite {
            kind: SpriteKind::Player,
            pos: self.body.pos,
            size: self.body.size,
            rotation: self.body.tilt,
            pivot: Pivot::Center,
        });
    }
}

/// The thrown ball. Its position is the point that rides the player's
/// top-left corner and is tested against the basket.
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: EntityId,
    pub body: PhysicsBody,
    pub depth: i32,
    pub visible: bool,
    /// Player carrying this ball
    pub attached_player: Option<EntityId>,
    /// Inside the basket as of the last tick
    pub contacting: bool,
    /// Carrier tilt while attached, for drawing
    carried_tilt: f32,
}

impl Ball {
    pub fn new(id: EntityId, pos: Vec2, size: Vec2, tuning: BodyTuning, depth: i32) -> Self {
        Self {
            id,
            body: PhysicsBody::new(pos, size, tuning),
            depth,
            visible: false,
            attached_player: None,
            contacting: false,
            carried_tilt: 0.0,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached_player.is_some()
    }

    pub fn in_basket(&self, basket: Placement, inset: f32) -> bool {
        point_in_basket(self.body.pos, basket, inset)
    }

    /// Ride `env.carrier` and snap to it straight away. The caller records
    /// the pairing on the player side.
    pub fn attach(&mut self, env: &mut TickEnv<'_>) -> Result<(), SimError> {
        let carrier = env.carrier.ok_or(SimError::UnknownEntity(self.id))?;
        self.attached_player = Some(carrier.id);
        self.tick(env);
        Ok(())
    }

    /// Leave the carrier with its linear velocity plus the swing of its spin
    /// at this ball's arm. Returns whether the release itself scored.
    pub fn detach(
        &mut self,
        carrier: &Carrier,
        basket: Option<Placement>,
        inset: f32,
    ) -> Result<bool, SimError> {
        match self.attached_player {
            None => return Err(SimError::BallNotAttached(self.id)),
            Some(id) if id != carrier.id => return Err(SimError::UnknownEntity(id)),
            Some(_) => {}
        }

        let arm = self.body.pos.distance(carrier.pos);
        let swing = carrier.speed_angle * arm;
        self.body.vel = carrier.vel + Vec2::new(swing * carrier.tilt.cos(), swing * carrier.tilt.sin());

        let scored = basket.is_some_and(|b| self.in_basket(b, inset));
        if scored {
            self.body.vel.x = 0.0;
            self.contacting = true;
        }

        self.attached_player = None;
        self.carried_tilt = 0.0;
        Ok(scored)
    }
}

impl Tickable for Ball {
    fn tick(&mut self, env: &mut TickEnv<'_>) -> TickOutcome {
        if let Some(player) = self.attached_player {
            if let Some(carrier) = env.carrier.filter(|c| c.id == player) {
                self.body.pos = carrier.top_left;
                self.carried_tilt = carrier.tilt;
            }
            return TickOutcome::Continue;
        }

        let settings = env.settings;
        self.body.clear_forces();
        if self.body.pos.y + self.body.size.y > settings.height {
            return TickOutcome::Lost;
        }

        let mut scored = false;
        let inside = env
            .basket
            .is_some_and(|b| self.in_basket(b, settings.basket_inset));
        if inside {
            self.body.vel.x = 0.0;
            if !self.contacting {
                self.body.vel.y = 0.0;
                scored = true;
            }
        }
        self.contacting = inside;

        self.body.step_linear(settings.gravity);

        if scored {
            TickOutcome::Scored
        } else {
            TickOutcome::Continue
        }
    }
}

impl Renderable for Ball {
    fn depth(&self) -> i32 {
        self.depth
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn render(&self, frame: &mut Frame) {
        frame.push(DrawCommand::Sprite {
            kind: SpriteKind::Ball,
            pos: self.body.pos,
            size: self.body.size,
            rotation: self.carried_tilt,
            pivot: Pivot::TopLeft,
        });
    }
}

/// Fixed backboard sprite
#[derive(Debug, Clone, Copy)]
pub struct Hoop {
    pub id: EntityId,
    pub placement: Placement,
    pub depth: i32,
    pub visible: bool,
}

/// Fixed scoring net below the hoop
#[derive(Debug, Clone, Copy)]
pub struct Basket {
    pub id: EntityId,
    pub placement: Placement,
    pub depth: i32,
    pub visible: bool,
}

impl Hoop {
    pub fn new(id: EntityId, pos: Vec2, size: Vec2, depth: i32) -> Self {
        Self {
            id,
            placement: Placement { pos, size },
            depth,
            visible: false,
        }
    }
}

impl Basket {
    pub fn new(id: EntityId, pos: Vec2, size: Vec2, depth: i32) -> Self {
        Self {
            id,
            placement: Placement { pos, size },
            depth,
            visible: false,
        }
    }

    pub fn contains(&self, point: Vec2, inset: f32) -> bool {
        point_in_basket(point, self.placement, inset)
    }
}

macro_rules! static_sprite_renderable {
    ($ty:ty, $kind:expr) => {
        impl Renderable for $ty {
            fn depth(&self) -> i32 {
                self.depth
            }

            fn is_visible(&self) -> bool {
                self.visible
            }

            fn set_visible(&mut self, visible: bool) {
                self.visible = visible;
            }

            fn render(&self, frame: &mut Frame) {
                frame.push(DrawCommand::Sprite {
                    kind: $kind,
                    pos: self.placement.pos,
                    size: self.placement.size,
                    rotation: 0.0,
                    pivot: Pivot::TopLeft,
                });
            }
        }
    };
}

static_sprite_renderable!(Hoop, SpriteKind::Hoop);
static_sprite_renderable!(Basket, SpriteKind::Basket);

/// Any entity the scene can hold
#[derive(Debug, Clone)]
pub enum Entity {
    Player(Player),
    Ball(Ball),
    Hoop(Hoop),
    Basket(Basket),
}

impl Entity {
    pub fn kind(&self) -> SpriteKind {
        match self {
            Entity::Player(_) => SpriteKind::Player,
            Entity::Ball(_) => SpriteKind::Ball,
            Entity::Hoop(_) => SpriteKind::Hoop,
            Entity::Basket(_) => SpriteKind::Basket,
        }
    }

    pub fn as_renderable(&self) -> &dyn Renderable {
        match self {
            Entity::Player(p) => p,
            Entity::Ball(b) => b,
            Entity::Hoop(h) => h,
            Entity::Basket(b) => b,
        }
    }

    pub fn as_renderable_mut(&mut self) -> &mut dyn Renderable {
        match self {
            Entity::Player(p) => p,
            Entity::Ball(b) => b,
            Entity::Hoop(h) => h,
            Entity::Basket(b) => b,
        }
    }

    /// Static sprites are not tickable
    pub fn as_tickable_mut(&mut self) -> Option<&mut dyn Tickable> {
        match self {
            Entity::Player(p) => Some(p),
            Entity::Ball(b) => Some(b),
            Entity::Hoop(_) | Entity::Basket(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;
    use crate::settings::Settings;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::PI;

    const PLAYER_SIZE: Vec2 = Vec2::new(60.0, 160.0);
    const BALL_SIZE: Vec2 = Vec2::new(30.0, 30.0);

    fn player_at(pos: Vec2) -> Player {
        Player::new(EntityId(0), pos, PLAYER_SIZE, BodyTuning::player(), 0)
    }

    fn ball_at(pos: Vec2) -> Ball {
        Ball::new(EntityId(1), pos, BALL_SIZE, BodyTuning::ball(), -2)
    }

    fn env<'a>(settings: &'a Settings, rng: &'a mut Pcg32) -> TickEnv<'a> {
        TickEnv {
            settings,
            direction: Direction::None,
            rng,
            carrier: None,
            basket: None,
        }
    }

    #[test]
    fn test_player_falls_without_spin() {
        let settings = Settings {
            tilt_fluctuation: 0.0,
            ..Settings::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = player_at(Vec2::new(640.0, 300.0));
        let outcome = player.tick(&mut env(&settings, &mut rng));
        assert_eq!(outcome, TickOutcome::Continue);
        assert_eq!(player.body.tilt, 0.0);
        assert!(player.body.vel.y > 0.0);
        assert!(player.body.pos.y > 300.0);
    }

    #[test]
    fn test_direction_tilts_player() {
        let settings = Settings {
            tilt_fluctuation: 0.0,
            ..Settings::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = player_at(Vec2::new(640.0, 300.0));
        let mut env = env(&settings, &mut rng);
        env.direction = Direction::Right;
        player.tick(&mut env);
        assert!(player.body.speed_angle > 0.0);
        env.direction = Direction::Left;
        let mut other = player_at(Vec2::new(640.0, 300.0));
        other.tick(&mut env);
        assert!(other.body.speed_angle < 0.0);
    }

    #[test]
    fn test_player_bounces_off_floor() {
        let settings = Settings {
            tilt_fluctuation: 0.0,
            ..Settings::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        // Bottom edge already below the floor, moving down
        let mut player = player_at(Vec2::new(640.0, settings.height - 79.0));
        player.body.vel.y = 2.0;
        let outcome = player.tick(&mut env(&settings, &mut rng));
        assert_eq!(outcome, TickOutcome::Continue);
        assert!(player.body.vel.y < 0.0, "bounce should send the player up");
        assert!(player.body.vel.x.abs() < 1e-6, "upright bounce stays vertical");
    }

    #[test]
    fn test_tilted_bounce_pushes_sideways() {
        let settings = Settings {
            tilt_fluctuation: 0.0,
            ..Settings::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = player_at(Vec2::new(640.0, settings.height - 70.0));
        player.body.tilt = 0.3;
        player.body.vel.y = 2.0;
        player.tick(&mut env(&settings, &mut rng));
        assert!(player.body.vel.x > 0.0);
    }

    #[test]
    fn test_toppled_player_dies_on_floor() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = player_at(Vec2::new(640.0, settings.height));
        player.body.tilt = PI;
        assert!(player.is_toppled());
        let outcome = player.tick(&mut env(&settings, &mut rng));
        assert_eq!(outcome, TickOutcome::Died(DeathCause::Toppled));
    }

    #[test]
    fn test_full_turn_is_not_toppled() {
        let mut player = player_at(Vec2::ZERO);
        player.body.tilt = 2.0 * PI + 0.2;
        assert!(!player.is_toppled());
        player.body.tilt = -2.0 * PI - 1.7;
        assert!(player.is_toppled());
    }

    #[test]
    fn test_player_off_screen_dies() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut left = player_at(Vec2::new(-200.0, 300.0));
        assert_eq!(
            left.tick(&mut env(&settings, &mut rng)),
            TickOutcome::Died(DeathCause::OffScreen)
        );
        let mut right = player_at(Vec2::new(settings.width + 200.0, 300.0));
        assert_eq!(
            right.tick(&mut env(&settings, &mut rng)),
            TickOutcome::Died(DeathCause::OffScreen)
        );
        // Partly off screen is still alive
        let mut edge = player_at(Vec2::new(-20.0, 300.0));
        assert_eq!(edge.tick(&mut env(&settings, &mut rng)), TickOutcome::Continue);
    }

    #[test]
    fn test_attached_ball_rides_top_left_corner() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = player_at(Vec2::new(640.0, 360.0));
        player.body.tilt = 0.4;
        let mut ball = ball_at(Vec2::ZERO);
        let mut env = env(&settings, &mut rng);
        env.carrier = Some(player.carrier());
        ball.attach(&mut env).unwrap();
        assert_eq!(ball.attached_player, Some(player.id));
        assert_eq!(ball.body.pos, player.body.oriented_rect().top_left());
        assert_eq!(ball.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_detach_adds_swing_velocity() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = player_at(Vec2::new(640.0, 360.0));
        let (vx, vy, omega, theta) = (0.7, -1.3, 0.02, 0.35);
        player.body.vel = Vec2::new(vx, vy);
        player.body.speed_angle = omega;
        player.body.tilt = theta;

        let carrier = player.carrier();
        let mut ball = ball_at(Vec2::ZERO);
        let mut env = env(&settings, &mut rng);
        env.carrier = Some(carrier);
        ball.attach(&mut env).unwrap();

        let arm = ball.body.pos.distance(player.body.pos);
        let scored = ball.detach(&carrier, None, settings.basket_inset).unwrap();
        assert!(!scored);
        assert!(!ball.is_attached());

        let expected = Vec2::new(
            vx + omega * arm * theta.cos(),
            vy + omega * arm * theta.sin(),
        );
        assert!((ball.body.vel - expected).length() < 1e-5);
        // Arm is the half diagonal
        assert!((arm - PLAYER_SIZE.length() / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_detach_unattached_ball_fails() {
        let player = player_at(Vec2::new(640.0, 360.0));
        let mut ball = ball_at(Vec2::ZERO);
        assert_eq!(
            ball.detach(&player.carrier(), None, 3.0),
            Err(SimError::BallNotAttached(ball.id))
        );
    }

    #[test]
    fn test_ball_scores_once_per_entry() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let basket = Placement {
            pos: Vec2::new(500.0, 500.0),
            size: Vec2::new(160.0, 80.0),
        };
        let mut ball = ball_at(Vec2::new(580.0, 540.0));
        ball.body.vel = Vec2::new(2.0, 1.0);
        let mut env = env(&settings, &mut rng);
        env.basket = Some(basket);

        assert_eq!(ball.tick(&mut env), TickOutcome::Scored);
        assert!(ball.contacting);
        assert_eq!(ball.body.vel.x, 0.0);
        // Still inside: no second score
        assert_eq!(ball.tick(&mut env), TickOutcome::Continue);
        assert!(ball.contacting);

        // Leave the basket then come back
        ball.body.pos = Vec2::new(580.0, 300.0);
        ball.body.vel = Vec2::ZERO;
        assert_eq!(ball.tick(&mut env), TickOutcome::Continue);
        assert!(!ball.contacting);
        ball.body.pos = Vec2::new(580.0, 540.0);
        assert_eq!(ball.tick(&mut env), TickOutcome::Scored);
    }

    #[test]
    fn test_ball_below_floor_is_lost() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ball = ball_at(Vec2::new(300.0, settings.height - 10.0));
        assert_eq!(ball.tick(&mut env(&settings, &mut rng)), TickOutcome::Lost);
    }

    #[test]
    fn test_renderables_report_depth_and_visibility() {
        let mut hoop = Hoop::new(EntityId(2), Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), -3);
        assert_eq!(hoop.depth(), -3);
        assert!(!hoop.is_visible());
        hoop.set_visible(true);
        let mut frame = Frame::default();
        hoop.render(&mut frame);
        assert_eq!(
            frame.commands(),
            &[DrawCommand::Sprite {
                kind: SpriteKind::Hoop,
                pos: Vec2::new(1.0, 2.0),
                size: Vec2::new(3.0, 4.0),
                rotation: 0.0,
                pivot: Pivot::TopLeft,
            }]
        );

        let mut entity = Entity::Basket(Basket::new(EntityId(3), Vec2::ZERO, Vec2::ONE, -1));
        assert!(entity.as_tickable_mut().is_none());
        assert_eq!(entity.kind(), SpriteKind::Basket);
    }
}
