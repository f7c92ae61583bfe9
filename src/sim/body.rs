//! Force-accumulating rigid body
//!
//! Forces and torques are collected into per-step scratch lists and then
//! integrated with explicit Euler. Weight multiplies force straight into
//! acceleration, so gravity is applied as `gravity / weight`.

use glam::Vec2;

use super::geometry::{CenteredRotatable, OrientedRect};
use crate::settings::{BodyTuning, Drag};
use crate::signed_square;

/// Angle pointing straight down (angles are clockwise from up)
pub const DOWN: f32 = std::f32::consts::PI;
/// Angle pointing right
pub const RIGHT: f32 = std::f32::consts::FRAC_PI_2;
/// Angle pointing straight up
pub const UP: f32 = 0.0;

/// A linear force: magnitude along an angle measured clockwise from up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearForce {
    pub magnitude: f32,
    pub angle: f32,
}

impl LinearForce {
    pub fn new(magnitude: f32, angle: f32) -> Self {
        Self { magnitude, angle }
    }
}

/// Rigid body state shared by the player and balls
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    /// Center of mass
    pub pos: Vec2,
    /// Accumulated rotation (radians, never wrapped)
    pub tilt: f32,
    pub size: Vec2,
    pub weight: f32,
    pub drag: Drag,
    pub vel: Vec2,
    pub speed_angle: f32,
    /// Results of the last projection/integration, kept for inspection
    pub force: Vec2,
    pub accel: Vec2,
    pub torque: f32,
    pub accel_angle: f32,
    linear_forces: Vec<LinearForce>,
    torques: Vec<f32>,
}

impl PhysicsBody {
    pub fn new(pos: Vec2, size: Vec2, tuning: BodyTuning) -> Self {
        Self {
            pos,
            tilt: 0.0,
            size,
            weight: tuning.weight,
            drag: tuning.drag,
            vel: Vec2::ZERO,
            speed_angle: 0.0,
            force: Vec2::ZERO,
            accel: Vec2::ZERO,
            torque: 0.0,
            accel_angle: 0.0,
            linear_forces: Vec::with_capacity(4),
            torques: Vec::with_capacity(2),
        }
    }

    pub fn pending_forces(&self) -> &[LinearForce] {
        &self.linear_forces
    }

    pub fn pending_torques(&self) -> &[f32] {
        &self.torques
    }

    // --- Rotation ---

    pub fn clear_torques(&mut self) {
        self.torques.clear();
    }

    pub fn add_torque(&mut self, torque: f32) {
        self.torques.push(torque);
    }

    /// Quadratic drag opposing the current spin
    pub fn angular_drag(&self) -> f32 {
        -signed_square(self.speed_angle) * self.drag.angular
    }

    /// Sum torques and advance spin and tilt by one step
    pub fn integrate_rotation(&mut self) {
        self.torque = self.torques.iter().sum();
        self.accel_angle = self.torque * self.weight;
        self.speed_angle += self.accel_angle;
        self.tilt += self.speed_angle;
    }

    // --- Translation ---

    pub fn clear_forces(&mut self) {
        self.linear_forces.clear();
    }

    pub fn add_force(&mut self, force: LinearForce) {
        self.linear_forces.push(force);
    }

    /// Gravity for this body: pulls down, scaled by the inverse of weight
    pub fn add_gravity(&mut self, gravity: f32) {
        self.add_force(LinearForce::new(gravity / self.weight, DOWN));
    }

    /// Quadratic drag against horizontal motion
    pub fn add_drag_x(&mut self) {
        let magnitude = -signed_square(self.vel.x) * self.drag.x;
        self.add_force(LinearForce::new(magnitude, RIGHT));
    }

    /// Quadratic drag against vertical motion (up is negative y)
    pub fn add_drag_y(&mut self) {
        let magnitude = signed_square(self.vel.y) * self.drag.y;
        self.add_force(LinearForce::new(magnitude, UP));
    }

    /// Horizontal sum of pending forces
    pub fn compute_force_x(&mut self) -> f32 {
        self.force.x = self
            .linear_forces
            .iter()
            .map(|f| f.magnitude * f.angle.sin())
            .sum();
        self.force.x
    }

    /// Vertical sum of pending forces (screen y grows down)
    pub fn compute_force_y(&mut self) -> f32 {
        self.force.y = self
            .linear_forces
            .iter()
            .map(|f| -f.magnitude * f.angle.cos())
            .sum();
        self.force.y
    }

    /// Project, accelerate and move along x
    pub fn integrate_x(&mut self) {
        self.compute_force_x();
        self.accel.x = self.force.x * self.weight;
        self.vel.x += self.accel.x;
        self.pos.x += self.vel.x;
    }

    /// Project, accelerate and move along y
    pub fn integrate_y(&mut self) {
        self.compute_force_y();
        self.accel.y = self.force.y * self.weight;
        self.vel.y += self.accel.y;
        self.pos.y += self.vel.y;
    }

    /// Gravity plus drag, integrated x then y. Drag reads the velocity
    /// before this step's update on each axis.
    pub fn step_linear(&mut self, gravity: f32) {
        self.clear_forces();
        self.add_gravity(gravity);
        self.add_drag_x();
        self.integrate_x();
        self.add_drag_y();
        self.integrate_y();
    }

    /// Apply one force for a single step on its own
    pub fn apply_impulse(&mut self, force: LinearForce) {
        self.clear_forces();
        self.add_force(force);
        self.compute_force_x();
        self.compute_force_y();
        self.accel = self.force * self.weight;
        self.vel += self.accel;
        self.pos += self.vel;
    }
}

impl CenteredRotatable for PhysicsBody {
    fn oriented_rect(&self) -> OrientedRect {
        OrientedRect::new(self.pos, self.size, self.tilt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRAVITY;

    fn body() -> PhysicsBody {
        PhysicsBody::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(10.0, 20.0),
            BodyTuning::player(),
        )
    }

    #[test]
    fn test_gravity_only_step_has_no_phantom_motion() {
        let mut b = body();
        b.clear_torques();
        b.add_torque(b.angular_drag());
        b.integrate_rotation();
        assert_eq!(b.speed_angle, 0.0);
        assert_eq!(b.tilt, 0.0);

        b.clear_forces();
        b.add_gravity(GRAVITY);
        let fx = b.compute_force_x();
        // sin(π) is not exactly zero in f32
        assert!(fx.abs() < 1e-9);
        assert!((b.compute_force_y() - GRAVITY / b.weight).abs() < 1e-9);
    }

    #[test]
    fn test_gravity_accelerates_by_gravity() {
        let mut b = body();
        b.step_linear(GRAVITY);
        // Drag reads the zero starting velocity, so only gravity acts
        assert!((b.vel.y - GRAVITY).abs() < 1e-6);
        assert!((b.pos.y - (100.0 + GRAVITY)).abs() < 1e-4);
        assert!(b.vel.x.abs() < 1e-6);
    }

    #[test]
    fn test_drag_opposes_velocity() {
        let mut b = body();
        b.vel = Vec2::new(3.0, -2.0);
        b.step_linear(0.0);
        assert!(b.vel.x < 3.0 && b.vel.x > 0.0);
        assert!(b.vel.y > -2.0 && b.vel.y < 0.0);
    }

    #[test]
    fn test_angular_drag_opposes_spin() {
        let mut b = body();
        b.speed_angle = 0.1;
        assert!(b.angular_drag() < 0.0);
        b.speed_angle = -0.1;
        assert!(b.angular_drag() > 0.0);
        b.speed_angle = 0.0;
        assert_eq!(b.angular_drag(), 0.0);
    }

    #[test]
    fn test_torque_integrates_into_tilt() {
        let mut b = body();
        b.clear_torques();
        b.add_torque(1e-6);
        b.add_torque(2e-6);
        b.integrate_rotation();
        let expected = 3e-6 * b.weight;
        assert!((b.speed_angle - expected).abs() < 1e-9);
        assert!((b.tilt - expected).abs() < 1e-9);
        assert_eq!(b.pending_torques().len(), 2);
        b.clear_torques();
        assert!(b.pending_torques().is_empty());
    }

    #[test]
    fn test_impulse_moves_along_angle() {
        let mut b = body();
        b.apply_impulse(LinearForce::new(0.01, RIGHT));
        assert!((b.vel.x - 0.01 * b.weight).abs() < 1e-5);
        assert!(b.vel.y.abs() < 1e-5);
        assert!((b.pos.x - (100.0 + 0.01 * b.weight)).abs() < 1e-4);

        let mut up = body();
        up.apply_impulse(LinearForce::new(0.01, UP));
        assert!(up.vel.y < 0.0);
        assert_eq!(up.pending_forces().len(), 1);
    }
}
