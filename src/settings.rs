//! Game tuning and asset sizes
//!
//! Loaded from JSON so balance can change without a rebuild. Every field has
//! a default, so a partial file only overrides what it names.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, SimError};
use crate::sim::SpriteKind;

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "BASKETFALL_CONFIG";

/// Drag coefficients, each scaled by `sign(v) * v²`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drag {
    pub angular: f32,
    pub x: f32,
    pub y: f32,
}

/// Mass proxy and drag for one kind of body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyTuning {
    /// Multiplies force into acceleration
    pub weight: f32,
    pub drag: Drag,
}

impl BodyTuning {
    pub fn player() -> Self {
        Self {
            weight: 120.0,
            drag: Drag {
                angular: 0.0075,
                x: 0.00001,
                y: 0.000005,
            },
        }
    }

    pub fn ball() -> Self {
        Self {
            weight: 20.0,
            drag: Drag {
                angular: 1e-10,
                x: 1e-5,
                y: 1e-5,
            },
        }
    }
}

/// Pixel sizes of the four sprites; these become the bodies' extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSizes {
    pub player: Vec2,
    pub ball: Vec2,
    pub hoop: Vec2,
    pub basket: Vec2,
}

impl SpriteSizes {
    pub fn size_of(&self, kind: SpriteKind) -> Vec2 {
        match kind {
            SpriteKind::Player => self.player,
            SpriteKind::Ball => self.ball,
            SpriteKind::Hoop => self.hoop,
            SpriteKind::Basket => self.basket,
        }
    }

    /// Every sprite must have a finite, positive size before a world is built
    pub fn validate(&self) -> Result<(), SimError> {
        for kind in SpriteKind::ALL {
            let size = self.size_of(kind);
            let resolved = size.is_finite() && size.x > 0.0 && size.y > 0.0;
            if !resolved {
                return Err(SimError::UnresolvedSprite {
                    kind,
                    width: size.x,
                    height: size.y,
                });
            }
        }
        Ok(())
    }
}

/// Game settings and tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    /// Number of playfield backgrounds to choose from
    pub background_count: usize,

    // === Clock ===
    pub tick_rate_hz: f32,
    pub max_substeps: u32,

    // === Forces ===
    pub gravity: f32,
    pub jump_force: f32,
    pub shoot_multiplier: f32,
    pub tilt_fluctuation: f32,
    pub tilt_control_torque: f32,

    // === Layout ===
    pub off_screen_margin: f32,
    pub basket_inset: f32,
    pub basket_drop: f32,

    // === Bodies ===
    pub player: BodyTuning,
    pub ball: BodyTuning,

    /// Run seed for tilt fluctuation and background choice
    pub seed: u64,

    /// Sprite sizes, when known ahead of asset loading
    pub sprites: Option<SpriteSizes>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            background_count: BACKGROUND_COUNT,

            tick_rate_hz: TICK_RATE_HZ,
            max_substeps: MAX_SUBSTEPS,

            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            shoot_multiplier: SHOOT_MULTIPLIER,
            tilt_fluctuation: TILT_FLUCTUATION,
            tilt_control_torque: TILT_CONTROL_TORQUE,

            off_screen_margin: OFF_SCREEN_MARGIN,
            basket_inset: BASKET_INSET,
            basket_drop: BASKET_DROP,

            player: BodyTuning::player(),
            ball: BodyTuning::ball(),

            seed: 0,
            sprites: None,
        }
    }
}

impl Settings {
    /// Seconds between simulation ticks
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }

    /// Reject values that would make the simulation produce NaN
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SimError::InvalidSettings(format!(
                    "{name} must be finite and positive, got {v}"
                )))
            }
        };
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("tick_rate_hz", self.tick_rate_hz)?;
        positive("player.weight", self.player.weight)?;
        positive("ball.weight", self.ball.weight)?;
        if self.max_substeps == 0 {
            return Err(SimError::InvalidSettings(
                "max_substeps must be at least 1".to_string(),
            ));
        }
        if self.background_count == 0 {
            return Err(SimError::InvalidSettings(
                "background_count must be at least 1".to_string(),
            ));
        }
        if let Some(sprites) = &self.sprites {
            sprites.validate()?;
        }
        Ok(())
    }

    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by `BASKETFALL_CONFIG`, or fall back to defaults
    pub fn load_or_default() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(e) => {
                log::warn!("Failed to load {path}: {e}, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!((settings.tick_interval() - 1.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "gravity": 0.5, "seed": 7 }"#).unwrap();
        assert_eq!(settings.gravity, 0.5);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.width, WIDTH);
        assert_eq!(settings.player, BodyTuning::player());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let err = Settings::from_json(r#"{ "tick_rate_hz": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(SimError::InvalidSettings(_))));
    }

    #[test]
    fn test_unresolved_sprite_rejected() {
        let sizes = SpriteSizes {
            player: Vec2::new(100.0, 200.0),
            ball: Vec2::new(40.0, 40.0),
            hoop: Vec2::new(0.0, 120.0),
            basket: Vec2::new(150.0, 80.0),
        };
        assert_eq!(
            sizes.validate(),
            Err(SimError::UnresolvedSprite {
                kind: SpriteKind::Hoop,
                width: 0.0,
                height: 120.0,
            })
        );

        let nan = SpriteSizes {
            ball: Vec2::new(f32::NAN, 40.0),
            ..sizes
        };
        assert!(matches!(
            nan.validate(),
            Err(SimError::UnresolvedSprite {
                kind: SpriteKind::Ball,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/basketfall.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
