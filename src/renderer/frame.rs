//! Draw commands for one displayed frame
//!
//! The simulation knows nothing about canvases or GPUs; it describes a frame
//! as an ordered list of commands and the host paints them in order.

use glam::Vec2;

use crate::sim::SpriteKind;

/// RGBA, each channel 0-1
pub type Color = [f32; 4];

/// Colors for screen elements
pub mod colors {
    use super::Color;

    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const SCORE: Color = [0.702, 0.349, 0.0, 1.0];
    pub const DEATH_TEXT: Color = [1.0, 0.0, 0.0, 1.0];
    pub const LEGEND_TEXT: Color = [0.867, 0.867, 0.867, 1.0];
    pub const LEGEND_PANEL: Color = [0.0, 0.0, 0.0, 0.4];
}

/// Which point of a sprite `pos` names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivot {
    /// Rotate about the center
    Center,
    /// Rotate about the top-left corner
    TopLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole screen
    Clear { color: Color },
    /// Playfield background image
    Background { index: usize },
    /// Title screen artwork with the touch zones marked
    TitleBackdrop,
    /// Looping death clip, centered
    Cinematic,
    /// Filled rectangle
    Panel { pos: Vec2, size: Vec2, color: Color },
    Sprite {
        kind: SpriteKind,
        pos: Vec2,
        size: Vec2,
        rotation: f32,
        pivot: Pivot,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

/// Commands in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, color: Color, align: TextAlign) {
        self.push(DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            color,
            align,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sprite commands only, in paint order
    pub fn sprites(&self) -> impl Iterator<Item = SpriteKind> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { kind, .. } => Some(*kind),
            _ => None,
        })
    }
}
