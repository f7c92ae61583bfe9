//! Frame building
//!
//! `render_frame` reads the world and never changes it: background first,
//! then visible entities back to front, then the score overlay.

pub mod frame;

pub use frame::{Color, DrawCommand, Frame, Pivot, TextAlign, colors};

use glam::Vec2;

use crate::sim::{GameStage, World};

/// Title text size in pixels
const TITLE_SIZE: f32 = 200.0;

/// Describe the current frame for the host to paint
pub fn render_frame(world: &World) -> Frame {
    let mut frame = Frame::new();
    match world.stage() {
        GameStage::TitleScreen => render_title(world, &mut frame),
        GameStage::Playing => {
            frame.push(DrawCommand::Background {
                index: world.background(),
            });
            render_sprites(world, &mut frame);
            render_overlay(world, &mut frame);
        }
        GameStage::Terminal => {
            render_death(world, &mut frame);
            render_overlay(world, &mut frame);
        }
    }
    frame
}

fn render_sprites(world: &World, frame: &mut Frame) {
    for entity in world.scene().iter() {
        let renderable = entity.as_renderable();
        if renderable.is_visible() {
            renderable.render(frame);
        }
    }
}

fn render_overlay(world: &World, frame: &mut Frame) {
    frame.text(
        format!("🏀{}", world.score()),
        Vec2::new(world.settings.width / 2.0, 15.0),
        30.0,
        colors::SCORE,
        TextAlign::Center,
    );
}

fn render_title(world: &World, frame: &mut Frame) {
    let (w, h) = (world.settings.width, world.settings.height);
    frame.push(DrawCommand::TitleBackdrop);
    frame.text("BasketFall", Vec2::new(w / 2.0, h / 2.0), TITLE_SIZE, colors::WHITE, TextAlign::Center);

    // Control legend
    frame.push(DrawCommand::Panel {
        pos: Vec2::new(w / 3.0 - w / 10.0, h - 175.0),
        size: Vec2::new(w / 3.0 + w / 5.0, 130.0),
        color: colors::LEGEND_PANEL,
    });
    let legend = [
        ("[Enter]: start", Vec2::new(w / 2.0, h - 120.0), TextAlign::Center),
        ("[Space]: shoot", Vec2::new(w / 2.0, h - 70.0), TextAlign::Center),
        ("[◀]: tilt left", Vec2::new(2.0 * w / 5.0, h - 120.0), TextAlign::Right),
        ("[E]: drop", Vec2::new(2.0 * w / 5.0, h - 70.0), TextAlign::Right),
        ("[▶]: tilt right", Vec2::new(3.0 * w / 5.0, h - 120.0), TextAlign::Left),
        ("[B]: background", Vec2::new(3.0 * w / 5.0, h - 70.0), TextAlign::Left),
    ];
    for (text, pos, align) in legend {
        frame.text(text, pos, 40.0, colors::LEGEND_TEXT, align);
    }
}

fn render_death(world: &World, frame: &mut Frame) {
    let (w, h) = (world.settings.width, world.settings.height);
    frame.push(DrawCommand::Clear {
        color: colors::BLACK,
    });
    frame.push(DrawCommand::Cinematic);
    frame.text("TOT", Vec2::new(w / 2.0, h / 2.0), TITLE_SIZE * 2.0, colors::DEATH_TEXT, TextAlign::Center);
}
