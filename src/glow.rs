//! Glowing triangle with a particle halo and a glyph on top.

use std::f64::consts::{FRAC_PI_4, PI};

use rand::Rng;

use crate::blend::lerp_color;
use crate::command::{RenderCommand, RenderCommands, Rgba, TextAlign};
use crate::particles::{ParticlePool, Vec2, SPAWN_PER_TICK, TRIANGLE};

/// Colour at the root of each glow fan.
pub const BASE_COLOR: Rgba = Rgba::BLACK;
/// Colour the fan fades towards; also the triangle fill.
pub const GLOW_COLOR: Rgba = Rgba::new(15, 97, 138, 166);

pub const SEGMENTS_PER_VERTEX: usize = 30;
/// Interpolation step between consecutive segments of a fan.
pub const FRACTION_STEP: f32 = 1.0 / SEGMENTS_PER_VERTEX as f32 - 0.01;
const SEGMENT_WIDTH: f64 = 2.0;

/// Per-vertex placement of the fan: horizontal nudge from the vertex and the
/// rotation pointing the fan away from the centroid.
const FAN_PLACEMENT: [(f32, f64); 3] = [
    (0.0, PI),
    (5.0, FRAC_PI_4 + 0.28),
    (-5.0, -FRAC_PI_4 - 0.28),
];

pub const GLYPH: &str = "S";
pub const GLYPH_FONT: &str = "120px Roboto";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
        }
    }
}

/// One stroke of a vertex fan, in fan-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowSegment {
    pub vertex: usize,
    pub index: usize,
    pub fraction: f32,
    pub color: Rgba,
    /// Fan origin relative to the canvas centre.
    pub offset: Vec2,
    pub angle: f64,
    pub from: Vec2,
    pub to: Vec2,
    pub width: f64,
}

impl GlowSegment {
    fn push_commands(&self, out: &mut RenderCommands) {
        out.push(RenderCommand::Save);
        out.push(RenderCommand::Translate {
            x: self.offset.x as f64,
            y: self.offset.y as f64,
        });
        out.push(RenderCommand::Rotate(self.angle));
        out.push(RenderCommand::Line {
            from: self.from,
            to: self.to,
            color: self.color,
            width: self.width,
        });
        out.push(RenderCommand::Restore);
    }
}

/// The 90 strokes making up the static glow, vertex by vertex.
pub fn glow_segments() -> Vec<GlowSegment> {
    let mut segments = Vec::with_capacity(TRIANGLE.len() * SEGMENTS_PER_VERTEX);
    for (vertex, (corner, &(nudge, angle))) in TRIANGLE.iter().zip(&FAN_PLACEMENT).enumerate() {
        let offset = Vec2::new(corner.x + nudge, corner.y);
        let mut fraction = 0.0f32;
        for index in 0..SEGMENTS_PER_VERTEX {
            let j = index as f32;
            segments.push(GlowSegment {
                vertex,
                index,
                fraction,
                color: lerp_color(BASE_COLOR, GLOW_COLOR, fraction),
                offset,
                angle,
                from: Vec2::new(-j, j * 2.0),
                to: Vec2::new(1.0 + j, j * 2.0),
                width: SEGMENT_WIDTH,
            });
            fraction += FRACTION_STEP;
        }
    }
    segments
}

/// Owns everything the glow effect keeps between frames.
pub struct GlowScene<R> {
    config: GlowConfig,
    pool: ParticlePool,
    segments: Vec<GlowSegment>,
    rng: R,
    ticks: u64,
}

impl<R: Rng> GlowScene<R> {
    pub fn new(config: GlowConfig, rng: R) -> Self {
        Self {
            config,
            pool: ParticlePool::new(),
            segments: glow_segments(),
            rng,
            ticks: 0,
        }
    }

    pub fn config(&self) -> GlowConfig {
        self.config
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Build one frame. Expired dots are dropped before survivors move, and
    /// new dots only appear on the next frame.
    pub fn on_tick(&mut self) -> RenderCommands {
        let w = self.config.width as f64;
        let h = self.config.height as f64;
        let mut out = RenderCommands::with_capacity(
            8 + self.segments.len() * 5 + self.pool.len() + SPAWN_PER_TICK,
        );

        out.push(RenderCommand::FillRect { x: 0.0, y: 0.0, w, h, color: Rgba::BLACK });
        out.push(RenderCommand::Save);
        out.push(RenderCommand::Translate { x: w / 2.0, y: h / 2.0 });
        out.push(RenderCommand::Triangle {
            points: TRIANGLE,
            fill: GLOW_COLOR,
            stroke: Rgba::BLACK,
        });
        for segment in &self.segments {
            segment.push_commands(&mut out);
        }

        let removed = self.pool.cleanup();
        self.pool.update_and_draw(&mut out);
        self.pool.spawn(&mut self.rng, SPAWN_PER_TICK);

        out.push(RenderCommand::Text {
            text: GLYPH.to_string(),
            x: 0.0,
            y: 5.0,
            font: GLYPH_FONT.to_string(),
            align: TextAlign::Center,
            color: Rgba::WHITE,
        });
        out.push(RenderCommand::Restore);

        self.ticks += 1;
        log::trace!(
            "glow tick {}: removed {removed}, live {}",
            self.ticks,
            self.pool.len()
        );
        out
    }
}
