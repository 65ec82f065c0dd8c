//! Drawing vocabulary shared by both effects.
//!
//! The effects never touch a canvas directly. Each tick they emit a list of
//! [`RenderCommand`]s which a host (the wasm painter, or a test) replays.

use std::fmt;

use crate::particles::Vec2;

/// 8-bit RGBA colour. Alpha uses the same 0..=255 scale as the channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// CSS colour string, e.g. `rgba(15, 97, 138, 0.651)`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Subset of `globalCompositeOperation` the effects use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositeOp {
    SourceOver,
    /// Per-channel maximum of source and destination.
    Lighten,
}

impl CompositeOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompositeOp::SourceOver => "source-over",
            CompositeOp::Lighten => "lighten",
        }
    }
}

/// Decoded media a `DrawLayer` command refers to. The host owns the actual
/// element; the core only names it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Image,
    Video,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    FillRect { x: f64, y: f64, w: f64, h: f64, color: Rgba },
    SetComposite(CompositeOp),
    /// Draw the current contents of a layer (for video: the current frame)
    /// scaled to the given rectangle.
    DrawLayer { layer: Layer, x: f64, y: f64, w: f64, h: f64 },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Rotate(f64),
    Line { from: Vec2, to: Vec2, color: Rgba, width: f64 },
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    Triangle { points: [Vec2; 3], fill: Rgba, stroke: Rgba },
    Text { text: String, x: f64, y: f64, font: String, align: TextAlign, color: Rgba },
}

/// Everything one tick asks the host to draw, in order.
pub type RenderCommands = Vec<RenderCommand>;
