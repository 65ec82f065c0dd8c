//! Software reference for the colour math the canvas does for us.
//!
//! The browser performs the real `lighten` composite on the GPU; these
//! functions define what it must produce and back the glow gradient.

use crate::command::Rgba;
use crate::error::{Error, Result};

/// `lighten` on one channel: the brighter value wins.
#[inline]
pub fn lighten(a: u8, b: u8) -> u8 {
    a.max(b)
}

impl Rgba {
    /// Per-channel `lighten`. A black `other` leaves `self` untouched, a white
    /// one saturates it.
    pub fn lighten(self, other: Rgba) -> Rgba {
        Rgba {
            r: lighten(self.r, other.r),
            g: lighten(self.g, other.g),
            b: lighten(self.b, other.b),
            a: lighten(self.a, other.a),
        }
    }
}

/// Composite `src` onto `dst` in place with `lighten`. Both are tightly packed
/// RGBA8 buffers of the same size.
pub fn composite_lighten(dst: &mut [u8], src: &[u8]) -> Result<()> {
    if dst.len() != src.len() {
        return Err(Error::BufferMismatch {
            dst: dst.len(),
            src: src.len(),
        });
    }
    for (d, s) in dst.iter_mut().zip(src) {
        *d = lighten(*d, *s);
    }
    Ok(())
}

#[inline]
fn lerp_channel(from: u8, to: u8, amount: f32) -> u8 {
    let v = from as f32 + (to as f32 - from as f32) * amount;
    v.round().clamp(0.0, 255.0) as u8
}

/// Linear blend between two colours, alpha included. `amount` is clamped to
/// `[0, 1]`.
pub fn lerp_color(from: Rgba, to: Rgba, amount: f32) -> Rgba {
    let t = amount.clamp(0.0, 1.0);
    Rgba {
        r: lerp_channel(from.r, to.r, t),
        g: lerp_channel(from.g, to.g, t),
        b: lerp_channel(from.b, to.b, t),
        a: lerp_channel(from.a, to.a, t),
    }
}
