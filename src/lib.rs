#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Two canvas effects: a video luminance mask and a glowing particle
//! triangle. The effect logic is plain Rust producing draw commands; the
//! browser glue lives in `wasm` and is only compiled for wasm32.

pub mod blend;
pub mod command;
pub mod error;
pub mod glow;
pub mod mask;
pub mod particles;

pub use command::{CompositeOp, Layer, RenderCommand, RenderCommands, Rgba, TextAlign};
pub use error::{Error, Result};
pub use glow::{GlowConfig, GlowScene};
pub use mask::{MaskCompositor, MaskConfig, MaskEvent, MaskState};
pub use particles::{Particle, ParticlePool, Vec2};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod demos;
    mod render;

    pub use demos::{glow, video_mask};
    pub use render::{AnimationLoop, Painter};

    impl From<crate::Error> for JsValue {
        fn from(err: crate::Error) -> Self {
            JsValue::from_str(&err.to_string())
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("canvas_fx_wasm loaded");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{glow, video_mask, AnimationLoop, Painter};
