//! Video mask: an image composited with the running video under `lighten`.
//!
//! Black video pixels let the image through, white ones hide it. The
//! compositor is a small state machine driven by asset events; while it is
//! rendering, every tick yields the same command sequence.

use std::fmt;

use crate::command::{CompositeOp, Layer, RenderCommand, RenderCommands, Rgba};
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct MaskConfig {
    /// URL of the still image.
    pub image: String,
    /// URL of the video used as the mask.
    pub video: String,
    pub width: u32,
    pub height: u32,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            image: "https://s3-us-west-2.amazonaws.com/s.cdpn.io/972352/painting.jpg".into(),
            video: "https://s3-us-west-2.amazonaws.com/s.cdpn.io/972352/ink.mp4".into(),
            width: 800,
            height: 600,
        }
    }
}

/// Target dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Video,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Image => f.write_str("image"),
            AssetKind::Video => f.write_str("video"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskState {
    Idle,
    LoadingImage,
    LoadingVideo,
    Rendering,
    Stopped,
    /// An asset never became ready. Terminal, like `Stopped`.
    Failed(AssetKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskEvent {
    Start,
    ImageReady,
    VideoReady,
    VideoEnded,
    AssetFailed(AssetKind),
}

pub struct MaskCompositor {
    config: MaskConfig,
    surface: Surface,
    state: MaskState,
    frame_requested: bool,
    frames_rendered: u64,
}

impl MaskCompositor {
    pub fn new(config: MaskConfig) -> Self {
        let surface = Surface {
            width: config.width as f64,
            height: config.height as f64,
        };
        Self {
            config,
            surface,
            state: MaskState::Idle,
            frame_requested: false,
            frames_rendered: 0,
        }
    }

    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn state(&self) -> MaskState {
        self.state
    }

    /// Whether the last tick asked for another one.
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Advance the state machine. Rejected events leave the state untouched.
    pub fn handle(&mut self, event: MaskEvent) -> Result<MaskState> {
        use MaskEvent as E;
        use MaskState as S;

        let next = match (self.state, event) {
            (S::Idle, E::Start) => S::LoadingImage,
            (S::LoadingImage, E::ImageReady) => S::LoadingVideo,
            (S::LoadingVideo, E::VideoReady) => S::Rendering,
            // `canplay` fires again after seeks and stalls.
            (S::Rendering, E::VideoReady) => S::Rendering,
            (S::Rendering, E::VideoEnded) => {
                self.frame_requested = false;
                log::info!("video ended after {} frames", self.frames_rendered);
                S::Stopped
            }
            (S::LoadingImage, E::AssetFailed(kind)) | (S::LoadingVideo, E::AssetFailed(kind)) => {
                log::warn!("{kind} failed to load, mask compositor stalled");
                S::Failed(kind)
            }
            (state, event) => {
                log::warn!("ignoring {event:?} in state {state:?}");
                return Err(Error::InvalidTransition { state, event });
            }
        };

        if next != self.state {
            log::debug!("mask compositor {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        Ok(next)
    }

    /// One animation tick. Yields the frame's commands while rendering and
    /// requests the next tick; yields nothing in any other state.
    pub fn on_tick(&mut self) -> Option<RenderCommands> {
        if self.state != MaskState::Rendering {
            self.frame_requested = false;
            return None;
        }

        let Surface { width: w, height: h } = self.surface;
        let commands = vec![
            RenderCommand::ClearRect { x: 0.0, y: 0.0, w, h },
            // Background for transparent images.
            RenderCommand::FillRect { x: 0.0, y: 0.0, w, h, color: Rgba::WHITE },
            RenderCommand::SetComposite(CompositeOp::SourceOver),
            RenderCommand::DrawLayer { layer: Layer::Image, x: 0.0, y: 0.0, w, h },
            RenderCommand::SetComposite(CompositeOp::Lighten),
            RenderCommand::DrawLayer { layer: Layer::Video, x: 0.0, y: 0.0, w, h },
        ];

        self.frames_rendered += 1;
        self.frame_requested = true;
        Some(commands)
    }

    /// Cancel the pending tick. Safe to call any number of times.
    pub fn stop(&mut self) {
        self.frame_requested = false;
        if self.state == MaskState::Rendering {
            log::info!("mask stopped after {} frames", self.frames_rendered);
            self.state = MaskState::Stopped;
        }
    }
}
