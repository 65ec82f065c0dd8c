//! Browser entry points for the two effects.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, EventTarget, HtmlCanvasElement, HtmlImageElement, HtmlVideoElement};

use super::render::{AnimationLoop, Painter};
use crate::glow::{GlowConfig, GlowScene};
use crate::mask::{AssetKind, MaskCompositor, MaskConfig, MaskEvent, MaskState};
use crate::Error;

struct MaskHost {
    compositor: MaskCompositor,
    painter: Painter,
    animation: Option<AnimationLoop>,
}

type SharedMask = Rc<RefCell<MaskHost>>;

/// Mask `image` with `video` on a new `width`×`height` canvas appended to
/// `<body>`. Black in the video shows the image, white hides it.
#[wasm_bindgen]
pub fn video_mask(image: String, video: String, width: u32, height: u32) -> Result<(), JsValue> {
    let config = MaskConfig {
        image,
        video,
        width,
        height,
    };
    let document = document()?;
    let canvas = create_canvas(&document, width, height)?;
    let painter = Painter::new(&canvas)?;

    let mut compositor = MaskCompositor::new(config);
    compositor.handle(MaskEvent::Start)?;
    let host: SharedMask = Rc::new(RefCell::new(MaskHost {
        compositor,
        painter,
        animation: None,
    }));

    load_image(host)
}

fn load_image(host: SharedMask) -> Result<(), JsValue> {
    let img = HtmlImageElement::new()?;
    let src = host.borrow().compositor.config().image.clone();

    {
        let host = host.clone();
        let img_ready = img.clone();
        listen(&img, "load", move || {
            let outcome = {
                let mut h = host.borrow_mut();
                h.painter.set_image(img_ready.clone());
                h.compositor.handle(MaskEvent::ImageReady)
            };
            match outcome {
                Ok(_) => {
                    if let Err(e) = load_video(host.clone()) {
                        log::error!("video setup failed: {e:?}");
                    }
                }
                Err(e) => log::warn!("{e}"),
            }
        })?;
    }
    {
        let host = host.clone();
        let src = src.clone();
        listen(&img, "error", move || fail(&host, AssetKind::Image, &src))?;
    }

    img.set_src(&src);
    Ok(())
}

fn load_video(host: SharedMask) -> Result<(), JsValue> {
    let vid: HtmlVideoElement = document()?.create_element("video")?.dyn_into()?;
    let src = host.borrow().compositor.config().video.clone();
    vid.set_preload("auto");
    vid.set_autoplay(true);
    vid.set_muted(true);

    {
        let host = host.clone();
        listen(&vid, "canplay", move || {
            let first = {
                let mut h = host.borrow_mut();
                let was = h.compositor.state();
                match h.compositor.handle(MaskEvent::VideoReady) {
                    Ok(MaskState::Rendering) => was != MaskState::Rendering,
                    Ok(_) => false,
                    Err(e) => {
                        log::warn!("{e}");
                        false
                    }
                }
            };
            if !first {
                return;
            }
            match start_mask_loop(host.clone()) {
                Ok(animation) => host.borrow_mut().animation = Some(animation),
                Err(e) => log::error!("could not start mask loop: {e:?}"),
            }
        })?;
    }
    {
        let host = host.clone();
        listen(&vid, "ended", move || {
            let mut h = host.borrow_mut();
            if let Err(e) = h.compositor.handle(MaskEvent::VideoEnded) {
                log::warn!("{e}");
            }
            if let Some(animation) = h.animation.take() {
                animation.cancel();
            }
        })?;
    }
    {
        let host = host.clone();
        let src = src.clone();
        listen(&vid, "error", move || fail(&host, AssetKind::Video, &src))?;
    }

    host.borrow_mut().painter.set_video(vid.clone());
    vid.set_src(&src);
    Ok(())
}

fn start_mask_loop(host: SharedMask) -> Result<AnimationLoop, JsValue> {
    AnimationLoop::start(move || {
        let mut h = host.borrow_mut();
        let Some(commands) = h.compositor.on_tick() else {
            return false;
        };
        if let Err(e) = h.painter.paint(&commands) {
            log::error!("mask frame failed: {e:?}");
            h.compositor.stop();
            return false;
        }
        true
    })
}

fn fail(host: &SharedMask, asset: AssetKind, src: &str) {
    log::error!("{}", Error::AssetLoad { asset, src: src.to_string() });
    if let Err(e) = host.borrow_mut().compositor.handle(MaskEvent::AssetFailed(asset)) {
        log::warn!("{e}");
    }
}

/// Run the glowing triangle on the canvas with id `canvas_id`, creating it if
/// the page has none.
#[wasm_bindgen]
pub fn glow(canvas_id: &str) -> Result<(), JsValue> {
    let config = GlowConfig::default();
    let document = document()?;
    let canvas = match document.get_element_by_id(canvas_id) {
        Some(el) => {
            let canvas = el.dyn_into::<HtmlCanvasElement>()?;
            canvas.set_width(config.width);
            canvas.set_height(config.height);
            canvas
        }
        None => {
            let canvas = create_canvas(&document, config.width, config.height)?;
            canvas.set_id(canvas_id);
            canvas
        }
    };
    let painter = Painter::new(&canvas)?;

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let mut scene = GlowScene::new(config, SmallRng::seed_from_u64(seed));
    log::info!("glow started on #{canvas_id}");

    // Runs until the page goes away.
    AnimationLoop::start(move || {
        let commands = scene.on_tick();
        match painter.paint(&commands) {
            Ok(()) => true,
            Err(e) => {
                log::error!("glow frame failed: {e:?}");
                false
            }
        }
    })?;
    Ok(())
}

fn document() -> Result<Document, JsValue> {
    let window = window().ok_or("no window")?;
    Ok(window.document().ok_or("no document")?)
}

fn create_canvas(document: &Document, width: u32, height: u32) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);
    document.body().ok_or("no body")?.append_child(&canvas)?;
    Ok(canvas)
}

fn listen(target: &EventTarget, event: &str, f: impl FnMut() + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
