use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, HtmlVideoElement,
};

use crate::command::{Layer, RenderCommand};
use crate::Error;

/// Replays render commands on a 2D canvas context.
pub struct Painter {
    ctx: CanvasRenderingContext2d,
    image: Option<HtmlImageElement>,
    video: Option<HtmlVideoElement>,
}

impl Painter {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2D canvas not supported")?
            .dyn_into()?;
        Ok(Self {
            ctx,
            image: None,
            video: None,
        })
    }

    pub fn set_image(&mut self, image: HtmlImageElement) {
        self.image = Some(image);
    }

    pub fn set_video(&mut self, video: HtmlVideoElement) {
        self.video = Some(video);
    }

    pub fn paint(&self, commands: &[RenderCommand]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for command in commands {
            match command {
                RenderCommand::ClearRect { x, y, w, h } => ctx.clear_rect(*x, *y, *w, *h),
                RenderCommand::FillRect { x, y, w, h, color } => {
                    ctx.set_fill_style_str(&color.to_string());
                    ctx.fill_rect(*x, *y, *w, *h);
                }
                RenderCommand::SetComposite(op) => {
                    ctx.set_global_composite_operation(op.as_str())?
                }
                RenderCommand::DrawLayer { layer, x, y, w, h } => self.draw_layer(*layer, *x, *y, *w, *h)?,
                RenderCommand::Save => ctx.save(),
                RenderCommand::Restore => ctx.restore(),
                RenderCommand::Translate { x, y } => ctx.translate(*x, *y)?,
                RenderCommand::Rotate(angle) => ctx.rotate(*angle)?,
                RenderCommand::Line { from, to, color, width } => {
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.set_line_width(*width);
                    ctx.set_stroke_style_str(&color.to_string());
                    ctx.stroke();
                }
                RenderCommand::FillCircle { center, radius, color } => {
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                    ctx.set_fill_style_str(&color.to_string());
                    ctx.fill();
                }
                RenderCommand::Triangle { points, fill, stroke } => {
                    ctx.begin_path();
                    ctx.move_to(points[0].x as f64, points[0].y as f64);
                    for p in &points[1..] {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    ctx.close_path();
                    ctx.set_fill_style_str(&fill.to_string());
                    ctx.fill();
                    ctx.set_line_width(1.0);
                    ctx.set_stroke_style_str(&stroke.to_string());
                    ctx.stroke();
                }
                RenderCommand::Text { text, x, y, font, align, color } => {
                    ctx.set_font(font);
                    ctx.set_text_align(align.as_str());
                    ctx.set_fill_style_str(&color.to_string());
                    ctx.fill_text(text, *x, *y)?;
                }
            }
        }
        Ok(())
    }

    fn draw_layer(&self, layer: Layer, x: f64, y: f64, w: f64, h: f64) -> Result<(), JsValue> {
        match layer {
            Layer::Image => {
                let image = self
                    .image
                    .as_ref()
                    .ok_or_else(|| Error::Host("no image attached to painter".into()))?;
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h)
            }
            Layer::Video => {
                let video = self
                    .video
                    .as_ref()
                    .ok_or_else(|| Error::Host("no video attached to painter".into()))?;
                self.ctx
                    .draw_image_with_html_video_element_and_dw_and_dh(video, x, y, w, h)
            }
        }
    }
}

/// Self-rescheduling `requestAnimationFrame` loop.
///
/// The frame callback returns `false` to stop asking for frames. The closure
/// keeps itself alive through `f`, so dropping the loop handle does not stop it.
pub struct AnimationLoop {
    handle: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    pub fn start(mut frame: impl FnMut() -> bool + 'static) -> Result<Self, JsValue> {
        // `f` holds the animation-frame closure so that we can keep calling
        // `request_animation_frame` recursively. Storing it inside an `Option`
        // allows us to create the `Closure` first and then obtain a reference to
        // it from within itself.
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        let handle = Rc::new(Cell::new(None));
        let h = handle.clone();

        *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            h.set(None);
            if !frame() {
                return;
            }
            // schedule next
            match request_frame(&f) {
                Ok(id) => h.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame refused: {e:?}"),
            }
        }) as Box<dyn FnMut()>));

        handle.set(Some(request_frame(&g)?));
        Ok(Self { handle })
    }

    /// Cancel the pending frame, if any. Idempotent.
    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = window() {
                if let Err(e) = w.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {e:?}");
                }
            }
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.handle.get().is_some()
    }
}

fn request_frame(f: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) -> Result<i32, JsValue> {
    let slot = f.borrow();
    let closure = slot.as_ref().ok_or("animation closure missing")?;
    window()
        .ok_or("no window")?
        .request_animation_frame(closure.as_ref().unchecked_ref())
}
