#![deny(unsafe_code)]
//! Browser bindings: draws the metaball engine onto a 2D canvas.
//!
//! The host page owns the animation loop and calls `render_frame` from
//! `requestAnimationFrame`, and `resize` when the canvas changes size.

use glam::DVec2;
use lava_lamp_core::gradient::RadialGradient;
use lava_lamp_core::surface::Surface;
use lava_lamp_core::{Engine, EngineError, Srgb};
use lava_lamp_metaballs::{MetaballParams, Metaballs, MAX_BALL_COUNT};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

fn js_error(e: EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// [`Surface`] over a canvas 2D context.
///
/// The last gradient built is kept and reused while the style is unchanged,
/// so a frame with several blobs creates it once.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    gradient: Option<(RadialGradient, CanvasGradient)>,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            gradient: None,
        }
    }

    fn canvas_gradient(&mut self, style: &RadialGradient) -> Result<CanvasGradient, JsValue> {
        if let Some((cached, gradient)) = &self.gradient {
            if cached == style {
                return Ok(gradient.clone());
            }
        }
        let c = style.center;
        let gradient = self
            .ctx
            .create_radial_gradient(c.x, c.y, 0.0, c.x, c.y, style.radius.max(0.0))?;
        gradient.add_color_stop(0.0, &style.inner.to_hex())?;
        gradient.add_color_stop(1.0, &style.outer.to_hex())?;
        self.gradient = Some((*style, gradient.clone()));
        Ok(gradient)
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn line_to(&mut self, point: DVec2) {
        self.ctx.line_to(point.x, point.y);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self, style: &RadialGradient) {
        // A context that refuses the gradient leaves the blob undrawn.
        if let Ok(gradient) = self.canvas_gradient(style) {
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx.fill();
        }
    }
}

/// A lava lamp bound to one canvas.
#[wasm_bindgen]
pub struct LavaLamp {
    engine: Metaballs,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl LavaLamp {
    /// Builds a lamp sized to the canvas's current backing store.
    ///
    /// Colors are `#rrggbb` strings and `ball_count` is capped at
    /// [`MAX_BALL_COUNT`]. Fails if the canvas has no 2D context,
    /// has zero size, or a color does not parse.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        ball_count: usize,
        inner: &str,
        outer: &str,
        seed: u32,
    ) -> Result<LavaLamp, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2D canvas context unavailable")?
            .dyn_into()?;
        let params = MetaballParams {
            ball_count: ball_count.min(MAX_BALL_COUNT),
            inner_color: Srgb::from_hex(inner).map_err(js_error)?,
            outer_color: Srgb::from_hex(outer).map_err(js_error)?,
        };
        let engine = Metaballs::new(
            canvas.width() as usize,
            canvas.height() as usize,
            u64::from(seed),
            params,
        )
        .map_err(js_error)?;
        Ok(LavaLamp {
            engine,
            surface: CanvasSurface::new(ctx),
        })
    }

    /// Advances one frame and draws it.
    pub fn render_frame(&mut self) {
        self.engine.render_frame(&mut self.surface);
    }

    /// Adapts to a new canvas size in device pixels.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.engine
            .resize(width as usize, height as usize)
            .map_err(js_error)
    }

    /// Frames drawn so far.
    pub fn frame(&self) -> f64 {
        self.engine.frame() as f64
    }
}
