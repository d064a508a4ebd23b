//! The `Engine` trait a host drives once per animation tick.
//!
//! The trait is object-safe so hosts (CLI, WASM) can hold a `Box<dyn Engine>`.

use crate::error::EngineError;
use crate::surface::Surface;
use serde_json::Value;

/// A frame-based animation that draws itself onto a [`Surface`].
pub trait Engine {
    /// Advances the animation by one frame and draws it.
    ///
    /// Rendering never fails: numerical trouble degrades to drawing less.
    fn render_frame(&mut self, surface: &mut dyn Surface);

    /// Adapts the engine to a new viewport size.
    ///
    /// Returns `EngineError::InvalidDimensions` for a zero-sized viewport and
    /// leaves the engine unchanged in that case.
    fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError>;

    /// Current viewport `(width, height)` in pixels.
    fn viewport(&self) -> (usize, usize);

    /// Frames rendered so far.
    fn frame(&self) -> u64;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing the available parameters, their types, and defaults.
    fn param_schema(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use serde_json::json;

    struct MockEngine {
        width: usize,
        height: usize,
        frames: u64,
    }

    impl Engine for MockEngine {
        fn render_frame(&mut self, surface: &mut dyn Surface) {
            surface.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
            self.frames += 1;
        }

        fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError> {
            if width == 0 || height == 0 {
                return Err(EngineError::InvalidDimensions);
            }
            self.width = width;
            self.height = height;
            Ok(())
        }

        fn viewport(&self) -> (usize, usize) {
            (self.width, self.height)
        }

        fn frame(&self) -> u64 {
            self.frames
        }

        fn params(&self) -> Value {
            json!({"frames": self.frames})
        }

        fn param_schema(&self) -> Value {
            json!({"frames": {"type": "integer", "default": 0}})
        }
    }

    fn mock() -> MockEngine {
        MockEngine {
            width: 8,
            height: 4,
            frames: 0,
        }
    }

    #[test]
    fn engine_trait_is_object_safe() {
        let engine: Box<dyn Engine> = Box::new(mock());
        assert_eq!(engine.viewport(), (8, 4));
    }

    #[test]
    fn render_frame_through_dyn_surface() {
        let mut engine = mock();
        let mut surface = RecordingSurface::new();
        engine.render_frame(&mut surface);
        engine.render_frame(&mut surface);
        assert_eq!(engine.frame(), 2);
        assert_eq!(
            surface.ops()[0],
            DrawOp::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 8.0,
                height: 4.0
            }
        );
    }

    #[test]
    fn dyn_engine_mut_reference_resizes() {
        let mut engine = mock();
        let engine_ref: &mut dyn Engine = &mut engine;
        engine_ref.resize(16, 9).unwrap();
        assert!(engine_ref.resize(0, 9).is_err());
        assert_eq!(engine_ref.viewport(), (16, 9));
        assert_eq!(engine_ref.param_schema()["frames"]["type"], "integer");
    }
}
