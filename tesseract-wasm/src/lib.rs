//! Tesseract WebAssembly bindings via wasm-bindgen
//!
//! Exposes the caller-owned tesseract handle to browsers. The host drives
//! time: pass `performance.now()` (or any monotonic millisecond clock) to
//! every frame call.
//!
//! ## Example
//!
//! ```javascript
//! import init, { Tesseract, version } from '@tesseract/wasm';
//!
//! async function main() {
//!   await init();
//!
//!   const tesseract = new Tesseract(JSON.stringify({
//!     color: "#5968EA",
//!     variant: "explode",
//!     rotationPreset: "dual"
//!   }));
//!
//!   const container = document.getElementById("hero");
//!   function frame(now) {
//!     container.innerHTML = tesseract.svg_at(now);
//!     requestAnimationFrame(frame);
//!   }
//!   requestAnimationFrame(frame);
//!
//!   console.log("tesseract", tesseract.id(), "core", version());
//! }
//!
//! main();
//! ```

use std::time::Duration;

use wasm_bindgen::prelude::*;

use tesseract_core::{
    generate_edges, generate_vertices, RotationAngles, RotationPreset,
    Tesseract as CoreTesseract, TesseractOptions,
};

// Set up panic hook for better error messages
#[cfg(feature = "console_error_panic_hook")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Host milliseconds as a driver timestamp; bad values clamp to zero
fn timestamp(time_ms: f64) -> Duration {
    match Duration::try_from_secs_f64(time_ms / 1000.0) {
        Ok(t) => t,
        Err(_) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "tesseract: ignoring invalid timestamp {}",
                time_ms
            )));
            Duration::ZERO
        }
    }
}

/// Animated tesseract for WebAssembly
#[wasm_bindgen]
pub struct Tesseract {
    inner: CoreTesseract,
}

#[wasm_bindgen]
impl Tesseract {
    /// Create a tesseract from an options JSON string (`"{}"` for defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: &str) -> Result<Tesseract, JsError> {
        let options = TesseractOptions::from_json_str(options_json)
            .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
        let inner = CoreTesseract::create(options)
            .map_err(|e| JsError::new(&format!("Failed to create tesseract: {}", e)))?;
        Ok(Tesseract { inner })
    }

    /// Instance id
    #[wasm_bindgen]
    pub fn id(&self) -> String {
        self.inner.id().to_string()
    }

    /// SVG document for the frame at `time_ms`
    #[wasm_bindgen]
    pub fn svg_at(&mut self, time_ms: f64) -> String {
        self.inner.svg_at(timestamp(time_ms))
    }

    /// Frame at `time_ms` as JSON: driver params plus the draw list
    #[wasm_bindgen]
    pub fn frame_json_at(&mut self, time_ms: f64) -> Result<String, JsError> {
        let frame = self.inner.frame_at(timestamp(time_ms));
        serde_json::to_string(&frame)
            .map_err(|e| JsError::new(&format!("Failed to serialize: {}", e)))
    }

    /// SVG document for fixed angles, e.g. `{"XW": 0.5, "YW": 0.25}`
    #[wasm_bindgen]
    pub fn static_svg(&self, angles_json: &str) -> Result<String, JsError> {
        let angles: RotationAngles = serde_json::from_str(angles_json)
            .map_err(|e| JsError::new(&format!("Failed to parse angles: {}", e)))?;
        let frame = self.inner.render_static(&angles);
        Ok(self.inner.to_svg(&frame))
    }

    #[wasm_bindgen]
    pub fn is_playing(&self) -> bool {
        self.inner.is_playing()
    }

    #[wasm_bindgen]
    pub fn play(&mut self) {
        self.inner.play();
    }

    /// Freeze the animation at `time_ms`
    #[wasm_bindgen]
    pub fn pause(&mut self, time_ms: f64) {
        self.inner.pause(timestamp(time_ms));
    }

    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.inner.stop();
    }

    #[wasm_bindgen]
    pub fn restart(&mut self) {
        self.inner.restart();
    }

    /// Change the time multiplier from `time_ms` on
    #[wasm_bindgen]
    pub fn set_speed(&mut self, speed: f64, time_ms: f64) -> Result<(), JsError> {
        self.inner
            .set_speed(speed, timestamp(time_ms))
            .map_err(|e| JsError::new(&format!("{}", e)))
    }

    /// Switch rotation preset by name
    #[wasm_bindgen]
    pub fn set_preset(&mut self, name: &str) -> Result<(), JsError> {
        let preset: RotationPreset = name
            .parse()
            .map_err(|e| JsError::new(&format!("{}", e)))?;
        self.inner.set_preset(preset);
        Ok(())
    }
}

/// Get the tesseract core version
#[wasm_bindgen]
pub fn version() -> String {
    tesseract_core::VERSION.to_string()
}

/// The 16 vertices at half-edge `scale`, as JSON
#[wasm_bindgen]
pub fn vertices_json(scale: f64) -> Result<String, JsError> {
    serde_json::to_string(&generate_vertices(scale))
        .map_err(|e| JsError::new(&format!("Failed to serialize: {}", e)))
}

/// The 32 edges as JSON index pairs
#[wasm_bindgen]
pub fn edges_json() -> Result<String, JsError> {
    serde_json::to_string(&generate_edges())
        .map_err(|e| JsError::new(&format!("Failed to serialize: {}", e)))
}
