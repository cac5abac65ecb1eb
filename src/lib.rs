//! Decorative page effects compiled to WebAssembly: a rotating "lava lamp"
//! background and a "slot machine" subtitle that cycles through job titles.
//!
//! Everything outside [`wasm`] is plain Rust and runs on the host, which is
//! where the color math, circle placement and title state machine are tested.

pub mod color;
pub mod config;
pub mod debounce;
pub mod error;
pub mod geometry;
pub mod lava;
pub mod palette;
pub mod slot;
pub mod timer;

pub use error::{Error, Result};

// Only compile DOM glue when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::config::{LavaLampConfig, LoggingConfig, SlotMachineConfig};
    use crate::geometry::Viewport;

    pub mod lava;
    pub mod logging;
    pub mod slot;
    pub mod timers;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        logging::init(LoggingConfig::default());

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if document.ready_state() == "loading" {
            let on_ready = Closure::once_into_js(|| {
                if let Err(err) = mount_all() {
                    tracing::warn!(?err, "mounting page effects failed");
                }
            });
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        } else {
            mount_all()?;
        }
        Ok(())
    }

    fn mount_all() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        lava::mount(&window, &document, LavaLampConfig::default(), browser_rng())?;
        slot::mount(&window, &document, SlotMachineConfig::default(), browser_rng())?;
        Ok(())
    }

    /// Random source seeded from `Math.random()`.
    pub fn browser_rng() -> fastrand::Rng {
        let seed = js_sys::Math::random() * u64::MAX as f64;
        fastrand::Rng::with_seed(seed as u64)
    }

    pub fn viewport(window: &web_sys::Window) -> Result<Viewport, JsValue> {
        let width = window.inner_width()?.as_f64().ok_or("innerWidth is not a number")?;
        let height = window.inner_height()?.as_f64().ok_or("innerHeight is not a number")?;
        Ok(Viewport::new(width, height))
    }
}
