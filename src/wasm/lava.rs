use std::cell::RefCell;
use std::rc::Rc;

use fastrand::Rng;
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use super::timers::BrowserTimers;
use crate::config::LavaLampConfig;
use crate::debounce::Debouncer;
use crate::geometry::Circle;
use crate::lava::Scene;

#[derive(Clone, Copy, Debug)]
pub enum LavaEvent {
    Regenerate,
}

/// The lava lamp background mounted on its container element.
pub struct LavaLamp {
    window: Window,
    document: Document,
    container: HtmlElement,
    config: LavaLampConfig,
    rng: Rng,
    resize: Debouncer,
    timers: BrowserTimers<LavaEvent>,
}

/// Paints the background once and repaints it after each resize burst.
/// Does nothing if the page has no container.
pub fn mount(
    window: &Window,
    document: &Document,
    config: LavaLampConfig,
    rng: Rng,
) -> Result<(), JsValue> {
    let Some(container) = document.get_element_by_id(config.container_id) else {
        debug!(id = config.container_id, "no lava lamp container");
        return Ok(());
    };
    let container = container.dyn_into::<HtmlElement>()?;

    let lamp = Rc::new_cyclic(|weak| {
        RefCell::new(LavaLamp {
            window: window.clone(),
            document: document.clone(),
            container,
            resize: Debouncer::new(config.resize_debounce_ms),
            config,
            rng,
            timers: BrowserTimers::dispatching_to(window.clone(), weak.clone(), LavaLamp::on_event),
        })
    });
    lamp.borrow_mut().paint()?;

    let on_resize = {
        let lamp = lamp.clone();
        Closure::wrap(Box::new(move || {
            if let Ok(mut lamp) = lamp.try_borrow_mut() {
                lamp.on_resize();
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    Ok(())
}

impl LavaLamp {
    fn on_resize(&mut self) {
        debug!(rescheduled = self.resize.is_pending(), "viewport resized");
        self.resize.trigger(&mut self.timers, LavaEvent::Regenerate);
    }

    fn on_event(&mut self, event: LavaEvent) {
        match event {
            LavaEvent::Regenerate => {
                self.resize.settle();
                if let Err(err) = self.paint() {
                    warn!(?err, "lava lamp repaint failed");
                }
            }
        }
    }

    /// Replaces the container's contents with a freshly planned scene.
    fn paint(&mut self) -> Result<(), JsValue> {
        let viewport = super::viewport(&self.window)?;
        let scene = Scene::plan(&self.config, viewport, &mut self.rng);

        self.container
            .style()
            .set_property("background-color", &scene.background.to_string())?;
        self.container.set_inner_html("");

        for circle in &scene.circles {
            let wrapper = self.circle_element(circle)?;
            self.container.append_child(&wrapper)?;
        }
        let overlay = self.div("lava-blur-overlay")?;
        self.container.append_child(&overlay)?;

        debug!(
            circles = scene.circles.len(),
            width = viewport.width,
            height = viewport.height,
            "lava lamp painted"
        );
        Ok(())
    }

    /// A rotating wrapper holding one positioned circle.
    fn circle_element(&self, circle: &Circle) -> Result<HtmlElement, JsValue> {
        let period = self.config.rotation_period_secs;

        let wrapper = self.div("lava-circle-wrapper")?;
        let style = wrapper.style();
        // pivot at the circle's height so it sweeps across the page
        style.set_property("transform-origin", &format!("50% {}px 0", circle.center_y))?;
        style.set_property("animation", &format!("lavaRotate {period}s linear infinite"))?;
        style.set_property(
            "animation-delay",
            &format!("{}s", circle.animation_delay_secs(period)),
        )?;

        let inner = self.div("lava-circle")?;
        let style = inner.style();
        style.set_property("background-color", &circle.color.to_string())?;
        style.set_property("left", &format!("{}px", circle.left()))?;
        style.set_property("top", &format!("{}px", circle.top()))?;
        style.set_property("width", &format!("{}px", circle.diameter()))?;
        style.set_property("height", &format!("{}px", circle.diameter()))?;
        style.set_property("border-radius", &format!("{}px", circle.radius))?;

        wrapper.append_child(&inner)?;
        Ok(wrapper)
    }

    fn div(&self, class: &str) -> Result<HtmlElement, JsValue> {
        let el = self.document.create_element("div")?.dyn_into::<HtmlElement>()?;
        el.set_class_name(class);
        Ok(el)
    }
}
