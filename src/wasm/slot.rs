use std::cell::RefCell;
use std::rc::Rc;

use fastrand::Rng;
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use super::timers::BrowserTimers;
use crate::config::SlotMachineConfig;
use crate::slot::{CellPhase, CycleEvent, LetterCell, TitleCycler};
use crate::timer::Scheduler;

/// Properties copied onto the hidden span used to measure the reference title.
const FONT_PROPERTIES: [&str; 5] = [
    "font-family",
    "font-size",
    "font-weight",
    "font-style",
    "letter-spacing",
];

#[derive(Clone, Copy, Debug)]
pub enum SlotEvent {
    Cycle(CycleEvent),
    MeasureWidth,
}

impl From<CycleEvent> for SlotEvent {
    fn from(event: CycleEvent) -> Self {
        SlotEvent::Cycle(event)
    }
}

/// The title cycler bound to its element.
pub struct SlotMachine {
    window: Window,
    document: Document,
    container: HtmlElement,
    reference_title: &'static str,
    cycler: TitleCycler,
    letters: LetterView,
    rng: Rng,
    timers: BrowserTimers<SlotEvent>,
    width_fixed: bool,
}

/// Starts cycling titles in the configured element. Does nothing if the
/// page has no such element.
pub fn mount(
    window: &Window,
    document: &Document,
    config: SlotMachineConfig,
    rng: Rng,
) -> Result<(), JsValue> {
    let Some(container) = find_container(document, &config)? else {
        debug!(id = config.element_id, "no slot machine element");
        return Ok(());
    };
    let container = container.dyn_into::<HtmlElement>()?;
    let cycler = TitleCycler::from_config(&config).map_err(|err| JsValue::from_str(&err.to_string()))?;

    let machine = Rc::new_cyclic(|weak| {
        RefCell::new(SlotMachine {
            window: window.clone(),
            document: document.clone(),
            letters: LetterView::new(document.clone(), container.clone()),
            container,
            reference_title: config.reference_title,
            cycler,
            rng,
            timers: BrowserTimers::dispatching_to(window.clone(), weak.clone(), SlotMachine::on_event),
            width_fixed: false,
        })
    });
    machine.borrow_mut().start(config.measure_delay_ms)?;

    let on_resize = {
        let machine = machine.clone();
        Closure::wrap(Box::new(move || {
            if let Ok(machine) = machine.try_borrow() {
                machine.on_resize();
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    Ok(())
}

fn find_container(document: &Document, config: &SlotMachineConfig) -> Result<Option<Element>, JsValue> {
    match document.get_element_by_id(config.element_id) {
        Some(el) => Ok(Some(el)),
        None => document.query_selector(config.fallback_selector),
    }
}

impl SlotMachine {
    fn start(&mut self, measure_delay_ms: u32) -> Result<(), JsValue> {
        self.cycler.start(&mut self.timers);
        self.letters.sync(self.cycler.cells())?;
        // fonts may still be loading on first paint
        self.timers.schedule(measure_delay_ms, SlotEvent::MeasureWidth);
        Ok(())
    }

    fn on_resize(&self) {
        if !self.width_fixed {
            return;
        }
        if let Err(err) = self.fix_width() {
            warn!(?err, "slot machine width measurement failed");
        }
    }

    fn on_event(&mut self, event: SlotEvent) {
        let result = match event {
            SlotEvent::Cycle(event) => {
                self.cycler.handle(event, &mut self.timers, &mut self.rng);
                self.letters.sync(self.cycler.cells())
            }
            SlotEvent::MeasureWidth => {
                self.width_fixed = true;
                self.fix_width()
            }
        };
        if let Err(err) = result {
            warn!(?err, "slot machine update failed");
        }
    }

    /// Pins the container to the rendered width of the reference title.
    fn fix_width(&self) -> Result<(), JsValue> {
        let computed = self
            .window
            .get_computed_style(&self.container)?
            .ok_or("no computed style")?;
        let body = self.document.body().ok_or("document has no body")?;

        let measure = self.document.create_element("span")?.dyn_into::<HtmlElement>()?;
        let style = measure.style();
        style.set_property("visibility", "hidden")?;
        style.set_property("position", "absolute")?;
        style.set_property("white-space", "nowrap")?;
        for property in FONT_PROPERTIES {
            style.set_property(property, &computed.get_property_value(property)?)?;
        }
        measure.set_text_content(Some(self.reference_title));

        body.append_child(&measure)?;
        let width = measure.offset_width();
        measure.remove();

        self.container.style().set_property("width", &format!("{width}px"))?;
        debug!(width, "slot machine width fixed");
        Ok(())
    }
}

/// One `<span class="slot-letter">` per cell. Only cells that changed since
/// the last sync touch the DOM.
struct LetterView {
    document: Document,
    container: HtmlElement,
    spans: Vec<HtmlElement>,
    shown: Vec<Option<LetterCell>>,
}

impl LetterView {
    fn new(document: Document, container: HtmlElement) -> Self {
        container.set_inner_html("");
        Self {
            document,
            container,
            spans: Vec::new(),
            shown: Vec::new(),
        }
    }

    fn sync(&mut self, cells: &[LetterCell]) -> Result<(), JsValue> {
        while self.spans.len() < cells.len() {
            let span = self.document.create_element("span")?.dyn_into::<HtmlElement>()?;
            span.set_class_name("slot-letter");
            span.style().set_property("--index", &self.spans.len().to_string())?;
            self.container.append_child(&span)?;
            self.spans.push(span);
            self.shown.push(None);
        }
        while self.spans.len() > cells.len() {
            if let Some(span) = self.spans.pop() {
                span.remove();
            }
            self.shown.pop();
        }

        for ((cell, span), shown) in cells.iter().zip(&self.spans).zip(&mut self.shown) {
            if *shown == Some(*cell) {
                continue;
            }
            span.set_text_content(Some(&cell.glyph.to_string()));
            let classes = span.class_list();
            classes.toggle_with_force("shuffling", cell.phase == CellPhase::Shuffling)?;
            classes.toggle_with_force("resolved", cell.phase == CellPhase::Resolved)?;
            *shown = Some(*cell);
        }
        Ok(())
    }
}
