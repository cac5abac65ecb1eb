#![cfg(target_arch = "wasm32")]

use fastrand::Rng;
use page_fx::config::{CycleTimings, LavaLampConfig, LoggingConfig, SlotMachineConfig};
use page_fx::wasm::{lava, logging, slot};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlElement, Window};

wasm_bindgen_test_configure!(run_in_browser);

fn page() -> (Window, Document) {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    (window, document)
}

fn add_to_body(document: &Document, tag: &str) -> HtmlElement {
    let el = document
        .create_element(tag)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

async fn sleep(window: &Window, ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// Width of `text` laid out in `reference`'s font, the way the page measures it.
fn rendered_width(window: &Window, document: &Document, reference: &HtmlElement, text: &str) -> i32 {
    let computed = window.get_computed_style(reference).unwrap().unwrap();
    let span = add_to_body(document, "span");
    let style = span.style();
    style.set_property("visibility", "hidden").unwrap();
    style.set_property("position", "absolute").unwrap();
    style.set_property("white-space", "nowrap").unwrap();
    for property in ["font-family", "font-size", "font-weight", "font-style", "letter-spacing"] {
        style
            .set_property(property, &computed.get_property_value(property).unwrap())
            .unwrap();
    }
    span.set_text_content(Some(text));
    let width = span.offset_width();
    span.remove();
    width
}

fn pinned_width(container: &HtmlElement) -> String {
    container.style().get_property_value("width").unwrap()
}

#[wasm_bindgen_test]
fn lava_lamp_fills_its_container() {
    let (window, document) = page();
    let container = add_to_body(&document, "div");
    container.set_id("lava-lamp-container");

    lava::mount(&window, &document, LavaLampConfig::default(), Rng::with_seed(1)).unwrap();

    // four circle wrappers plus the blur overlay
    assert_eq!(container.child_element_count(), 5);
    let first = container.first_element_child().unwrap();
    assert_eq!(first.class_name(), "lava-circle-wrapper");
    assert_eq!(first.child_element_count(), 1);
    let last = container.last_element_child().unwrap();
    assert_eq!(last.class_name(), "lava-blur-overlay");
    assert!(!container
        .style()
        .get_property_value("background-color")
        .unwrap()
        .is_empty());

    container.remove();
}

#[wasm_bindgen_test]
fn missing_anchors_are_ignored() {
    let (window, document) = page();
    assert!(document.get_element_by_id("lava-lamp-container").is_none());
    lava::mount(&window, &document, LavaLampConfig::default(), Rng::with_seed(1)).unwrap();

    let config = SlotMachineConfig {
        element_id: "no-such-element",
        fallback_selector: ".no-such-class",
        ..SlotMachineConfig::default()
    };
    slot::mount(&window, &document, config, Rng::with_seed(1)).unwrap();
}

#[wasm_bindgen_test]
fn slot_machine_shows_first_title() {
    let (window, document) = page();
    let container = add_to_body(&document, "span");
    container.set_id("slot-machine-text");
    container.set_text_content(Some("placeholder"));

    slot::mount(&window, &document, SlotMachineConfig::default(), Rng::with_seed(2)).unwrap();

    assert_eq!(container.child_element_count(), 12);
    assert_eq!(
        container.text_content().unwrap(),
        "Data\u{00a0}Analyst"
    );
    let first = container.first_element_child().unwrap();
    assert_eq!(first.class_name(), "slot-letter");

    container.remove();
}

#[wasm_bindgen_test]
fn slot_machine_falls_back_to_selector() {
    let (window, document) = page();
    let wrapper = add_to_body(&document, "div");
    wrapper.set_class_name("Iam");
    let bold = document.create_element("b").unwrap();
    wrapper.append_child(&bold).unwrap();

    slot::mount(&window, &document, SlotMachineConfig::default(), Rng::with_seed(3)).unwrap();

    assert_eq!(bold.child_element_count(), 12);
    wrapper.remove();
}

#[wasm_bindgen_test]
async fn slot_machine_pins_width_to_reference_title() {
    let (window, document) = page();
    let container = add_to_body(&document, "b");
    container.set_id("slot-width");
    container.style().set_property("font-size", "32px").unwrap();

    let config = SlotMachineConfig {
        element_id: "slot-width",
        ..SlotMachineConfig::default()
    };
    let delay = config.measure_delay_ms as i32;
    slot::mount(&window, &document, config, Rng::with_seed(4)).unwrap();

    // nothing is pinned until fonts had a chance to load
    assert_eq!(pinned_width(&container), "");
    sleep(&window, delay + 50).await;

    let expected = rendered_width(&window, &document, &container, "Data Analyst");
    assert!(expected > 0);
    assert_eq!(pinned_width(&container), format!("{expected}px"));

    // a resize measures again
    container.style().remove_property("width").unwrap();
    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    assert_eq!(pinned_width(&container), format!("{expected}px"));

    container.remove();
}

#[wasm_bindgen_test]
async fn letters_carry_shuffling_then_resolved_class() {
    let (window, document) = page();
    let container = add_to_body(&document, "span");
    container.set_id("slot-classes");

    let config = SlotMachineConfig {
        element_id: "slot-classes",
        titles: vec!["ab".to_owned(), "cd".to_owned()],
        timings: CycleTimings {
            idle_ms: 20,
            shuffle_ticks: 10,
            shuffle_interval_ms: 30,
            resolve_flashes: 1,
            resolve_interval_ms: 30,
            stagger_ms: 0,
            highlight_ms: 2_000,
            settle_ms: 2_000,
        },
        ..SlotMachineConfig::default()
    };
    slot::mount(&window, &document, config, Rng::with_seed(5)).unwrap();

    let first = container.first_element_child().unwrap();
    assert!(!first.class_list().contains("shuffling"));

    // shuffle ticks run from 50ms to 320ms
    sleep(&window, 150).await;
    assert!(first.class_list().contains("shuffling"));
    assert!(!first.class_list().contains("resolved"));

    // locks at ~380ms and stays highlighted for two seconds
    sleep(&window, 750).await;
    assert!(!first.class_list().contains("shuffling"));
    assert!(first.class_list().contains("resolved"));
    assert_eq!(container.text_content().unwrap(), "cd");

    container.remove();
}

#[wasm_bindgen_test]
fn logging_init_is_repeatable() {
    logging::init(LoggingConfig::default());
    logging::init(LoggingConfig::default());
    tracing::info!("still logging after a second init");
}
