//! `tracing` layer that writes to the browser console.
//!
//! Each event becomes one line, `LEVEL target: message key=value ...`, sent
//! to the `console` method matching its level so the devtools filters work.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;
use wasm_bindgen::JsValue;
use web_sys::console;

use crate::config::LoggingConfig;

/// Installs a [`ConsoleLayer`] as the global subscriber. Later calls keep the
/// first subscriber and report it on the console.
pub fn init(config: LoggingConfig) {
    let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new(config.max_level));
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        console::debug_1(&JsValue::from_str(&format!(
            "page_fx: keeping existing tracing subscriber ({err})"
        )));
    }
}

pub struct ConsoleLayer {
    max_level: Level,
}

impl ConsoleLayer {
    pub fn new(max_level: Level) -> Self {
        Self { max_level }
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let level = *meta.level();
        if level > self.max_level {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let line = JsValue::from_str(&visitor.render(level, meta.target()));

        match level {
            Level::ERROR => console::error_1(&line),
            Level::WARN => console::warn_1(&line),
            Level::INFO => console::info_1(&line),
            _ => console::debug_1(&line),
        }
    }
}

/// Collects the message and structured fields of an event.
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn render(&self, level: Level, target: &str) -> String {
        let mut line = format!("{level} {target}: {}", self.message);
        for (name, value) in &self.fields {
            let _ = write!(line, " {name}={value}");
        }
        line
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push((field.name(), format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.fields.push((field.name(), value.to_owned()));
        }
    }
}
