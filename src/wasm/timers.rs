use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::timer::{Scheduler, TimerId};

/// [`Scheduler`] backed by `window.setTimeout`.
///
/// Every scheduled event is wrapped in a one-shot closure that hands it to
/// `sink` when the timeout fires. Cancelled timeouts leak their closure,
/// which is a few bytes per resize burst.
pub struct BrowserTimers<E> {
    window: Window,
    sink: Rc<dyn Fn(E)>,
}

impl<E: 'static> BrowserTimers<E> {
    pub fn new(window: Window, sink: impl Fn(E) + 'static) -> Self {
        Self {
            window,
            sink: Rc::new(sink),
        }
    }

    /// Delivers events to `handler` on `target` for as long as it is alive.
    pub fn dispatching_to<T: 'static>(
        window: Window,
        target: Weak<RefCell<T>>,
        handler: fn(&mut T, E),
    ) -> Self {
        Self::new(window, move |event| {
            let Some(target) = target.upgrade() else {
                return;
            };
            match target.try_borrow_mut() {
                Ok(mut target) => handler(&mut target, event),
                Err(_) => warn!("timer fired while its component was borrowed; event dropped"),
            };
        })
    }
}

impl<E: 'static, T: Into<E>> Scheduler<T> for BrowserTimers<E> {
    fn schedule(&mut self, delay_ms: u32, event: T) -> TimerId {
        let sink = Rc::clone(&self.sink);
        let event = event.into();
        let callback = Closure::once_into_js(move || sink(event));
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);

        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            Ok(handle) => TimerId(handle as u64),
            Err(err) => {
                warn!(?err, delay_ms, "setTimeout failed");
                TimerId(u64::MAX)
            }
        }
    }

    fn cancel(&mut self, id: TimerId) {
        if let Ok(handle) = i32::try_from(id.0) {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}
