use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::{Element, Event, Window};

use crate::config::{LOADER_AFTER_LOAD_MS, LOADER_FALLBACK_MS};
use crate::dom::{self, PageError};
use crate::platform::ClassTarget;

pub const HIDDEN_CLASS: &str = "hidden";

/// The `.loader` splash overlay. Hiding is idempotent, so every path that
/// wants it gone just calls [`Loader::hide`].
pub struct Loader<T> {
    element: Option<T>,
}

impl<T: ClassTarget> Loader<T> {
    pub fn new(element: Option<T>) -> Self {
        Self { element }
    }

    pub fn hide(&self) {
        if let Some(element) = &self.element {
            element.add_class(HIDDEN_CLASS);
        }
    }

    #[cfg(test)]
    pub fn is_hidden(&self) -> bool {
        self.element
            .as_ref()
            .map_or(true, |element| element.has_class(HIDDEN_CLASS))
    }
}

/// Hides the loader shortly after `load`, and unconditionally once the
/// fallback delay has passed.
pub fn attach(window: &Window, loader: Rc<Loader<Element>>) -> Result<(), PageError> {
    if loader.element.is_none() {
        debug!("No .loader on page");
        return Ok(());
    }

    let already_loaded = window
        .document()
        .map_or(false, |doc| doc.ready_state() == "complete");

    if already_loaded {
        let loader = loader.clone();
        Timeout::new(LOADER_AFTER_LOAD_MS, move || loader.hide()).forget();
    } else {
        let loader = loader.clone();
        dom::listen(window, "load", move |_: Event| {
            let loader = loader.clone();
            Timeout::new(LOADER_AFTER_LOAD_MS, move || loader.hide()).forget();
        })?;
    }

    Timeout::new(LOADER_FALLBACK_MS, move || loader.hide()).forget();
    Ok(())
}
