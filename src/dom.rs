//! `web_sys` glue: element lookups, listener registration and the browser
//! implementations of the traits in `crate::platform`.

use gloo_timers::future::TimeoutFuture;
use log::warn;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlInputElement, Storage, Window};

use crate::platform::{BookingEffects, ClassTarget, PreferenceStore, StyleTarget};

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(format!("{:?}", value))
    }
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

/// Current value of the input with `id`, empty when it does not exist.
pub fn input_value(document: &Document, id: &str) -> String {
    input_by_id(document, id)
        .map(|input| input.value())
        .unwrap_or_default()
}

pub fn scroll_offset(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Registers `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), PageError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

impl ClassTarget for Element {
    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn set_class_name(&self, name: &str) {
        Element::set_class_name(self, name);
    }

    fn toggle_class(&self, class: &str) -> bool {
        self.class_list().toggle(class).unwrap_or(false)
    }
}

impl StyleTarget for Element {
    fn set_style(&self, property: &str, value: &str) {
        if let Some(html) = self.dyn_ref::<HtmlElement>() {
            if let Err(err) = html.style().set_property(property, value) {
                warn!("Failed to set {} on element: {:?}", property, err);
            }
        }
    }
}

/// `window.localStorage`, when the browser grants it.
pub struct LocalStorage(Option<Storage>);

impl LocalStorage {
    pub fn from_window(window: &Window) -> Self {
        Self(window.local_storage().ok().flatten())
    }
}

impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, value: &str) {
        if let Some(storage) = &self.0 {
            if let Err(err) = storage.set_item(key, value) {
                warn!("Failed to persist {}: {:?}", key, err);
            }
        }
    }
}

/// Alerts through `window.alert` and confirms through the `#successModal`
/// overlay.
pub struct BrowserBookingEffects {
    window: Window,
    modal: Option<Element>,
}

impl BrowserBookingEffects {
    pub fn new(window: Window, modal: Option<Element>) -> Self {
        Self { window, modal }
    }
}

impl BookingEffects for BrowserBookingEffects {
    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn show_confirmation(&self) {
        if let Some(modal) = &self.modal {
            modal.add_class("show");
        }
    }

    fn open_after_delay(&self, url: String, delay_ms: u32) {
        let window = self.window.clone();
        let modal = self.modal.clone();
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            if let Err(err) = window.open_with_url_and_target(&url, "_blank") {
                warn!("Failed to open WhatsApp link: {:?}", err);
            }
            if let Some(modal) = modal {
                modal.remove_class("show");
            }
        });
    }
}
