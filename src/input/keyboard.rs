use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, KeyboardEvent};

use crate::dom::{self, PageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ActivateLink,
    Dismiss,
}

pub fn classify(key: &str, target_tag: Option<&str>) -> Option<KeyAction> {
    match key {
        "Enter" if target_tag.map_or(false, |tag| tag.eq_ignore_ascii_case("a")) => {
            Some(KeyAction::ActivateLink)
        }
        "Escape" => Some(KeyAction::Dismiss),
        _ => None,
    }
}

pub fn attach(document: &Document) -> Result<(), PageError> {
    dom::listen(document, "keydown", move |event: KeyboardEvent| {
        let target = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlElement>().ok());
        let tag = target.as_ref().map(|el| el.tag_name());

        match classify(&event.key(), tag.as_deref()) {
            Some(KeyAction::ActivateLink) => {
                if let Some(link) = &target {
                    link.click();
                }
            }
            // Nothing on the page is dismissable yet.
            Some(KeyAction::Dismiss) => debug!("Escape pressed"),
            None => {}
        }
    })
}
