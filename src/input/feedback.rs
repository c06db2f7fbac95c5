use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement};

use crate::dom::{self, PageError};
use crate::platform::ClassTarget;
use crate::util::Debouncer;

pub const FOCUSED_CLASS: &str = "focused";
pub const VALID_CLASS: &str = "valid";

pub fn mark_focused<T: ClassTarget>(wrapper: &T, focused: bool) {
    wrapper.set_class(FOCUSED_CLASS, focused);
}

pub fn mark_validity<T: ClassTarget>(input: &T, value: &str) {
    input.set_class(VALID_CLASS, !value.trim().is_empty());
}

fn refresh_validity(input: &HtmlInputElement) {
    let element: &Element = input;
    mark_validity(element, &input.value());
}

pub fn attach(document: &Document, debounce_ms: Option<u32>) -> Result<(), PageError> {
    let inputs: Vec<HtmlInputElement> = dom::query_all(document, ".booking-form input")
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
        .collect();
    debug!("Tracking focus and validity on {} booking inputs", inputs.len());

    for input in inputs {
        if let Some(wrapper) = input.parent_element() {
            let focus_wrapper = wrapper.clone();
            dom::listen(&input, "focus", move |_: Event| mark_focused(&focus_wrapper, true))?;
            dom::listen(&input, "blur", move |_: Event| mark_focused(&wrapper, false))?;
        }

        let debouncer = debounce_ms.map(Debouncer::new);
        let target = input.clone();
        dom::listen(&input, "input", move |_: Event| match &debouncer {
            Some(debouncer) => {
                let target = target.clone();
                debouncer.call(move || refresh_validity(&target));
            }
            None => refresh_validity(&target),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fakes::FakeElement;

    #[test]
    fn focus_marker_follows_focus_and_blur() {
        let wrapper = FakeElement::with_classes(&["form-group"]);

        mark_focused(&wrapper, true);
        assert_eq!(wrapper.class_name(), "form-group focused");

        mark_focused(&wrapper, false);
        assert_eq!(wrapper.class_name(), "form-group");
    }

    #[test]
    fn validity_tracks_trimmed_content() {
        let input = FakeElement::default();

        mark_validity(&input, "Ama");
        assert!(input.has_class(VALID_CLASS));

        mark_validity(&input, "   ");
        assert!(!input.has_class(VALID_CLASS));

        mark_validity(&input, " Accra ");
        assert!(input.has_class(VALID_CLASS));

        mark_validity(&input, "");
        assert!(!input.has_class(VALID_CLASS));
    }
}
