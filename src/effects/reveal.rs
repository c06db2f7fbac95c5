use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::REVEAL_THRESHOLD;
use crate::dom::PageError;
use crate::platform::ClassTarget;

pub const VISIBLE_CLASS: &str = "visible";

/// Marks every intersecting target visible and hands them back so the caller
/// can stop watching them. Reveals are one-shot.
pub fn reveal_intersecting<T, I>(entries: I) -> Vec<T>
where
    T: ClassTarget,
    I: IntoIterator<Item = (T, bool)>,
{
    entries
        .into_iter()
        .filter(|(_, intersecting)| *intersecting)
        .map(|(target, _)| {
            target.add_class(VISIBLE_CLASS);
            target
        })
        .collect()
}

pub fn attach(elements: &[Element]) -> Result<(), PageError> {
    if elements.is_empty() {
        debug!("No .fade-in elements to observe");
        return Ok(());
    }

    let callback = Closure::wrap(Box::new(
        move |entries: Array, observer: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| (entry.target(), entry.is_intersecting()));

            for target in reveal_intersecting(entries) {
                observer.unobserve(&target);
            }
        },
    ) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_root_margin("0px");
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for element in elements {
        observer.observe(element);
    }

    callback.forget();
    debug!("Observing {} fade-in elements", elements.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fakes::FakeElement;

    #[test]
    fn only_intersecting_targets_are_revealed_and_released() {
        let a = FakeElement::with_classes(&["fade-in"]);
        let b = FakeElement::with_classes(&["fade-in"]);

        let released = reveal_intersecting(vec![(&a, true), (&b, false)]);

        assert_eq!(released.len(), 1);
        assert!(a.has_class(VISIBLE_CLASS));
        assert!(!b.has_class(VISIBLE_CLASS));
    }

    #[test]
    fn revealed_element_stays_visible_after_leaving_view() {
        let el = FakeElement::with_classes(&["fade-in"]);

        reveal_intersecting(vec![(&el, true)]);
        // Leaving the viewport produces a non-intersecting entry.
        let released = reveal_intersecting(vec![(&el, false)]);

        assert!(released.is_empty());
        assert!(el.has_class(VISIBLE_CLASS));
        assert_eq!(el.class_name(), "fade-in visible");
    }
}
