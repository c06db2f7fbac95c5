use log::warn;
use web_sys::{Document, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window};

use crate::dom::{self, PageError};
use crate::util::smooth_scroll_to;

/// Selector for the in-page target of `href`, if it has one. A bare `#`
/// is left to the browser.
pub fn anchor_target(href: &str) -> Option<&str> {
    (href.len() > 1 && href.starts_with('#')).then_some(href)
}

pub fn attach(window: &Window, document: &Document, duration_ms: Option<u32>) -> Result<(), PageError> {
    for anchor in dom::query_all(document, r##"a[href^="#"]"##) {
        let window = window.clone();
        let document = document.clone();
        let link = anchor.clone();

        dom::listen(&anchor, "click", move |event: MouseEvent| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(target) = anchor_target(&href).and_then(|selector| dom::query(&document, selector)) else {
                return;
            };
            event.prevent_default();

            match duration_ms {
                Some(ms) => {
                    if let Err(err) = smooth_scroll_to(&window, &target, f64::from(ms)) {
                        warn!("Smooth scroll to {} failed: {}", href, err);
                    }
                }
                None => {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
            }
        })?;
    }
    Ok(())
}
