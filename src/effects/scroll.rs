//! Scroll-driven effects: navbar marker, hero parallax and active nav link.
//! Each is registered as its own listener and recomputed from the current
//! offset on every event.

use log::debug;
use web_sys::{Element, Event, HtmlElement, Window};

use crate::config::{
    NAVBAR_SCROLLED_OFFSET, PARALLAX_FACTOR, SCROLL_TOP_THRESHOLD, SECTION_ACTIVATION_MARGIN,
};
use crate::dom::{self, PageError};
use crate::platform::{ClassTarget, StyleTarget};
use crate::util::Throttle;

pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
}

pub fn navbar_scrolled(offset: f64) -> bool {
    offset > NAVBAR_SCROLLED_OFFSET
}

/// Background offset for the hero, or `None` once it has scrolled out.
pub fn parallax_position(offset: f64, hero_height: f64) -> Option<f64> {
    (offset < hero_height).then(|| offset * PARALLAX_FACTOR)
}

/// Last section whose top, less the activation margin, has been passed.
pub fn active_section(sections: &[SectionBounds], offset: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|section| offset >= section.top - SECTION_ACTIVATION_MARGIN)
        .last()
        .map(|section| section.id.as_str())
}

pub fn scroll_top_visible(offset: f64) -> bool {
    offset > SCROLL_TOP_THRESHOLD
}

/// Clears `active` everywhere, then sets it on links pointing at `current`.
pub fn highlight_nav_links<T: ClassTarget>(links: &[(T, Option<String>)], current: Option<&str>) {
    for (link, href) in links {
        link.remove_class(ACTIVE_CLASS);
        let matches = match (href.as_deref(), current) {
            (Some(href), Some(id)) => href.strip_prefix('#') == Some(id),
            _ => false,
        };
        if matches {
            link.add_class(ACTIVE_CLASS);
        }
    }
}

pub fn apply_navbar_marker<T: ClassTarget>(body: &T, offset: f64) {
    body.set_class(SCROLLED_CLASS, navbar_scrolled(offset));
}

pub fn apply_parallax<T: StyleTarget>(hero: &T, offset: f64, hero_height: f64) {
    if let Some(position) = parallax_position(offset, hero_height) {
        hero.set_style("background-position-y", &format!("{}px", position));
    }
}

/// Registers `handler` on window scroll, rate limited when `throttle_ms` is set.
pub fn on_scroll<F>(window: &Window, throttle_ms: Option<u32>, handler: F) -> Result<(), PageError>
where
    F: Fn(f64) + 'static,
{
    let throttle = throttle_ms.map(Throttle::new);
    let scroll_window = window.clone();

    dom::listen(window, "scroll", move |_: Event| {
        let offset = dom::scroll_offset(&scroll_window);
        match &throttle {
            Some(throttle) => {
                throttle.run(|| handler(offset));
            }
            None => handler(offset),
        }
    })
}

pub struct ScrollTargets {
    pub body: Element,
    pub hero: Option<HtmlElement>,
    pub sections: Vec<HtmlElement>,
    pub nav_links: Vec<Element>,
}

pub fn attach(
    window: &Window,
    targets: ScrollTargets,
    throttle_ms: Option<u32>,
) -> Result<(), PageError> {
    let ScrollTargets {
        body,
        hero,
        sections,
        nav_links,
    } = targets;

    on_scroll(window, throttle_ms, move |offset| {
        apply_navbar_marker(&body, offset);
    })?;

    if let Some(hero) = hero {
        on_scroll(window, throttle_ms, move |offset| {
            let element: &Element = &hero;
            apply_parallax(element, offset, hero.offset_height() as f64);
        })?;
    } else {
        debug!("No .hero on page, parallax disabled");
    }

    let links: Vec<(Element, Option<String>)> = nav_links
        .into_iter()
        .map(|link| {
            let href = link.get_attribute("href");
            (link, href)
        })
        .collect();

    on_scroll(window, throttle_ms, move |offset| {
        let bounds: Vec<SectionBounds> = sections
            .iter()
            .filter_map(|section| {
                let id = section.get_attribute("id")?;
                Some(SectionBounds {
                    id,
                    top: section.offset_top() as f64,
                })
            })
            .collect();
        highlight_nav_links(&links, active_section(&bounds, offset));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fakes::FakeElement;

    fn sections() -> Vec<SectionBounds> {
        [("home", 0.0), ("about", 800.0), ("services", 1600.0), ("booking", 2600.0)]
            .into_iter()
            .map(|(id, top)| SectionBounds {
                id: id.to_string(),
                top,
            })
            .collect()
    }

    #[test]
    fn navbar_marker_past_fifty_pixels() {
        let body = FakeElement::default();

        apply_navbar_marker(&body, 50.0);
        assert!(!body.has_class(SCROLLED_CLASS));

        apply_navbar_marker(&body, 51.0);
        assert!(body.has_class(SCROLLED_CLASS));

        apply_navbar_marker(&body, 0.0);
        assert!(!body.has_class(SCROLLED_CLASS));
    }

    #[test]
    fn parallax_moves_at_half_speed_while_hero_in_view() {
        let hero = FakeElement::default();

        apply_parallax(&hero, 300.0, 900.0);
        assert_eq!(hero.style("background-position-y").as_deref(), Some("150px"));

        // Past the hero the last position is left alone.
        apply_parallax(&hero, 1000.0, 900.0);
        assert_eq!(hero.style("background-position-y").as_deref(), Some("150px"));

        assert_eq!(parallax_position(45.0, 900.0), Some(22.5));
        assert_eq!(parallax_position(900.0, 900.0), None);
    }

    #[test]
    fn active_section_uses_margin_and_last_match() {
        let sections = sections();
        assert_eq!(active_section(&sections, 0.0), Some("home"));
        assert_eq!(active_section(&sections, 599.0), Some("home"));
        assert_eq!(active_section(&sections, 600.0), Some("about"));
        assert_eq!(active_section(&sections, 2400.0), Some("booking"));
        assert_eq!(active_section(&[], 100.0), None);
    }

    #[test]
    fn only_matching_link_is_active() {
        let links = vec![
            (FakeElement::with_classes(&["nav-link", ACTIVE_CLASS]), Some("#home".to_string())),
            (FakeElement::with_classes(&["nav-link"]), Some("#about".to_string())),
            (FakeElement::with_classes(&["nav-link"]), None),
        ];

        highlight_nav_links(&links, Some("about"));

        assert!(!links[0].0.has_class(ACTIVE_CLASS));
        assert!(links[1].0.has_class(ACTIVE_CLASS));
        assert!(!links[2].0.has_class(ACTIVE_CLASS));
    }

    #[test]
    fn no_current_section_clears_every_link() {
        let links = vec![
            (FakeElement::with_classes(&[ACTIVE_CLASS]), Some("#".to_string())),
            (FakeElement::with_classes(&[ACTIVE_CLASS]), Some("#home".to_string())),
        ];

        highlight_nav_links(&links, None);

        assert!(links.iter().all(|(link, _)| !link.has_class(ACTIVE_CLASS)));
    }

    #[test]
    fn scroll_top_shows_past_five_hundred() {
        assert!(!scroll_top_visible(500.0));
        assert!(scroll_top_visible(500.5));
    }
}
