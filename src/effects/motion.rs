use log::info;
use web_sys::Window;

use super::loader::Loader;
use super::reveal::VISIBLE_CLASS;
use crate::platform::{ClassTarget, StyleTarget};

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map_or(false, |query| query.matches())
}

/// Shows every fade-in element immediately, hides the loader and the scroll
/// indicator.
pub fn apply_reduced_motion<F, L, S>(fade_elements: &[F], loader: &Loader<L>, scroll_indicator: Option<&S>)
where
    F: ClassTarget + StyleTarget,
    L: ClassTarget,
    S: StyleTarget,
{
    for element in fade_elements {
        element.add_class(VISIBLE_CLASS);
        element.set_style("transition", "none");
    }
    loader.hide();
    if let Some(indicator) = scroll_indicator {
        indicator.set_style("display", "none");
    }
    info!("Reduced motion requested, animations disabled");
}
