use yew::prelude::*;
use yew_hooks::use_window_scroll;

use crate::effects::scroll::scroll_top_visible;

const BUTTON_STYLE: &str = "position: fixed; bottom: 100px; right: 30px; width: 50px; height: 50px; \
    background: linear-gradient(135deg, #C6A96E 0%, #B8956A 100%); color: #FFFFFF; \
    border-radius: 50%; display: flex; align-items: center; justify-content: center; \
    font-size: 20px; box-shadow: 0 4px 20px rgba(0, 0, 0, 0.15); z-index: 999; \
    transition: all 0.3s ease;";

/// Inline style for the button, shown past the scroll threshold. Only
/// opacity and visibility change so the layout never shifts.
pub fn button_style(offset: f64) -> String {
    let visibility = if scroll_top_visible(offset) {
        "opacity: 1; visibility: visible;"
    } else {
        "opacity: 0; visibility: hidden;"
    };
    format!("{} {}", BUTTON_STYLE, visibility)
}

#[function_component(ScrollTopButton)]
pub fn scroll_top_button() -> Html {
    let (_, offset) = use_window_scroll();

    html! {
        <a
            href="#home"
            class="scroll-top"
            aria-label="Scroll to top"
            style={button_style(offset)}
        >
            <i class="fas fa-chevron-up"></i>
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_near_the_top() {
        let style = button_style(120.0);
        assert!(style.ends_with("opacity: 0; visibility: hidden;"));
        assert!(style.starts_with("position: fixed;"));
    }

    #[test]
    fn shown_after_threshold() {
        assert!(button_style(900.0).ends_with("opacity: 1; visibility: visible;"));
    }

    #[test]
    fn layout_is_identical_either_way() {
        let hidden = button_style(0.0);
        let shown = button_style(1000.0);
        let strip = |s: &str| s.split(" opacity").next().unwrap_or_default().to_string();
        assert_eq!(strip(&hidden), strip(&shown));
        assert!(hidden.contains("display: flex;"));
    }
}
