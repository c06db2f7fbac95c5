use log::{debug, info};
use web_sys::{Document, Element, HtmlElement};

use crate::config::THEME_STORAGE_KEY;
use crate::dom::{self, LocalStorage, PageError};
use crate::platform::{ClassTarget, PreferenceStore};

pub const DARK_MODE_CLASS: &str = "dark-mode";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than the literal `"dark"` reads as light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The toggle shows the mode you would switch to.
    pub fn icon_class(self) -> &'static str {
        match self {
            Theme::Light => "fas fa-moon",
            Theme::Dark => "fas fa-sun",
        }
    }
}

/// Keeps the body's `dark-mode` class, the toggle icon and the persisted
/// preference in agreement.
pub struct ThemeController<B, I, S> {
    body: B,
    icon: Option<I>,
    store: S,
}

impl<B, I, S> ThemeController<B, I, S>
where
    B: ClassTarget,
    I: ClassTarget,
    S: PreferenceStore,
{
    pub fn new(body: B, icon: Option<I>, store: S) -> Self {
        Self { body, icon, store }
    }

    /// Applies the persisted preference without writing it back.
    pub fn apply_saved(&self) -> Theme {
        let theme = Theme::from_stored(self.store.load(THEME_STORAGE_KEY).as_deref());
        self.body.set_class(DARK_MODE_CLASS, theme == Theme::Dark);
        self.update_icon(theme);
        theme
    }

    /// Theme as rendered, read from the body rather than remembered.
    pub fn current(&self) -> Theme {
        if self.body.has_class(DARK_MODE_CLASS) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggle(&self) -> Theme {
        self.body.toggle_class(DARK_MODE_CLASS);
        let theme = self.current();
        self.store.save(THEME_STORAGE_KEY, theme.as_str());
        self.update_icon(theme);
        theme
    }

    fn update_icon(&self, theme: Theme) {
        if let Some(icon) = &self.icon {
            icon.set_class_name(theme.icon_class());
        }
    }
}

pub fn attach(
    document: &Document,
    body: &HtmlElement,
    store: LocalStorage,
) -> Result<(), PageError> {
    let toggle = document.get_element_by_id("themeToggle");
    let icon = toggle
        .as_ref()
        .and_then(|toggle| toggle.query_selector("i").ok().flatten());
    let body: Element = body.clone().into();

    let controller = ThemeController::new(body, icon, store);
    let theme = controller.apply_saved();
    info!("Applied {} theme", theme.as_str());

    let Some(toggle) = toggle else {
        debug!("No #themeToggle on page, theme is fixed");
        return Ok(());
    };

    dom::listen(&toggle, "click", move |_: web_sys::MouseEvent| {
        let theme = controller.toggle();
        debug!("Switched to {} theme", theme.as_str());
    })
}
