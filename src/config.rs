use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::util::format_phone_for_whatsapp;

pub const THEME_STORAGE_KEY: &str = "theme";

// Digits only, country code first.
pub const WHATSAPP_NUMBER: &str = "233261577159";

pub const LOADER_AFTER_LOAD_MS: u32 = 1_500;
pub const LOADER_FALLBACK_MS: u32 = 3_000;
pub const REDIRECT_DELAY_MS: u32 = 2_000;

pub const NAVBAR_SCROLLED_OFFSET: f64 = 50.0;
pub const SECTION_ACTIVATION_MARGIN: f64 = 200.0;
pub const SCROLL_TOP_THRESHOLD: f64 = 500.0;
pub const PARALLAX_FACTOR: f64 = 0.5;
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Id of the optional `<script type="application/json">` block the host page
/// can use to override [`PageConfig`].
pub const CONFIG_ELEMENT_ID: &str = "page-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Runtime switches read from the host page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    /// Rate limit for the navbar, parallax and active-link scroll listeners.
    /// `None` runs them on every event. The scroll-to-top button always
    /// follows the live offset.
    pub scroll_throttle_ms: Option<u32>,
    /// Quiet period before booking inputs re-check their `valid` marker.
    pub input_debounce_ms: Option<u32>,
    /// Animate anchor jumps in Rust over this many ms instead of native
    /// smooth `scrollIntoView`.
    pub anchor_scroll_ms: Option<u32>,
    pub whatsapp_number: String,
    pub welcome_banner: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_throttle_ms: None,
            input_debounce_ms: None,
            anchor_scroll_ms: None,
            whatsapp_number: WHATSAPP_NUMBER.to_string(),
            welcome_banner: true,
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(raw)?;
        let digits = format_phone_for_whatsapp(&config.whatsapp_number);
        config.whatsapp_number = if digits.is_empty() {
            warn!(
                "whatsappNumber {:?} has no digits, using {}",
                config.whatsapp_number, WHATSAPP_NUMBER
            );
            WHATSAPP_NUMBER.to_string()
        } else {
            digits
        };
        Ok(config)
    }

    /// Falls back to defaults when the block is absent or malformed.
    pub fn load(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, err);
                Self::default()
            }
        }
    }
}
