//! The small set of browser capabilities the page behaviours depend on.
//!
//! Controllers are written against these traits instead of `web_sys` types so
//! the decision logic (theme, booking, reveal, scroll math) runs in plain unit
//! tests. `crate::dom` implements them for the real page.

/// Something that carries a CSS class list.
pub trait ClassTarget {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn set_class_name(&self, name: &str);

    /// Flips `class` and returns whether it is present afterwards.
    fn toggle_class(&self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

/// Something with an inline style declaration.
pub trait StyleTarget {
    fn set_style(&self, property: &str, value: &str);
}

/// Key-value storage that survives the page session.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
}

/// Side effects of a booking submission.
pub trait BookingEffects {
    /// Blocking user-facing message.
    fn alert(&self, message: &str);
    fn show_confirmation(&self);
    /// Opens `url` in a new browsing context after `delay_ms` and dismisses
    /// the confirmation.
    fn open_after_delay(&self, url: String, delay_ms: u32);
}

impl<T: ClassTarget> ClassTarget for &T {
    fn add_class(&self, class: &str) {
        (**self).add_class(class)
    }
    fn remove_class(&self, class: &str) {
        (**self).remove_class(class)
    }
    fn has_class(&self, class: &str) -> bool {
        (**self).has_class(class)
    }
    fn set_class_name(&self, name: &str) {
        (**self).set_class_name(name)
    }
}

impl<T: StyleTarget> StyleTarget for &T {
    fn set_style(&self, property: &str, value: &str) {
        (**self).set_style(property, value)
    }
}

impl<S: PreferenceStore> PreferenceStore for &S {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }
    fn save(&self, key: &str, value: &str) {
        (**self).save(key, value)
    }
}
