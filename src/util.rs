//! Timing and scrolling helpers the page can opt into through `PageConfig`.
//! None of them is active with the default configuration.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Date;
use web_sys::{Element, Window};

use crate::dom::{self, PageError};

/// Runs the first call, then drops calls until `limit_ms` has passed.
pub struct Throttle {
    limit_ms: f64,
    last_run: Cell<Option<f64>>,
}

impl Throttle {
    pub fn new(limit_ms: u32) -> Self {
        Self {
            limit_ms: f64::from(limit_ms),
            last_run: Cell::new(None),
        }
    }

    pub fn run<F: FnOnce()>(&self, f: F) -> bool {
        self.run_at(Date::now(), f)
    }

    /// Same as [`Throttle::run`] with an explicit clock reading in ms.
    pub fn run_at<F: FnOnce()>(&self, now: f64, f: F) -> bool {
        if let Some(last) = self.last_run.get() {
            if now - last < self.limit_ms {
                return false;
            }
        }
        self.last_run.set(Some(now));
        f();
        true
    }
}

/// Runs only the latest call, once `wait_ms` has passed without another.
pub struct Debouncer {
    wait_ms: u32,
    pending: RefCell<Option<Timeout>>,
}

impl Debouncer {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            pending: RefCell::new(None),
        }
    }

    pub fn call<F: FnOnce() + 'static>(&self, f: F) {
        // Dropping the previous timeout cancels it.
        *self.pending.borrow_mut() = Some(Timeout::new(self.wait_ms, f));
    }
}

/// Quadratic ease-in-out: `t` elapsed, `b` start, `c` change, `d` duration.
pub fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    t -= 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

/// Animates the window scroll so `element` ends at the top of the viewport.
pub fn smooth_scroll_to(window: &Window, element: &Element, duration_ms: f64) -> Result<(), PageError> {
    let start = dom::scroll_offset(window);
    let target = element.get_bounding_client_rect().top() + start;
    let distance = target - start;

    if duration_ms <= 0.0 {
        window.scroll_to_with_x_and_y(0.0, target);
        return Ok(());
    }

    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next_frame = frame.clone();
    let anim_window = window.clone();
    let mut started: Option<f64> = None;

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let elapsed = now - *started.get_or_insert(now);
        let position = ease_in_out_quad(elapsed.min(duration_ms), start, distance, duration_ms);
        anim_window.scroll_to_with_x_and_y(0.0, position);

        if elapsed < duration_ms {
            if let Some(callback) = next_frame.borrow().as_ref() {
                let _ = anim_window.request_animation_frame(callback.as_ref().unchecked_ref());
            }
        } else {
            // Release the closure's self-reference once the animation ends.
            let _ = next_frame.borrow_mut().take();
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = frame.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}

/// Keeps only the digits, the form `wa.me` links expect.
pub fn format_phone_for_whatsapp(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}
