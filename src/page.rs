use std::rc::Rc;

use gloo_console::log as console;
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Window};

use crate::booking;
use crate::components::scroll_top::ScrollTopButton;
use crate::config::PageConfig;
use crate::dom::{self, LocalStorage, PageError};
use crate::effects::loader::{self, Loader};
use crate::effects::{motion, reveal, scroll};
use crate::input::{anchors, feedback, keyboard};
use crate::theme;

/// Owns the page's elements and wires every behaviour once the document is
/// parsed. Listeners keep their own clones, so the controller can be
/// dropped after [`PageController::start`].
pub struct PageController {
    window: Window,
    document: Document,
    body: HtmlElement,
    config: PageConfig,
    loader: Rc<Loader<Element>>,
    hero: Option<HtmlElement>,
    fade_elements: Vec<Element>,
    sections: Vec<HtmlElement>,
    nav_links: Vec<Element>,
    scroll_indicator: Option<Element>,
}

impl PageController {
    pub fn new() -> Result<Self, PageError> {
        let window = web_sys::window().ok_or(PageError::NoWindow)?;
        let document = window.document().ok_or(PageError::NoDocument)?;
        let body = document.body().ok_or(PageError::NoBody)?;
        let config = PageConfig::load(&document);

        let loader = Rc::new(Loader::new(dom::query(&document, ".loader")));
        let hero = dom::query(&document, ".hero").and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let fade_elements = dom::query_all(&document, ".fade-in");
        let sections = dom::query_all(&document, "section[id]")
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();
        let nav_links = dom::query_all(&document, ".nav-link");
        let scroll_indicator = dom::query(&document, ".scroll-indicator");

        Ok(Self {
            window,
            document,
            body,
            config,
            loader,
            hero,
            fade_elements,
            sections,
            nav_links,
            scroll_indicator,
        })
    }

    /// Runs `start` now if the document is parsed, otherwise on
    /// `DOMContentLoaded`.
    pub fn start_when_ready(self) -> Result<(), PageError> {
        if self.document.ready_state() != "loading" {
            self.start();
            return Ok(());
        }

        let document = self.document.clone();
        let mut pending = Some(self);
        dom::listen(&document, "DOMContentLoaded", move |_: Event| {
            if let Some(page) = pending.take() {
                page.start();
            }
        })
    }

    /// Attaches every behaviour. A behaviour that fails to attach is logged
    /// and skipped; the rest still run.
    pub fn start(self) {
        info!("Attaching page behaviours");

        let failed = attach_each(vec![
            step("loader", || loader::attach(&self.window, self.loader.clone())),
            step("theme", || {
                theme::attach(
                    &self.document,
                    &self.body,
                    LocalStorage::from_window(&self.window),
                )
            }),
            step("scroll reveal", || reveal::attach(&self.fade_elements)),
            step("anchor navigation", || {
                anchors::attach(&self.window, &self.document, self.config.anchor_scroll_ms)
            }),
            step("booking form", || {
                booking::attach(
                    &self.window,
                    &self.document,
                    self.config.whatsapp_number.clone(),
                )
            }),
            step("scroll effects", || {
                scroll::attach(
                    &self.window,
                    scroll::ScrollTargets {
                        body: self.body.clone().into(),
                        hero: self.hero.clone(),
                        sections: self.sections.clone(),
                        nav_links: self.nav_links.clone(),
                    },
                    self.config.scroll_throttle_ms,
                )
            }),
            step("form feedback", || {
                feedback::attach(&self.document, self.config.input_debounce_ms)
            }),
            step("scroll-to-top button", || self.mount_scroll_top()),
            step("keyboard", || keyboard::attach(&self.document)),
        ]);

        if motion::prefers_reduced_motion(&self.window) {
            motion::apply_reduced_motion(
                &self.fade_elements,
                &self.loader,
                self.scroll_indicator.as_ref(),
            );
        }

        if self.config.welcome_banner {
            print_welcome_banner();
        }
        debug!("Page behaviours attached, {} failed", failed.len());
    }

    fn mount_scroll_top(&self) -> Result<(), PageError> {
        let host = self.document.create_element("div")?;
        host.set_class_name("scroll-top-host");
        self.body.append_child(&host)?;
        yew::Renderer::<ScrollTopButton>::with_root(host).render();
        Ok(())
    }
}

type AttachStep<'a> = (&'static str, Box<dyn FnOnce() -> Result<(), PageError> + 'a>);

fn step<'a>(
    name: &'static str,
    attach: impl FnOnce() -> Result<(), PageError> + 'a,
) -> AttachStep<'a> {
    (name, Box::new(attach))
}

/// Runs every step regardless of earlier failures and returns the names of
/// the ones that failed.
fn attach_each(steps: Vec<AttachStep<'_>>) -> Vec<&'static str> {
    let mut failed = Vec::new();
    for (name, attach) in steps {
        if let Err(err) = attach() {
            warn!("Attaching {} failed: {}", name, err);
            failed.push(name);
        }
    }
    failed
}

fn print_welcome_banner() {
    console!(
        "%c🌿 The Skin Investor",
        "font-size: 24px; font-weight: bold; color: #C6A96E;"
    );
    console!(
        "%cPersonalized Skincare Consultation",
        "font-size: 14px; color: #666;"
    );
    console!("%cThank you for visiting!", "font-size: 12px; color: #999;");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn failing_behaviour_does_not_stop_the_rest() {
        let log = RefCell::new(Vec::new());
        let ran = &log;
        let recorded = move |name: &'static str, result: Result<(), PageError>| {
            step(name, move || {
                ran.borrow_mut().push(name);
                result
            })
        };

        let failed = attach_each(vec![
            recorded("theme", Ok(())),
            recorded("scroll reveal", Err(PageError::Js("observer unsupported".into()))),
            recorded("booking form", Ok(())),
            recorded("scroll-to-top button", Err(PageError::NoBody)),
            recorded("keyboard", Ok(())),
        ]);

        assert_eq!(failed, vec!["scroll reveal", "scroll-to-top button"]);
        assert_eq!(
            *ran.borrow(),
            vec!["theme", "scroll reveal", "booking form", "scroll-to-top button", "keyboard"]
        );
    }

    #[test]
    fn nothing_fails_when_every_step_attaches() {
        let failed = attach_each(vec![step("loader", || Ok(())), step("keyboard", || Ok(()))]);
        assert!(failed.is_empty());
    }
}
