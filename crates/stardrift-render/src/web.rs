//! Live browser pages
//!
//! [`WebPage`] implements [`PageHost`] over the window's document using
//! web-sys. Only built for wasm32.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::traits::{CARD_WRAP_CLASS, PageHost, RAIL_CLASS, RailSide};
use crate::{ElementSpec, RenderError};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

fn dom_error(err: JsValue) -> RenderError {
    RenderError::Dom(format!("{:?}", err))
}

/// The current browser page
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    /// Attach to the global window and document
    pub fn from_window() -> Result<Self, RenderError> {
        let window = web_sys::window().ok_or(RenderError::NoWindow)?;
        let document = window.document().ok_or(RenderError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn create_rail(&self, side: RailSide) -> Result<Element, RenderError> {
        let rail = self.document.create_element("div").map_err(dom_error)?;
        rail.set_class_name(&format!("{} {}", RAIL_CLASS, side.class_name()));
        rail.set_attribute("aria-hidden", "true").map_err(dom_error)?;
        Ok(rail)
    }

    /// Existing rails of a wrapped card, in left/right order
    fn existing_rails(wrap: &Element) -> Vec<Element> {
        RailSide::BOTH
            .iter()
            .filter_map(|side| {
                let selector = format!(".{}.{}", RAIL_CLASS, side.class_name());
                wrap.query_selector(&selector).ok().flatten()
            })
            .collect()
    }

    fn wrap_card(&self, card: &Element, parent: &Element) -> Result<Vec<Element>, RenderError> {
        let wrap = self.document.create_element("div").map_err(dom_error)?;
        wrap.set_class_name(CARD_WRAP_CLASS);
        parent.insert_before(&wrap, Some(card.as_ref())).map_err(dom_error)?;

        let mut rails = Vec::with_capacity(2);
        for side in RailSide::BOTH {
            let rail = self.create_rail(side)?;
            wrap.append_child(&rail).map_err(dom_error)?;
            rails.push(rail);
        }
        wrap.append_child(card).map_err(dom_error)?;
        Ok(rails)
    }
}

impl PageHost for WebPage {
    type Container = Element;

    fn client_width(&self) -> Option<f64> {
        self.document
            .document_element()
            .map(|el| el.client_width() as f64)
    }

    fn inner_width(&self) -> Option<f64> {
        self.window.inner_width().ok().and_then(|v| v.as_f64())
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn has_flag(&self, flag: &str) -> bool {
        self.document
            .body()
            .is_some_and(|body| body.class_list().contains(flag))
    }

    fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    fn container(&self, selector: &str) -> Option<Element> {
        self.query(selector)
    }

    fn card_rails(&mut self, grid: &str, card: &str) -> Result<Option<Vec<Element>>, RenderError> {
        let Some(grid) = self.query(grid) else {
            return Ok(None);
        };

        let cards = grid.query_selector_all(card).map_err(dom_error)?;
        let mut rails = Vec::new();
        for index in 0..cards.length() {
            let Some(card) = cards.item(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(parent) = card.parent_element() else {
                continue;
            };

            if parent.class_list().contains(CARD_WRAP_CLASS) {
                rails.extend(Self::existing_rails(&parent));
            } else {
                rails.extend(self.wrap_card(&card, &parent)?);
            }
        }

        Ok(Some(rails))
    }

    fn clear(&mut self, container: &Element) {
        container.set_text_content(None);
    }

    fn append(&mut self, container: &Element, element: &ElementSpec) -> Result<(), RenderError> {
        let el = self.document.create_element("div").map_err(dom_error)?;
        el.set_class_name(element.class);
        if let Some(text) = &element.text {
            el.set_text_content(Some(text.as_str()));
        }

        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let style = html.style();
            for hook in &element.hooks {
                style.set_property(hook.name, &hook.value).map_err(dom_error)?;
            }
        }

        container.append_child(&el).map_err(dom_error)?;
        Ok(())
    }
}
