//! Static HTML snapshots
//!
//! [`HtmlPage`] is a [`PageHost`] backed by an in-memory [`Document`]. It
//! can build the portfolio page skeleton the particle fields expect, run
//! fields against it like a browser would, and serialize the result.

use crate::dom::{Document, NodeId};
use crate::traits::{CARD_WRAP_CLASS, PageHost, RAIL_CLASS, RailSide};
use crate::{ElementSpec, RenderError};

/// Container classes of the main background, in paint order
pub const BACKGROUND_CONTAINERS: [&str; 4] = ["floating-stars", "flying-stars", "diagonal-stars", "small-dots"];

/// A page snapshot that particle fields can be applied to
#[derive(Debug, Clone)]
pub struct HtmlPage {
    document: Document,
    pub client_width: Option<f64>,
    pub inner_width: Option<f64>,
    pub reduced_motion: bool,
}

impl HtmlPage {
    /// Wrap an existing document
    pub fn new(document: Document, width: f64) -> Self {
        Self {
            document,
            client_width: Some(width),
            inner_width: Some(width),
            reduced_motion: false,
        }
    }

    /// Build the portfolio skeleton: background layers, the skills section
    /// and `skill_cards` cards in its grid
    pub fn portfolio(width: f64, skill_cards: usize) -> Self {
        let mut doc = Document::new();
        let body = doc.body();

        let background = doc.create_element("div", &["flowing-background"]);
        doc.node_mut(background)
            .attributes
            .push(("aria-hidden".to_string(), "true".to_string()));
        doc.append_child(body, background);
        for class in BACKGROUND_CONTAINERS {
            let layer = doc.create_element("div", &[class]);
            doc.append_child(background, layer);
        }

        let skills = doc.create_element("section", &["skills"]);
        doc.node_mut(skills).id = Some("skills".to_string());
        doc.append_child(body, skills);

        let fly_layer = doc.create_element("div", &["skills-fly-stars"]);
        doc.node_mut(fly_layer)
            .attributes
            .push(("aria-hidden".to_string(), "true".to_string()));
        doc.append_child(skills, fly_layer);

        let heading = doc.create_element("h2", &["section-title"]);
        doc.node_mut(heading).text = Some("Skills".to_string());
        doc.append_child(skills, heading);

        let grid = doc.create_element("div", &["skills-grid"]);
        doc.append_child(skills, grid);
        for index in 0..skill_cards {
            let card = doc.create_element("div", &["skill-category"]);
            let title = doc.create_element("h3", &[]);
            doc.node_mut(title).text = Some(format!("Skill group {}", index + 1));
            doc.append_child(card, title);
            doc.append_child(grid, card);
        }

        Self::new(doc, width)
    }

    /// Add a flag class to the body
    pub fn set_flag(&mut self, flag: &str) {
        let body = self.document.body();
        let node = self.document.node_mut(body);
        if !node.has_class(flag) {
            node.classes.push(flag.to_string());
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Number of children of the first element matching a selector
    pub fn child_count(&self, selector: &str) -> usize {
        self.document
            .query_selector(selector)
            .map_or(0, |id| self.document.node(id).children.len())
    }

    /// Serialize the body
    pub fn to_html(&self) -> String {
        self.document.to_html(self.document.body())
    }

    fn rail(&mut self, side: RailSide) -> NodeId {
        let rail = self
            .document
            .create_element("div", &[RAIL_CLASS, side.class_name()]);
        self.document
            .node_mut(rail)
            .attributes
            .push(("aria-hidden".to_string(), "true".to_string()));
        rail
    }
}

impl PageHost for HtmlPage {
    type Container = NodeId;

    fn client_width(&self) -> Option<f64> {
        self.client_width
    }

    fn inner_width(&self) -> Option<f64> {
        self.inner_width
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn has_flag(&self, flag: &str) -> bool {
        self.document.node(self.document.body()).has_class(flag)
    }

    fn exists(&self, selector: &str) -> bool {
        self.document.query_selector(selector).is_some()
    }

    fn container(&self, selector: &str) -> Option<NodeId> {
        self.document.query_selector(selector)
    }

    fn card_rails(&mut self, grid: &str, card: &str) -> Result<Option<Vec<NodeId>>, RenderError> {
        let Some(grid) = self.document.query_selector(grid) else {
            return Ok(None);
        };

        let mut rails = Vec::new();
        for card in self.document.query_selector_all(grid, card) {
            let parent = self.document.node(card).parent;
            let wrapped = parent.filter(|&p| self.document.node(p).has_class(CARD_WRAP_CLASS));

            if let Some(wrap) = wrapped {
                for side in RailSide::BOTH {
                    let selector = format!(".{}.{}", RAIL_CLASS, side.class_name());
                    if let Some(&rail) = self.document.query_selector_all(wrap, &selector).first() {
                        rails.push(rail);
                    }
                }
                continue;
            }

            let Some(parent) = parent else {
                continue;
            };
            let wrap = self.document.create_element("div", &[CARD_WRAP_CLASS]);
            self.document.insert_before(parent, wrap, card);
            for side in RailSide::BOTH {
                let rail = self.rail(side);
                self.document.append_child(wrap, rail);
                rails.push(rail);
            }
            self.document.append_child(wrap, card);
        }

        Ok(Some(rails))
    }

    fn clear(&mut self, container: &NodeId) {
        self.document.remove_children(*container);
    }

    fn append(&mut self, container: &NodeId, element: &ElementSpec) -> Result<(), RenderError> {
        let id = self.document.create_element("div", &[element.class]);
        let node = self.document.node_mut(id);
        node.text = element.text.clone();
        node.style = element.hooks.clone();
        self.document.append_child(*container, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply_field;
    use stardrift_core::{FieldPreset, SKILLS_STARS_FLAG, seeded_rng};

    #[test]
    fn test_portfolio_skeleton() {
        let page = HtmlPage::portfolio(1280.0, 4);
        for class in BACKGROUND_CONTAINERS {
            assert!(page.exists(&format!(".{class}")), "missing .{class}");
        }
        assert!(page.exists("#skills"));
        assert!(page.exists(".skills-fly-stars"));
        assert_eq!(page.child_count(".skills .skills-grid"), 4);
        assert!(!page.has_flag(SKILLS_STARS_FLAG));
    }

    #[test]
    fn test_flags() {
        let mut page = HtmlPage::portfolio(1280.0, 1);
        page.set_flag(SKILLS_STARS_FLAG);
        page.set_flag(SKILLS_STARS_FLAG);
        assert!(page.has_flag(SKILLS_STARS_FLAG));
        assert!(page.to_html().starts_with("<body class=\"show-skills-stars\">"));
    }

    #[test]
    fn test_background_renders_markup() {
        let mut page = HtmlPage::portfolio(1400.0, 0);
        let outcome = apply_field(&mut page, &FieldPreset::flowing_background(), &mut seeded_rng(9)).unwrap();
        assert_eq!(outcome.elements(), 192);
        assert_eq!(page.child_count(".floating-stars"), 38);

        let html = page.to_html();
        assert_eq!(html.matches("class=\"star\"").count(), 38);
        assert_eq!(html.matches("class=\"small-dot\"").count(), 96);
        assert!(html.contains("style=\"--x: "));
    }

    #[test]
    fn test_card_rails_wrap_once() {
        let mut page = HtmlPage::portfolio(1280.0, 3);
        let preset = FieldPreset::card_rails();

        apply_field(&mut page, &preset, &mut seeded_rng(1)).unwrap();
        apply_field(&mut page, &preset, &mut seeded_rng(2)).unwrap();

        let html = page.to_html();
        assert_eq!(html.matches("class=\"skill-card-wrap\"").count(), 3);
        assert_eq!(html.matches("class=\"star-rail left\"").count(), 3);
        assert_eq!(html.matches("class=\"star-rail right\"").count(), 3);
        assert_eq!(html.matches("class=\"rail-star\"").count(), 6);
        assert_eq!(page.child_count(".skill-card-wrap"), 3);
        assert_eq!(page.child_count(".star-rail.left"), 1);
    }

    #[test]
    fn test_skills_crossing_with_flag() {
        let mut page = HtmlPage::portfolio(1280.0, 2);
        page.set_flag(SKILLS_STARS_FLAG);
        let outcome = apply_field(&mut page, &FieldPreset::skills_crossing(), &mut seeded_rng(4)).unwrap();
        assert!(outcome.is_applied());
        assert_eq!(page.child_count(".skills-fly-stars"), 2);
    }
}
