//! Mock page for testing
//!
//! Provides a MockPage that implements [`PageHost`] and records every
//! mutation for test assertions, without a browser or a document tree.

use std::collections::HashMap;

use crate::traits::{PageHost, RAIL_CLASS, RailSide};
use crate::{ElementSpec, RenderError};

/// Record of a page mutation for test inspection
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    /// A container's children were removed
    Clear(String),
    /// An element was appended to a container
    Append { container: String, element: ElementSpec },
    /// A card was wrapped and given rails
    WrapCard(usize),
}

/// Cards inside a grid, and whether each has been wrapped yet
#[derive(Debug, Default)]
struct MockGrid {
    grid: String,
    card: String,
    wrapped: Vec<bool>,
}

/// A mock page that records all mutations for testing
///
/// Containers are identified by their selector. Rails are identified by
/// card index and side, e.g. `.star-rail[1].left`.
#[derive(Debug, Default)]
pub struct MockPage {
    /// All mutations made to this page
    pub calls: Vec<RenderCall>,
    pub client_width: Option<f64>,
    pub inner_width: Option<f64>,
    pub reduced_motion: bool,
    pub flags: Vec<String>,
    selectors: Vec<String>,
    grid: Option<MockGrid>,
    children: HashMap<String, Vec<ElementSpec>>,
    rejecting: Vec<String>,
}

impl MockPage {
    /// Create an empty mock page
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_widths(mut self, client: Option<f64>, inner: Option<f64>) -> Self {
        self.client_width = client;
        self.inner_width = inner;
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Make selectors resolvable
    pub fn with_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selectors.extend(selectors.into_iter().map(Into::into));
        self
    }

    /// Make appends to a container fail
    pub fn with_rejecting(mut self, container: impl Into<String>) -> Self {
        self.rejecting.push(container.into());
        self
    }

    /// Add a grid holding `count` unwrapped cards
    pub fn with_cards(mut self, grid: &str, card: &str, count: usize) -> Self {
        self.grid = Some(MockGrid {
            grid: grid.to_string(),
            card: card.to_string(),
            wrapped: vec![false; count],
        });
        self
    }

    /// Clear all recorded calls
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Get the number of recorded calls
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    // === Assertion helpers ===

    /// Current children of a container
    pub fn children(&self, container: &str) -> &[ElementSpec] {
        self.children.get(container).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn child_count(&self, container: &str) -> usize {
        self.children(container).len()
    }

    /// Children across every container
    pub fn total_children(&self) -> usize {
        self.children.values().map(Vec::len).sum()
    }

    /// Check if a container was cleared since calls were last reset
    pub fn was_cleared(&self, container: &str) -> bool {
        self.calls
            .iter()
            .any(|call| matches!(call, RenderCall::Clear(c) if c == container))
    }

    /// Count the appends recorded since calls were last reset
    pub fn append_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, RenderCall::Append { .. }))
            .count()
    }

    /// Count cards wrapped since calls were last reset
    pub fn wrap_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, RenderCall::WrapCard(_)))
            .count()
    }

    fn rail_id(index: usize, side: RailSide) -> String {
        format!(".{}[{}].{}", RAIL_CLASS, index, side.class_name())
    }
}

impl PageHost for MockPage {
    type Container = String;

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
        self.flags.iter().any(|f| f == flag)
    }

    fn exists(&self, selector: &str) -> bool {
        self.selectors.iter().any(|s| s == selector)
            || self.grid.as_ref().is_some_and(|g| g.grid == selector)
    }

    fn container(&self, selector: &str) -> Option<String> {
        self.exists(selector).then(|| selector.to_string())
    }

    fn card_rails(&mut self, grid: &str, card: &str) -> Result<Option<Vec<String>>, RenderError> {
        let Some(mock) = self.grid.as_mut().filter(|g| g.grid == grid) else {
            return Ok(None);
        };
        if mock.card != card {
            return Ok(Some(Vec::new()));
        }

        let mut rails = Vec::with_capacity(mock.wrapped.len() * 2);
        for (index, wrapped) in mock.wrapped.iter_mut().enumerate() {
            if !*wrapped {
                *wrapped = true;
                self.calls.push(RenderCall::WrapCard(index));
            }
            rails.extend(RailSide::BOTH.iter().map(|&side| Self::rail_id(index, side)));
        }
        Ok(Some(rails))
    }

    fn clear(&mut self, container: &String) {
        self.calls.push(RenderCall::Clear(container.clone()));
        self.children.remove(container);
    }

    fn append(&mut self, container: &String, element: &ElementSpec) -> Result<(), RenderError> {
        if self.rejecting.contains(container) {
            return Err(RenderError::Dom(format!("append to {} rejected", container)));
        }
        self.calls.push(RenderCall::Append {
            container: container.clone(),
            element: element.clone(),
        });
        self.children
            .entry(container.clone())
            .or_default()
            .push(element.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardrift_core::{ParticleKind, ParticleSpec};

    fn element() -> ElementSpec {
        ElementSpec::from_particle(&ParticleSpec::new(ParticleKind::DiagonalStar, 16.0, -1.0))
    }

    #[test]
    fn test_mock_page_records_calls() {
        let mut page = MockPage::new().with_selectors([".diagonal-stars"]);
        let container = page.container(".diagonal-stars").unwrap();

        page.append(&container, &element()).unwrap();
        page.append(&container, &element()).unwrap();
        assert_eq!(page.child_count(".diagonal-stars"), 2);
        assert_eq!(page.append_count(), 2);

        page.clear(&container);
        assert_eq!(page.child_count(".diagonal-stars"), 0);
        assert!(page.was_cleared(".diagonal-stars"));
        assert_eq!(page.call_count(), 3);

        page.clear_calls();
        assert_eq!(page.call_count(), 0);
    }

    #[test]
    fn test_unknown_selector() {
        let page = MockPage::new();
        assert!(page.container(".floating-stars").is_none());
        assert!(!page.exists("#skills"));
    }

    #[test]
    fn test_rails_are_stable() {
        let mut page = MockPage::new().with_cards(".grid", ".card", 2);
        let first = page.card_rails(".grid", ".card").unwrap().unwrap();
        let second = page.card_rails(".grid", ".card").unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        assert_eq!(first[1], ".star-rail[0].right");
        assert_eq!(page.wrap_count(), 2);
        assert!(page.card_rails(".other", ".card").unwrap().is_none());
    }
}
