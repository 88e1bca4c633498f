//! Page host abstraction
//!
//! Field application only needs a handful of page queries and mutations.
//! Keeping them behind a trait lets the same code drive a browser page, an
//! HTML snapshot, or a recording mock in tests.

use crate::{ElementSpec, RenderError};

/// Class of the wrapper placed around each skill card
pub const CARD_WRAP_CLASS: &str = "skill-card-wrap";
/// Class shared by both rails beside a card
pub const RAIL_CLASS: &str = "star-rail";

/// Side of a card a rail sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailSide {
    Left,
    Right,
}

impl RailSide {
    pub const BOTH: [RailSide; 2] = [RailSide::Left, RailSide::Right];

    /// Modifier class added next to [`RAIL_CLASS`]
    pub const fn class_name(self) -> &'static str {
        match self {
            RailSide::Left => "left",
            RailSide::Right => "right",
        }
    }
}

/// A page that particle fields are materialized into
pub trait PageHost {
    /// Handle to a container element
    type Container: Clone;

    /// Width of the document element, if known
    fn client_width(&self) -> Option<f64>;

    /// Inner width of the window, if known
    fn inner_width(&self) -> Option<f64>;

    /// Whether the user prefers reduced motion
    fn prefers_reduced_motion(&self) -> bool;

    /// Whether the page body carries a flag class
    fn has_flag(&self, flag: &str) -> bool;

    /// Whether any element matches a selector
    fn exists(&self, selector: &str) -> bool;

    /// First element matching a selector
    fn container(&self, selector: &str) -> Option<Self::Container>;

    /// Rails beside every card inside the grid
    ///
    /// Cards are wrapped in a [`CARD_WRAP_CLASS`] element holding a left and
    /// a right rail the first time they are seen. Later calls return the
    /// existing rails. Returns `None` when the grid is absent.
    fn card_rails(&mut self, grid: &str, card: &str) -> Result<Option<Vec<Self::Container>>, RenderError>;

    /// Remove every child of a container
    fn clear(&mut self, container: &Self::Container);

    /// Append one element to a container
    fn append(&mut self, container: &Self::Container, element: &ElementSpec) -> Result<(), RenderError>;
}
