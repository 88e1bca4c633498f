//! Stardrift Render - materializing particle fields into pages
//!
//! This crate provides:
//! - The [`PageHost`] trait fields are applied through
//! - Styling hooks that turn particle specs into elements
//! - [`apply_field`], the all-or-nothing field application
//! - [`HtmlPage`] for static snapshots and [`MockPage`] for tests
//! - `WebPage` for live browser pages (wasm32 only)

pub mod apply;
pub mod dom;
pub mod element;
pub mod error;
pub mod html;
pub mod mock;
pub mod traits;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use apply::{FieldOutcome, SkipReason, apply_field};
pub use dom::{Document, NodeId};
pub use element::{ElementSpec, StyleHook, css_number, style_attribute};
pub use error::RenderError;
pub use html::{BACKGROUND_CONTAINERS, HtmlPage};
pub use mock::{MockPage, RenderCall};
pub use traits::{CARD_WRAP_CLASS, PageHost, RAIL_CLASS, RailSide};

#[cfg(target_arch = "wasm32")]
pub use web::WebPage;
