//! Generated particle values

use serde::Serialize;

use crate::ParticleKind;

/// Horizontal path for particles crossing a section, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Travel {
    pub from_x: f64,
    pub to_x: f64,
}

/// One decorative element, fully parameterized
///
/// Optional fields are only set for the kinds that use them. The meaning of
/// `x` and `y` (viewport units or percent of the container) depends on the
/// kind and is resolved by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleSpec {
    pub kind: ParticleKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    pub duration_secs: f64,
    /// Negative values start the animation mid-cycle
    pub delay_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_rem: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel: Option<Travel>,
}

impl ParticleSpec {
    /// A spec with only timing set
    pub fn new(kind: ParticleKind, duration_secs: f64, delay_secs: f64) -> Self {
        Self {
            kind,
            x: None,
            y: None,
            duration_secs,
            delay_secs,
            color: None,
            size_rem: None,
            opacity: None,
            width_px: None,
            height_px: None,
            travel: None,
        }
    }
}
