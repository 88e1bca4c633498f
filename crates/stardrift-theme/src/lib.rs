//! Stardrift Theme - stylesheet overrides for particle fields
//!
//! Layer parameters can be tuned from the page's own stylesheet using CSS
//! custom properties on the container selectors:
//!
//! ```css
//! :root {
//!     --palette: #60a5fa, #f472b6, gold;
//!     --density-scales: 0.5 1 1.5 2;
//! }
//!
//! .floating-stars {
//!     --count: 30;
//!     --duration-min: 12;
//!     --duration-max: 18;
//!     --opacity-max: 0.6;
//! }
//! ```
//!
//! Values are unitless numbers. Selectors that match no layer are ignored.

pub mod parser;

pub use parser::{ThemeParseError, parse_overrides};

use std::collections::HashMap;

use stardrift_core::{CountRule, DensityScale, FieldPreset, LayerPreset, Palette, Span};

/// Optional replacement for either end of a span
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundsOverride {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl BoundsOverride {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Apply to an existing span, or build one when both ends are given
    fn resolve(&self, base: Option<Span>, what: &str) -> Result<Option<Span>, ThemeParseError> {
        if self.is_empty() {
            return Ok(base);
        }
        let span = match (base, self.min, self.max) {
            (Some(span), min, max) => span.with_bounds(min, max),
            (None, Some(min), Some(max)) => Span::new(min, max),
            (None, _, _) => {
                return Err(ThemeParseError::MissingProperty(format!(
                    "--{what}-min and --{what}-max"
                )));
            }
        };
        if !span.is_valid() {
            return Err(ThemeParseError::InvalidSpan(what.to_string(), span.min, span.max));
        }
        Ok(Some(span))
    }
}

/// Overrides for one layer, keyed by container selector
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerOverride {
    /// Base count; scaled by density for scaled layers, exact for fixed ones
    pub count: Option<u32>,
    pub x: BoundsOverride,
    pub y: BoundsOverride,
    pub duration: BoundsOverride,
    pub delay: BoundsOverride,
    pub size: BoundsOverride,
    pub opacity: BoundsOverride,
}

impl LayerOverride {
    /// Apply to a layer preset
    pub fn apply(&self, layer: &mut LayerPreset) -> Result<(), ThemeParseError> {
        if let Some(count) = self.count {
            layer.count = match layer.count {
                CountRule::Scaled { .. } => CountRule::Scaled { base: count },
                CountRule::Fixed(_) => CountRule::Fixed(count),
            };
        }

        layer.x = self.x.resolve(layer.x, "x")?;
        layer.y = self.y.resolve(layer.y, "y")?;
        if let Some(duration) = self.duration.resolve(Some(layer.duration), "duration")? {
            layer.duration = duration;
        }
        if let Some(delay) = self.delay.resolve(Some(layer.delay), "delay")? {
            layer.delay = delay;
        }

        // Dots are sized in pixels, everything else in rem
        if layer.dot_size.is_some() {
            layer.dot_size = self.size.resolve(layer.dot_size, "size")?;
        } else {
            layer.size = self.size.resolve(layer.size, "size")?;
        }

        let opacity = self.opacity.resolve(layer.opacity, "opacity")?;
        if let Some(span) = opacity {
            if span.min < 0.0 || span.max > 1.0 {
                return Err(ThemeParseError::InvalidSpan("opacity".to_string(), span.min, span.max));
            }
        }
        layer.opacity = opacity;

        Ok(())
    }
}

/// Everything a stylesheet can override
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldOverrides {
    pub palette: Option<Vec<String>>,
    pub density_scales: Option<[f64; 4]>,
    pub layers: HashMap<String, LayerOverride>,
}

impl FieldOverrides {
    /// Parse overrides from CSS
    pub fn from_css(css: &str) -> Result<Self, ThemeParseError> {
        parse_overrides(css)
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_none() && self.density_scales.is_none() && self.layers.is_empty()
    }

    /// Apply to a field preset
    pub fn apply(&self, preset: &mut FieldPreset) -> Result<(), ThemeParseError> {
        if let Some(colors) = &self.palette {
            if let Some(palette) = Palette::new(colors.iter().cloned()) {
                preset.palette = palette;
            }
        }

        if let Some(scales) = self.density_scales {
            preset.density = DensityScale::with_scales(scales);
        }

        for layer in &mut preset.layers {
            if let Some(over) = self.layers.get(&layer.container) {
                log::debug!("Applying stylesheet overrides to {}", layer.container);
                over.apply(layer)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardrift_core::ParticleKind;

    #[test]
    fn test_empty_override_is_noop() {
        let mut preset = FieldPreset::flowing_background();
        let original = preset.clone();
        FieldOverrides::default().apply(&mut preset).unwrap();
        assert_eq!(preset, original);
    }

    #[test]
    fn test_count_keeps_rule_kind() {
        let mut layer = FieldPreset::card_rails().layers.remove(0);
        let over = LayerOverride { count: Some(3), ..Default::default() };
        over.apply(&mut layer).unwrap();
        assert_eq!(layer.count, CountRule::Fixed(3));

        let mut layer = FieldPreset::flowing_background().layers.remove(0);
        over.apply(&mut layer).unwrap();
        assert_eq!(layer.count, CountRule::Scaled { base: 3 });
    }

    #[test]
    fn test_partial_bounds() {
        let mut layer = FieldPreset::flowing_background().layers.remove(0);
        let over = LayerOverride {
            duration: BoundsOverride { min: Some(10.0), max: None },
            ..Default::default()
        };
        over.apply(&mut layer).unwrap();
        assert_eq!(layer.duration, Span::new(10.0, 22.0));
    }

    #[test]
    fn test_inverted_span_rejected() {
        let mut layer = FieldPreset::flowing_background().layers.remove(0);
        let over = LayerOverride {
            duration: BoundsOverride { min: Some(30.0), max: None },
            ..Default::default()
        };
        assert!(matches!(over.apply(&mut layer), Err(ThemeParseError::InvalidSpan(..))));
    }

    #[test]
    fn test_opacity_must_stay_in_unit_range() {
        let mut layer = FieldPreset::flowing_background().layers.remove(0);
        let over = LayerOverride {
            opacity: BoundsOverride { min: None, max: Some(1.5) },
            ..Default::default()
        };
        assert!(over.apply(&mut layer).is_err());
    }

    #[test]
    fn test_new_span_needs_both_ends() {
        let mut layer = FieldPreset::flowing_background().layers.remove(2);
        assert_eq!(layer.kind, ParticleKind::DiagonalStar);

        let over = LayerOverride {
            x: BoundsOverride { min: Some(10.0), max: None },
            ..Default::default()
        };
        assert!(matches!(over.apply(&mut layer), Err(ThemeParseError::MissingProperty(_))));

        let over = LayerOverride {
            x: BoundsOverride { min: Some(10.0), max: Some(90.0) },
            ..Default::default()
        };
        over.apply(&mut layer).unwrap();
        assert_eq!(layer.x, Some(Span::new(10.0, 90.0)));
    }

    #[test]
    fn test_size_targets_dot_dimensions() {
        let mut layer = FieldPreset::flowing_background().layers.remove(3);
        assert_eq!(layer.kind, ParticleKind::Dot);
        let over = LayerOverride {
            size: BoundsOverride { min: Some(1.0), max: Some(6.0) },
            ..Default::default()
        };
        over.apply(&mut layer).unwrap();
        assert_eq!(layer.dot_size, Some(Span::new(1.0, 6.0)));
        assert!(layer.size.is_none());
    }

    #[test]
    fn test_palette_and_density() {
        let mut preset = FieldPreset::flowing_background();
        let overrides = FieldOverrides {
            palette: Some(vec!["#ffffff".to_string(), "#000000".to_string()]),
            density_scales: Some([1.0, 1.0, 1.0, 1.0]),
            layers: HashMap::new(),
        };
        overrides.apply(&mut preset).unwrap();
        assert_eq!(preset.palette.len(), 2);
        assert_eq!(preset.density.scale_for(1920.0), 1.0);
    }
}
