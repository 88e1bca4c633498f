//! Styling hooks for generated elements
//!
//! A [`ParticleSpec`] is turned into an [`ElementSpec`]: the class, text and
//! ordered list of style properties the page stylesheet animates. Names
//! starting with `--` are custom properties, everything else is a standard
//! style property.

use stardrift_core::{ParticleKind, ParticleSpec};

/// One style property set on an element
#[derive(Debug, Clone, PartialEq)]
pub struct StyleHook {
    pub name: &'static str,
    pub value: String,
}

impl StyleHook {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// Whether this is a CSS custom property
    pub fn is_custom(&self) -> bool {
        self.name.starts_with("--")
    }
}

/// Everything needed to materialize one particle
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    pub kind: ParticleKind,
    pub class: &'static str,
    pub text: Option<String>,
    pub hooks: Vec<StyleHook>,
}

impl ElementSpec {
    /// Build the element for a particle
    pub fn from_particle(spec: &ParticleSpec) -> Self {
        let mut hooks = Vec::new();
        let mut push = |name: &'static str, value: String| hooks.push(StyleHook::new(name, value));

        match spec.kind {
            ParticleKind::Star => {
                if let Some(x) = spec.x {
                    push("--x", format!("{}vw", css_number(x)));
                }
            }
            ParticleKind::FlyingStar | ParticleKind::Dot => {
                if let Some(y) = spec.y {
                    push("--y", format!("{}vh", css_number(y)));
                }
            }
            ParticleKind::CrossingStar => {
                if let Some(y) = spec.y {
                    push("top", format!("{}%", css_number(y)));
                }
                if let Some(travel) = spec.travel {
                    push("left", format!("{}%", css_number(travel.from_x)));
                    push("--fromX", format!("{}%", css_number(travel.from_x)));
                    push("--toX", format!("{}%", css_number(travel.to_x)));
                }
                if let Some(y) = spec.y {
                    push("--y", format!("{}%", css_number(y)));
                }
            }
            ParticleKind::RailStar => {
                if let Some(y) = spec.y {
                    push("top", format!("{}%", css_number(y)));
                }
            }
            ParticleKind::DiagonalStar => {}
        }

        push("--dur", format!("{}s", css_number(spec.duration_secs)));
        push("animation-delay", format!("{}s", css_number(spec.delay_secs)));

        if let Some(color) = &spec.color {
            push("--c", color.clone());
        }
        if let Some(size) = spec.size_rem {
            push("font-size", format!("{}rem", css_number(size)));
        }
        if let Some(opacity) = spec.opacity {
            push("opacity", css_number(opacity));
        }
        if let Some(width) = spec.width_px {
            push("width", format!("{}px", css_number(width)));
            // Height falls back to the width for square dots
            let height = spec.height_px.unwrap_or(width);
            push("height", format!("{}px", css_number(height)));
        }

        Self {
            kind: spec.kind,
            class: spec.kind.class_name(),
            text: spec.kind.glyph().map(String::from),
            hooks,
        }
    }

    /// Value of a hook by property name
    pub fn hook(&self, name: &str) -> Option<&str> {
        self.hooks
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.value.as_str())
    }
}

/// Inline `style` attribute value for a list of hooks
pub fn style_attribute(hooks: &[StyleHook]) -> String {
    hooks
        .iter()
        .map(|h| format!("{}: {};", h.name, h.value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a number for a style value
///
/// Uses the shortest representation that round-trips, and never emits `-0`.
pub fn css_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
