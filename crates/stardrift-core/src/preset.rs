//! Parametric field presets
//!
//! Every particle layer on the page is the same generator driven by a
//! different parameter table. A [`LayerPreset`] describes one kind of
//! particle and the ranges its fields are drawn from; a [`FieldPreset`]
//! groups layers that are regenerated together and the conditions under
//! which they are generated at all.

use crate::{DensityScale, Palette, ParticleKind, Span};

/// Body flag that enables the skills section layers
pub const SKILLS_STARS_FLAG: &str = "show-skills-stars";

/// How many particles a layer gets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountRule {
    /// `round(base * density scale)`
    Scaled { base: u32 },
    /// Always exactly this many
    Fixed(u32),
}

impl CountRule {
    /// Resolve the count for a density scale
    pub fn count(&self, scale: f64) -> usize {
        match *self {
            CountRule::Scaled { base } => {
                let scaled = (base as f64 * scale).round();
                if scaled.is_finite() && scaled > 0.0 {
                    scaled as usize
                } else {
                    0
                }
            }
            CountRule::Fixed(n) => n as usize,
        }
    }
}

/// Start positions for particles crossing a container, in percent
///
/// Each particle starts on one side at random and travels to the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub left: f64,
    pub right: f64,
}

/// Parameter table for one kind of particle
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPreset {
    pub kind: ParticleKind,
    /// Selector of the container the particles are appended to
    pub container: String,
    pub count: CountRule,
    pub x: Option<Span>,
    pub y: Option<Span>,
    pub duration: Span,
    pub delay: Span,
    pub size: Option<Span>,
    pub opacity: Option<Span>,
    /// Width and height of dots, drawn independently
    pub dot_size: Option<Span>,
    /// Whether particles take a palette color
    pub colored: bool,
    pub crossing: Option<Crossing>,
}

impl LayerPreset {
    /// A layer with timing only; the builder methods fill in the rest
    pub fn new(kind: ParticleKind, container: impl Into<String>, count: CountRule) -> Self {
        Self {
            kind,
            container: container.into(),
            count,
            x: None,
            y: None,
            duration: Span::fixed(1.0),
            delay: Span::fixed(0.0),
            size: None,
            opacity: None,
            dot_size: None,
            colored: false,
            crossing: None,
        }
    }

    pub fn x(mut self, min: f64, max: f64) -> Self {
        self.x = Some(Span::new(min, max));
        self
    }

    pub fn y(mut self, min: f64, max: f64) -> Self {
        self.y = Some(Span::new(min, max));
        self
    }

    pub fn duration(mut self, min: f64, max: f64) -> Self {
        self.duration = Span::new(min, max);
        self
    }

    pub fn delay(mut self, min: f64, max: f64) -> Self {
        self.delay = Span::new(min, max);
        self
    }

    pub fn size(mut self, min: f64, max: f64) -> Self {
        self.size = Some(Span::new(min, max));
        self
    }

    pub fn opacity(mut self, min: f64, max: f64) -> Self {
        self.opacity = Some(Span::new(min, max));
        self
    }

    pub fn dot_size(mut self, min: f64, max: f64) -> Self {
        self.dot_size = Some(Span::new(min, max));
        self
    }

    pub fn colored(mut self) -> Self {
        self.colored = true;
        self
    }

    pub fn crossing(mut self, left: f64, right: f64) -> Self {
        self.crossing = Some(Crossing { left, right });
        self
    }
}

/// Where a field's layers are materialized
#[derive(Debug, Clone, PartialEq)]
pub enum FieldLayout {
    /// Each layer has its own container, looked up by selector
    Containers,
    /// Every card inside `grid` gets a left and a right rail, and each rail
    /// receives its own copy of every layer
    CardRails { grid: String, card: String },
}

/// A set of layers regenerated together
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPreset {
    pub name: String,
    pub layers: Vec<LayerPreset>,
    pub layout: FieldLayout,
    /// Skip the field entirely when the reduced-motion preference is set
    pub requires_motion: bool,
    /// Body flag that must be present for the field to run
    pub required_flag: Option<String>,
    /// Selectors that must exist on the page but are not mutated
    pub anchors: Vec<String>,
    pub density: DensityScale,
    pub palette: Palette,
}

impl FieldPreset {
    /// Main page background: stars, flying stars, diagonal stars and dots
    pub fn flowing_background() -> Self {
        Self {
            name: "background".to_string(),
            layers: vec![
                LayerPreset::new(ParticleKind::Star, ".floating-stars", CountRule::Scaled { base: 24 })
                    .x(0.0, 100.0)
                    .duration(14.0, 22.0)
                    .delay(-20.0, 0.0)
                    .size(0.7, 1.6)
                    .opacity(0.4, 0.8)
                    .colored(),
                LayerPreset::new(ParticleKind::FlyingStar, ".flying-stars", CountRule::Scaled { base: 20 })
                    .y(-50.0, 0.0)
                    .duration(10.0, 16.0)
                    .delay(-20.0, 0.0)
                    .size(0.6, 1.3)
                    .opacity(0.35, 0.7)
                    .colored(),
                LayerPreset::new(ParticleKind::DiagonalStar, ".diagonal-stars", CountRule::Scaled { base: 16 })
                    .duration(16.0, 24.0)
                    .delay(-25.0, 0.0)
                    .size(0.6, 1.2)
                    .opacity(0.3, 0.6)
                    .colored(),
                LayerPreset::new(ParticleKind::Dot, ".small-dots", CountRule::Scaled { base: 60 })
                    .y(-60.0, 0.0)
                    .duration(10.0, 18.0)
                    .delay(-20.0, 0.0)
                    .dot_size(2.0, 4.0)
                    .opacity(0.4, 0.9)
                    .colored(),
            ],
            layout: FieldLayout::Containers,
            requires_motion: true,
            required_flag: None,
            anchors: Vec::new(),
            density: DensityScale::default(),
            palette: Palette::default(),
        }
    }

    /// Two stars crossing the skills section behind its text
    ///
    /// Gated on the skills body flag only; it ignores reduced motion.
    pub fn skills_crossing() -> Self {
        Self {
            name: "skills-crossing".to_string(),
            layers: vec![
                LayerPreset::new(ParticleKind::CrossingStar, ".skills-fly-stars", CountRule::Fixed(2))
                    .y(0.0, 100.0)
                    .crossing(-12.0, 112.0)
                    .duration(11.0, 15.0)
                    .delay(-12.0, 0.0)
                    .size(1.0, 1.4)
                    .opacity(0.7, 0.95),
            ],
            layout: FieldLayout::Containers,
            requires_motion: false,
            required_flag: Some(SKILLS_STARS_FLAG.to_string()),
            anchors: vec!["#skills".to_string()],
            density: DensityScale::default(),
            palette: Palette::default(),
        }
    }

    /// One falling star in each rail beside every skill card
    pub fn card_rails() -> Self {
        Self {
            name: "card-rails".to_string(),
            layers: vec![
                LayerPreset::new(ParticleKind::RailStar, ".star-rail", CountRule::Fixed(1))
                    .y(0.0, 100.0)
                    .duration(10.0, 14.0)
                    .delay(-10.0, 0.0)
                    .size(0.9, 1.3)
                    .opacity(0.7, 0.95),
            ],
            layout: FieldLayout::CardRails {
                grid: ".skills .skills-grid".to_string(),
                card: ".skill-category".to_string(),
            },
            requires_motion: true,
            required_flag: None,
            anchors: Vec::new(),
            density: DensityScale::default(),
            palette: Palette::default(),
        }
    }

    /// Look up a built-in preset by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "background" => Some(Self::flowing_background()),
            "skills-crossing" => Some(Self::skills_crossing()),
            "card-rails" => Some(Self::card_rails()),
            _ => None,
        }
    }

    /// Find the layer using a container selector
    pub fn layer_mut(&mut self, container: &str) -> Option<&mut LayerPreset> {
        self.layers.iter_mut().find(|l| l.container == container)
    }

    /// Container selectors in layer order
    pub fn containers(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.container.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_counts_round() {
        assert_eq!(CountRule::Scaled { base: 24 }.count(1.6), 38);
        assert_eq!(CountRule::Scaled { base: 20 }.count(0.85), 17);
        assert_eq!(CountRule::Scaled { base: 60 }.count(1.3), 78);
        assert_eq!(CountRule::Scaled { base: 16 }.count(1.0), 16);
    }

    #[test]
    fn test_counts_never_negative() {
        assert_eq!(CountRule::Scaled { base: 24 }.count(-1.0), 0);
        assert_eq!(CountRule::Scaled { base: 24 }.count(f64::NAN), 0);
        assert_eq!(CountRule::Fixed(2).count(1.6), 2);
    }

    #[test]
    fn test_background_layers() {
        let preset = FieldPreset::flowing_background();
        let containers: Vec<_> = preset.containers().collect();
        assert_eq!(
            containers,
            vec![".floating-stars", ".flying-stars", ".diagonal-stars", ".small-dots"]
        );
        assert!(preset.requires_motion);
        assert!(preset.layers.iter().all(|l| l.colored));
    }

    #[test]
    fn test_background_ranges_are_valid() {
        for preset in [
            FieldPreset::flowing_background(),
            FieldPreset::skills_crossing(),
            FieldPreset::card_rails(),
        ] {
            for layer in &preset.layers {
                let spans = [Some(layer.duration), Some(layer.delay), layer.x, layer.y, layer.size, layer.opacity, layer.dot_size];
                for span in spans.into_iter().flatten() {
                    assert!(span.is_valid(), "{} has invalid span {span:?}", layer.container);
                }
                if let Some(opacity) = layer.opacity {
                    assert!(opacity.min >= 0.0 && opacity.max <= 1.0);
                }
            }
        }
    }

    #[test]
    fn test_skills_crossing_gating() {
        let preset = FieldPreset::skills_crossing();
        assert!(!preset.requires_motion);
        assert_eq!(preset.required_flag.as_deref(), Some(SKILLS_STARS_FLAG));
        assert_eq!(preset.anchors, vec!["#skills".to_string()]);
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(FieldPreset::builtin("card-rails").map(|p| p.name), Some("card-rails".to_string()));
        assert!(FieldPreset::builtin("skills-falling").is_none());
    }

    #[test]
    fn test_layer_mut() {
        let mut preset = FieldPreset::flowing_background();
        preset.layer_mut(".small-dots").unwrap().count = CountRule::Fixed(5);
        assert_eq!(preset.layers[3].count, CountRule::Fixed(5));
        assert!(preset.layer_mut(".nope").is_none());
    }
}
