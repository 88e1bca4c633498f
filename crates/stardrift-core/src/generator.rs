//! Pure particle generation
//!
//! Turns presets into particle specs. Every randomized field is an
//! independent uniform draw from its layer's span. The caller owns the
//! random source, so a seeded source gives reproducible fields.

use rand::Rng;
use serde::Serialize;

use crate::{FieldPreset, LayerPreset, Palette, ParticleKind, ParticleSpec, Travel};

/// Particles generated for one container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerPlan {
    pub kind: ParticleKind,
    pub container: String,
    pub specs: Vec<ParticleSpec>,
}

impl LayerPlan {
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Particles generated for a whole field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldPlan {
    pub name: String,
    pub viewport_width: f64,
    pub scale: f64,
    pub layers: Vec<LayerPlan>,
}

impl FieldPlan {
    /// Total particles across all layers
    pub fn total(&self) -> usize {
        self.layers.iter().map(LayerPlan::len).sum()
    }

    /// Particles of one kind across all layers
    pub fn count_for(&self, kind: ParticleKind) -> usize {
        self.layers
            .iter()
            .filter(|l| l.kind == kind)
            .map(LayerPlan::len)
            .sum()
    }

    /// Layer plan for a container selector
    pub fn layer(&self, container: &str) -> Option<&LayerPlan> {
        self.layers.iter().find(|l| l.container == container)
    }
}

/// Draw one particle for a layer
pub fn spawn<R: Rng + ?Sized>(layer: &LayerPreset, palette: &Palette, rng: &mut R) -> ParticleSpec {
    let mut spec = ParticleSpec::new(
        layer.kind,
        layer.duration.sample(rng),
        layer.delay.sample(rng),
    );

    spec.x = layer.x.map(|span| span.sample(rng));
    spec.y = layer.y.map(|span| span.sample(rng));
    spec.size_rem = layer.size.map(|span| span.sample(rng));
    spec.opacity = layer
        .opacity
        .map(|span| span.sample(rng).clamp(0.0, 1.0));

    if let Some(dot) = layer.dot_size {
        spec.width_px = Some(dot.sample(rng));
        spec.height_px = Some(dot.sample(rng));
    }

    if layer.colored {
        spec.color = Some(palette.pick(rng).to_string());
    }

    if let Some(crossing) = layer.crossing {
        spec.travel = Some(if rng.gen_bool(0.5) {
            Travel { from_x: crossing.left, to_x: crossing.right }
        } else {
            Travel { from_x: crossing.right, to_x: crossing.left }
        });
    }

    spec
}

/// Generate one layer at a density scale
pub fn plan_layer<R: Rng + ?Sized>(
    layer: &LayerPreset,
    palette: &Palette,
    scale: f64,
    rng: &mut R,
) -> LayerPlan {
    let count = layer.count.count(scale);
    let specs = (0..count).map(|_| spawn(layer, palette, rng)).collect();

    LayerPlan {
        kind: layer.kind,
        container: layer.container.clone(),
        specs,
    }
}

/// Generate every layer of a field for a viewport width
pub fn plan_field<R: Rng + ?Sized>(preset: &FieldPreset, viewport_width: f64, rng: &mut R) -> FieldPlan {
    let scale = preset.density.scale_for(viewport_width);
    let layers = preset
        .layers
        .iter()
        .map(|layer| plan_layer(layer, &preset.palette, scale, rng))
        .collect();

    let plan = FieldPlan {
        name: preset.name.clone(),
        viewport_width,
        scale,
        layers,
    };

    log::debug!(
        "Planned field '{}' at width {} (scale {}): {} particles",
        plan.name,
        viewport_width,
        scale,
        plan.total()
    );

    plan
}
