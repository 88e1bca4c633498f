//! Materializing field presets into a page
//!
//! Application is all-or-nothing: every guard and every container lookup
//! happens before anything on the page is touched. A field that cannot run
//! is skipped silently and the reason is reported to the caller.

use std::fmt;

use rand::Rng;
use stardrift_core::{FieldLayout, FieldPlan, FieldPreset, LayerPreset, plan_layer, viewport_width};

use crate::{ElementSpec, PageHost, RenderError};

/// Why a field was not generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The field animates and the user prefers reduced motion
    ReducedMotion,
    /// The page body lacks the flag the field requires
    MissingFlag(String),
    /// A container or anchor selector matched nothing
    MissingContainer(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ReducedMotion => write!(f, "reduced motion preferred"),
            SkipReason::MissingFlag(flag) => write!(f, "body flag '{}' not set", flag),
            SkipReason::MissingContainer(selector) => write!(f, "no element matches '{}'", selector),
        }
    }
}

/// Result of applying one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    Applied(FieldPlan),
    Skipped(SkipReason),
}

impl FieldOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FieldOutcome::Applied(_))
    }

    pub fn plan(&self) -> Option<&FieldPlan> {
        match self {
            FieldOutcome::Applied(plan) => Some(plan),
            FieldOutcome::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            FieldOutcome::Applied(_) => None,
            FieldOutcome::Skipped(reason) => Some(reason),
        }
    }

    /// Elements appended to the page
    pub fn elements(&self) -> usize {
        self.plan().map_or(0, FieldPlan::total)
    }
}

fn skipped(preset: &FieldPreset, reason: SkipReason) -> FieldOutcome {
    log::debug!("Skipping field '{}': {}", preset.name, reason);
    FieldOutcome::Skipped(reason)
}

/// Generate a field and replace the contents of its containers
///
/// Order of work:
/// 1. motion and body-flag guards
/// 2. resolve anchors and every container, skipping if any is missing
/// 3. clear every container
/// 4. scale counts by viewport width and generate the particles
/// 5. append one element per particle
///
/// A particle whose element cannot be appended is logged and left out of
/// the returned plan; the rest of the field is still applied.
pub fn apply_field<H, R>(host: &mut H, preset: &FieldPreset, rng: &mut R) -> Result<FieldOutcome, RenderError>
where
    H: PageHost,
    R: Rng + ?Sized,
{
    if preset.requires_motion && host.prefers_reduced_motion() {
        return Ok(skipped(preset, SkipReason::ReducedMotion));
    }

    if let Some(flag) = &preset.required_flag {
        if !host.has_flag(flag) {
            return Ok(skipped(preset, SkipReason::MissingFlag(flag.clone())));
        }
    }

    if let Some(anchor) = preset.anchors.iter().find(|a| !host.exists(a)) {
        return Ok(skipped(preset, SkipReason::MissingContainer(anchor.clone())));
    }

    let targets: Vec<(H::Container, &LayerPreset)> = match &preset.layout {
        FieldLayout::Containers => {
            let mut targets = Vec::with_capacity(preset.layers.len());
            for layer in &preset.layers {
                match host.container(&layer.container) {
                    Some(container) => targets.push((container, layer)),
                    None => {
                        return Ok(skipped(preset, SkipReason::MissingContainer(layer.container.clone())));
                    }
                }
            }
            targets
        }
        FieldLayout::CardRails { grid, card } => {
            let Some(rails) = host.card_rails(grid, card)? else {
                return Ok(skipped(preset, SkipReason::MissingContainer(grid.clone())));
            };
            rails
                .into_iter()
                .flat_map(|rail| preset.layers.iter().map(move |layer| (rail.clone(), layer)))
                .collect()
        }
    };

    for (container, _) in &targets {
        host.clear(container);
    }

    let width = viewport_width(host.client_width(), host.inner_width());
    let scale = preset.density.scale_for(width);

    let mut layers = Vec::with_capacity(targets.len());
    for (container, layer) in &targets {
        let mut plan = plan_layer(layer, &preset.palette, scale, rng);
        plan.specs.retain(|spec| match host.append(container, &ElementSpec::from_particle(spec)) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Dropping {} in '{}': {}", spec.kind, layer.container, e);
                false
            }
        });
        layers.push(plan);
    }

    let plan = FieldPlan {
        name: preset.name.clone(),
        viewport_width: width,
        scale,
        layers,
    };

    log::debug!(
        "Applied field '{}' at width {}: {} elements",
        plan.name,
        width,
        plan.total()
    );

    Ok(FieldOutcome::Applied(plan))
}
