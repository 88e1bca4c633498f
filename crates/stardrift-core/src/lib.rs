//! Stardrift Core - particle field model and generation
//!
//! This crate provides:
//! - Particle kinds, specs and value spans
//! - Viewport density scaling via width breakpoints
//! - Parametric layer and field presets
//! - A pure generator that turns presets into particle specs
//! - A resize debouncer for regeneration triggers
//!
//! Nothing here touches a rendering surface. Randomness is always passed in
//! explicitly so generation is reproducible with a seeded source.

pub mod debounce;
pub mod density;
pub mod generator;
pub mod kind;
pub mod palette;
pub mod particle;
pub mod preset;
pub mod span;

pub use debounce::{DEFAULT_QUIET_PERIOD, Debouncer};
pub use density::{Breakpoints, DensityScale, viewport_width};
pub use generator::{FieldPlan, LayerPlan, plan_field, plan_layer, spawn};
pub use kind::ParticleKind;
pub use palette::{DEFAULT_COLORS, Palette};
pub use particle::{ParticleSpec, Travel};
pub use preset::{CountRule, Crossing, FieldLayout, FieldPreset, LayerPreset, SKILLS_STARS_FLAG};
pub use span::Span;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random source used throughout stardrift
pub type FieldRng = ChaCha8Rng;

/// Create a deterministic random source from a seed
pub fn seeded_rng(seed: u64) -> FieldRng {
    ChaCha8Rng::seed_from_u64(seed)
}
