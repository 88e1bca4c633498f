//! Stardrift - decorative star and particle fields for web pages
//!
//! The implementation lives in the workspace crates:
//! - `stardrift-core` - particle model, presets and the generator
//! - `stardrift-theme` - stylesheet overrides of presets
//! - `stardrift-config` - config file, bundled stylesheets, hot reload
//! - `stardrift-render` - page hosts and field application
//!
//! This crate ties them together in the [`Background`] controller.

mod background;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use background::{Background, FieldReport, RegenerationReport};

use stardrift_core::FieldPreset;
use stardrift_theme::{FieldOverrides, ThemeParseError};

/// Build the named built-in presets with stylesheet overrides applied
///
/// Unknown names are logged and skipped.
pub fn build_presets(names: &[&str], css: &str) -> Result<Vec<FieldPreset>, ThemeParseError> {
    let overrides = FieldOverrides::from_css(css)?;
    if !overrides.is_empty() {
        log::debug!("Stylesheet overrides {} layers", overrides.layers.len());
    }

    let mut presets = Vec::with_capacity(names.len());
    for name in names {
        let Some(mut preset) = FieldPreset::builtin(name) else {
            log::warn!("Unknown field '{}', skipping", name);
            continue;
        };
        overrides.apply(&mut preset)?;
        presets.push(preset);
    }
    Ok(presets)
}

/// A seed for runs that did not ask for a fixed one
#[cfg(not(target_arch = "wasm32"))]
pub fn fresh_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64);
    nanos ^ (u64::from(std::process::id()) << 32)
}

/// A seed for runs that did not ask for a fixed one
#[cfg(target_arch = "wasm32")]
pub fn fresh_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardrift_core::CountRule;

    #[test]
    fn test_build_presets_in_order() {
        let presets = build_presets(&["card-rails", "background"], "").unwrap();
        let names: Vec<_> = presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["card-rails", "background"]);
    }

    #[test]
    fn test_build_presets_skips_unknown() {
        let presets = build_presets(&["background", "skills-falling"], "").unwrap();
        assert_eq!(presets.len(), 1);
    }

    #[test]
    fn test_build_presets_applies_overrides() {
        let css = ".small-dots { --count: 10; } .skills-fly-stars { --count: 4; }";
        let presets = build_presets(&["background", "skills-crossing"], css).unwrap();
        assert_eq!(presets[0].layers[3].count, CountRule::Scaled { base: 10 });
        assert_eq!(presets[1].layers[0].count, CountRule::Fixed(4));
    }

    #[test]
    fn test_build_presets_rejects_bad_css_values() {
        let css = ".star-rail { --duration-min: 20; --duration-max: 5; }";
        assert!(build_presets(&["card-rails"], css).is_err());
    }

    #[test]
    fn test_fresh_seeds_differ_between_calls() {
        let a = fresh_seed();
        std::thread::sleep(std::time::Duration::from_millis(1));
        assert_ne!(a, fresh_seed());
    }
}
