//! Bundled stylesheets
//!
//! These stylesheets are embedded in the binary and can be used without
//! any external files.

/// Bundled stylesheet data
pub struct BundledStylesheet {
    pub name: &'static str,
    pub css: &'static str,
}

/// Default - the built-in tables, unchanged
pub const DEFAULT: BundledStylesheet = BundledStylesheet {
    name: "default",
    css: include_str!("../../../themes/default.css"),
};

/// Calm - fewer, slower particles in cool colors
pub const CALM: BundledStylesheet = BundledStylesheet {
    name: "calm",
    css: include_str!("../../../themes/calm.css"),
};

/// Dense - more particles for large displays
pub const DENSE: BundledStylesheet = BundledStylesheet {
    name: "dense",
    css: include_str!("../../../themes/dense.css"),
};

/// All bundled stylesheets
pub const ALL_STYLESHEETS: &[&BundledStylesheet] = &[&DEFAULT, &CALM, &DENSE];

/// Get a bundled stylesheet by name
pub fn get_bundled_stylesheet(name: &str) -> Option<&'static BundledStylesheet> {
    ALL_STYLESHEETS.iter().find(|t| t.name == name).copied()
}

/// List all available bundled stylesheet names
pub fn bundled_stylesheet_names() -> Vec<&'static str> {
    ALL_STYLESHEETS.iter().map(|t| t.name).collect()
}
