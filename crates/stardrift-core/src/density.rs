//! Viewport density scaling
//!
//! Particle counts scale with viewport width through a small breakpoint
//! table. The standard table is:
//!
//! | Width        | Scale |
//! |--------------|-------|
//! | < 768        | 0.85  |
//! | 768 - 1023   | 1.0   |
//! | 1024 - 1399  | 1.3   |
//! | >= 1400      | 1.6   |

/// Width breakpoints mapping to values
///
/// `value_at(w)` returns the value of the highest threshold `<= w`, or the
/// `below` value when `w` is under every threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoints<T> {
    below: T,
    steps: Vec<(f64, T)>,
}

impl<T: Copy> Breakpoints<T> {
    /// Create a table; steps are sorted by threshold
    pub fn new(below: T, mut steps: Vec<(f64, T)>) -> Self {
        steps.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { below, steps }
    }

    /// Look up the value for a width
    pub fn value_at(&self, width: f64) -> T {
        self.steps
            .iter()
            .rev()
            .find(|(threshold, _)| width >= *threshold)
            .map(|(_, value)| *value)
            .unwrap_or(self.below)
    }

    /// Thresholds in ascending order
    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.steps.iter().map(|(t, _)| *t)
    }
}

/// Breakpoint thresholds shared by the standard density table
pub const DENSITY_THRESHOLDS: [f64; 3] = [768.0, 1024.0, 1400.0];

/// Standard scales, smallest viewport first
pub const DEFAULT_SCALES: [f64; 4] = [0.85, 1.0, 1.3, 1.6];

/// Count multiplier derived from viewport width
#[derive(Debug, Clone, PartialEq)]
pub struct DensityScale {
    table: Breakpoints<f64>,
}

impl DensityScale {
    /// Use custom scales over the standard thresholds, smallest viewport first
    pub fn with_scales(scales: [f64; 4]) -> Self {
        let steps = DENSITY_THRESHOLDS
            .iter()
            .zip(scales[1..].iter())
            .map(|(t, s)| (*t, *s))
            .collect();
        Self {
            table: Breakpoints::new(scales[0], steps),
        }
    }

    /// Scale for a viewport width
    pub fn scale_for(&self, width: f64) -> f64 {
        self.table.value_at(width)
    }
}

impl Default for DensityScale {
    fn default() -> Self {
        Self::with_scales(DEFAULT_SCALES)
    }
}

/// Effective viewport width: the larger of the document and window widths
///
/// Hosts sometimes report zero or nothing for one of the two, so missing,
/// negative and non-finite values count as zero.
pub fn viewport_width(client_width: Option<f64>, inner_width: Option<f64>) -> f64 {
    let sanitize = |w: Option<f64>| w.filter(|w| w.is_finite() && *w > 0.0).unwrap_or(0.0);
    sanitize(client_width).max(sanitize(inner_width))
}
