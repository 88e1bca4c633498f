//! Color palette particles draw from

use rand::Rng;

/// Default 16-entry palette
pub const DEFAULT_COLORS: [&str; 16] = [
    "#60a5fa", "#3b82f6", "#38bdf8", "#22d3ee", "#34d399", "#10b981", "#a3e635", "#facc15",
    "#f59e0b", "#f97316", "#fb7185", "#ef4444", "#f472b6", "#a78bfa", "#8b5cf6", "#06b6d4",
];

/// A non-empty list of CSS colors
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Build a palette, returning `None` when no colors are given
    pub fn new<I, S>(colors: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            None
        } else {
            Some(Self { colors })
        }
    }

    /// Pick a color uniformly
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.colors[rng.gen_range(0..self.colors.len())]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c.eq_ignore_ascii_case(color))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 16);
        assert!(palette.contains("#60A5FA"));
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(Palette::new(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_pick_covers_palette() {
        let palette = Palette::default();
        let mut rng = seeded_rng(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2_000 {
            let color = palette.pick(&mut rng);
            assert!(palette.contains(color));
            seen.insert(color.to_string());
        }
        assert_eq!(seen.len(), 16);
    }
}
