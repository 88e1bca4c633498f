//! Particle kinds and their page-facing names

use serde::Serialize;

/// Kind of decorative particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParticleKind {
    /// Star scattered horizontally, drifting through the page
    Star,
    /// Star starting above the viewport and flying down
    FlyingStar,
    /// Star following a diagonal path defined by the stylesheet
    DiagonalStar,
    /// Small square dot
    Dot,
    /// Star crossing a section from one side to the other
    CrossingStar,
    /// Star falling inside a rail beside a card
    RailStar,
}

impl ParticleKind {
    /// All kinds, in declaration order
    pub const ALL: [ParticleKind; 6] = [
        Self::Star,
        Self::FlyingStar,
        Self::DiagonalStar,
        Self::Dot,
        Self::CrossingStar,
        Self::RailStar,
    ];

    /// CSS class applied to generated elements
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Star => "star",
            Self::FlyingStar => "flying-star",
            Self::DiagonalStar => "diagonal-star",
            Self::Dot => "small-dot",
            Self::CrossingStar => "skills-fly-star",
            Self::RailStar => "rail-star",
        }
    }

    /// Text content of generated elements
    pub const fn glyph(self) -> Option<char> {
        match self {
            Self::Dot => None,
            _ => Some('★'),
        }
    }
}

impl std::fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name())
    }
}
