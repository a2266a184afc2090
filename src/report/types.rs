use serde::Serialize;

use crate::repo::{RepoId, SignalSet};
use crate::scoring::ScoreBreakdown;

/// Maturity level derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// `>= 70` is Advanced, `40..70` Intermediate, anything lower Beginner.
    pub fn from_total(total: u32) -> Self {
        match total {
            70.. => Level::Advanced,
            40..=69 => Level::Intermediate,
            _ => Level::Beginner,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Beginner => write!(f, "Beginner"),
            Level::Intermediate => write!(f, "Intermediate"),
            Level::Advanced => write!(f, "Advanced"),
        }
    }
}

/// Graded repository.
///
/// Serializes to the `/analyze` response body; the repository, breakdown,
/// strengths and gaps are kept for terminal and markdown output only.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(skip)]
    pub repo: RepoId,
    /// Total score in [0, 100]
    pub score: u32,
    pub level: Level,
    pub summary: String,
    /// Suggested actions in rule order
    pub roadmap: Vec<String>,
    /// The signals the score was computed from
    pub signals_used: SignalSet,
    #[serde(skip)]
    pub breakdown: ScoreBreakdown,
    #[serde(skip)]
    pub strengths: Vec<String>,
    #[serde(skip)]
    pub gaps: Vec<String>,
}
