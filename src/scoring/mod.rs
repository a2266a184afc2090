pub mod feedback;

use serde::Serialize;
use tracing::debug;

use crate::repo::SignalSet;

/// Upper bound on the summed score.
pub const MAX_TOTAL: u32 = 100;

/// Per-category points. Each field is bounded by its own cap
/// (see the `*_MAX` constants), independently of the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub documentation: u32,
    pub code_quality: u32,
    pub testing: u32,
    pub git_practices: u32,
    pub real_world: u32,
}

impl ScoreBreakdown {
    pub const DOCUMENTATION_MAX: u32 = 30;
    pub const CODE_QUALITY_MAX: u32 = 30;
    pub const TESTING_MAX: u32 = 20;
    pub const GIT_PRACTICES_MAX: u32 = 20;
    pub const REAL_WORLD_MAX: u32 = 15;

    /// `(name, points, cap)` per category, in display order.
    pub fn categories(&self) -> [(&'static str, u32, u32); 5] {
        [
            ("documentation", self.documentation, Self::DOCUMENTATION_MAX),
            ("code_quality", self.code_quality, Self::CODE_QUALITY_MAX),
            ("testing", self.testing, Self::TESTING_MAX),
            ("git_practices", self.git_practices, Self::GIT_PRACTICES_MAX),
            ("real_world", self.real_world, Self::REAL_WORLD_MAX),
        ]
    }

    /// Sum of all categories, clamped to [`MAX_TOTAL`].
    pub fn total(&self) -> u32 {
        let sum = self.documentation
            + self.code_quality
            + self.testing
            + self.git_practices
            + self.real_world;
        sum.min(MAX_TOTAL)
    }
}

/// Score a repository from its signals. Pure and deterministic.
pub fn score(signals: &SignalSet) -> ScoreBreakdown {
    let breakdown = ScoreBreakdown {
        documentation: documentation(signals),
        code_quality: code_quality(signals),
        testing: testing(signals),
        git_practices: git_practices(signals),
        real_world: real_world(signals),
    };
    debug!(?breakdown, total = breakdown.total(), "scored signals");
    breakdown
}

fn points(condition: bool, value: u32) -> u32 {
    if condition {
        value
    } else {
        0
    }
}

fn documentation(s: &SignalSet) -> u32 {
    points(s.readme_len > 0, 10)
        + points(s.readme_len > 300, 10)
        + points(s.readme_has_install, 5)
        + points(s.readme_has_usage, 5)
}

fn code_quality(s: &SignalSet) -> u32 {
    10 + points(s.has_src, 10) + points(s.files_count >= 10, 5) + points(s.files_count >= 30, 5)
}

fn testing(s: &SignalSet) -> u32 {
    points(s.has_tests, 20)
}

fn git_practices(s: &SignalSet) -> u32 {
    5 + points(s.commit_count >= 5, 5) + points(s.commit_count >= 20, 10)
}

fn real_world(s: &SignalSet) -> u32 {
    points(s.has_env_example, 5) + points(s.has_ci, 5) + points(s.languages.len() > 1, 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every signal switched on, as in a well-kept repository.
    pub fn full_signals() -> SignalSet {
        SignalSet {
            stars: 0,
            readme_len: 400,
            readme_has_install: true,
            readme_has_usage: true,
            has_src: true,
            files_count: 35,
            has_tests: true,
            commit_count: 25,
            has_env_example: true,
            has_ci: true,
            languages: vec!["Python".to_string(), "TypeScript".to_string()],
        }
    }

    #[test]
    fn test_full_signals_hit_every_cap() {
        let breakdown = score(&full_signals());
        assert_eq!(
            breakdown,
            ScoreBreakdown {
                documentation: 30,
                code_quality: 30,
                testing: 20,
                git_practices: 20,
                real_world: 15,
            }
        );
        // 115 before clamping
        assert_eq!(breakdown.total(), 100);
    }

    #[test]
    fn test_empty_signals() {
        let breakdown = score(&SignalSet::default());
        assert_eq!(
            breakdown,
            ScoreBreakdown {
                documentation: 0,
                code_quality: 10,
                testing: 0,
                git_practices: 5,
                real_world: 0,
            }
        );
        assert_eq!(breakdown.total(), 15);
    }

    #[test]
    fn test_caps_hold_for_extreme_counts() {
        let signals = SignalSet {
            files_count: 1_000_000,
            commit_count: usize::MAX,
            readme_len: usize::MAX,
            readme_has_install: true,
            readme_has_usage: true,
            has_src: true,
            has_tests: true,
            has_ci: true,
            has_env_example: true,
            languages: (0..500).map(|i| format!("Lang{i}")).collect(),
            stars: u64::MAX,
        };
        let breakdown = score(&signals);
        for (name, points, cap) in breakdown.categories() {
            assert!(points <= cap, "{name} = {points} exceeds {cap}");
        }
        assert_eq!(breakdown.code_quality, 30);
        assert!(breakdown.total() <= MAX_TOTAL);
    }

    #[test]
    fn test_documentation_thresholds() {
        let mut s = SignalSet::default();
        s.readme_len = 1;
        assert_eq!(documentation(&s), 10);
        s.readme_len = 300;
        assert_eq!(documentation(&s), 10);
        s.readme_len = 301;
        assert_eq!(documentation(&s), 20);
        s.readme_has_usage = true;
        assert_eq!(documentation(&s), 25);
    }

    #[test]
    fn test_keyword_points_without_readme_length() {
        // Keywords count even if the length signal says otherwise.
        let s = SignalSet {
            readme_has_install: true,
            ..SignalSet::default()
        };
        assert_eq!(documentation(&s), 5);
    }

    #[test]
    fn test_code_quality_thresholds() {
        let mut s = SignalSet::default();
        s.files_count = 9;
        assert_eq!(code_quality(&s), 10);
        s.files_count = 10;
        assert_eq!(code_quality(&s), 15);
        s.files_count = 29;
        assert_eq!(code_quality(&s), 15);
        s.files_count = 30;
        assert_eq!(code_quality(&s), 20);
        s.has_src = true;
        assert_eq!(code_quality(&s), 30);
    }

    #[test]
    fn test_git_practices_thresholds() {
        let mut s = SignalSet::default();
        s.commit_count = 4;
        assert_eq!(git_practices(&s), 5);
        s.commit_count = 5;
        assert_eq!(git_practices(&s), 10);
        s.commit_count = 19;
        assert_eq!(git_practices(&s), 10);
        s.commit_count = 20;
        assert_eq!(git_practices(&s), 20);
    }

    #[test]
    fn test_real_world_needs_two_languages() {
        let mut s = SignalSet::default();
        s.languages = vec!["Rust".to_string()];
        assert_eq!(real_world(&s), 0);
        s.languages.push("Shell".to_string());
        assert_eq!(real_world(&s), 5);
        s.has_ci = true;
        assert_eq!(real_world(&s), 10);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let signals = full_signals();
        assert_eq!(score(&signals), score(&signals.clone()));
    }

    #[test]
    fn test_breakdown_serializes_as_category_map() {
        let value = serde_json::to_value(score(&SignalSet::default())).unwrap();
        assert_eq!(value["code_quality"], 10);
        assert_eq!(value["git_practices"], 5);
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
