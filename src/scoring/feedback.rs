use super::ScoreBreakdown;

/// Strengths, gaps and roadmap derived from a score breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    /// Improvement actions, always in rule order
    pub roadmap: Vec<String>,
    pub summary: String,
}

/// Generate feedback from category scores.
///
/// Rules are evaluated in a fixed order (documentation, testing, git history,
/// production readiness), so the roadmap order never depends on how large
/// each category score is.
pub fn generate(scores: &ScoreBreakdown) -> Feedback {
    let mut strengths = Vec::new();
    let mut gaps = Vec::new();
    let mut roadmap = Vec::new();

    let mut gap = |description: &str, action: &str| {
        gaps.push(description.to_string());
        roadmap.push(action.to_string());
    };

    if scores.documentation >= 20 {
        strengths.push("clear documentation".to_string());
    } else {
        gap(
            "insufficient documentation",
            "Add a detailed README with installation and usage",
        );
    }

    if scores.testing == 0 {
        gap("no automated tests", "Introduce unit tests");
    }

    if scores.git_practices < 10 {
        gap(
            "limited commit history",
            "Commit more frequently with meaningful messages",
        );
    }

    if scores.real_world < 10 {
        gap(
            "missing production-readiness signals",
            "Add CI/CD and environment configuration examples",
        );
    }

    let summary = summarize(&strengths, &gaps);
    Feedback {
        strengths,
        gaps,
        roadmap,
        summary,
    }
}

/// One-sentence summary. Without gaps the "but has gaps such as" clause is
/// left out rather than rendered with an empty list.
fn summarize(strengths: &[String], gaps: &[String]) -> String {
    let shown = if strengths.is_empty() {
        "basic structure".to_string()
    } else {
        strengths.join(", ")
    };

    if gaps.is_empty() {
        format!("The repository shows {shown}.")
    } else {
        format!(
            "The repository shows {shown}, but has gaps such as {}.",
            gaps.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::SignalSet;
    use crate::scoring::score;
    use crate::scoring::tests::full_signals;

    #[test]
    fn test_full_signals_have_no_gaps() {
        let feedback = generate(&score(&full_signals()));
        assert_eq!(feedback.strengths, vec!["clear documentation"]);
        assert!(feedback.gaps.is_empty());
        assert!(feedback.roadmap.is_empty());
        assert_eq!(feedback.summary, "The repository shows clear documentation.");
    }

    #[test]
    fn test_empty_signals_fill_roadmap_in_rule_order() {
        let feedback = generate(&score(&SignalSet::default()));
        assert!(feedback.strengths.is_empty());
        assert_eq!(
            feedback.roadmap,
            vec![
                "Add a detailed README with installation and usage",
                "Introduce unit tests",
                "Commit more frequently with meaningful messages",
                "Add CI/CD and environment configuration examples",
            ]
        );
        assert_eq!(
            feedback.summary,
            "The repository shows basic structure, but has gaps such as \
             insufficient documentation, no automated tests, limited commit history, \
             missing production-readiness signals."
        );
    }

    #[test]
    fn test_roadmap_order_ignores_score_magnitude() {
        // real_world is the lowest gap by far, it still comes last
        let scores = ScoreBreakdown {
            documentation: 19,
            code_quality: 30,
            testing: 20,
            git_practices: 9,
            real_world: 0,
        };
        let feedback = generate(&scores);
        assert_eq!(
            feedback.gaps,
            vec![
                "insufficient documentation",
                "limited commit history",
                "missing production-readiness signals",
            ]
        );
        assert_eq!(feedback.roadmap.len(), 3);
        assert_eq!(feedback.roadmap[2], "Add CI/CD and environment configuration examples");
    }

    #[test]
    fn test_thresholds() {
        let scores = ScoreBreakdown {
            documentation: 20,
            code_quality: 10,
            testing: 20,
            git_practices: 10,
            real_world: 10,
        };
        let feedback = generate(&scores);
        assert_eq!(feedback.strengths, vec!["clear documentation"]);
        assert!(feedback.gaps.is_empty());
    }

    #[test]
    fn test_strength_and_gap_in_summary() {
        let scores = ScoreBreakdown {
            documentation: 30,
            testing: 0,
            git_practices: 20,
            real_world: 15,
            code_quality: 30,
        };
        let feedback = generate(&scores);
        assert_eq!(
            feedback.summary,
            "The repository shows clear documentation, but has gaps such as no automated tests."
        );
        assert_eq!(feedback.roadmap, vec!["Introduce unit tests"]);
    }

    #[test]
    fn test_feedback_is_deterministic() {
        let scores = score(&SignalSet::default());
        assert_eq!(generate(&scores), generate(&scores));
    }
}
