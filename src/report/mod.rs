pub mod types;

pub use types::{Level, Report};

use crate::repo::{self, RepoError, RepoId, SignalSet, SignalSource};
use crate::scoring::{self, feedback};
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where `output` sends a report.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat<'a> {
    /// Colored text on stdout
    Terminal,
    /// The `/analyze` response body, pretty-printed on stdout
    Json,
    /// Markdown written to the given path
    Markdown(&'a Path),
}

/// Parse the URL, extract signals from `source` and grade them.
#[instrument(skip(source), fields(source = source.name()))]
pub async fn analyze(source: &dyn SignalSource, repo_url: &str) -> Result<Report, RepoError> {
    let repo = repo::parse_repo_url(repo_url)?;
    debug!(owner = %repo.owner, name = %repo.name, "parsed repository URL");

    let signals = source.fetch_signals(&repo).await?;
    let report = build(repo, signals);
    info!(repo = %report.repo, score = report.score, level = %report.level, "graded repository");
    Ok(report)
}

/// Score the signals, classify the total and attach feedback.
pub fn build(repo: RepoId, signals: SignalSet) -> Report {
    let breakdown = scoring::score(&signals);
    let total = breakdown.total();
    let feedback = feedback::generate(&breakdown);

    Report {
        repo,
        score: total,
        level: Level::from_total(total),
        summary: feedback.summary,
        roadmap: feedback.roadmap,
        signals_used: signals,
        breakdown,
        strengths: feedback.strengths,
        gaps: feedback.gaps,
    }
}

#[instrument(skip(report), fields(repo = %report.repo, score = report.score))]
pub fn output(report: &Report, format: OutputFormat<'_>) -> Result<(), ReportError> {
    match format {
        OutputFormat::Terminal => {
            debug!("writing report to terminal");
            print_terminal_report(report);
            Ok(())
        }
        OutputFormat::Json => {
            debug!("writing report as JSON");
            println!("{}", serde_json::to_string_pretty(report)?);
            Ok(())
        }
        OutputFormat::Markdown(path) => {
            debug!(path = %path.display(), "writing report to file");
            write_markdown_report(report, path)
        }
    }
}

/// Print the report with colors:
///
/// octo/demo: 80/100 (Advanced)
/// The repository shows clear documentation, but has gaps such as ...
///
///   + clear documentation
///   - missing production-readiness signals
///
/// ═══ Scores ═══
///   documentation    20 / 30
///   ...
///
/// ═══ Roadmap ═══
///   1. Add CI/CD and environment configuration examples
fn print_terminal_report(report: &Report) {
    println!();
    println!(
        "{}: {}/100 ({})",
        report.repo.to_string().bold(),
        report.score,
        colorize_level(report.level)
    );
    println!("{}", report.summary);
    println!();

    for strength in &report.strengths {
        println!("  {} {}", "+".green(), strength);
    }
    for gap in &report.gaps {
        println!("  {} {}", "-".red(), gap);
    }
    println!();

    println!("═══ Scores ═══");
    for (name, points, cap) in report.breakdown.categories() {
        println!("  {:<16} {:>2} / {}", name, points, cap);
    }
    println!();

    println!("═══ Roadmap ═══");
    if report.roadmap.is_empty() {
        println!("  Nothing to improve.");
    } else {
        for (i, step) in report.roadmap.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
    }
    println!();
}

fn write_markdown_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    std::fs::write(path, render_markdown(report))?;
    Ok(())
}

fn render_markdown(report: &Report) -> String {
    let signals = &report.signals_used;
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", report.repo));
    md.push_str(&format!(
        "**Score:** {}/100 | **Level:** {}\n\n",
        report.score, report.level
    ));
    md.push_str(&format!("{}\n\n", report.summary));
    for strength in &report.strengths {
        md.push_str(&format!("- **Strength:** {}\n", strength));
    }
    for gap in &report.gaps {
        md.push_str(&format!("- **Gap:** {}\n", gap));
    }
    md.push('\n');

    md.push_str("## Scores\n\n| Category | Points | Max |\n|---|---|---|\n");
    for (name, points, cap) in report.breakdown.categories() {
        md.push_str(&format!("| {} | {} | {} |\n", name, points, cap));
    }
    md.push('\n');

    md.push_str("## Roadmap\n\n");
    if report.roadmap.is_empty() {
        md.push_str("Nothing to improve.\n\n");
    } else {
        for (i, step) in report.roadmap.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, step));
        }
        md.push('\n');
    }

    md.push_str("## Signals\n\n");
    md.push_str(&format!(
        "- Stars: {}\n- Files: {}\n- Commits (first page): {}\n- README length: {}\n",
        signals.stars, signals.files_count, signals.commit_count, signals.readme_len
    ));
    md.push_str(&format!("- Languages: {}\n", signals.languages.join(", ")));
    for (label, present) in [
        ("`src/` directory", signals.has_src),
        ("Tests", signals.has_tests),
        ("CI workflows", signals.has_ci),
        ("`.env.example`", signals.has_env_example),
    ] {
        md.push_str(&format!("- {}: {}\n", label, if present { "yes" } else { "no" }));
    }
    md
}

fn colorize_level(level: Level) -> colored::ColoredString {
    match level {
        Level::Advanced => "Advanced".green().bold(),
        Level::Intermediate => "Intermediate".yellow().bold(),
        Level::Beginner => "Beginner".red().bold(),
    }
}
