mod config;
mod report;
mod repo;
mod scoring;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

use repo::fixture::FixtureSource;
use repo::{GitHubClient, SignalSource};
use report::OutputFormat;

/// gitgrade: grades a GitHub repository from a handful of metadata signals
/// (README, file tree, commit history, languages) and suggests a roadmap.
#[derive(Parser, Debug)]
#[command(name = "gitgrade", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve `POST /analyze` over HTTP
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Answer every request from the built-in fixture repository
        #[arg(long)]
        r#mock: bool,
    },

    /// Grade a single repository and print the report
    Analyze {
        /// Repository URL (e.g., https://github.com/org/repo)
        ///
        /// Not required when --mock is used.
        repo_url: Option<String>,

        /// Write a markdown report to this file instead of the terminal
        #[arg(short, long, conflicts_with = "json")]
        output: Option<PathBuf>,

        /// Print the JSON response body instead of the terminal report
        #[arg(long)]
        json: bool,

        /// Use the built-in fixture repository (no network or token needed)
        #[arg(long)]
        r#mock: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let config = config::Config::load()?;
    debug!(
        api_url = %config.github.api_url,
        token = config.github.token.is_some(),
        use_default_branch = config.github.use_default_branch,
        "loaded configuration"
    );

    match cli.command {
        Command::Serve { host, port, r#mock } => {
            let source = signal_source(&config, r#mock)?;
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            server::serve(&host, port, server::AppState::new(source)).await?;
        }
        Command::Analyze {
            repo_url,
            output,
            json,
            r#mock,
        } => {
            let source = signal_source(&config, r#mock)?;
            let repo_url = match (repo_url, r#mock) {
                (Some(url), _) => url,
                (None, true) => "https://github.com/octo/gitgrade-demo".to_string(),
                (None, false) => {
                    return Err("Repository URL is required unless --mock is used. \
                                Usage: gitgrade analyze <URL> or gitgrade analyze --mock"
                        .into())
                }
            };

            let _main_span = info_span!("analyze", repo_url = %repo_url).entered();
            let built_report = report::analyze(source.as_ref(), &repo_url).await?;

            let format = match (&output, json) {
                (Some(path), _) => OutputFormat::Markdown(path),
                (None, true) => OutputFormat::Json,
                (None, false) => OutputFormat::Terminal,
            };
            report::output(&built_report, format)?;
            info!(score = built_report.score, level = %built_report.level, "done");
        }
    }

    Ok(())
}

fn signal_source(
    config: &config::Config,
    mock: bool,
) -> Result<Arc<dyn SignalSource>, repo::RepoError> {
    if mock {
        info!("using fixture responses for demo");
        return Ok(Arc::new(FixtureSource::new()));
    }
    if config.github.token.is_none() {
        info!("no GitHub token configured, requests are unauthenticated");
    }
    Ok(Arc::new(GitHubClient::new(&config.github)?))
}
