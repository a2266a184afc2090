pub mod decode;
pub mod fixture;
pub mod types;

pub use types::{RepoId, SignalSet};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::GitHubConfig;
use decode::{ReadmeSignals, RepoMetadata, TreeSignals};

/// Tree ref used unless the configuration asks for the repository's default branch.
pub const DEFAULT_TREE_REF: &str = "main";

/// Commits are counted from a single page of this size.
pub const COMMIT_PAGE_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("GitHub rejected the configured token")]
    Unauthorized,

    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    #[error("GitHub API returned unexpected status {0}")]
    Upstream(u16),

    #[error("GitHub API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed GitHub API response: {0}")]
    Malformed(String),
}

/// Split a repository URL into owner and name.
///
/// Trailing slashes are stripped and the last two `/`-separated segments are
/// taken verbatim. No normalization of scheme, case or a `.git` suffix.
pub fn parse_repo_url(url: &str) -> Result<RepoId, RepoError> {
    let parts: Vec<&str> = url.trim_end_matches('/').split('/').collect();
    match parts.as_slice() {
        [.., owner, name] => Ok(RepoId {
            owner: owner.to_string(),
            name: name.to_string(),
        }),
        _ => Err(RepoError::InvalidUrl(url.to_string())),
    }
}

/// Anything that can produce a SignalSet for a repository.
/// Implemented by the live GitHub client and the embedded fixtures.
#[async_trait]
pub trait SignalSource: Send + Sync {
    /// Short label for logs (e.g., "github")
    fn name(&self) -> &str;

    async fn fetch_signals(&self, repo: &RepoId) -> Result<SignalSet, RepoError>;
}

/// Client for the handful of GitHub REST endpoints the grader reads.
///
/// The token is resolved once when the client is built and attached to every
/// request as `Authorization: token <TOKEN>`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    user_agent: String,
    token: Option<String>,
    use_default_branch: bool,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self, RepoError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            token: config.token.clone(),
            use_default_branch: config.use_default_branch,
        })
    }

    fn repo_base(&self, repo: &RepoId) -> String {
        format!("{}/repos/{}/{}", self.api_url, repo.owner, repo.name)
    }

    /// GET a URL and return the status with the raw body. Non-success statuses
    /// are returned, not raised; each endpoint decides how to treat them.
    async fn get(&self, url: &str) -> Result<(StatusCode, String), RepoError> {
        let mut request = self.http.get(url).header(USER_AGENT, &self.user_agent);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(url, status = status.as_u16(), bytes = body.len(), "GitHub response");
        Ok((status, body))
    }

    async fn fetch_metadata(&self, base: &str, repo: &RepoId) -> Result<RepoMetadata, RepoError> {
        let (status, body) = self.get(base).await?;
        match status {
            s if s.is_success() => {}
            StatusCode::NOT_FOUND => return Err(RepoError::NotFound(repo.to_string())),
            StatusCode::UNAUTHORIZED => return Err(RepoError::Unauthorized),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                return Err(RepoError::RateLimited)
            }
            other => return Err(RepoError::Upstream(other.as_u16())),
        }
        decode::decode_metadata(decode::parse_json("repository metadata", &body)?)
    }

    async fn fetch_commit_count(&self, base: &str) -> Result<usize, RepoError> {
        let url = format!("{base}/commits?per_page={COMMIT_PAGE_SIZE}");
        let (_, body) = self.get(&url).await?;
        let value = decode::parse_json("commits", &body)?;
        Ok(decode::commit_count(&value))
    }

    async fn fetch_languages(&self, base: &str) -> Result<Vec<String>, RepoError> {
        let (status, body) = self.get(&format!("{base}/languages")).await?;
        if !status.is_success() {
            return Ok(Vec::new());
        }
        let value = decode::parse_json("languages", &body)?;
        Ok(decode::language_names(&value))
    }

    async fn fetch_readme(&self, base: &str) -> Result<ReadmeSignals, RepoError> {
        let (status, body) = self.get(&format!("{base}/readme")).await?;
        let text = if status == StatusCode::OK {
            decode::decode_readme(decode::parse_json("readme", &body)?)?
        } else {
            String::new()
        };
        Ok(decode::readme_signals(&text))
    }

    async fn fetch_tree(&self, base: &str, tree_ref: &str) -> Result<TreeSignals, RepoError> {
        let url = format!("{base}/git/trees/{tree_ref}?recursive=1");
        let (_, body) = self.get(&url).await?;
        let entries = decode::tree_entries(decode::parse_json("git tree", &body)?)?;
        debug!(tree_ref, entries = entries.len(), "read file tree");
        Ok(decode::tree_signals(&entries))
    }
}

#[async_trait]
impl SignalSource for GitHubClient {
    fn name(&self) -> &str {
        "github"
    }

    /// Metadata is read first because it can pick the tree ref; the other
    /// four reads are independent and run concurrently.
    #[instrument(skip_all, fields(owner = %repo.owner, name = %repo.name))]
    async fn fetch_signals(&self, repo: &RepoId) -> Result<SignalSet, RepoError> {
        let base = self.repo_base(repo);

        debug!("fetching repository metadata");
        let metadata = self.fetch_metadata(&base, repo).await?;

        let tree_ref = if self.use_default_branch {
            metadata
                .default_branch
                .as_deref()
                .unwrap_or(DEFAULT_TREE_REF)
        } else {
            DEFAULT_TREE_REF
        };

        let (commits, languages, readme, tree) = tokio::join!(
            self.fetch_commit_count(&base),
            self.fetch_languages(&base),
            self.fetch_readme(&base),
            self.fetch_tree(&base, tree_ref),
        );

        let signals = decode::assemble(&metadata, commits?, languages?, readme?, tree?);
        debug!(
            stars = signals.stars,
            files = signals.files_count,
            commits = signals.commit_count,
            readme_len = signals.readme_len,
            "extracted signals"
        );
        Ok(signals)
    }
}
