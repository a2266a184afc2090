use serde::Serialize;

/// Owner and name of a GitHub repository.
/// Extracted by parse_repo_url() in repo/mod.rs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Signals extracted from the GitHub API for one repository.
/// Serialized as-is into the `signals_used` field of the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignalSet {
    /// Stargazer count from the repository metadata
    pub stars: u64,
    /// Number of blobs in the recursive file tree
    pub files_count: usize,
    /// Some path contains `src/`
    pub has_src: bool,
    /// Some path looks like a test file or directory
    pub has_tests: bool,
    /// README length in characters (0 when there is no README)
    pub readme_len: usize,
    pub readme_has_install: bool,
    pub readme_has_usage: bool,
    /// Commits on the first page of history (at most 100)
    pub commit_count: usize,
    /// Language names in the order GitHub reported them
    pub languages: Vec<String>,
    /// Some path lives under `.github/workflows`
    pub has_ci: bool,
    /// Some path contains `.env.example`
    pub has_env_example: bool,
}
