use async_trait::async_trait;
use tracing::debug;

use super::decode;
use super::{RepoError, RepoId, SignalSet, SignalSource};

const REPO_JSON: &str = include_str!("../../tests/fixtures/repo.json");
const COMMITS_JSON: &str = include_str!("../../tests/fixtures/commits.json");
const LANGUAGES_JSON: &str = include_str!("../../tests/fixtures/languages.json");
const README_JSON: &str = include_str!("../../tests/fixtures/readme.json");
const TREE_JSON: &str = include_str!("../../tests/fixtures/tree.json");

/// Serves recorded GitHub responses for a demo repository, so the whole
/// pipeline can run without network access or a token.
/// The requested repository is ignored; every lookup returns the same data.
#[derive(Debug, Default)]
pub struct FixtureSource;

impl FixtureSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SignalSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn fetch_signals(&self, repo: &RepoId) -> Result<SignalSet, RepoError> {
        debug!(%repo, "serving recorded responses");
        let metadata =
            decode::decode_metadata(decode::parse_json("repository metadata", REPO_JSON)?)?;
        let commits = decode::commit_count(&decode::parse_json("commits", COMMITS_JSON)?);
        let languages =
            decode::language_names(&decode::parse_json("languages", LANGUAGES_JSON)?);
        let readme = decode::decode_readme(decode::parse_json("readme", README_JSON)?)?;
        let entries = decode::tree_entries(decode::parse_json("git tree", TREE_JSON)?)?;

        Ok(decode::assemble(
            &metadata,
            commits,
            languages,
            decode::readme_signals(&readme),
            decode::tree_signals(&entries),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_signals() {
        let repo = RepoId {
            owner: "anyone".to_string(),
            name: "anything".to_string(),
        };
        let signals = FixtureSource::default().fetch_signals(&repo).await.unwrap();

        assert_eq!(signals.stars, 48);
        assert_eq!(signals.commit_count, 12);
        assert_eq!(signals.languages, vec!["Python", "JavaScript", "CSS"]);
        assert_eq!(signals.readme_len, 297);
        assert!(signals.readme_has_install);
        assert!(signals.readme_has_usage);
        assert_eq!(signals.files_count, 10);
        assert!(signals.has_src);
        assert!(signals.has_tests);
        assert!(!signals.has_ci);
        assert!(!signals.has_env_example);
    }
}
