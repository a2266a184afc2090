use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::types::SignalSet;
use super::RepoError;

/// Matches paths that look like tests. `__tests__` is listed for readability;
/// it is already covered by `test`.
static TEST_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)test|__tests__").expect("test path pattern is valid"));

/// `GET /repos/{owner}/{repo}`. Only the fields we read; everything else is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RepoMetadata {
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// `GET /repos/{owner}/{repo}/readme` on a 200 response.
#[derive(Debug, Deserialize)]
pub struct ReadmeResponse {
    pub content: String,
}

/// One entry of `GET /repos/{owner}/{repo}/git/trees/{ref}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeEntry {
    #[serde(default)]
    pub path: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// README-derived signals.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReadmeSignals {
    pub len: usize,
    pub has_install: bool,
    pub has_usage: bool,
}

/// File-tree-derived signals.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TreeSignals {
    pub files_count: usize,
    pub has_src: bool,
    pub has_tests: bool,
    pub has_ci: bool,
    pub has_env_example: bool,
}

/// Parse a raw response body as JSON.
pub fn parse_json(endpoint: &str, body: &str) -> Result<Value, RepoError> {
    serde_json::from_str(body)
        .map_err(|e| RepoError::Malformed(format!("{endpoint}: invalid JSON body: {e}")))
}

pub fn decode_metadata(body: Value) -> Result<RepoMetadata, RepoError> {
    serde_json::from_value(body)
        .map_err(|e| RepoError::Malformed(format!("repository metadata: {e}")))
}

/// Number of commits in the list. Anything other than an array (GitHub answers
/// `{"message": "Git Repository is empty."}` for empty repositories) counts as zero.
pub fn commit_count(body: &Value) -> usize {
    match body {
        Value::Array(commits) => commits.len(),
        _ => 0,
    }
}

/// Language names in response order. Relies on serde_json's `preserve_order`.
pub fn language_names(body: &Value) -> Vec<String> {
    match body {
        Value::Object(map) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

/// Decode the base64 `content` of a README response into text.
///
/// GitHub wraps the encoded payload at 60 columns, so whitespace is stripped
/// before decoding. Bytes that are not valid UTF-8 are dropped; everything
/// else, including encoded U+FFFD characters, is kept.
pub fn decode_readme(body: Value) -> Result<String, RepoError> {
    let readme: ReadmeResponse = serde_json::from_value(body)
        .map_err(|e| RepoError::Malformed(format!("readme: {e}")))?;

    let compact: String = readme
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| RepoError::Malformed(format!("readme: invalid base64 content: {e}")))?;

    Ok(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect())
}

pub fn readme_signals(text: &str) -> ReadmeSignals {
    let lower = text.to_lowercase();
    ReadmeSignals {
        len: text.chars().count(),
        has_install: lower.contains("install"),
        has_usage: lower.contains("usage"),
    }
}

/// Entries of a tree response. Error objects and non-object bodies yield no entries.
pub fn tree_entries(body: Value) -> Result<Vec<TreeEntry>, RepoError> {
    match body {
        Value::Object(mut map) => match map.remove("tree") {
            Some(tree) => serde_json::from_value(tree)
                .map_err(|e| RepoError::Malformed(format!("git tree: {e}"))),
            None => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}

pub fn tree_signals(entries: &[TreeEntry]) -> TreeSignals {
    TreeSignals {
        files_count: entries.iter().filter(|e| e.kind == "blob").count(),
        has_src: entries.iter().any(|e| e.path.contains("src/")),
        has_tests: entries.iter().any(|e| TEST_PATH.is_match(&e.path)),
        has_ci: entries.iter().any(|e| e.path.contains(".github/workflows")),
        has_env_example: entries.iter().any(|e| e.path.contains(".env.example")),
    }
}

/// Merge the per-endpoint reductions into one SignalSet.
pub fn assemble(
    metadata: &RepoMetadata,
    commit_count: usize,
    languages: Vec<String>,
    readme: ReadmeSignals,
    tree: TreeSignals,
) -> SignalSet {
    SignalSet {
        stars: metadata.stargazers_count,
        files_count: tree.files_count,
        has_src: tree.has_src,
        has_tests: tree.has_tests,
        readme_len: readme.len,
        readme_has_install: readme.has_install,
        readme_has_usage: readme.has_usage,
        commit_count,
        languages,
        has_ci: tree.has_ci,
        has_env_example: tree.has_env_example,
    }
}
