//! Test fixture loader for Cascade golden corpora.
//!
//! Provides typed deserialization of the fixture JSON files and helper
//! functions for loading them in tests across crates.

use std::path::PathBuf;

use cascade_core::models::ChunkInput;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("golden").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by path.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// A corpus plus the queries run against it.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalScenario {
    pub description: String,
    pub chunks: Vec<ChunkInput>,
    pub queries: Vec<ScenarioQuery>,
}

/// One query with its expected ordering.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioQuery {
    pub query: String,
    pub limit: usize,
    /// Id expected in first position.
    pub expected_top: Option<String>,
    /// Pairs `[higher, lower]` that must appear in that order.
    #[serde(default)]
    pub ranked_above: Vec<(String, String)>,
}

/// Load a retrieval scenario from `golden/retrieval/<name>.json`.
pub fn load_scenario(name: &str) -> RetrievalScenario {
    load_fixture(&format!("golden/retrieval/{name}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn all_golden_retrieval_files_exist() {
        let files = [
            "golden/retrieval/reference_demo.json",
            "golden/retrieval/topic_corpus.json",
        ];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn every_retrieval_file_is_a_scenario() {
        let files = list_fixtures("golden/retrieval");
        assert_eq!(files.len(), 2);
        for file in &files {
            let content = std::fs::read_to_string(file)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", file.display(), e));
            let scenario: RetrievalScenario = serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", file.display(), e));
            assert!(!scenario.chunks.is_empty());
            assert!(!scenario.queries.is_empty());
        }
    }

    #[test]
    fn reference_demo_has_four_chunks() {
        let demo = load_scenario("reference_demo");
        let ids: Vec<&str> = demo.chunks.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["A1", "B2", "C3", "D4"]);
        assert_eq!(demo.queries[0].limit, 3);
        assert_eq!(
            demo.chunks[2].metadata.kind.as_deref(),
            Some("paragraph")
        );
        assert_eq!(
            demo.chunks[2].metadata.extra.get("topic"),
            Some(&serde_json::json!("philosophy"))
        );
    }

    #[test]
    fn raw_value_loader_matches_typed_loader() {
        let raw = load_fixture_value("golden/retrieval/topic_corpus.json");
        let typed = load_scenario("topic_corpus");
        assert_eq!(raw["chunks"].as_array().unwrap().len(), typed.chunks.len());
    }
}
