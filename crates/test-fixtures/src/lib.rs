//! Test fixture loader for keel golden datasets.
//!
//! Provides typed deserialization of the fixture JSON files and helper
//! functions for loading them in tests across crates.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the test-fixtures crate.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
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

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect()
}

/// Schema of the golden guidance cases under `golden/guidance/`.
///
/// Each case is a frozen event history plus the full guidance and
/// eligibility surfaces a replay must reproduce. Event times are relative
/// (`occurred_days_ago`) so the datasets never age out of the windows they
/// were built for.
pub mod guidance {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct GoldenGuidanceCase {
        pub description: String,
        pub actor_id: String,
        pub role: String,
        pub events: Vec<GoldenEvent>,
        pub expected: Expected,
    }

    #[derive(Debug, Deserialize)]
    pub struct GoldenEvent {
        pub event_type: String,
        pub occurred_days_ago: i64,
        #[serde(default)]
        pub counterpart_id: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Expected {
        pub level: i64,
        pub status_label: String,
        pub key_metrics: ExpectedMetrics,
        pub tips: Vec<ExpectedTip>,
        #[serde(default)]
        pub recovery: Option<ExpectedRecovery>,
        pub eligibility: ExpectedEligibility,
        /// Present when the urgent variant of the action decides differently.
        #[serde(default)]
        pub eligibility_urgent: Option<ExpectedEligibility>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ExpectedMetrics {
        pub negative_events_90d: u64,
        pub completed_events_90d: u64,
        pub negative_rate_90d: f64,
        pub unique_counterparts_180d: u64,
        pub lifetime_completed: u64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ExpectedTip {
        pub severity: String,
        pub message: String,
        pub action: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ExpectedRecovery {
        pub streak: u64,
        pub required: u64,
        pub remaining: u64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ExpectedEligibility {
        pub eligible: bool,
        pub requires_fee: bool,
        pub requires_confirmation: bool,
        pub limits_urgent_actions: bool,
        pub warnings: Vec<String>,
    }
}
