//! test-support: helpers for robust, nextest-friendly tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support", features = ["serde"] }
//! ```
//!
//! Then in tests:
//! ```rust,ignore
//! use test_support::{init_tracing, read_fixture_json};
//!
//! #[test]
//! fn example() {
//!     init_tracing();
//!     let body: serde_json::Value = read_fixture_json("graphql/octo_hello.json");
//! }
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::env;
use std::path::{Path, PathBuf};

/// Name of the binary under test.
pub const BIN: &str = "github-review-stats";

/// Variables that change which backend or identity the binary picks up.
pub const AMBIENT_VARS: &[&str] = &[
    "GHRS_USER",
    "GHRS_HOST",
    "GHRS_TARGET_REPOS",
    "GHRS_ACCESS_TOKEN",
    "GHRS_TEST_VIEWER_LOGIN",
    "GHRS_TEST_GRAPHQL_JSON",
    "GITHUB_TOKEN",
    "GH_TOKEN",
];

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Return the path to the workspace's `tests/fixtures` directory.
///
/// This crate lives in `<root>/tests/support`, so fixtures sit next to it.
pub fn fixtures_dir() -> PathBuf {
    let support_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    support_dir
        .parent()
        .map(|tests_dir| tests_dir.join("fixtures"))
        .unwrap_or_else(|| support_dir.join("fixtures"))
}

/// Read a UTF-8 text fixture into a string.
pub fn read_fixture_text<P: AsRef<Path>>(rel_path: P) -> String {
    let path = fixtures_dir().join(rel_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Deserialize a JSON fixture into `T` (enable `serde` feature).
#[cfg(feature = "serde")]
pub fn read_fixture_json<T, P>(rel_path: P) -> T
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = fixtures_dir().join(rel_path);
    let file = std::fs::File::open(&path)
        .unwrap_or_else(|e| panic!("failed to open fixture {}: {e}", path.display()));
    serde_json::from_reader::<_, T>(file)
        .unwrap_or_else(|e| panic!("failed to parse JSON fixture {}: {e}", path.display()))
}

/// Build the `GHRS_TEST_GRAPHQL_JSON` payload from `(owner/repo, fixture file)` pairs.
#[cfg(feature = "serde")]
pub fn graphql_fixture_map(entries: &[(&str, &str)]) -> String {
    let mut map = serde_json::Map::new();
    for (slug, file) in entries {
        let body: serde_json::Value = read_fixture_json(Path::new("graphql").join(file));
        map.insert(slug.to_string(), body);
    }
    serde_json::Value::Object(map).to_string()
}

/// Set multiple environment variables for the duration of the returned guard.
pub fn with_env(vars: &[(&str, &str)]) -> EnvGuard {
    EnvGuard::set_many(vars)
}

/// Remove environment variables for the duration of the returned guard.
pub fn without_env(keys: &[&str]) -> EnvGuard {
    EnvGuard::remove_many(keys)
}

/// The binary under test with every ambient GHRS/GitHub variable cleared.
///
/// Example:
/// ```rust,ignore
/// let mut cmd = test_support::cmd_bin();
/// cmd.arg("--help").assert().success();
/// ```
pub fn cmd_bin() -> assert_cmd::Command {
    init_tracing();
    let mut cmd = assert_cmd::Command::cargo_bin(BIN).expect("binary target not found");
    for key in AMBIENT_VARS {
        cmd.env_remove(key);
    }
    cmd
}

/// Guard for temporarily setting or removing environment variables.
pub struct EnvGuard {
    prev: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn set_many(kv: &[(&str, &str)]) -> Self {
        let mut prev = Vec::with_capacity(kv.len());
        for (k, v) in kv {
            prev.push((k.to_string(), env::var(k).ok()));
            env::set_var(k, v);
        }
        Self { prev }
    }

    pub fn remove_many(keys: &[&str]) -> Self {
        let mut prev = Vec::with_capacity(keys.len());
        for k in keys {
            prev.push((k.to_string(), env::var(k).ok()));
            env::remove_var(k);
        }
        Self { prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // Restore in reverse so repeated keys end up at their original value
        for (k, old) in self.prev.drain(..).rev() {
            match old {
                Some(v) => env::set_var(&k, v),
                None => env::remove_var(&k),
            }
        }
    }
}
