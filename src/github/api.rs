// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GitHub API seam (identity lookup, repository PR query), endpoint resolution and token discovery
// role: github/api
// inputs: EffectiveConfig (host, token); env GHRS_ACCESS_TOKEN/GITHUB_TOKEN/GH_TOKEN; optional `gh` CLI; GHRS_TEST_* fixtures
// outputs: Raw JSON bodies for the identity endpoint and the GraphQL repository query
// side_effects: Network calls to the configured host; spawns `gh` subprocess during token discovery
// invariants:
// - api.github.com uses /user and /graphql; any other host uses /api/v3/user and /api/graphql
// - Non-2xx responses are errors carrying status, reason and request URL; no retries
// - The env backend is selected whenever a GHRS_TEST_* variable is present
// errors: Propagated with context (host, URL, repository)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use crate::cli::EffectiveConfig;
use crate::github::query::GraphqlRequest;
use crate::model::RepoSlug;

pub const DEFAULT_HOST: &str = "api.github.com";

pub const ENV_TEST_VIEWER_LOGIN: &str = "GHRS_TEST_VIEWER_LOGIN";
pub const ENV_TEST_GRAPHQL_JSON: &str = "GHRS_TEST_GRAPHQL_JSON";

const USER_AGENT: &str = "github-review-stats";

/// URLs derived from the configured host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
  pub host: String,
  pub user_url: String,
  pub graphql_url: String,
}

impl Endpoints {
  /// Accepts `api.github.com`, `ghe.example.com`, or either with an `http(s)://` scheme and trailing `/`.
  pub fn for_host(host: &str) -> Self {
    let trimmed = host.trim().trim_end_matches('/');
    let (scheme, domain) = match trimmed.split_once("://") {
      Some((s, d)) => (s, d),
      None => ("https", trimmed),
    };

    let base = format!("{}://{}", scheme, domain);

    if domain == DEFAULT_HOST {
      Endpoints {
        host: domain.to_string(),
        user_url: format!("{}/user", base),
        graphql_url: format!("{}/graphql", base),
      }
    } else {
      Endpoints {
        host: domain.to_string(),
        user_url: format!("{}/api/v3/user", base),
        graphql_url: format!("{}/api/graphql", base),
      }
    }
  }
}

// --- Trait seam for GitHub API ---
pub trait GithubApi: Send + Sync {
  /// Host label used in log lines and error context.
  fn host(&self) -> &str;
  /// Body of the REST identity endpoint (`{"login": ...}`).
  fn viewer_json(&self) -> Result<serde_json::Value>;
  /// Body of the GraphQL repository pull-request query for `slug`.
  fn repository_pull_requests_json(&self, slug: &RepoSlug) -> Result<serde_json::Value>;
}

/// Discover a token: explicit value first, then GITHUB_TOKEN, GH_TOKEN, and `gh auth token`.
pub fn get_github_token(explicit: Option<&str>) -> Option<String> {
  if let Some(t) = explicit {
    if !t.trim().is_empty() {
      return Some(t.trim().to_string());
    }
  }

  for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
    if let Ok(t) = std::env::var(var) {
      if !t.trim().is_empty() {
        return Some(t.trim().to_string());
      }
    }
  }

  if let Ok(output) = std::process::Command::new("gh").args(["auth", "token"]).output() {
    if output.status.success() {
      let t = String::from_utf8_lossy(&output.stdout).trim().to_string();

      if !t.is_empty() {
        return Some(t);
      }
    }
  }

  None
}

fn build_agent() -> ureq::Agent {
  ureq::Agent::config_builder()
    .http_status_as_error(false)
    .timeout_global(Some(Duration::from_secs(60)))
    .build()
    .into()
}

fn read_json_response(mut resp: ureq::http::Response<ureq::Body>, url: &str) -> Result<serde_json::Value> {
  let status = resp.status();

  if !status.is_success() {
    bail!(
      "GitHub api returns {}.\nRequest url: {}\nOriginal message: {}",
      status.as_u16(),
      url,
      status.canonical_reason().unwrap_or("")
    );
  }

  resp
    .body_mut()
    .read_json::<serde_json::Value>()
    .with_context(|| format!("reading JSON body from {}", url))
}

fn get_json(agent: &ureq::Agent, url: &str, token: &str) -> Result<serde_json::Value> {
  let resp = agent
    .get(url)
    .header("Accept", "application/vnd.github+json")
    .header("User-Agent", USER_AGENT)
    .header("Authorization", &format!("token {}", token))
    .call()
    .with_context(|| format!("GET {}", url))?;

  read_json_response(resp, url)
}

fn post_json(agent: &ureq::Agent, url: &str, token: &str, body: &GraphqlRequest<'_>) -> Result<serde_json::Value> {
  let resp = agent
    .post(url)
    .header("Accept", "application/json")
    .header("User-Agent", USER_AGENT)
    .header("Authorization", &format!("bearer {}", token))
    .send_json(body)
    .with_context(|| format!("POST {}", url))?;

  read_json_response(resp, url)
}

pub struct GithubHttpApi {
  endpoints: Endpoints,
  token: String,
  agent: ureq::Agent,
}

impl GithubHttpApi {
  pub fn new(endpoints: Endpoints, token: String) -> Self {
    Self {
      endpoints,
      token,
      agent: build_agent(),
    }
  }
}

impl GithubApi for GithubHttpApi {
  fn host(&self) -> &str {
    &self.endpoints.host
  }

  fn viewer_json(&self) -> Result<serde_json::Value> {
    get_json(&self.agent, &self.endpoints.user_url, &self.token)
  }

  fn repository_pull_requests_json(&self, slug: &RepoSlug) -> Result<serde_json::Value> {
    let req = GraphqlRequest::repository_pull_requests(slug);
    post_json(&self.agent, &self.endpoints.graphql_url, &self.token, &req)
  }
}

/// Fixture-backed API driven by `GHRS_TEST_VIEWER_LOGIN` and `GHRS_TEST_GRAPHQL_JSON`
/// (an object keyed by `owner/repo` whose values are GraphQL response bodies).
pub struct GithubEnvApi;

impl GithubApi for GithubEnvApi {
  fn host(&self) -> &str {
    "env"
  }

  fn viewer_json(&self) -> Result<serde_json::Value> {
    let login = std::env::var(ENV_TEST_VIEWER_LOGIN).with_context(|| format!("{} is not set", ENV_TEST_VIEWER_LOGIN))?;
    Ok(serde_json::json!({ "login": login }))
  }

  fn repository_pull_requests_json(&self, slug: &RepoSlug) -> Result<serde_json::Value> {
    let raw = std::env::var(ENV_TEST_GRAPHQL_JSON).with_context(|| format!("{} is not set", ENV_TEST_GRAPHQL_JSON))?;
    let map: serde_json::Value =
      serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", ENV_TEST_GRAPHQL_JSON))?;

    map
      .get(slug.to_string())
      .cloned()
      .ok_or_else(|| anyhow!("no fixture for {} in {}", slug, ENV_TEST_GRAPHQL_JSON))
  }
}

pub fn env_wants_mock() -> bool {
  std::env::var_os(ENV_TEST_VIEWER_LOGIN).is_some() || std::env::var_os(ENV_TEST_GRAPHQL_JSON).is_some()
}

/// Select the backend for this run: env fixtures when present, otherwise HTTP with a discovered token.
pub fn build_api(cfg: &EffectiveConfig) -> Result<Box<dyn GithubApi>> {
  if env_wants_mock() {
    tracing::debug!("using fixture-backed GitHub API");
    return Ok(Box::new(GithubEnvApi));
  }

  let token = get_github_token(cfg.token.as_deref()).ok_or_else(|| {
    anyhow!("Missing token. Pass --token, set GHRS_ACCESS_TOKEN or GITHUB_TOKEN, or run: gh auth login")
  })?;

  Ok(Box::new(GithubHttpApi::new(Endpoints::for_host(&cfg.host), token)))
}

/// Resolve the login owning the token via the identity endpoint.
pub fn resolve_viewer_login(api: &dyn GithubApi) -> Result<String> {
  let v = api
    .viewer_json()
    .with_context(|| format!("looking up the authenticated user on {}", api.host()))?;

  serde_json::from_value::<Viewer>(v)
    .ok()
    .and_then(|viewer| viewer.login)
    .filter(|l| !l.is_empty())
    .ok_or_else(|| anyhow!("identity response from {} has no login", api.host()))
}

/// Identity payload; only the login is read.
#[derive(Debug, Deserialize)]
struct Viewer {
  #[serde(default)]
  login: Option<String>,
}
