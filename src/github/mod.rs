// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for the GitHub data fetcher (API seam + GraphQL decoding)
// role: github/namespace
// outputs: fetch_pull_requests turning one repository into model PullRequests
// invariants: Fetching never aggregates; aggregation never fetches
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod api;
pub mod query;

use anyhow::{Context, Result};

use crate::model::{PullRequest, RepoSlug};
use api::GithubApi;

/// Fetch the first page of pull requests (with timelines) for `slug`.
pub fn fetch_pull_requests(api: &dyn GithubApi, slug: &RepoSlug) -> Result<Vec<PullRequest>> {
  let body = api
    .repository_pull_requests_json(slug)
    .with_context(|| format!("fetching pull requests for {} from {}", slug, api.host()))?;

  query::parse_repository_response(slug, body)
}
