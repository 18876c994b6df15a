// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate per-repository fetch + aggregate and the overall roll-up
// role: processing/orchestrator
// inputs: EffectiveConfig (repositories, user, parallel), a GithubApi backend
// outputs: OverallStats ready for rendering
// side_effects: API calls through the injected backend; log lines on stderr
// invariants:
// - Target login is resolved once before any repository is fetched
// - Sequential mode stops at the first failing repository; later ones are never fetched
// - Parallel mode fails the run on any error; per-repository order always follows input order
// errors: Propagates fetch/decode errors with repository and host context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::cli::EffectiveConfig;
use crate::github::{self, api::GithubApi};
use crate::model::{OverallStats, RepoReviewStats, RepoSlug};
use crate::review;

/// Fetch one repository and count its pull requests for `user`.
pub fn collect_repo_stats(api: &dyn GithubApi, slug: &RepoSlug, user: &str) -> Result<RepoReviewStats> {
  tracing::info!("fetching pull requests for {}", slug);

  let prs = github::fetch_pull_requests(api, slug)?;
  let counts = review::aggregate(&prs, user);

  tracing::debug!(
    reviewed = counts.reviewed,
    reviewable = counts.reviewable,
    total = counts.total,
    "{} aggregated",
    slug
  );

  Ok(review::repo_stats(slug.to_string(), counts))
}

pub fn collect_all(api: &dyn GithubApi, repositories: &[RepoSlug], user: &str, parallel: bool) -> Result<Vec<RepoReviewStats>> {
  if parallel {
    repositories
      .par_iter()
      .map(|slug| collect_repo_stats(api, slug, user))
      .collect()
  } else {
    repositories
      .iter()
      .map(|slug| collect_repo_stats(api, slug, user))
      .collect()
  }
}

pub fn process_repositories(cfg: &EffectiveConfig, api: &dyn GithubApi) -> Result<OverallStats> {
  // Phase 1: who are we counting for
  let user = match &cfg.user {
    Some(u) => u.clone(),
    None => {
      let login = github::api::resolve_viewer_login(api)?;
      tracing::info!("Logged in to {} as {}", api.host(), login);
      login
    }
  };

  // Phase 2: per-repository stats in input order
  let per_repo = collect_all(api, &cfg.repositories, &user, cfg.parallel)
    .with_context(|| format!("collecting review stats for {}", user))?;

  // Phase 3: overall roll-up
  Ok(review::roll_up(per_repo))
}
