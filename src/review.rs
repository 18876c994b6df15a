// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Classify pull requests as reviewed/unreviewed by a target user and roll counts up across repositories
// role: core/aggregation
// inputs: Already-fetched PullRequest lists; target login
// outputs: ReviewCounts, RepoReviewStats, OverallStats
// side_effects: None (pure)
// invariants:
// - reviewed <= reviewable <= total == number of pull requests
// - PRs authored by the target only count toward total
// - any event kind (review, comment, close) by the target marks a PR reviewed
// - login comparison is exact and case-sensitive
// - overall percentage is computed from summed counts, never averaged
// - percentage(_, 0) is non-finite (NaN for 0/0); renderers decide how to print it
// errors: None
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::model::{OverallStats, PullRequest, RepoReviewStats, ReviewCounts};

/// True when any timeline event on `pr` was performed by `user`.
pub fn is_reviewed_by(pr: &PullRequest, user: &str) -> bool {
  pr.events.iter().any(|ev| ev.actor() == Some(user))
}

/// Count reviewed, reviewable and total pull requests for `user`.
pub fn aggregate(pull_requests: &[PullRequest], user: &str) -> ReviewCounts {
  let mut counts = ReviewCounts::default();

  for pr in pull_requests {
    counts.total += 1;

    // Own PRs are outside the denominator.
    if pr.author == user {
      continue;
    }

    counts.reviewable += 1;

    if is_reviewed_by(pr, user) {
      counts.reviewed += 1;
    } else {
      tracing::trace!(number = pr.number, title = %pr.title, "not reviewed by {}", user);
    }
  }

  counts
}

/// `reviewed / reviewable` as a float. Division by zero is not guarded.
pub fn percentage(reviewed: usize, reviewable: usize) -> f64 {
  reviewed as f64 / reviewable as f64
}

pub fn repo_stats(repo_name: impl Into<String>, counts: ReviewCounts) -> RepoReviewStats {
  RepoReviewStats {
    repo_name: repo_name.into(),
    counts,
    review_percentage: percentage(counts.reviewed, counts.reviewable),
  }
}

/// Sum per-repository stats into an overall figure, keeping the input order.
pub fn roll_up(per_repo: Vec<RepoReviewStats>) -> OverallStats {
  let counts = per_repo
    .iter()
    .fold(ReviewCounts::default(), |acc, r| acc + r.counts);

  OverallStats {
    counts,
    review_percentage: percentage(counts.reviewed, counts.reviewable),
    repositories: per_repo,
  }
}
