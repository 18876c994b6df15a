// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the in-memory model (repository slugs, pull requests, timeline events, review stats) shared by fetching, aggregation and rendering
// role: model/types
// outputs: Plain data types; no I/O
// invariants:
// - RepoSlug always holds a non-empty owner and name without '/'
// - reviewed <= reviewable <= total for every ReviewCounts built by the aggregator
// - OverallStats.repositories preserves the caller's repository order
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use once_cell::sync::Lazy;

/// A validated `owner/repo` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
  pub owner: String,
  pub name: String,
}

impl FromStr for RepoSlug {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> anyhow::Result<Self> {
    static RE_SLUG: Lazy<regex::Regex> = Lazy::new(|| regex::Regex::new(r"^([^/\s]+)/([^/\s]+)$").unwrap());

    let trimmed = s.trim();

    let Some(caps) = RE_SLUG.captures(trimmed) else {
      bail!("Invalid repository format: {:?} (expected owner/repo)", s)
    };

    Ok(RepoSlug {
      owner: caps[1].to_string(),
      name: caps[2].to_string(),
    })
  }
}

impl fmt::Display for RepoSlug {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}

/// One activity on a pull request's timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineEvent {
  ReviewSubmitted { actor: String },
  CommentPosted { actor: String },
  ClosedBy { actor: String },
  /// Any other timeline item (labels, pushes, renames...). Never matches a user.
  Unrecognized,
}

impl TimelineEvent {
  pub fn actor(&self) -> Option<&str> {
    match self {
      TimelineEvent::ReviewSubmitted { actor }
      | TimelineEvent::CommentPosted { actor }
      | TimelineEvent::ClosedBy { actor } => Some(actor),
      TimelineEvent::Unrecognized => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
  pub number: u64,
  pub title: String,
  /// Login of the author; empty when the account no longer exists.
  pub author: String,
  pub events: Vec<TimelineEvent>,
}

/// Raw counts for one repository (or a sum of several).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewCounts {
  pub reviewed: usize,
  pub reviewable: usize,
  pub total: usize,
}

impl std::ops::Add for ReviewCounts {
  type Output = ReviewCounts;

  fn add(self, rhs: ReviewCounts) -> ReviewCounts {
    ReviewCounts {
      reviewed: self.reviewed + rhs.reviewed,
      reviewable: self.reviewable + rhs.reviewable,
      total: self.total + rhs.total,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepoReviewStats {
  pub repo_name: String,
  pub counts: ReviewCounts,
  /// `reviewed / reviewable`; non-finite when nothing was reviewable.
  pub review_percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverallStats {
  pub counts: ReviewCounts,
  pub review_percentage: f64,
  pub repositories: Vec<RepoReviewStats>,
}
