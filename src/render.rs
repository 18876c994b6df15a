// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render OverallStats as the report JSON ({overall, byRepository[]}) and write it to stdout or a file
// role: output/report
// inputs: OverallStats; output target ("-" or path); compact flag
// outputs: JSON text
// side_effects: Writes to stdout or the filesystem
// invariants:
// - Field names and nesting are stable: reviewPercentage, reviewedPRs, PRsCreatedByOthers, allPRs, repoName
// - byRepository order equals OverallStats.repositories order
// - Non-finite percentages (nothing reviewable) are written as null
// errors: Serialization and IO errors surfaced with the output path
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::model::{OverallStats, RepoReviewStats};
use crate::util;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OverallJson {
  #[serde(rename = "reviewPercentage")]
  pub review_percentage: Option<f64>,
  #[serde(rename = "reviewedPRs")]
  pub reviewed_prs: usize,
  #[serde(rename = "PRsCreatedByOthers")]
  pub prs_created_by_others: usize,
  #[serde(rename = "allPRs")]
  pub all_prs: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ByRepositoryJson {
  #[serde(rename = "repoName")]
  pub repo_name: String,
  #[serde(rename = "reviewPercentage")]
  pub review_percentage: Option<f64>,
  #[serde(rename = "reviewedPRs")]
  pub reviewed_prs: usize,
  #[serde(rename = "PRsCreatedByOthers")]
  pub prs_created_by_others: usize,
  #[serde(rename = "allPRs")]
  pub all_prs: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReportJson {
  pub overall: OverallJson,
  #[serde(rename = "byRepository")]
  pub by_repository: Vec<ByRepositoryJson>,
}

/// JSON has no NaN/Infinity.
fn finite(p: f64) -> Option<f64> {
  p.is_finite().then_some(p)
}

fn by_repository(r: &RepoReviewStats) -> ByRepositoryJson {
  ByRepositoryJson {
    repo_name: r.repo_name.clone(),
    review_percentage: finite(r.review_percentage),
    reviewed_prs: r.counts.reviewed,
    prs_created_by_others: r.counts.reviewable,
    all_prs: r.counts.total,
  }
}

pub fn build_report(stats: &OverallStats) -> ReportJson {
  ReportJson {
    overall: OverallJson {
      review_percentage: finite(stats.review_percentage),
      reviewed_prs: stats.counts.reviewed,
      prs_created_by_others: stats.counts.reviewable,
      all_prs: stats.counts.total,
    },
    by_repository: stats.repositories.iter().map(by_repository).collect(),
  }
}

pub fn render_report(stats: &OverallStats, compact: bool) -> Result<String> {
  let report = build_report(stats);
  let mut text = if compact {
    serde_json::to_string(&report)?
  } else {
    serde_json::to_string_pretty(&report)?
  };
  text.push('\n');

  Ok(text)
}

pub fn write_report(stats: &OverallStats, out: &str, compact: bool) -> Result<()> {
  let text = render_report(stats, compact)?;
  util::write_output(out, &text)
}
