use github_review_stats::github::query::parse_repository_response;
use github_review_stats::model::{RepoSlug, ReviewCounts};
use github_review_stats::review::{aggregate, percentage, repo_stats, roll_up};

fn counts_for(slug: &str, file: &str, user: &str) -> ReviewCounts {
  let slug: RepoSlug = slug.parse().unwrap();
  let body: serde_json::Value = test_support::read_fixture_json(format!("graphql/{}", file));
  let prs = parse_repository_response(&slug, body).unwrap();
  aggregate(&prs, user)
}

#[test]
fn hello_fixture_has_one_of_three_reviewed() {
  test_support::init_tracing();
  let c = counts_for("octo/hello", "octo_hello.json", "me");
  assert_eq!(c, ReviewCounts { reviewed: 1, reviewable: 3, total: 5 });
  assert!((percentage(c.reviewed, c.reviewable) - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn tools_fixture_counts_close_comment_and_review_alike() {
  let c = counts_for("octo/tools", "octo_tools.json", "me");
  assert_eq!(c, ReviewCounts { reviewed: 3, reviewable: 3, total: 4 });
}

#[test]
fn fixtures_roll_up_to_summed_ratio() {
  let overall = roll_up(vec![
    repo_stats("octo/hello", counts_for("octo/hello", "octo_hello.json", "me")),
    repo_stats("octo/tools", counts_for("octo/tools", "octo_tools.json", "me")),
    repo_stats("octo/empty", counts_for("octo/empty", "octo_empty.json", "me")),
  ]);

  assert_eq!(overall.counts, ReviewCounts { reviewed: 4, reviewable: 6, total: 9 });
  assert!((overall.review_percentage - 4.0 / 6.0).abs() < 1e-12);
  assert!(overall.repositories[2].review_percentage.is_nan());
}

#[test]
fn missing_repository_fixture_is_an_error() {
  let slug: RepoSlug = "octo/missing".parse().unwrap();
  let body: serde_json::Value = test_support::read_fixture_json("graphql/octo_missing.json");
  let text = test_support::read_fixture_text("graphql/octo_missing.json");
  assert!(text.contains("NOT_FOUND"));
  assert!(parse_repository_response(&slug, body).is_err());
}
