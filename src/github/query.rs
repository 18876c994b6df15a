// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GraphQL query text, response wire types, and conversion of a repository response into model PullRequests
// role: github/graphql
// inputs: GraphQL response bodies as serde_json::Value
// outputs: Vec<PullRequest> in API order
// invariants:
// - Only the first page (100 PRs, 100 timeline items each) is requested; truncation is logged, never followed
// - `__typename` selects the TimelineEvent variant; unknown typenames become Unrecognized
// - Events with a null actor/author are dropped; a null PR author becomes ""
// errors: GraphQL `errors`, missing data, or a null repository surface as anyhow errors naming the repository
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{PullRequest, RepoSlug, TimelineEvent};

pub const PULL_REQUESTS_PER_PAGE: u32 = 100;
pub const TIMELINE_ITEMS_PER_PAGE: u32 = 100;

pub const REPOSITORY_PULL_REQUESTS_QUERY: &str = r#"
query RepositoryPullRequests($repositoryOwner: String!, $repositoryName: String!) {
  repository(owner: $repositoryOwner, name: $repositoryName) {
    name
    pullRequests(first: 100) {
      pageInfo { hasNextPage }
      totalCount
      nodes {
        number
        title
        author { login }
        timelineItems(first: 100) {
          pageInfo { hasNextPage }
          totalCount
          nodes {
            __typename
            ... on PullRequestReview { author { login } }
            ... on IssueComment { author { login } }
            ... on ClosedEvent { actor { login } }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
  pub query: &'a str,
  pub variables: serde_json::Value,
}

impl GraphqlRequest<'static> {
  pub fn repository_pull_requests(slug: &RepoSlug) -> Self {
    GraphqlRequest {
      query: REPOSITORY_PULL_REQUESTS_QUERY,
      variables: serde_json::json!({
        "repositoryOwner": slug.owner,
        "repositoryName": slug.name,
      }),
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
  pub data: Option<T>,
  #[serde(default)]
  pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
  pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryData {
  pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
  pub name: String,
  pub pull_requests: Connection<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
  pub page_info: PageInfo,
  #[serde(default)]
  pub total_count: u64,
  #[serde(default = "Vec::new")]
  pub nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
  pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
pub struct Actor {
  pub login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
  pub number: u64,
  #[serde(default)]
  pub title: String,
  pub author: Option<Actor>,
  pub timeline_items: Connection<TimelineItemNode>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum TimelineItemNode {
  PullRequestReview {
    #[serde(default)]
    author: Option<Actor>,
  },
  IssueComment {
    #[serde(default)]
    author: Option<Actor>,
  },
  ClosedEvent {
    #[serde(default)]
    actor: Option<Actor>,
  },
  #[serde(other)]
  Other,
}

impl TimelineItemNode {
  fn into_event(self) -> Option<TimelineEvent> {
    match self {
      TimelineItemNode::PullRequestReview { author } => author.map(|a| TimelineEvent::ReviewSubmitted { actor: a.login }),
      TimelineItemNode::IssueComment { author } => author.map(|a| TimelineEvent::CommentPosted { actor: a.login }),
      TimelineItemNode::ClosedEvent { actor } => actor.map(|a| TimelineEvent::ClosedBy { actor: a.login }),
      TimelineItemNode::Other => Some(TimelineEvent::Unrecognized),
    }
  }
}

impl PullRequestNode {
  fn into_pull_request(self, slug: &RepoSlug) -> PullRequest {
    let items = self.timeline_items;

    if items.page_info.has_next_page {
      tracing::warn!(
        "{}#{}: only the first {} of {} timeline items were inspected",
        slug,
        self.number,
        TIMELINE_ITEMS_PER_PAGE,
        items.total_count
      );
    }

    PullRequest {
      number: self.number,
      title: self.title,
      author: self.author.map(|a| a.login).unwrap_or_default(),
      events: items.nodes.into_iter().flatten().filter_map(TimelineItemNode::into_event).collect(),
    }
  }
}

/// Decode a `repository { pullRequests }` GraphQL response for `slug`.
pub fn parse_repository_response(slug: &RepoSlug, body: serde_json::Value) -> Result<Vec<PullRequest>> {
  let resp: GraphqlResponse<RepositoryData> =
    serde_json::from_value(body).with_context(|| format!("decoding GraphQL response for {}", slug))?;

  if !resp.errors.is_empty() {
    let messages: Vec<&str> = resp.errors.iter().map(|e| e.message.as_str()).collect();
    bail!("GraphQL query for {} failed: {}", slug, messages.join("; "));
  }

  let Some(repo) = resp.data.and_then(|d| d.repository) else {
    bail!("GraphQL response for {} has no repository", slug)
  };

  let prs = repo.pull_requests;

  if prs.page_info.has_next_page {
    tracing::warn!(
      "{}: only the first {} of {} pull requests were inspected",
      slug,
      PULL_REQUESTS_PER_PAGE,
      prs.total_count
    );
  }

  Ok(prs.nodes.into_iter().flatten().map(|n| n.into_pull_request(slug)).collect())
}
