use anyhow::{bail, Result};
use clap::Parser;

use crate::github::api::DEFAULT_HOST;
use crate::model::RepoSlug;

#[derive(Parser, Debug)]
#[command(
    name = "github-review-stats",
    version,
    about = "Report how many pull requests by others a GitHub user reviewed, as JSON",
    long_about = None
)]
pub struct Cli {
  /// GitHub login whose reviews are counted (default: owner of the token)
  #[arg(short = 'u', long = "user", alias = "userId", env = "GHRS_USER")]
  pub user: Option<String>,

  /// GitHub API host; hosts other than api.github.com are treated as GitHub Enterprise
  #[arg(short = 'd', long = "host", alias = "ghHostDomain", env = "GHRS_HOST", default_value = DEFAULT_HOST)]
  pub host: String,

  /// Repositories to inspect as owner/repo (comma separated or repeated)
  #[arg(
    short = 'r',
    long = "repositories",
    env = "GHRS_TARGET_REPOS",
    value_delimiter = ',',
    required_unless_present = "gen_man"
  )]
  pub repositories: Vec<String>,

  /// Access token (falls back to GITHUB_TOKEN, GH_TOKEN, then `gh auth token`)
  #[arg(short = 't', long = "token", env = "GHRS_ACCESS_TOKEN", hide_env_values = true)]
  pub token: Option<String>,

  /// Output file path (default stdout "-")
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Emit single-line JSON instead of indented JSON
  #[arg(long)]
  pub compact: bool,

  /// Fetch repositories concurrently (output order is unchanged)
  #[arg(long)]
  pub parallel: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub host: String,
  pub repositories: Vec<RepoSlug>,
  /// None means "resolve through the identity endpoint".
  pub user: Option<String>,
  pub token: Option<String>,
  pub out: String,
  pub compact: bool,
  pub parallel: bool,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  // Validate every repository before anything touches the network
  let repositories = cli
    .repositories
    .iter()
    .map(|r| r.parse::<RepoSlug>())
    .collect::<Result<Vec<_>>>()?;

  if repositories.is_empty() {
    bail!("Provide at least one repository with --repositories or GHRS_TARGET_REPOS");
  }

  let user = match cli.user {
    Some(u) if u.trim().is_empty() => bail!("--user must not be empty"),
    other => other,
  };

  let host = cli.host.trim().to_string();
  if host.is_empty() {
    bail!("--host must not be empty");
  }

  Ok(EffectiveConfig {
    host,
    repositories,
    user,
    token: cli.token,
    out: cli.out,
    compact: cli.compact,
    parallel: cli.parallel,
  })
}
