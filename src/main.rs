use anyhow::Result;
use clap::Parser;

use github_review_stats::cli::{normalize, Cli};
use github_review_stats::{github, render, repo_processor, util};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  util::init_tracing();

  // Phase 1: normalize CLI (validates every owner/repo up front)
  let cfg = normalize(cli)?;

  // Phase 2: pick the API backend
  let api = github::api::build_api(&cfg)?;

  // Phase 3: fetch + aggregate
  let stats = repo_processor::process_repositories(&cfg, api.as_ref())?;

  // Phase 4: report
  render::write_report(&stats, &cfg.out, cfg.compact)
}
