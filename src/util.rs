// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for output writing, tracing setup, and man page rendering
// role: utilities/helpers
// inputs: Output target strings; clap CommandFactory
// outputs: Files or stdout text; man page text
// side_effects: write_output creates parent directories; init_tracing installs the global subscriber
// invariants:
// - "-" always means stdout; anything else is a file path
// - Logs go to stderr so stdout carries only the report
// errors: IO errors bubble with path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::{IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing_subscriber::EnvFilter;

/// Write `text` to stdout when `out` is "-", otherwise to the file at `out`.
pub fn write_output(out: &str, text: &str) -> Result<()> {
  if out == "-" {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes()).context("writing report to stdout")?;
    stdout.flush().context("flushing stdout")?;
    return Ok(());
  }

  let path = Path::new(out);

  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
  }
  std::fs::write(path, text).with_context(|| format!("writing report to {}", path.display()))?;

  Ok(())
}

/// Install a stderr `fmt` subscriber honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_ansi(std::io::stderr().is_terminal())
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
