use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Write rendered output to `out`, replacing its contents, or to stdout.
pub fn emit(out: Option<&Path>, rendered: &str) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write output: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
