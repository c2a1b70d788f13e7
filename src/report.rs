//! JSON report output.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `None`.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialise report")?;
    match path {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json(&vec![1.5, f64::NAN], Some(&path)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[\n  1.5,\n  null\n]");
    }
}
