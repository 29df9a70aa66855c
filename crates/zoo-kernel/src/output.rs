//! Run output - JSON array of `[x, y]` paths and the console report.

use std::path::Path;

use anyhow::{Context, Result};
use zoo_route::Point2;

use crate::{Retention, RunSummary};

/// Render paths as `[[[x,y], ...], ...]`.
pub fn render_paths(paths: &[Vec<Point2>]) -> Result<String> {
    serde_json::to_string(paths).context("Failed to serialize paths")
}

/// Write paths to `path`, creating parent directories as needed.
pub fn write_paths(path: &Path, paths: &[Vec<Point2>]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = render_paths(paths)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write paths to {}", path.display()))?;

    tracing::info!(path = %path.display(), paths = paths.len(), "Wrote paths");
    Ok(())
}

/// Console report for a finished run.
///
/// Best retention lists every diet's score before the winning path. All
/// retention prints only the paths.
pub fn render_summary(summary: &RunSummary) -> Result<String> {
    let mut out = String::new();
    let heading = match summary.retention {
        Retention::Best => {
            for trial in &summary.trials {
                out.push_str(&format!(
                    "Diet {}: Score = {:.2}\n",
                    trial.diet.letter().to_ascii_uppercase(),
                    trial.score.score
                ));
            }
            out.push('\n');
            "Best Run Path Output"
        }
        Retention::All => "Final Output Format",
    };
    out.push_str(&format!("{}:\n {}\n", heading, render_paths(&summary.paths())?));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_nested_coordinate_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out.txt");
        let paths = vec![vec![Point2::new(0, 0), Point2::new(1, 1), Point2::new(0, 0)]];

        write_paths(&out, &paths).unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, "[[[0,0],[1,1],[0,0]]]");
    }
}
