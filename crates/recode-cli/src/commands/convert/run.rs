//! Convert command entry points

use std::io::{self, Write};
use std::ops::ControlFlow;

use anyhow::Result;
use recode_core::{ConvertConfig, EncodingDetector, RunSummary, walk_and_convert};
use tracing::warn;

use super::render_report;

/// Run the convert command, reporting to stdout
///
/// # Errors
/// Returns an error if the root is unusable, the target encoding cannot be
/// written, or stdout cannot be written.
pub fn run(config: &ConvertConfig, detector: impl EncodingDetector) -> Result<RunSummary> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_to(config, detector, &mut out)
}

/// Run the convert command, writing one report line per matching file to `out`
///
/// The walk stops at the first line that cannot be written.
///
/// # Errors
/// Same as [`run`], with `out` in place of stdout.
pub fn run_to<W: Write>(
    config: &ConvertConfig,
    detector: impl EncodingDetector,
    out: &mut W,
) -> Result<RunSummary> {
    let mut write_error: Option<io::Error> = None;

    // A file that cannot be reported must not be converted
    let summary = walk_and_convert(config, detector, |report| {
        match writeln!(out, "{}", render_report(report, config.target)) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                write_error = Some(e);
                ControlFlow::Break(())
            }
        }
    })?;

    if let Some(e) = write_error {
        return Err(e.into());
    }
    out.flush()?;

    if !summary.is_clean() {
        warn!(
            "{} files could not be converted, {} entries could not be visited",
            summary.failed, summary.walk_errors
        );
    }

    Ok(summary)
}
