//! Batch run: walk a tree and convert every matching file

use std::ops::ControlFlow;

use tracing::{debug, info};

use super::{ConvertConfig, Converter, FileReport, RunSummary};
use crate::detect::EncodingDetector;
use crate::error::ConvertError;

/// Walk `config.root` and convert every file accepted by `config.filter`
///
/// `on_file` is called once per matching file, in walk order, right after
/// that file has been handled. Per-file failures are reported through it and
/// do not stop the walk. Returning [`ControlFlow::Break`] from `on_file` ends
/// the walk before the next file is touched; the summary then covers only
/// the files handled so far.
///
/// # Errors
/// Returns an error, before any file is read, if the root is missing or not
/// a directory or if the target encoding cannot be written.
pub fn walk_and_convert<D, F>(
    config: &ConvertConfig,
    detector: D,
    mut on_file: F,
) -> Result<RunSummary, ConvertError>
where
    D: EncodingDetector,
    F: FnMut(&FileReport) -> ControlFlow<()>,
{
    config.validate()?;

    info!(
        "Converting {} files under {} to {}",
        config.filter,
        config.root.display(),
        config.target.name()
    );

    let converter = Converter::from_config(config, detector);
    let scanner = config.scanner();
    let mut summary = RunSummary::default();

    for file in scanner.scan() {
        let result = converter.convert_file(&file.path);
        if let Err(e) = &result {
            debug!("{} failed ({}): {:?}", file.path.display(), e.kind(), e);
        }

        let report = FileReport {
            path: file.path,
            result,
        };
        summary.record(&report);
        if on_file(&report).is_break() {
            info!("Run stopped after {}", report.path.display());
            break;
        }
    }

    summary.walk_errors = scanner.stats().errors();
    info!("✓ Run completed: {}", summary);
    Ok(summary)
}
