//! Per-file report lines

use encoding_rs::Encoding;
use recode_core::{Conversion, FileReport};

/// One human-readable line describing what happened to a file
#[must_use]
pub fn render_report(report: &FileReport, target: &'static Encoding) -> String {
    let path = report.path.display();
    let target = target.name();

    match &report.result {
        Ok(Conversion::Converted { .. }) => format!("Converted to {target}: {path}"),
        Ok(Conversion::AlreadyCanonical { .. }) => format!("Already {target}: {path}"),
        Ok(Conversion::WouldConvert { from }) => {
            format!("Would convert to {target} from {}: {path}", from.name())
        }
        Err(e) => format!("Skipped ({}): {path}: {e}", e.kind()),
    }
}
