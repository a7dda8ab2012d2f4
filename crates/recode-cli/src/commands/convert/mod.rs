//! Convert command: Re-encode every matching file under a root

mod report;
mod run;

pub use report::render_report;
pub use run::{run, run_to};
