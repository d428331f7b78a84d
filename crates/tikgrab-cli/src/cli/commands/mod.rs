//! CLI command handlers, one per file.

mod check;
mod resolve;
mod serve;

pub use check::run_check;
pub use resolve::run_resolve;
pub use serve::{run_serve, ServeOverrides};
