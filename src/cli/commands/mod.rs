//! CLI command implementations.

mod ask;
mod config;
mod serve;
mod tracks;

pub use ask::run_ask;
pub use config::run_config;
pub use serve::{router, run_serve};
pub use tracks::run_tracks;
