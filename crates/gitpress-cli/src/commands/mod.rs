//! Command implementations for gitpress-cli

pub mod build;
pub mod clone;
pub mod init;
pub mod log;
pub mod plugins;
pub mod preview;
pub mod themes;

pub use build::run_build;
pub use clone::run_clone;
pub use init::run_init;
pub use log::run_log;
pub use plugins::run_plugins;
pub use preview::run_preview;
pub use themes::run_themes;
