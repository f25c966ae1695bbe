//! Config key names.

pub const PLUGINS: &str = "plugins";
pub const THEME: &str = "theme";
pub const PRESENTER: &str = "presenter";
pub const OUT_DIRECTORY: &str = "out_directory";
pub const BUILD_COMMAND: &str = "build_command";
