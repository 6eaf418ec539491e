pub mod config;
pub mod env;
pub mod logger;
pub mod mirror_toml;

pub use config::*;
pub use env::api_host_from_env;
pub use logger::setup_logging;
pub use mirror_toml::{MirrorToml, apply_file_to_opts, load_mirror_toml, parse_mirror_toml};
