pub mod config;
pub mod error;
pub mod types;

pub use config::{
    SavedSettings, build_config, config_path, load_config, parse_config_str, read_settings,
    save_config,
};
pub use error::{Error, Result};
pub use types::*;
