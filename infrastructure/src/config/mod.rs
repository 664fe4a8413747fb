//! Configuration loading and raw TOML data types.

pub mod file_config;
pub mod loader;

pub use file_config::{
    FileAwsConfig, FileConfig, FileGenerationConfig, FileLimitsConfig, FileServerConfig,
    FileServersConfig,
};
pub use loader::ConfigLoader;
