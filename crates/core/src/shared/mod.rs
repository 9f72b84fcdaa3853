pub mod align_config;
pub mod constants;
