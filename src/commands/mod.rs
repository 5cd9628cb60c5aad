pub mod asset;
pub mod config_cmd;
