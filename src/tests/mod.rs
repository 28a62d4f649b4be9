pub mod common;

mod config_validation;
mod refresh_token;
