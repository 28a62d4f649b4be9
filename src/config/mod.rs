pub mod connectors;
pub mod loader;
pub mod settings;
pub mod validator;
