pub mod constants;
pub mod http_client;
pub mod logging;
