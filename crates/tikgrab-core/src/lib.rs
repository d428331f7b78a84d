pub mod config;
pub mod logging;

pub mod extract;
pub mod fetch_page;
pub mod rate_limit;
pub mod resolver;
pub mod server;
pub mod validator;
