pub mod config;
pub mod logging;

pub mod auth;
pub mod error;
pub mod fetch;
pub mod headers;
pub mod normalize;
pub mod sink;
pub mod step;
pub mod validate;
