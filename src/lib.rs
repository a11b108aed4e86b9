pub mod args;
mod backup;
pub mod commands;
mod config;
mod error;
pub mod load;
pub mod model;
pub mod pipeline;
mod utils;

pub use config::Config;
pub use error::Error;
pub use error::ErrorType;
pub use error::Result;
