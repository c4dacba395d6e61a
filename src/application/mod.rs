pub mod booking;
mod dependencies;
mod errors;
pub mod item;
pub mod request;
pub mod user;
pub mod views;

pub use dependencies::ServiceDependencies;
pub use errors::{ApplicationError, ErrorKind, Result};
