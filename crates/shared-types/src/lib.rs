pub mod config;
pub mod destination;
pub mod error;
pub mod models;

pub use config::*;
pub use destination::*;
pub use error::*;
pub use models::*;
