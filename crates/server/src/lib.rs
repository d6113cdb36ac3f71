#[cfg(feature = "server")]
pub mod config;

pub mod api;

pub mod firebase;
