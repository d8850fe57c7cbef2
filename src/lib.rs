//! Resume tailor library

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod interactive;
pub mod output;
pub mod wizard;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{Result, ResumeTailorError};
