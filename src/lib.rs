//! Media Renamer Library
//!
//! Renames movies and TV episodes into a normalized library layout, using
//! TMDB to look up episode titles and air dates.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
