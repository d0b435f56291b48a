//! Core business logic modules.

pub mod classifier;
pub mod events;
pub mod mover;
pub mod planner;
pub mod renamer;
pub mod sanitizer;
pub mod scanner;
