//! External service clients.

pub mod credentials;
pub mod lookup;
pub mod tmdb;
