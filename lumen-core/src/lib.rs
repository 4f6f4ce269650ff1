//! Lumen Core Library
//!
//! This crate brokers text-generation requests across interchangeable AI
//! providers (ordered fallback, structured-output repair) and exchanges
//! third-party identity tokens for application session tokens.

pub mod auth;
pub mod config;
pub mod generation;
pub mod http;
pub mod protocol;
pub mod providers;

/// Returns the version of the Lumen Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
