//! Application configuration and constants
//!
//! This module defines central configuration values used across the
//! workspace. All branding, naming, and screen geometry should reference
//! these constants rather than hardcoding values.

/// The greeting shown by the first revisions of the face
pub const APP_GREETING: &str = "Ecolab";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Screen width in pixels (rectangular watch display)
pub const SCREEN_WIDTH: u32 = 144;

/// Screen height in pixels
pub const SCREEN_HEIGHT: u32 = 168;

/// Development mode banner
pub const fn dev_banner() -> &'static str {
    "Ecolab Watchface - Simulator"
}
