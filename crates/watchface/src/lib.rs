//! Ecolab watchface
//!
//! A small watch application built up over five revisions, from a static
//! greeting to a face showing the time, date, weather and a stock quote
//! under a custom status bar.
//!
//! # Architecture
//!
//! ```text
//! WatchFace (AppHandler)
//!     ├── FaceConfig   per-revision settings
//!     ├── FaceLayers   host handles, acquired in init, released in deinit
//!     └── FaceState    bounded display buffers + sign flag
//!         ↓
//! platform::Host (UI toolkit, ticks, clock, messaging, log)
//! ```
//!
//! The face never owns a thread or a timer. The host calls
//! [`WatchFace`] through [`platform::AppHandler`], one event at a time.
//!
//! # Features
//!
//! - `std` - Enable `std` in the platform and ui crates (simulator, tests)
//! - `defmt` - Enable defmt derives on exported enums

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::print_stdout)] // log through the host, never stdout
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod assets;
pub mod config;
pub mod error;
pub mod face;
pub mod keys;
pub mod layers;
pub mod state;

pub use config::{FaceConfig, Revision};
pub use error::StartError;
pub use face::WatchFace;
pub use keys::{MessageKey, REQUEST_KEY, REQUEST_VALUE};
