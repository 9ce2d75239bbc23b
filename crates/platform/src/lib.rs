//! Host Abstraction Layer for the watchface
//!
//! This crate provides trait-based abstractions for every service the watch
//! operating system hands to an application, enabling development and
//! testing without a physical watch.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (watchface crate)
//!         ↓
//! Feature Layer (ui: bounded text, formatting, layout)
//!         ↓
//! Platform HAL (this crate - host traits, scene, event harness)
//!         ↓
//! Watch OS runtime / desktop simulator
//! ```
//!
//! # Host Services
//!
//! - [`UiToolkit`] - windows, text/bitmap layers, status bar, window stack
//! - [`TickService`] - periodic tick subscription
//! - [`Clock`] - wall-clock time and 12/24-hour preference
//! - [`Messaging`] - inbox/outbox key/value channel to the companion
//! - [`HostLog`] - leveled diagnostics (see [`app_log!`])
//! - [`Host`] - all of the above behind one bound
//!
//! [`EventLoop`] drives an [`AppHandler`] against any [`Host`], which is how
//! both the simulator and the tests run an application.
//!
//! # Features
//!
//! - `std`: Enable [`mocks::MockHost`] outside of unit tests
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{app_log, Host};
//!
//! fn hello<H: Host>(host: &mut H) {
//!     app_log!(host, Debug, "Just pushed a window!");
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // host logging goes through HostLog, never stdout
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)] // host accessors

pub mod app;
pub mod clock;
pub mod config;
pub mod dictionary;
pub mod graphics;
pub mod handles;
pub mod harness;
pub mod host;
pub mod log;
pub mod messaging;
pub mod mocks;
pub mod render;
pub mod resources;
pub mod scene;
pub mod toolkit;
pub mod window_stack;

// Re-export main high-level traits
pub use app::AppHandler;
pub use clock::{Clock, OutOfRangeError, TickService, TimeUnits, WallTime};
pub use dictionary::{Dictionary, DictionaryError, Tuple, TupleValue, ValueKind};
pub use graphics::{Color, FontKey, TextAlignment};
pub use handles::{BitmapId, LayerId, WindowId};
pub use harness::{EventLoop, HostEvent, LaunchFailure};
pub use host::Host;
pub use log::{HostLog, LogLevel};
pub use messaging::{DeliveryResult, MessageLimits, Messaging};
pub use resources::{Bitmap, ResourceId};
pub use scene::{DisplayCaps, Scene, SceneStats};
pub use toolkit::{HostError, UiToolkit};
