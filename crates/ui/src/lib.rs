//! Application UI layer: display buffers, text formatting, face layout.
//!
//! This crate is `no_std` by default; it only uses `core`, `heapless` and the
//! platform types. Nothing here talks to the host: formatting writes into
//! [`BoundedText`] buffers and the watchface crate publishes them to layers.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod clock_text;
pub mod layout;
pub mod stock;
pub mod text;
pub mod weather;

pub use clock_text::{format_date, format_time, HourStyle};
pub use layout::{Element, FaceLayout};
pub use stock::{compose_quote, trend_color, SignStyle};
pub use text::BoundedText;
pub use weather::{compose_weather, format_temperature};
