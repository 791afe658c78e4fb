//! Weather station proxy with bucketed statistics and a heuristic forecast.
//!
//! The crate is split along the Explicit Module Boundary Pattern (EMBP):
//! - `source` fetches readings from the upstream IoT API and falls back to
//!   synthetic data, so the engines always receive a usable snapshot
//! - `stats` buckets readings by hour, weekday or day offset and summarizes
//!   each bucket
//! - `forecast` projects the weekday statistics forward day by day and flags
//!   hotspots
//! - `routes` is the HTTP gateway that wires the pieces together
//!
//! Both engines are pure functions of their input readings, a
//! [`clock::ReferenceInstant`] and (for the forecast) a caller-supplied RNG.

pub mod clock;
pub mod config;
pub mod forecast;
pub mod insights;
pub mod locations;
pub mod math;
pub mod models;
pub mod routes;
pub mod source;
pub mod stats;
pub mod summary;

pub use clock::ReferenceInstant;
pub use config::Config;

// Re-exported so that sibling modules depend on the crate root rather than on
// each other's file layout.
pub use models::{RawReading, Reading};
