//! Sine-wave synthesis, CSV export and host-driven downloads.
//!
//! The three steps are independent: [`wave`] produces samples, [`export`]
//! turns them into CSV text and [`download`] hands that text to a host that
//! knows how to save files. [`chart`] holds the point helpers the GUI uses.

pub mod chart;
pub mod download;
pub mod export;
pub mod prelude;
pub mod telemetry;
pub mod wave;

pub use prelude::{Sample, WaveError, WaveParameters, WaveResult};
