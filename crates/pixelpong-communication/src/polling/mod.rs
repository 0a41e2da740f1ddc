//! Polling of a remote grid
//!
//! [`SnapshotFetcher`] performs one tick's reads, [`PollingController`]
//! schedules ticks and owns the run state, and [`launch`] kicks off remote
//! generation before polling begins.

pub mod controller;
pub mod fetcher;

pub use controller::{PollingController, PollingOptions, DEFAULT_INTERVAL};
pub use fetcher::{launch, GridSnapshot, SnapshotFetcher};
