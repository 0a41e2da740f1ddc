//! # PixelPong Communication
//!
//! Access to the remote grid generator and the polling loop built on it.
//! The [`GridService`] trait is the seam between the two; the HTTP client
//! implements it for the real service and tests supply their own.

pub mod communication;
pub mod polling;

pub use communication::{GridService, HttpGridService, StatusReport};

pub use polling::{
    launch, GridSnapshot, PollingController, PollingOptions, SnapshotFetcher, DEFAULT_INTERVAL,
};
