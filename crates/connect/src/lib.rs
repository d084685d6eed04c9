//! REST client for the hosted grindlog data service.
//!
//! The backend exposes row-based insert/update/delete/select over HTTP,
//! keyed by table name. This crate implements the core's `RemoteStore` seam
//! against that API plus the typed queries the UI layers read through.

mod client;
mod config;
mod error;

pub use client::ConnectClient;
pub use config::ConnectConfig;
pub use error::{ConnectError, Result};
