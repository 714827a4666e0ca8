// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neatfn-observability
//!
//! Logging infrastructure shared by the neatfn crates, with per-crate debug
//! flag support.
//!
//! ## Features
//! - `file-logging`: JSON log files with daily rotation and run retention

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
pub use init::*;

/// Known neatfn crate names (and log targets) for debug flags
pub const KNOWN_CRATES: &[&str] = &["neatfn-registry", "neatfn-config", "neatfn"];
