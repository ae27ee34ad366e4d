//! Core types and configuration for sbuild.
//!
//! This crate defines the `sbuild.toml` schema ([`SbuildConfig`]), the parsed
//! build recipe carried by every bundle ([`Definition`]), and shared error types.

pub mod config;
pub mod definition;
pub mod encoding;
pub mod error;

pub use config::{BuildOptions, BundleConfig, DEFAULT_PREFIX, SbuildConfig};
pub use definition::{BuildData, BuildScripts, Definition, FileTransfer, ImageData, ImageScripts};
pub use error::{Error, Result};
