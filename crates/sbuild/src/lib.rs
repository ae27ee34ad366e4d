//! Staging bundles for container image builds.
//!
//! This is the unified facade crate that re-exports the sbuild sub-crates.
//! Use feature flags to control which components are included.
//!
//! # Feature flags
//!
//! | Feature | Default | Crate | Description |
//! |---------|---------|-------|-------------|
//! | `core` | yes | [`sbuild-core`](https://crates.io/crates/sbuild-core) | Configuration, recipe model, shared types |
//! | `bundle` | yes | [`sbuild-bundle`](https://crates.io/crates/sbuild-bundle) | Bundle allocation, registry, section gate |
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use sbuild::SbuildConfig;
//! use sbuild::bundle::BundleAllocator;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SbuildConfig::load(Path::new("."))?;
//! let allocator = BundleAllocator::new().with_config(config.bundle);
//! let bundle = allocator.create_with_options("", &config.build)?;
//!
//! if bundle.run_section("post") {
//!     println!("post runs in {}", bundle.rootfs()?.display());
//! }
//! # Ok(())
//! # }
//! ```

// Core types flattened into root namespace for convenience.
#[cfg(feature = "core")]
pub use sbuild_core::*;

/// Bundle allocation, filesystem object registry, and section gating.
///
/// See [`sbuild-bundle`](https://crates.io/crates/sbuild-bundle) for details.
#[cfg(feature = "bundle")]
pub mod bundle {
    pub use sbuild_bundle::*;
}
