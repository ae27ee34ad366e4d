//! Build bundle staging for sbuild.
//!
//! A [`Bundle`] is the transient staging area for one image build: a
//! uniquely named temp directory, the filesystem objects registered inside
//! it, the parsed recipe, and the knobs that decide which sections run.
//!
//! # Build flow
//!
//! ```text
//! orchestrator
//!   1. Allocate   ── BundleAllocator::create_bundle() → /tmp/sbuild--XXXX/fs
//!   2. Parse      ── recipe → bundle.recipe
//!   3. Phases     ── for each section: bundle.run_section(name)?
//!                      └─ executors write into bundle.rootfs(), json_objects
//!   4. Package    ── reads fs_objects / json_objects
//!   5. Cleanup    ── removes bundle.path (not done here)
//! ```
//!
//! Phases that run as separate processes hand the descriptor over with
//! [`Bundle::save`] / [`Bundle::load`].

pub mod allocator;
pub mod bundle;
pub mod error;
pub mod fs;
pub mod log;
pub mod registry;
pub mod sections;

pub use allocator::{BundleAllocator, create_bundle};
pub use bundle::Bundle;
pub use error::BundleError;
pub use fs::{HostFs, StagingFs};
pub use log::{BuildLog, BundleEvent, TracingLog};
pub use registry::{FsLabel, FsObjects};
pub use sections::{SectionGate, should_run};
