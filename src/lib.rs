//! Frame-buffer sizing and hardware decode capability negotiation.
//!
//! Everything except `platform` builds without `std`. It still needs an
//! allocator there, since `tracing` depends on `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod advisor;
pub mod device;
pub mod error;
pub mod frame;
pub mod types;

#[cfg(feature = "std")]
pub mod platform;

// Re-exports
pub use advisor::*;
pub use device::*;
pub use error::*;
pub use frame::*;
pub use types::*;
