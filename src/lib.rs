#![allow(unsafe_op_in_unsafe_fn)]
//! Adler-32 (RFC 1950) with a lane-unrolled portable kernel and SIMD bulk
//! kernels selected at runtime.

pub mod adler32;
#[cfg(feature = "parallel")]
pub mod batch;
pub mod config;
pub mod error;

pub use adler32::{Adler32, DIVISOR, NMAX, adler32, adler32_with, checksum, combine};
#[cfg(feature = "parallel")]
pub use batch::{BatchHasher, checksum_batch, checksum_parallel};
pub use config::Kernel;
pub use error::Adler32Error;
