//! Shared primitives for the Duplex FMD-index workspace.
//!
//! `duplex-core` provides the foundation the search crates build on:
//!
//! - **Error types** — [`DuplexError`] and [`Result`] for structured error handling
//! - **Bitvectors** — [`RankBitVec`] with constant-time rank for range bookkeeping

pub mod bitvec;
pub mod error;

pub use bitvec::RankBitVec;
pub use error::{DuplexError, Result};
