//! Shared configuration types for the cars dictionary service.
//!
//! The structs in this crate describe configuration as it appears on disk and
//! in the environment. Loading them from layered configuration files is the
//! responsibility of the binary crates.

pub mod environment;
pub mod shared;
