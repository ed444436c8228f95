//! Testing infrastructure for taskpanel.
//!
//! - **Mocks**: [`MemoryVault`], an in-memory [`Vault`](crate::vault::Vault)
//! - **Fixtures**: temporary on-disk vaults and sample task documents
//!   (test-only)

#[cfg(test)]
pub mod fixtures;
pub mod mocks;

pub use mocks::*;

#[cfg(test)]
pub use fixtures::*;
