//! Reference [`AssetHost`](crate::traits::AssetHost) implementations.
//!
//! [`InMemoryHost`] stands in for the chain when the engine runs as a
//! simulator or under test.

mod memory;

pub use memory::InMemoryHost;
