//! Ready-made [`ChildProvider`](crate::ChildProvider) implementations.
//!
//! The walker itself knows nothing about where children come from. These
//! adapters cover the two hierarchies every host has at hand: memory and the
//! local filesystem.

mod directory;
mod memory;

pub use directory::{DirectoryProvider, FILE_MIME_TYPE};
pub use memory::MemoryProvider;
