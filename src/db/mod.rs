//! User storage.
//!
//! - [`traits::UserStore`] - storage abstraction with atomic insert-if-absent
//! - [`memory::MemoryUserStore`] - volatile in-process backend

pub mod memory;
pub mod traits;

pub use memory::MemoryUserStore;
pub use traits::UserStore;
