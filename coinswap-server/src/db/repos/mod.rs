//! Repository implementations for database access
//!
//! Each repository borrows the pool and issues exactly one statement per
//! call. Privileged calls take the caller's access token (or `None`) as
//! the first procedure argument.

pub mod catalog;
pub mod collection;
pub mod sessions;
pub mod swaps;
pub mod wanted;

pub use catalog::CatalogRepo;
pub use collection::CollectionRepo;
pub use sessions::SessionRepo;
pub use swaps::SwapRepo;
pub use wanted::WantedRepo;
