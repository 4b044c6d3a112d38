//! Route handlers organized by resource

pub mod auth;
pub mod catalog;
pub mod collection;
pub mod health;
pub mod swaps;
pub mod wanted;
