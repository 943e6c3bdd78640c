//! # Domain
//!
//! Plain data shared by every ConfHub crate: configuration, entity kinds, events exchanged
//! between slices and the slice registry. No I/O lives here.

pub mod config;
pub mod constants;
pub mod events;
pub mod registry;
