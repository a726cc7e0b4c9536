//! Core business logic: the template registry, processor resolution, and the
//! recursive document dispatcher.

pub mod dispatch;
pub mod registry;
