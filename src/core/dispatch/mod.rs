//! Processor resolution and recursive document dispatch

pub mod dispatcher;
pub mod factory;
pub mod summary;

pub use dispatcher::{Dispatcher, ImportPolicy};
pub use factory::ProcessorFactory;
pub use summary::ImportSummary;
