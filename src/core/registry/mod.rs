//! Template registry: startup registration and identifier lookup

pub mod descriptor;
pub mod registry;

pub use descriptor::ProcessorDescriptor;
pub use registry::{TemplateRegistry, TemplateRegistryBuilder};
