pub mod builtin;
pub mod definition;
pub mod loader;

pub use builtin::{institution, teacher};
pub use definition::{
    ContactFields, DocumentSlot, FieldKind, FieldSpec, FlowDefinition, StepDefinition,
};
pub use loader::load_from_dir;
