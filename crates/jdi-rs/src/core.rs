//! everything in core is re-exported to the root

mod field;
mod objects;
mod remote;

pub use self::{
    field::Field,
    objects::{field_table::FieldTable, reference_type::ReferenceType},
    remote::{ComponentType, RemoteReferenceType},
};
