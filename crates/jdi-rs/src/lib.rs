//! # `jdi-rs`
//!
//! Provides a 'jdi'-like model of the reference types of a (usually) remote virtual machine, over any
//! [RemoteReferenceType] handle.
//!
//! A [ReferenceType] wraps one handle and answers the questions a debugger front end asks about a class,
//! interface or array type: its display name with generics, the names of its fields, its static fields, its
//! class object and loader, and where its sources are. Field name tables are queried once per
//! [ReferenceType] and shared between all callers afterwards.
//!
//! Original description of the JDI, as provided by Oracle[^1]:
//! > The Java Debug Interface is a high level api providing information for debuggers and similar
//! > systems needing access to the running state of a (usually) remote virtual machine.
//!
//! [^1]: <https://docs.oracle.com/javase/8/docs/jdk/api/jpda/jdi/>

pub use self::core::*;
pub use error::*;

pub use jdi_signature;
pub use jdwp_types;

mod core;
mod error;
