//! # `jdi-signature`
//!
//! Decodes the compact type encodings a JVM reports for its types into the names a person would write.
//!
//! Two encodings are understood:
//!  - *descriptors*, the erased form (`[[Ljava/lang/String;`, `I`, `Ljava/util/Map$Entry;`)
//!  - *generic signatures*, which extend descriptors with type parameters and type arguments
//!    (`<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/util/AbstractMap<TK;TV;>;`)
//!
//! Decoding is one way: descriptors go in, dotted display names come out. Nested class separators (`$`) are
//! kept verbatim, matching the binary names the VM uses.
//!
//! ```
//! use jdi_signature::{render_generic_name, type_name_from_descriptor};
//!
//! assert_eq!(type_name_from_descriptor("[[Ljava/lang/String;").unwrap(), "java.lang.String[][]");
//! assert_eq!(
//!     render_generic_name("Ljava/util/List;", Some("Ljava/util/List<Ljava/lang/String;>;")).unwrap(),
//!     "java.util.List<java.lang.String>"
//! );
//! ```
//!
//! Nothing in this crate performs I/O.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub use descriptor::{base_name, decode_array_depth, type_name_from_descriptor, TypeSignature};
pub use error::MalformedSignature;
pub use generic::{
    ClassSignature, ClassTypeSignature, JavaTypeSignature, ReferenceTypeSignature,
    SimpleClassTypeSignature, TypeArgument, TypeParameter, MAX_ARRAY_DIMENSIONS,
    MAX_TYPE_ARGUMENT_DEPTH,
};
pub use render::{render_generic_name, type_parameters};

mod descriptor;
mod error;
mod generic;
mod render;
