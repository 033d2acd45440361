use std::fmt::{Display, Formatter};

use jdwp_types::Tag;

use crate::error::MalformedSignature;
use crate::generic::{write_type_arguments, JavaTypeSignature, ReferenceTypeSignature};

const ARRAY_MARKER: char = Tag::Array.marker();
const OBJECT_MARKER: char = Tag::Object.marker();
const TERMINATOR: char = ';';

/// Counts the leading array markers of a signature, returning the count and everything after them.
///
/// ```
/// # use jdi_signature::decode_array_depth;
/// assert_eq!(decode_array_depth("[[I"), (2, "I"));
/// assert_eq!(decode_array_depth("Ljava/lang/Object;"), (0, "Ljava/lang/Object;"));
/// ```
pub fn decode_array_depth(signature: &str) -> (usize, &str) {
    let remainder = signature.trim_start_matches(ARRAY_MARKER);
    (signature.len() - remainder.len(), remainder)
}

/// Gets the dotted name of a reference type descriptor whose array prefix was already stripped.
///
/// Only the erased class name is kept: type arguments are dropped, and `$` separators of nested
/// classes are left as they are.
pub fn base_name(signature: &str) -> Result<String, MalformedSignature> {
    let body = signature
        .strip_prefix(OBJECT_MARKER)
        .ok_or_else(|| MalformedSignature::new(signature, "expected a reference type marker"))?;
    let body = body
        .strip_suffix(TERMINATOR)
        .ok_or_else(|| MalformedSignature::new(signature, "missing terminator"))?;
    let erased = match body.find('<') {
        Some(parameters_start) => &body[..parameters_start],
        None => body,
    };
    if erased.is_empty() {
        return Err(MalformedSignature::new(signature, "empty class name"));
    }
    Ok(erased.replace('/', "."))
}

/// Renders a descriptor, or a field type signature, as a dotted type name with one `[]` per array
/// dimension.
pub fn type_name_from_descriptor(descriptor: &str) -> Result<String, MalformedSignature> {
    TypeSignature::parse(descriptor).map(|signature| signature.to_string())
}

/// A decoded type: its element type name, the arguments of that element type, and how many array
/// dimensions wrap it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TypeSignature {
    array_depth: usize,
    base_name: String,
    type_arguments: Vec<String>,
}

impl TypeSignature {
    /// Decodes a descriptor or field type signature
    pub fn parse(signature: &str) -> Result<Self, MalformedSignature> {
        JavaTypeSignature::parse(signature).map(|parsed| Self::from(&parsed))
    }

    /// Number of array dimensions
    pub fn array_depth(&self) -> usize {
        self.array_depth
    }

    /// Dotted name of the element type
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Rendered type arguments of the element type
    pub fn type_arguments(&self) -> &[String] {
        &self.type_arguments
    }

    /// Whether this is an array type
    pub fn is_array(&self) -> bool {
        self.array_depth > 0
    }
}

impl From<&JavaTypeSignature> for TypeSignature {
    fn from(signature: &JavaTypeSignature) -> Self {
        let mut array_depth = 0;
        let mut current = signature;
        let (base_name, type_arguments) = loop {
            match current {
                JavaTypeSignature::Reference(ReferenceTypeSignature::Array(component)) => {
                    array_depth += 1;
                    current = component.as_ref();
                }
                JavaTypeSignature::Base(tag) => {
                    break (tag.keyword().unwrap_or_default().to_string(), vec![]);
                }
                JavaTypeSignature::Reference(ReferenceTypeSignature::TypeVariable(name)) => {
                    break (name.clone(), vec![]);
                }
                JavaTypeSignature::Reference(ReferenceTypeSignature::Class(class)) => {
                    // the arguments that belong to the type itself are those of the innermost class
                    match class.inner.split_last() {
                        None => {
                            break (
                                class.name.clone(),
                                class.type_arguments.iter().map(ToString::to_string).collect(),
                            );
                        }
                        Some((innermost, outer)) => {
                            let mut base_name = class.name.clone();
                            base_name.push_str(&render_arguments(&class.type_arguments));
                            for segment in outer {
                                base_name.push('.');
                                base_name.push_str(&segment.to_string());
                            }
                            base_name.push('.');
                            base_name.push_str(&innermost.name);
                            break (
                                base_name,
                                innermost
                                    .type_arguments
                                    .iter()
                                    .map(ToString::to_string)
                                    .collect(),
                            );
                        }
                    }
                }
            }
        };
        Self {
            array_depth,
            base_name,
            type_arguments,
        }
    }
}

fn render_arguments<T: ToString>(arguments: &[T]) -> String {
    if arguments.is_empty() {
        String::new()
    } else {
        let rendered: Vec<String> = arguments.iter().map(ToString::to_string).collect();
        format!("<{}>", rendered.join(","))
    }
}

impl Display for TypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base_name)?;
        write_type_arguments(f, &self.type_arguments)?;
        for _ in 0..self.array_depth {
            f.write_str("[]")?;
        }
        Ok(())
    }
}
