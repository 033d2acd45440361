//! The generic signature grammar of the JVM (JVMS §4.7.9.1), as a tree and a set of nom parsers.

use std::fmt::{Display, Formatter};

use jdwp_types::Tag;
use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{char, satisfy},
    combinator::{all_consuming, map, map_opt, opt, value},
    multi::{many0, many0_count, many1, many1_count, separated_list1},
    sequence::{delimited, preceded},
    IResult, Parser,
};

use crate::error::MalformedSignature;

/// The most array dimensions a JVM type may have
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// How deeply type argument lists may nest inside each other
pub const MAX_TYPE_ARGUMENT_DEPTH: usize = 32;

/// Any type that can appear in a signature
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum JavaTypeSignature {
    /// A primitive, or `V` for void
    Base(Tag),
    /// A class, type variable or array
    Reference(ReferenceTypeSignature),
}

/// A type whose values are references
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ReferenceTypeSignature {
    /// `Lpkg/Name<...>;`
    Class(ClassTypeSignature),
    /// `TName;`
    TypeVariable(String),
    /// `[` followed by the component type
    Array(Box<JavaTypeSignature>),
}

/// A possibly parameterized class type, including any inner class suffixes
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ClassTypeSignature {
    /// Dotted binary name of the outermost class
    pub name: String,
    /// Arguments of the outermost class
    pub type_arguments: Vec<TypeArgument>,
    /// Inner classes, from outermost to innermost
    pub inner: Vec<SimpleClassTypeSignature>,
}

/// An inner class reached through a parameterized outer class, `.Inner<...>`
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SimpleClassTypeSignature {
    /// Simple name of the inner class
    pub name: String,
    /// Arguments of the inner class
    pub type_arguments: Vec<TypeArgument>,
}

/// A type argument
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum TypeArgument {
    /// `*`
    Wildcard,
    /// `+Bound`
    Extends(ReferenceTypeSignature),
    /// `-Bound`
    Super(ReferenceTypeSignature),
    /// An exact type
    Exact(ReferenceTypeSignature),
}

/// A formal type parameter of a generic class, `Name:ClassBound:InterfaceBound...`
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TypeParameter {
    name: String,
    class_bound: Option<ReferenceTypeSignature>,
    interface_bounds: Vec<ReferenceTypeSignature>,
}

impl TypeParameter {
    /// The name of the type variable this parameter declares
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class bound, absent when the parameter is only bounded by interfaces
    pub fn class_bound(&self) -> Option<&ReferenceTypeSignature> {
        self.class_bound.as_ref()
    }

    /// Interface bounds, in declaration order
    pub fn interface_bounds(&self) -> &[ReferenceTypeSignature] {
        &self.interface_bounds
    }
}

/// The generic signature of a class or interface
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ClassSignature {
    /// Formal type parameters, empty when the class is not generic
    pub type_parameters: Vec<TypeParameter>,
    /// The direct superclass
    pub superclass: ClassTypeSignature,
    /// Direct superinterfaces
    pub interfaces: Vec<ClassTypeSignature>,
}

impl ClassSignature {
    /// Parses a complete class signature
    pub fn parse(signature: &str) -> Result<Self, MalformedSignature> {
        check_nesting(signature)?;
        all_consuming(class_signature)
            .parse(signature)
            .map(|(_, parsed)| parsed)
            .map_err(|e| MalformedSignature::from_nom(signature, e))
    }
}

impl ClassTypeSignature {
    /// The binary name of the class, with `$` before each inner class: `com.acme.Outer$Inner`
    pub fn erased_name(&self) -> String {
        let mut name = self.name.clone();
        for inner in &self.inner {
            name.push('$');
            name.push_str(&inner.name);
        }
        name
    }

    /// The arguments of the innermost class, which are the arguments of the type itself
    pub fn innermost_type_arguments(&self) -> &[TypeArgument] {
        match self.inner.last() {
            Some(innermost) => &innermost.type_arguments,
            None => &self.type_arguments,
        }
    }
}

impl JavaTypeSignature {
    /// Parses a complete descriptor or field type signature
    pub fn parse(signature: &str) -> Result<Self, MalformedSignature> {
        check_nesting(signature)?;
        all_consuming(java_type_signature)
            .parse(signature)
            .map(|(_, parsed)| parsed)
            .map_err(|e| MalformedSignature::from_nom(signature, e))
    }
}

fn identifier(input: &str) -> IResult<&str, &str> {
    is_not(".;[/<>:").parse(input)
}

/// Rejects signatures whose arrays or type arguments nest deeper than a JVM allows, before the tree
/// for them is built.
fn check_nesting(signature: &str) -> Result<(), MalformedSignature> {
    let mut dimensions = 0;
    let mut depth = 0usize;
    for (offset, c) in signature.char_indices() {
        if c == '[' {
            dimensions += 1;
            if dimensions > MAX_ARRAY_DIMENSIONS {
                return Err(MalformedSignature::new(
                    signature,
                    format!("more than {MAX_ARRAY_DIMENSIONS} array dimensions at offset {offset}"),
                ));
            }
            continue;
        }
        dimensions = 0;
        match c {
            '<' => {
                depth += 1;
                if depth > MAX_TYPE_ARGUMENT_DEPTH {
                    return Err(MalformedSignature::new(
                        signature,
                        format!(
                            "type arguments nested more than {MAX_TYPE_ARGUMENT_DEPTH} deep at offset {offset}"
                        ),
                    ));
                }
            }
            '>' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn java_type_signature(input: &str) -> IResult<&str, JavaTypeSignature> {
    map(
        (many0_count(char('[')), element_type_signature),
        |(dimensions, element)| match dimensions {
            0 => element,
            _ => JavaTypeSignature::Reference(array_of(element, dimensions)),
        },
    )
    .parse(input)
}

/// Any type except an array
fn element_type_signature(input: &str) -> IResult<&str, JavaTypeSignature> {
    alt((
        map(base_type, JavaTypeSignature::Base),
        map(class_type_signature, |class| {
            JavaTypeSignature::Reference(ReferenceTypeSignature::Class(class))
        }),
        map(type_variable_signature, |name| {
            JavaTypeSignature::Reference(ReferenceTypeSignature::TypeVariable(name))
        }),
    ))
    .parse(input)
}

/// Wraps `element` in `dimensions` arrays, which must be at least one
fn array_of(element: JavaTypeSignature, dimensions: usize) -> ReferenceTypeSignature {
    let mut array = ReferenceTypeSignature::Array(Box::new(element));
    for _ in 1..dimensions {
        array = ReferenceTypeSignature::Array(Box::new(JavaTypeSignature::Reference(array)));
    }
    array
}

fn base_type(input: &str) -> IResult<&str, Tag> {
    map_opt(satisfy(|c| "BCDFIJSZV".contains(c)), Tag::from_marker).parse(input)
}

fn reference_type_signature(input: &str) -> IResult<&str, ReferenceTypeSignature> {
    alt((
        map(class_type_signature, ReferenceTypeSignature::Class),
        map(type_variable_signature, ReferenceTypeSignature::TypeVariable),
        array_type_signature,
    ))
    .parse(input)
}

fn type_variable_signature(input: &str) -> IResult<&str, String> {
    map(delimited(char('T'), identifier, char(';')), str::to_string).parse(input)
}

fn array_type_signature(input: &str) -> IResult<&str, ReferenceTypeSignature> {
    map(
        (many1_count(char('[')), element_type_signature),
        |(dimensions, element)| array_of(element, dimensions),
    )
    .parse(input)
}

fn class_type_signature(input: &str) -> IResult<&str, ClassTypeSignature> {
    map(
        delimited(
            char('L'),
            (
                separated_list1(char('/'), identifier),
                opt(type_arguments),
                many0(preceded(char('.'), simple_class_type_signature)),
            ),
            char(';'),
        ),
        |(path, type_arguments, inner)| ClassTypeSignature {
            name: path.join("."),
            type_arguments: type_arguments.unwrap_or_default(),
            inner,
        },
    )
    .parse(input)
}

fn simple_class_type_signature(input: &str) -> IResult<&str, SimpleClassTypeSignature> {
    map((identifier, opt(type_arguments)), |(name, type_arguments)| {
        SimpleClassTypeSignature {
            name: name.to_string(),
            type_arguments: type_arguments.unwrap_or_default(),
        }
    })
    .parse(input)
}

fn type_arguments(input: &str) -> IResult<&str, Vec<TypeArgument>> {
    delimited(char('<'), many1(type_argument), char('>')).parse(input)
}

fn type_argument(input: &str) -> IResult<&str, TypeArgument> {
    alt((
        value(TypeArgument::Wildcard, char('*')),
        map(
            preceded(char('+'), reference_type_signature),
            TypeArgument::Extends,
        ),
        map(
            preceded(char('-'), reference_type_signature),
            TypeArgument::Super,
        ),
        map(reference_type_signature, TypeArgument::Exact),
    ))
    .parse(input)
}

fn type_parameters(input: &str) -> IResult<&str, Vec<TypeParameter>> {
    delimited(char('<'), many1(type_parameter), char('>')).parse(input)
}

fn type_parameter(input: &str) -> IResult<&str, TypeParameter> {
    map(
        (
            identifier,
            preceded(char(':'), opt(reference_type_signature)),
            many0(preceded(char(':'), reference_type_signature)),
        ),
        |(name, class_bound, interface_bounds)| TypeParameter {
            name: name.to_string(),
            class_bound,
            interface_bounds,
        },
    )
    .parse(input)
}

fn class_signature(input: &str) -> IResult<&str, ClassSignature> {
    map(
        (
            opt(type_parameters),
            class_type_signature,
            many0(class_type_signature),
        ),
        |(type_parameters, superclass, interfaces)| ClassSignature {
            type_parameters: type_parameters.unwrap_or_default(),
            superclass,
            interfaces,
        },
    )
    .parse(input)
}

pub(crate) fn write_type_arguments(
    f: &mut Formatter<'_>,
    arguments: &[impl Display],
) -> std::fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }
    f.write_str("<")?;
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{argument}")?;
    }
    f.write_str(">")
}

impl Display for JavaTypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JavaTypeSignature::Base(tag) => f.write_str(tag.keyword().unwrap_or("?")),
            JavaTypeSignature::Reference(reference) => write!(f, "{reference}"),
        }
    }
}

impl Display for ReferenceTypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceTypeSignature::Class(class) => write!(f, "{class}"),
            ReferenceTypeSignature::TypeVariable(name) => f.write_str(name),
            ReferenceTypeSignature::Array(component) => {
                let mut dimensions = 1;
                let mut element = component.as_ref();
                while let JavaTypeSignature::Reference(ReferenceTypeSignature::Array(next)) = element {
                    dimensions += 1;
                    element = next.as_ref();
                }
                write!(f, "{element}")?;
                for _ in 0..dimensions {
                    f.write_str("[]")?;
                }
                Ok(())
            }
        }
    }
}

impl Display for ClassTypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        write_type_arguments(f, &self.type_arguments)?;
        for inner in &self.inner {
            write!(f, ".{inner}")?;
        }
        Ok(())
    }
}

impl Display for SimpleClassTypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        write_type_arguments(f, &self.type_arguments)
    }
}

impl Display for TypeArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeArgument::Wildcard => f.write_str("?"),
            TypeArgument::Extends(bound) => write!(f, "? extends {bound}"),
            TypeArgument::Super(bound) => write!(f, "? super {bound}"),
            TypeArgument::Exact(exact) => write!(f, "{exact}"),
        }
    }
}

impl Display for TypeParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
