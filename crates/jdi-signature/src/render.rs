use crate::descriptor::{decode_array_depth, TypeSignature};
use crate::error::MalformedSignature;
use crate::generic::{
    ClassSignature, JavaTypeSignature, ReferenceTypeSignature, TypeParameter, MAX_ARRAY_DIMENSIONS,
};

/// Renders the display name of a type from its erased descriptor and, when known, its generic signature.
///
/// The generic signature may be the signature of a class (`<K:...;V:...;>Lsuper;`), in which case the names
/// of its type parameters are appended, or a type signature of the same class
/// (`Ljava/util/List<Ljava/lang/String;>;`), in which case its type arguments are. Arrays ignore the generic
/// signature and render their component once per dimension.
///
/// A type signature of an inner class (`Lcom/acme/Outer<TK;>.Inner<TV;>;`) matches the descriptor of that
/// inner class (`Lcom/acme/Outer$Inner;`) and contributes the arguments of the inner class.
pub fn render_generic_name(
    descriptor: &str,
    generic_signature: Option<&str>,
) -> Result<String, MalformedSignature> {
    let (depth, component) = decode_array_depth(descriptor);
    if depth > MAX_ARRAY_DIMENSIONS {
        return Err(MalformedSignature::new(
            descriptor,
            format!("more than {MAX_ARRAY_DIMENSIONS} array dimensions"),
        ));
    }
    if depth > 0 {
        let mut name = render_generic_name(component, None)?;
        for _ in 0..depth {
            name.push_str("[]");
        }
        return Ok(name);
    }

    let mut name = TypeSignature::parse(descriptor)?.base_name().to_string();
    let arguments: Vec<String> = match generic_signature.filter(|g| !g.is_empty()) {
        None => return Ok(name),
        Some(generic) if generic.starts_with('<') => type_parameters(generic)?
            .iter()
            .map(|parameter| parameter.name().to_string())
            .collect(),
        Some(generic) => match JavaTypeSignature::parse(generic) {
            Ok(JavaTypeSignature::Reference(ReferenceTypeSignature::Class(class)))
                if class.erased_name() == name =>
            {
                class
                    .innermost_type_arguments()
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            }
            Ok(_) => vec![],
            // a class signature without type parameters, just a superclass and interfaces
            Err(_) => {
                ClassSignature::parse(generic)?;
                vec![]
            }
        },
    };
    if !arguments.is_empty() {
        name.push('<');
        name.push_str(&arguments.join(","));
        name.push('>');
    }
    Ok(name)
}

/// Gets the formal type parameters declared by a class signature.
pub fn type_parameters(class_signature: &str) -> Result<Vec<TypeParameter>, MalformedSignature> {
    ClassSignature::parse(class_signature).map(|parsed| parsed.type_parameters)
}
