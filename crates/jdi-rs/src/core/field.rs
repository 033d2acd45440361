use jdi_signature::{type_name_from_descriptor, MalformedSignature};
use jdwp_types::{FieldId, Modifiers};

/// A field of a reference type, as reported by the target VM
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Field {
    id: FieldId,
    name: String,
    signature: String,
    generic_signature: Option<String>,
    modifiers: Modifiers,
}

impl Field {
    /// Creates a new field
    pub fn new(
        id: FieldId,
        name: impl Into<String>,
        signature: impl Into<String>,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            signature: signature.into(),
            generic_signature: None,
            modifiers,
        }
    }

    /// Sets the generic signature of this field
    pub fn with_generic_signature(mut self, generic_signature: impl Into<String>) -> Self {
        self.generic_signature = Some(generic_signature.into());
        self
    }

    /// The id the target VM gave this field
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// The field's simple name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Takes the field's name
    pub fn into_name(self) -> String {
        self.name
    }

    /// The erased descriptor of the field's type
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The generic signature of the field's type, when it differs from the descriptor
    pub fn generic_signature(&self) -> Option<&str> {
        self.generic_signature.as_deref()
    }

    /// Access flags
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether this is a class (static) field
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    /// The display name of the field's declared type, generic if the field has a generic signature
    pub fn type_name(&self) -> Result<String, MalformedSignature> {
        type_name_from_descriptor(self.generic_signature().unwrap_or(&self.signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_prefers_generic_signature() {
        let field = Field::new(
            FieldId::new(1),
            "names",
            "Ljava/util/List;",
            Modifiers::from_bits(Modifiers::STATIC),
        );
        assert_eq!(field.type_name().expect("valid descriptor"), "java.util.List");
        assert!(field.is_static());

        let field = field.with_generic_signature("Ljava/util/List<Ljava/lang/String;>;");
        assert_eq!(
            field.type_name().expect("valid signature"),
            "java.util.List<java.lang.String>"
        );
    }
}
