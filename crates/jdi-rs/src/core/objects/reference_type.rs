use futures::TryFutureExt;
use jdi_signature::{render_generic_name, type_name_from_descriptor};
use jdwp_types::{ClassLoaderId, ClassObjectId, ReferenceTypeId, TypeTag};
use tracing::{instrument, trace, warn};

use crate::{ComponentType, Field, FieldTable, JdiError, RemoteReferenceType};

/// A class, interface or array type of a target VM.
///
/// Wraps exactly one [RemoteReferenceType] and remembers the field names it reports. The handle is not owned
/// in any meaningful sense: when the type it stands for changes in the target VM, drop this and wrap a fresh
/// handle.
#[derive(Debug)]
pub struct ReferenceType<R: RemoteReferenceType> {
    remote: R,
    fields: FieldTable,
}

impl<R: RemoteReferenceType> ReferenceType<R> {
    /// Creates a new reference type over a handle
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            fields: FieldTable::new(),
        }
    }

    /// Gets the underlying handle
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// The id the target VM gave this type
    pub fn id(&self) -> ReferenceTypeId {
        self.remote.id()
    }

    pub fn type_tag(&self) -> TypeTag {
        self.remote.type_tag()
    }

    /// Gets the erased descriptor of the reference type
    pub fn signature(&self) -> &str {
        self.remote.signature()
    }

    /// Gets the erased display name, e.g. `java.lang.String[]`
    pub fn name(&self) -> Result<String, JdiError> {
        Ok(type_name_from_descriptor(self.signature())?)
    }

    /// Gets the generic signature, `None` if the type is not generic
    pub async fn generic_signature(&self) -> Result<Option<String>, JdiError> {
        self.remote
            .generic_signature()
            .map_err(JdiError::remote("generic signature"))
            .await
    }

    /// Gets the display name of this type with its type parameters, e.g. `java.util.Map<K,V>`.
    ///
    /// Array types are named after their component type. If the component type is not loaded yet, the erased
    /// name is used instead.
    #[instrument(skip_all, fields(signature = self.signature()))]
    pub async fn generic_name(&self) -> Result<String, JdiError> {
        let mut dimensions = 0;
        let mut component: Option<R> = None;
        loop {
            let current = component.as_ref().unwrap_or(&self.remote);
            if current.type_tag() != TypeTag::Array {
                let generic_signature = current
                    .generic_signature()
                    .map_err(JdiError::remote("generic signature"))
                    .await?;
                let name = render_generic_name(current.signature(), generic_signature.as_deref())?;
                return Ok(with_dimensions(name, dimensions));
            }

            let resolved = current.component_type().await;
            match resolved {
                Ok(ComponentType::Reference(next)) => {
                    dimensions += 1;
                    component = Some(next);
                }
                Ok(ComponentType::Primitive(_)) => {
                    let name = type_name_from_descriptor(current.signature())?;
                    return Ok(with_dimensions(name, dimensions));
                }
                Err(err) if err.is_class_not_loaded() => {
                    warn!("using erased name of {}: {err}", current.signature());
                    let name = render_generic_name(current.signature(), None)?;
                    return Ok(with_dimensions(name, dimensions));
                }
                Err(err) => return Err(JdiError::remote("component type")(err)),
            }
        }
    }

    /// Gets the names of the fields declared by this type, querying the target VM on first use
    #[instrument(skip_all, fields(signature = self.signature()))]
    pub async fn declared_field_names(&self) -> Result<&[String], JdiError> {
        self.fields.declared(|| self.remote.fields()).await
    }

    /// Gets the names of the fields declared by this type, its super types, and every interface it
    /// implements, querying the target VM on first use. Names are not de-duplicated.
    #[instrument(skip_all, fields(signature = self.signature()))]
    pub async fn all_field_names(&self) -> Result<&[String], JdiError> {
        self.fields.all(|| self.remote.all_fields()).await
    }

    /// Gets the static field with the given name.
    ///
    /// Instance fields are not returned. A failed lookup is logged and reported as no field.
    #[instrument(skip(self), fields(signature = self.signature()))]
    pub async fn field(&self, name: &str) -> Option<Field> {
        match self.remote.field_by_name(name).await {
            Ok(Some(field)) if field.is_static() => Some(field),
            Ok(Some(_)) => {
                trace!("{name} is an instance field");
                None
            }
            Ok(None) => None,
            Err(err) => {
                warn!("exception while retrieving field {name}: {err}");
                None
            }
        }
    }

    /// Gets the `java.lang.Class` instance of this type
    pub async fn class_object(&self) -> Result<ClassObjectId, JdiError> {
        self.remote
            .class_object()
            .map_err(JdiError::remote("class object"))
            .await
    }

    /// Gets the class loader of this type, `None` for the bootstrap class loader
    pub async fn class_loader(&self) -> Result<Option<ClassLoaderId>, JdiError> {
        self.remote
            .class_loader()
            .map_ok(ClassLoaderId::non_null)
            .map_err(JdiError::remote("class loader"))
            .await
    }

    /// Gets the source paths of this type in a stratum, empty if there are none or they can't be retrieved
    #[instrument(skip(self), fields(signature = self.signature()))]
    pub async fn source_paths(&self, stratum: &str) -> Vec<String> {
        match self.remote.source_paths(stratum).await {
            Ok(paths) => paths,
            Err(err) if err.is_absent_information() => {
                trace!("no source paths for stratum {stratum}");
                vec![]
            }
            Err(err) => {
                warn!("exception while retrieving source paths for stratum {stratum}: {err}");
                vec![]
            }
        }
    }

    /// Gets the strata this type has source information for. Asked again on every call.
    pub async fn available_strata(&self) -> Result<Vec<String>, JdiError> {
        self.remote
            .available_strata()
            .map_err(JdiError::remote("available strata"))
            .await
    }

    pub async fn default_stratum(&self) -> Result<String, JdiError> {
        self.remote
            .default_stratum()
            .map_err(JdiError::remote("default stratum"))
            .await
    }
}

fn with_dimensions(mut name: String, dimensions: usize) -> String {
    for _ in 0..dimensions {
        name.push_str("[]");
    }
    name
}
