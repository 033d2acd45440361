use std::fmt::Debug;
use std::future::Future;

use jdwp_types::{ClassLoaderId, ClassObjectId, ReferenceTypeId, TypeTag};

use crate::{Field, RemoteError};

/// A handle to a class, interface or array type that lives in a target VM.
///
/// Every query is a round trip to the target VM. Implementations decide how that trip is made, and how long
/// it may take; a [ReferenceType](crate::ReferenceType) only propagates whatever they report.
pub trait RemoteReferenceType: Debug + Send + Sync + Sized {
    /// The id of the type in the target VM
    fn id(&self) -> ReferenceTypeId;

    /// Whether this is a class, interface or array type
    fn type_tag(&self) -> TypeTag;

    /// The erased descriptor of this type, e.g. `Ljava/util/List;`
    fn signature(&self) -> &str;

    /// The generic signature of this type, if it has one
    fn generic_signature(&self)
        -> impl Future<Output = Result<Option<String>, RemoteError>> + Send;

    /// The component type of an array type.
    ///
    /// Fails with [RemoteError::ClassNotLoaded] when the component is a reference type that has not been
    /// loaded yet.
    fn component_type(&self)
        -> impl Future<Output = Result<ComponentType<Self>, RemoteError>> + Send;

    /// The fields declared directly by this type, in the order the target VM reports them
    fn fields(&self) -> impl Future<Output = Result<Vec<Field>, RemoteError>> + Send;

    /// The fields declared by this type, its superclasses, and every interface it implements
    fn all_fields(&self) -> impl Future<Output = Result<Vec<Field>, RemoteError>> + Send;

    /// Looks up a visible field by name, static or not
    fn field_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Field>, RemoteError>> + Send;

    /// The `java.lang.Class` instance of this type
    fn class_object(&self) -> impl Future<Output = Result<ClassObjectId, RemoteError>> + Send;

    /// The class loader that defined this type, the null id for the bootstrap loader
    fn class_loader(&self) -> impl Future<Output = Result<ClassLoaderId, RemoteError>> + Send;

    /// The source paths of this type in the given stratum
    fn source_paths(
        &self,
        stratum: &str,
    ) -> impl Future<Output = Result<Vec<String>, RemoteError>> + Send;

    /// Every stratum this type has source mappings for
    fn available_strata(&self) -> impl Future<Output = Result<Vec<String>, RemoteError>> + Send;

    /// The stratum used when none is given
    fn default_stratum(&self) -> impl Future<Output = Result<String, RemoteError>> + Send;
}

/// The component type of an array type
#[derive(Debug, Clone)]
pub enum ComponentType<R> {
    /// A primitive component, by its descriptor
    Primitive(String),
    /// A reference component
    Reference(R),
}
