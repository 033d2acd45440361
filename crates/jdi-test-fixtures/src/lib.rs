//! An in-memory [RemoteReferenceType] for tests, which counts every query it answers.

#![warn(missing_docs)]

use jdi_rs::{ComponentType, Field, RemoteError, RemoteReferenceType};
use jdwp_types::{ClassLoaderId, ClassObjectId, ErrorConstant, ReferenceTypeId, TypeTag};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::trace;

/// A query a [MockReferenceType] answers
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Query {
    /// [RemoteReferenceType::generic_signature]
    GenericSignature,
    /// [RemoteReferenceType::component_type]
    ComponentType,
    /// [RemoteReferenceType::fields]
    Fields,
    /// [RemoteReferenceType::all_fields]
    AllFields,
    /// [RemoteReferenceType::field_by_name]
    FieldByName,
    /// [RemoteReferenceType::class_object]
    ClassObject,
    /// [RemoteReferenceType::class_loader]
    ClassLoader,
    /// [RemoteReferenceType::source_paths]
    SourcePaths,
    /// [RemoteReferenceType::available_strata]
    AvailableStrata,
    /// [RemoteReferenceType::default_stratum]
    DefaultStratum,
}

#[derive(Debug, Clone, Copy)]
enum MockFailure {
    Jdwp(ErrorConstant),
    Disconnected,
}

#[derive(Debug, Clone)]
enum MockComponent {
    Primitive(String),
    Reference(MockReferenceType),
    NotLoaded(String),
}

/// A reference type that lives in memory instead of a target VM.
///
/// Every query yields to the scheduler once (or sleeps for the configured latency) before it is answered,
/// so concurrent callers interleave the way they would over a real connection. Clones share their query
/// counts.
#[derive(Debug, Clone)]
pub struct MockReferenceType {
    id: ReferenceTypeId,
    type_tag: TypeTag,
    signature: String,
    generic_signature: Option<String>,
    component: Option<Box<MockComponent>>,
    declared: Vec<Field>,
    inherited: Vec<Field>,
    class_object: ClassObjectId,
    class_loader: ClassLoaderId,
    strata: Vec<(String, Vec<String>)>,
    default_stratum: String,
    failures: HashMap<Query, MockFailure>,
    latency: Option<Duration>,
    counts: Arc<Mutex<HashMap<Query, usize>>>,
}

impl MockReferenceType {
    fn new(id: u64, type_tag: TypeTag, signature: impl Into<String>) -> Self {
        Self {
            id: ReferenceTypeId::new(id),
            type_tag,
            signature: signature.into(),
            generic_signature: None,
            component: None,
            declared: vec![],
            inherited: vec![],
            class_object: ClassObjectId::new(id + 1000),
            class_loader: ClassLoaderId::NULL,
            strata: vec![],
            default_stratum: "Java".to_string(),
            failures: HashMap::new(),
            latency: None,
            counts: Arc::default(),
        }
    }

    /// A class type
    pub fn class(id: u64, signature: impl Into<String>) -> Self {
        Self::new(id, TypeTag::Class, signature)
    }

    /// An interface type
    pub fn interface(id: u64, signature: impl Into<String>) -> Self {
        Self::new(id, TypeTag::Interface, signature)
    }

    /// An array type. Give it a component with one of the `*_component` methods.
    pub fn array(id: u64, signature: impl Into<String>) -> Self {
        Self::new(id, TypeTag::Array, signature)
    }

    /// Sets the generic signature of this type
    pub fn generic_signature(mut self, generic_signature: impl Into<String>) -> Self {
        self.generic_signature = Some(generic_signature.into());
        self
    }

    /// A loaded reference component type
    pub fn component(mut self, component: MockReferenceType) -> Self {
        self.component = Some(Box::new(MockComponent::Reference(component)));
        self
    }

    /// A primitive component type, given by its descriptor
    pub fn primitive_component(mut self, signature: impl Into<String>) -> Self {
        self.component = Some(Box::new(MockComponent::Primitive(signature.into())));
        self
    }

    /// A component type that has not been loaded by the target VM
    pub fn unloaded_component(mut self, signature: impl Into<String>) -> Self {
        self.component = Some(Box::new(MockComponent::NotLoaded(signature.into())));
        self
    }

    /// Adds a field declared by this type
    pub fn field(mut self, field: Field) -> Self {
        self.declared.push(field);
        self
    }

    /// Adds a field this type inherits
    pub fn inherited_field(mut self, field: Field) -> Self {
        self.inherited.push(field);
        self
    }

    /// Sets the id of the `java.lang.Class` instance
    pub fn class_object(mut self, id: u64) -> Self {
        self.class_object = ClassObjectId::new(id);
        self
    }

    /// Sets the id of the defining class loader, which is null by default
    pub fn class_loader(mut self, id: u64) -> Self {
        self.class_loader = ClassLoaderId::new(id);
        self
    }

    /// Adds source paths for a stratum. Strata without paths answer `AbsentInformation`.
    pub fn stratum<I, S>(mut self, stratum: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strata
            .push((stratum.into(), paths.into_iter().map(Into::into).collect()));
        self
    }

    /// Sets the default stratum, `Java` by default
    pub fn default_stratum(mut self, stratum: impl Into<String>) -> Self {
        self.default_stratum = stratum.into();
        self
    }

    /// Makes every answer to `query` fail with `error`
    pub fn fail(mut self, query: Query, error: ErrorConstant) -> Self {
        self.failures.insert(query, MockFailure::Jdwp(error));
        self
    }

    /// Makes every answer to `query` fail as if the connection to the target VM was closed
    pub fn disconnect(mut self, query: Query) -> Self {
        self.failures.insert(query, MockFailure::Disconnected);
        self
    }

    /// Sleeps for `latency` before answering, instead of yielding once
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// How many times `query` was asked, across all clones
    pub fn query_count(&self, query: Query) -> usize {
        let counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        counts.get(&query).copied().unwrap_or_default()
    }

    async fn respond(&self, query: Query) -> Result<(), RemoteError> {
        {
            let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
            *counts.entry(query).or_default() += 1;
        }
        trace!("answering {query:?} for {}", self.signature);
        match self.latency {
            Some(latency) => tokio::time::sleep(latency).await,
            None => tokio::task::yield_now().await,
        }
        match self.failures.get(&query) {
            Some(MockFailure::Jdwp(error)) => Err(RemoteError::Jdwp(*error)),
            Some(MockFailure::Disconnected) => Err(RemoteError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "connection to the target VM closed",
            ))),
            None => Ok(()),
        }
    }
}

impl RemoteReferenceType for MockReferenceType {
    fn id(&self) -> ReferenceTypeId {
        self.id
    }

    fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    fn signature(&self) -> &str {
        &self.signature
    }

    async fn generic_signature(&self) -> Result<Option<String>, RemoteError> {
        self.respond(Query::GenericSignature).await?;
        Ok(self.generic_signature.clone())
    }

    async fn component_type(&self) -> Result<ComponentType<Self>, RemoteError> {
        self.respond(Query::ComponentType).await?;
        match self.component.as_deref() {
            Some(MockComponent::Primitive(signature)) => {
                Ok(ComponentType::Primitive(signature.clone()))
            }
            Some(MockComponent::Reference(component)) => {
                Ok(ComponentType::Reference(component.clone()))
            }
            Some(MockComponent::NotLoaded(signature)) => {
                Err(RemoteError::ClassNotLoaded(signature.clone()))
            }
            None => Err(RemoteError::Jdwp(ErrorConstant::InvalidClass)),
        }
    }

    async fn fields(&self) -> Result<Vec<Field>, RemoteError> {
        self.respond(Query::Fields).await?;
        Ok(self.declared.clone())
    }

    async fn all_fields(&self) -> Result<Vec<Field>, RemoteError> {
        self.respond(Query::AllFields).await?;
        Ok(self
            .declared
            .iter()
            .chain(&self.inherited)
            .cloned()
            .collect())
    }

    async fn field_by_name(&self, name: &str) -> Result<Option<Field>, RemoteError> {
        self.respond(Query::FieldByName).await?;
        Ok(self
            .declared
            .iter()
            .chain(&self.inherited)
            .find(|field| field.name() == name)
            .cloned())
    }

    async fn class_object(&self) -> Result<ClassObjectId, RemoteError> {
        self.respond(Query::ClassObject).await?;
        Ok(self.class_object)
    }

    async fn class_loader(&self) -> Result<ClassLoaderId, RemoteError> {
        self.respond(Query::ClassLoader).await?;
        Ok(self.class_loader)
    }

    async fn source_paths(&self, stratum: &str) -> Result<Vec<String>, RemoteError> {
        self.respond(Query::SourcePaths).await?;
        self.strata
            .iter()
            .find(|(name, _)| name == stratum)
            .map(|(_, paths)| paths.clone())
            .ok_or(RemoteError::Jdwp(ErrorConstant::AbsentInformation))
    }

    async fn available_strata(&self) -> Result<Vec<String>, RemoteError> {
        self.respond(Query::AvailableStrata).await?;
        Ok(self.strata.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn default_stratum(&self) -> Result<String, RemoteError> {
        self.respond(Query::DefaultStratum).await?;
        Ok(self.default_stratum.clone())
    }
}
