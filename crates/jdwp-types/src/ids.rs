use std::any::type_name;
use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;

use crate::private::Identifiable;
pub use identifiable_types::*;

/// Uniquely identifies an object in the target VM that is known to be a class loader object.
///
/// The null id stands for the bootstrap class loader.
pub type ClassLoaderId = Id<ClassLoader>;
/// Uniquely identifies an object in the target VM that is known to be a class object.
pub type ClassObjectId = Id<ClassObject>;
/// Uniquely identifies a reference type in the target VM. It should not be assumed that for a particular class,
/// the classObjectID and the referenceTypeID are the same. A referenceTypeID is not reused to identify a
/// different reference type, regardless of whether the referenced class has been unloaded.
pub type ReferenceTypeId = Id<ReferenceType>;
/// Uniquely identifies a field in some class in the target VM. A fieldID is not necessarily unique on its own;
/// it is always paired with a referenceTypeID to uniquely identify one field.
pub type FieldId = Id<Field>;

impl<T: Identifiable> From<Id<T>> for u64 {
    fn from(value: Id<T>) -> Self {
        value.0
    }
}

/// Uniquely identifies some *thing* in the target VM. An id of 0 represents null.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Id<T: Identifiable>(u64, PhantomData<T>);

impl<T: Identifiable> Id<T> {
    /// The null id
    pub const NULL: Self = Id(0, PhantomData);

    /// Creates a new [Id]. There's no guarantee that this [Id] is valid within the given VM's context.
    pub const fn new(id: u64) -> Self {
        Id(id, PhantomData)
    }

    /// Gets the ids
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Whether this id refers to nothing
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Gets this id, or `None` if it's null
    pub const fn non_null(self) -> Option<Self> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }
}

impl<T: Identifiable + Debug> Debug for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = type_name::<T>().rsplit("::").next().unwrap_or("Unknown");
        f.debug_tuple(format!("Id<{kind}>").as_str())
            .field(&self.0)
            .finish()
    }
}

impl<T: Identifiable> Display for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

mod identifiable_types {
    use crate::private::Identifiable;

    macro_rules! identifiables {
        ($($ty:ident)*) => {
            $(
                /// An identifiable type
                #[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
                pub enum $ty {}
                impl Identifiable for $ty {}
            )*
        };
    }

    identifiables!(
         ClassLoader ClassObject ReferenceType Field
    );
}
