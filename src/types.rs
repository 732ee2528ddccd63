//! # Parameter type descriptors
//!
//! A [`TypeDescriptor`] is the runtime view of one declared parameter type:
//! its name, whether it can be instantiated from JSON at all, and the
//! type-directed decoder that turns a raw fragment into a fresh value.
//!
//! Every `DeserializeOwned + Send` type is a concrete [`Param`]. A parameter
//! typed as an abstract capability (`Abstract<dyn Trait>`) has no decoder:
//! nothing in an untyped JSON document says which implementation to build.

use std::{any::type_name, fmt};

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::value::DynValue;

/// Decodes one raw JSON fragment into a freshly allocated value.
pub type DecodeFn = fn(&RawValue) -> Result<DynValue, serde_json::Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TypeKind {
    /// Decodable through serde.
    Concrete,
    /// Trait-object shaped; no concrete type to instantiate.
    Abstract,
}

#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    name: &'static str,
    kind: TypeKind,
    decode: Option<DecodeFn>,
}

impl TypeDescriptor {
    pub fn concrete<T: DeserializeOwned + Send + 'static>() -> Self {
        Self {
            name: type_name::<T>(),
            kind: TypeKind::Concrete,
            decode: Some(decode_fragment::<T>),
        }
    }

    pub fn abstract_of<T: ?Sized + 'static>() -> Self {
        Self {
            name: type_name::<T>(),
            kind: TypeKind::Abstract,
            decode: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_abstract(&self) -> bool {
        self.kind == TypeKind::Abstract
    }

    /// The decoder, or `None` for abstract types.
    pub fn decoder(&self) -> Option<DecodeFn> {
        self.decode
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TypeKind::Concrete => f.write_str(self.name),
            TypeKind::Abstract => write!(f, "Abstract<{}>", self.name),
        }
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind
    }
}

impl Eq for TypeDescriptor {}

fn decode_fragment<T: DeserializeOwned + Send + 'static>(
    raw: &RawValue,
) -> Result<DynValue, serde_json::Error> {
    serde_json::from_str::<T>(raw.get()).map(DynValue::new)
}

/// A type that may appear as a declared method parameter.
pub trait Param: Sized + 'static {
    fn descriptor() -> TypeDescriptor;
}

impl<T> Param for T
where
    T: DeserializeOwned + Send + 'static,
{
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::concrete::<T>()
    }
}

/// A parameter typed by capability rather than by concrete type, e.g.
/// `Abstract<dyn Named>`.
///
/// Methods declaring one can be registered and described, but every
/// invocation fails with
/// [`InvokeError::UnsupportedParameterKind`](crate::InvokeError::UnsupportedParameterKind).
pub struct Abstract<T: ?Sized>(pub Box<T>);

impl<T: ?Sized> Abstract<T> {
    pub fn into_inner(self) -> Box<T> {
        self.0
    }
}

impl<T: ?Sized> std::ops::Deref for Abstract<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + 'static> Param for Abstract<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::abstract_of::<T>()
    }
}
