//! # Type-erased values
//!
//! Decoded arguments and method results cross the invocation boundary as
//! [`DynValue`]s: an owned `Box<dyn Any + Send>` that remembers the name of
//! the type it was built from. Callers recover the concrete value with
//! [`DynValue::downcast`] or [`DynValue::downcast_ref`].
//!
//! Return values are turned into a result list through [`IntoResults`]:
//!
//! - `()` yields an empty list
//! - a tuple yields one value per element, in order
//! - any other supported type yields exactly one value
//!
//! Custom return types go through the tuple impls, e.g. `(report,)`.

use std::{
    any::{type_name, Any},
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    fmt,
};

/// An owned value of any `Send` type.
pub struct DynValue {
    inner: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl DynValue {
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Name of the concrete type held, as reported by [`std::any::type_name`].
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.downcast_mut::<T>()
    }

    /// Takes the concrete value out, handing `self` back on a type mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        match self.inner.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(inner) => Err(Self { inner, type_name }),
        }
    }
}

impl fmt::Debug for DynValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DynValue").field(&self.type_name).finish()
    }
}

/// Conversion of a method's return value into the raw result list.
pub trait IntoResults {
    fn into_results(self) -> Vec<DynValue>;
}

impl IntoResults for () {
    fn into_results(self) -> Vec<DynValue> {
        Vec::new()
    }
}

macro_rules! impl_single_result {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoResults for $ty {
                fn into_results(self) -> Vec<DynValue> {
                    vec![DynValue::new(self)]
                }
            }
        )*
    };
}

impl_single_result!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    serde_json::Value,
);

impl<T: Send + 'static> IntoResults for Vec<T> {
    fn into_results(self) -> Vec<DynValue> {
        vec![DynValue::new(self)]
    }
}

impl<T: Send + 'static> IntoResults for Option<T> {
    fn into_results(self) -> Vec<DynValue> {
        vec![DynValue::new(self)]
    }
}

impl<T: Send + 'static> IntoResults for Box<T> {
    fn into_results(self) -> Vec<DynValue> {
        vec![DynValue::new(self)]
    }
}

// Errors stay in the result list; the invoker does not interpret them.
impl<T: Send + 'static, E: Send + 'static> IntoResults for Result<T, E> {
    fn into_results(self) -> Vec<DynValue> {
        vec![DynValue::new(self)]
    }
}

impl<K: Send + 'static, V: Send + 'static, S: Send + 'static> IntoResults for HashMap<K, V, S> {
    fn into_results(self) -> Vec<DynValue> {
        vec![DynValue::new(self)]
    }
}

impl<T: Send + 'static, S: Send + 'static> IntoResults for HashSet<T, S> {
    fn into_results(self) -> Vec<DynValue> {
        vec![DynValue::new(self)]
    }
}

impl<K: Send + 'static, V: Send + 'static> IntoResults for BTreeMap<K, V> {
    fn into_results(self) -> Vec<DynValue> {
        vec![DynValue::new(self)]
    }
}

impl<T: Send + 'static> IntoResults for BTreeSet<T> {
    fn into_results(self) -> Vec<DynValue> {
        vec![DynValue::new(self)]
    }
}

macro_rules! impl_tuple_results {
    ($($T:ident),+) => {
        impl<$($T: Send + 'static),+> IntoResults for ($($T,)+) {
            #[allow(non_snake_case)]
            fn into_results(self) -> Vec<DynValue> {
                let ($($T,)+) = self;
                vec![$(DynValue::new($T)),+]
            }
        }
    };
}

impl_tuple_results!(A);
impl_tuple_results!(A, B);
impl_tuple_results!(A, B, C);
impl_tuple_results!(A, B, C, D);
impl_tuple_results!(A, B, C, D, E);
