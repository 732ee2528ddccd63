//! # Method sets and receiver resolution
//!
//! A target type exposes its methods by implementing [`Invocable`]. The
//! method set is rebuilt for every invocation; nothing is cached between
//! calls.
//!
//! Methods live in one of two sets, keyed by the receiver they need:
//!
//! - the shared set (`&self` methods), tried first
//! - the exclusive set (`&mut self` methods), tried only when the caller
//!   handed over an addressable `&mut T` receiver

use std::collections::HashMap;

use tracing::warn;

use crate::{
    error::{InvokeError, InvokeResult, LookupFailure},
    method::{Handler, MethodDescriptor, MethodEntry, ReceiverKind, VariadicHandler},
};

/// The receiver an invocation runs against.
#[derive(Debug)]
pub enum Receiver<'a, T> {
    Shared(&'a T),
    Exclusive(&'a mut T),
}

impl<T> Receiver<'_, T> {
    /// Whether exclusive (`&mut self`) methods are reachable.
    pub fn is_addressable(&self) -> bool {
        matches!(self, Receiver::Exclusive(_))
    }
}

impl<'a, T> From<&'a T> for Receiver<'a, T> {
    fn from(target: &'a T) -> Self {
        Receiver::Shared(target)
    }
}

impl<'a, T> From<&'a mut T> for Receiver<'a, T> {
    fn from(target: &'a mut T) -> Self {
        Receiver::Exclusive(target)
    }
}

/// A type whose methods can be invoked by name.
///
/// ```
/// use byname::{Invocable, MethodSet};
///
/// #[derive(Default)]
/// struct Counter {
///     value: i64,
/// }
///
/// impl Counter {
///     fn get(&self) -> i64 {
///         self.value
///     }
///
///     fn add(&mut self, amount: i64) -> i64 {
///         self.value += amount;
///         self.value
///     }
/// }
///
/// impl Invocable for Counter {
///     fn register_methods(methods: &mut MethodSet<Self>) {
///         methods.method("get", Counter::get).method("add", Counter::add);
///     }
/// }
///
/// let mut counter = Counter::default();
/// let results = byname::invoke(&mut counter, "add", b"[5]").unwrap();
/// assert_eq!(results[0].downcast_ref::<i64>(), Some(&5));
/// ```
pub trait Invocable: Sized + 'static {
    fn register_methods(methods: &mut MethodSet<Self>);

    fn method_set() -> MethodSet<Self> {
        let mut methods = MethodSet::new();
        Self::register_methods(&mut methods);
        methods
    }
}

pub struct MethodSet<T> {
    shared: HashMap<String, MethodEntry<T>>,
    exclusive: HashMap<String, MethodEntry<T>>,
}

impl<T: 'static> MethodSet<T> {
    pub fn new() -> Self {
        Self {
            shared: HashMap::new(),
            exclusive: HashMap::new(),
        }
    }

    /// Registers a fixed-arity method.
    pub fn method<M, H>(&mut self, name: impl Into<String>, handler: H) -> &mut Self
    where
        H: Handler<T, M>,
    {
        self.insert(handler.into_entry(name.into()))
    }

    /// Registers a method whose trailing `Vec<E>` parameter collects every
    /// argument past the fixed ones.
    pub fn variadic<M, H>(&mut self, name: impl Into<String>, handler: H) -> &mut Self
    where
        H: VariadicHandler<T, M>,
    {
        self.insert(handler.into_entry(name.into()))
    }

    fn insert(&mut self, entry: MethodEntry<T>) -> &mut Self {
        let descriptor = entry.descriptor();
        let name = descriptor.name().to_string();
        let receiver = descriptor.receiver();
        let set = match receiver {
            ReceiverKind::Shared => &mut self.shared,
            ReceiverKind::Exclusive => &mut self.exclusive,
        };
        if set.insert(name.clone(), entry).is_some() {
            warn!(
                "method {} registered twice on the {} set; keeping the latest",
                name, receiver
            );
        }
        self
    }

    /// Looks `name` up in the shared set, then, for an addressable receiver,
    /// in the exclusive set.
    pub fn resolve(&self, name: &str, addressable: bool) -> InvokeResult<&MethodEntry<T>> {
        if let Some(entry) = self.shared.get(name) {
            return Ok(entry);
        }
        if !addressable {
            return Err(InvokeError::MethodNotFound {
                method: name.to_string(),
                reason: LookupFailure::NotAddressable,
            });
        }
        self.exclusive
            .get(name)
            .ok_or_else(|| InvokeError::MethodNotFound {
                method: name.to_string(),
                reason: LookupFailure::Missing,
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shared.contains_key(name) || self.exclusive.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.shared.len() + self.exclusive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.is_empty() && self.exclusive.is_empty()
    }

    /// All descriptors, sorted by name with shared methods first on ties.
    pub fn descriptors(&self) -> Vec<MethodDescriptor> {
        let mut descriptors: Vec<MethodDescriptor> = self
            .shared
            .values()
            .chain(self.exclusive.values())
            .map(|entry| entry.descriptor().clone())
            .collect();
        descriptors.sort_by_key(|d| {
            (
                d.name().to_string(),
                d.receiver() == ReceiverKind::Exclusive,
            )
        });
        descriptors
    }
}

impl<T: 'static> Default for MethodSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
