//! # Method descriptors and call adapters
//!
//! Registering a function on a [`MethodSet`](crate::MethodSet) turns it into a
//! [`MethodEntry`]: a [`MethodDescriptor`] derived from the function's
//! signature plus a boxed adapter that unpacks a decoded argument vector and
//! calls the function.
//!
//! Any `Fn(&T, A1, .., An) -> R` or `Fn(&mut T, A1, .., An) -> R` with up to
//! seven [`Param`] arguments is a [`Handler`], so plain methods register
//! directly (`methods.method("add", Calculator::add)`). A function whose
//! last parameter is a `Vec<E>` registers as a [`VariadicHandler`]; each
//! trailing JSON fragment then decodes into one `E`.

use std::{any::type_name, fmt, vec};

use crate::{
    error::{InvokeError, InvokeResult},
    method_set::Receiver,
    types::{Param, TypeDescriptor},
    value::{DynValue, IntoResults},
};

/// Which method set a method belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ReceiverKind {
    /// `&self` methods, reachable from any receiver.
    #[strum(to_string = "&self")]
    Shared,
    /// `&mut self` methods, reachable only from an addressable receiver.
    #[strum(to_string = "&mut self")]
    Exclusive,
}

/// Number of argument fragments a method accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    pub fn minimum(&self) -> usize {
        match *self {
            Arity::Exactly(n) | Arity::AtLeast(n) => n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    name: String,
    receiver: ReceiverKind,
    params: Vec<TypeDescriptor>,
    variadic: Option<TypeDescriptor>,
}

impl MethodDescriptor {
    pub fn new(
        name: impl Into<String>,
        receiver: ReceiverKind,
        params: Vec<TypeDescriptor>,
        variadic: Option<TypeDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            receiver,
            params,
            variadic,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn receiver(&self) -> ReceiverKind {
        self.receiver
    }

    /// Fixed parameters, in declaration order.
    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }

    /// Element type of the trailing variadic parameter.
    pub fn variadic_element(&self) -> Option<TypeDescriptor> {
        self.variadic
    }

    /// Declared parameter count, counting the variadic parameter once.
    pub fn param_count(&self) -> usize {
        self.params.len() + usize::from(self.is_variadic())
    }

    pub fn arity(&self) -> Arity {
        if self.is_variadic() {
            Arity::AtLeast(self.params.len())
        } else {
            Arity::Exactly(self.params.len())
        }
    }

    /// Target type of the fragment at `index`.
    pub fn param_for(&self, index: usize) -> Option<TypeDescriptor> {
        self.params.get(index).copied().or(self.variadic)
    }

    /// Rejects abstract parameters, then checks the fragment count.
    pub fn validate(&self, fragments: usize) -> InvokeResult<()> {
        let declared = self.params.iter().chain(self.variadic.iter());
        if let Some((index, param)) = declared.enumerate().find(|(_, p)| p.is_abstract()) {
            return Err(InvokeError::UnsupportedParameterKind {
                method: self.name.clone(),
                index,
                type_name: param.name(),
            });
        }

        let arity = self.arity();
        if !arity.accepts(fragments) {
            return Err(InvokeError::ArityMismatch {
                method: self.name.clone(),
                expected: arity,
                actual: fragments,
            });
        }
        Ok(())
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}", self.name, self.receiver)?;
        for param in &self.params {
            write!(f, ", {}", param)?;
        }
        if let Some(element) = &self.variadic {
            write!(f, ", ...{}", element)?;
        }
        f.write_str(")")
    }
}

type SharedCall<T> = Box<dyn Fn(&T, Vec<DynValue>) -> InvokeResult<Vec<DynValue>> + Send + Sync>;
type ExclusiveCall<T> =
    Box<dyn Fn(&mut T, Vec<DynValue>) -> InvokeResult<Vec<DynValue>> + Send + Sync>;

enum Call<T> {
    Shared(SharedCall<T>),
    Exclusive(ExclusiveCall<T>),
}

/// A registered method: its descriptor and the adapter that calls it.
pub struct MethodEntry<T> {
    descriptor: MethodDescriptor,
    call: Call<T>,
}

impl<T> MethodEntry<T> {
    pub fn descriptor(&self) -> &MethodDescriptor {
        &self.descriptor
    }

    pub(crate) fn call(
        &self,
        receiver: Receiver<'_, T>,
        args: Vec<DynValue>,
    ) -> InvokeResult<Vec<DynValue>> {
        match (&self.call, receiver) {
            (Call::Shared(call), Receiver::Shared(target)) => call(target, args),
            (Call::Shared(call), Receiver::Exclusive(target)) => call(&*target, args),
            (Call::Exclusive(call), Receiver::Exclusive(target)) => call(target, args),
            (Call::Exclusive(_), Receiver::Shared(_)) => Err(InvokeError::internal(format!(
                "method {} needs an exclusive receiver",
                self.descriptor.name
            ))),
        }
    }
}

impl<T> fmt::Debug for MethodEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodEntry")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Unpacks a decoded argument vector in declaration order.
struct ArgCursor {
    args: vec::IntoIter<DynValue>,
    position: usize,
}

impl ArgCursor {
    fn new(args: Vec<DynValue>) -> Self {
        Self {
            args: args.into_iter(),
            position: 0,
        }
    }

    fn next<A: Param>(&mut self) -> InvokeResult<A> {
        let position = self.position;
        self.position += 1;
        let value = self.args.next().ok_or_else(|| {
            InvokeError::internal(format!("decoded argument {} is missing", position))
        })?;
        value.downcast::<A>().map_err(|value| {
            InvokeError::internal(format!(
                "decoded argument {} holds {} instead of {}",
                position,
                value.type_name(),
                type_name::<A>()
            ))
        })
    }

    fn rest<E: Param>(&mut self) -> InvokeResult<Vec<E>> {
        let mut rest = Vec::with_capacity(self.args.len());
        while self.args.len() > 0 {
            rest.push(self.next::<E>()?);
        }
        Ok(rest)
    }

    fn finish(self) -> InvokeResult<()> {
        match self.args.len() {
            0 => Ok(()),
            left => Err(InvokeError::internal(format!(
                "{} decoded arguments left over after position {}",
                left, self.position
            ))),
        }
    }
}

/// A function registrable as a fixed-arity method of `T`.
///
/// `M` is a marker for the function's signature and is always inferred.
pub trait Handler<T, M>: Sized + Send + Sync + 'static {
    fn into_entry(self, name: String) -> MethodEntry<T>;
}

/// A function registrable as a variadic method of `T`; its last parameter is
/// `Vec<E>`.
pub trait VariadicHandler<T, M>: Sized + Send + Sync + 'static {
    fn into_entry(self, name: String) -> MethodEntry<T>;
}

macro_rules! impl_handlers {
    ($($A:ident),*) => {
        impl<F, T, R, $($A,)*> Handler<T, fn(&T, $($A,)*) -> R> for F
        where
            F: Fn(&T, $($A,)*) -> R + Send + Sync + 'static,
            T: 'static,
            R: IntoResults,
            $($A: Param,)*
        {
            #[allow(non_snake_case, unused_mut)]
            fn into_entry(self, name: String) -> MethodEntry<T> {
                let descriptor = MethodDescriptor::new(
                    name,
                    ReceiverKind::Shared,
                    vec![$(<$A as Param>::descriptor()),*],
                    None,
                );
                let call = move |target: &T, args: Vec<DynValue>| -> InvokeResult<Vec<DynValue>> {
                    let mut cursor = ArgCursor::new(args);
                    $(let $A = cursor.next::<$A>()?;)*
                    cursor.finish()?;
                    Ok((self)(target, $($A,)*).into_results())
                };
                MethodEntry {
                    descriptor,
                    call: Call::Shared(Box::new(call)),
                }
            }
        }

        impl<F, T, R, $($A,)*> Handler<T, fn(&mut T, $($A,)*) -> R> for F
        where
            F: Fn(&mut T, $($A,)*) -> R + Send + Sync + 'static,
            T: 'static,
            R: IntoResults,
            $($A: Param,)*
        {
            #[allow(non_snake_case, unused_mut)]
            fn into_entry(self, name: String) -> MethodEntry<T> {
                let descriptor = MethodDescriptor::new(
                    name,
                    ReceiverKind::Exclusive,
                    vec![$(<$A as Param>::descriptor()),*],
                    None,
                );
                let call = move |target: &mut T, args: Vec<DynValue>| -> InvokeResult<Vec<DynValue>> {
                    let mut cursor = ArgCursor::new(args);
                    $(let $A = cursor.next::<$A>()?;)*
                    cursor.finish()?;
                    Ok((self)(target, $($A,)*).into_results())
                };
                MethodEntry {
                    descriptor,
                    call: Call::Exclusive(Box::new(call)),
                }
            }
        }

        impl<F, T, R, $($A,)* V> VariadicHandler<T, fn(&T, $($A,)* Vec<V>) -> R> for F
        where
            F: Fn(&T, $($A,)* Vec<V>) -> R + Send + Sync + 'static,
            T: 'static,
            R: IntoResults,
            $($A: Param,)*
            V: Param,
        {
            #[allow(non_snake_case, unused_mut)]
            fn into_entry(self, name: String) -> MethodEntry<T> {
                let descriptor = MethodDescriptor::new(
                    name,
                    ReceiverKind::Shared,
                    vec![$(<$A as Param>::descriptor()),*],
                    Some(<V as Param>::descriptor()),
                );
                let call = move |target: &T, args: Vec<DynValue>| -> InvokeResult<Vec<DynValue>> {
                    let mut cursor = ArgCursor::new(args);
                    $(let $A = cursor.next::<$A>()?;)*
                    let rest = cursor.rest::<V>()?;
                    Ok((self)(target, $($A,)* rest).into_results())
                };
                MethodEntry {
                    descriptor,
                    call: Call::Shared(Box::new(call)),
                }
            }
        }

        impl<F, T, R, $($A,)* V> VariadicHandler<T, fn(&mut T, $($A,)* Vec<V>) -> R> for F
        where
            F: Fn(&mut T, $($A,)* Vec<V>) -> R + Send + Sync + 'static,
            T: 'static,
            R: IntoResults,
            $($A: Param,)*
            V: Param,
        {
            #[allow(non_snake_case, unused_mut)]
            fn into_entry(self, name: String) -> MethodEntry<T> {
                let descriptor = MethodDescriptor::new(
                    name,
                    ReceiverKind::Exclusive,
                    vec![$(<$A as Param>::descriptor()),*],
                    Some(<V as Param>::descriptor()),
                );
                let call = move |target: &mut T, args: Vec<DynValue>| -> InvokeResult<Vec<DynValue>> {
                    let mut cursor = ArgCursor::new(args);
                    $(let $A = cursor.next::<$A>()?;)*
                    let rest = cursor.rest::<V>()?;
                    Ok((self)(target, $($A,)* rest).into_results())
                };
                MethodEntry {
                    descriptor,
                    call: Call::Exclusive(Box::new(call)),
                }
            }
        }
    };
}

impl_handlers!();
impl_handlers!(A1);
impl_handlers!(A1, A2);
impl_handlers!(A1, A2, A3);
impl_handlers!(A1, A2, A3, A4);
impl_handlers!(A1, A2, A3, A4, A5);
impl_handlers!(A1, A2, A3, A4, A5, A6);
impl_handlers!(A1, A2, A3, A4, A5, A6, A7);
