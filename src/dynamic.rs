//! Type-erased invocation targets.
//!
//! [`DynInvocable`] lets a host keep targets of different types behind one
//! `Box<dyn DynInvocable>` and still invoke their methods by name.

use std::any::type_name;

use crate::{
    error::InvokeResult,
    invoker::Invoker,
    method::MethodDescriptor,
    method_set::Invocable,
    value::DynValue,
};

pub trait DynInvocable: Send {
    fn type_name(&self) -> &'static str;

    fn describe(&self) -> Vec<MethodDescriptor>;

    /// Invokes through a shared receiver; only `&self` methods resolve.
    fn invoke_shared(
        &self,
        invoker: &Invoker,
        method: &str,
        arguments_json: &[u8],
    ) -> InvokeResult<Vec<DynValue>>;

    /// Invokes through an exclusive receiver; both method sets resolve.
    fn invoke_exclusive(
        &mut self,
        invoker: &Invoker,
        method: &str,
        arguments_json: &[u8],
    ) -> InvokeResult<Vec<DynValue>>;
}

impl<T: Invocable + Send> DynInvocable for T {
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn describe(&self) -> Vec<MethodDescriptor> {
        T::method_set().descriptors()
    }

    fn invoke_shared(
        &self,
        invoker: &Invoker,
        method: &str,
        arguments_json: &[u8],
    ) -> InvokeResult<Vec<DynValue>> {
        invoker.invoke(self, method, arguments_json)
    }

    fn invoke_exclusive(
        &mut self,
        invoker: &Invoker,
        method: &str,
        arguments_json: &[u8],
    ) -> InvokeResult<Vec<DynValue>> {
        invoker.invoke(self, method, arguments_json)
    }
}
