//! # Dynamic Invoker
//!
//! Calls a method of an [`Invocable`] target by name, with arguments taken
//! from a JSON document. One invocation walks these stages and stops at the
//! first failure:
//!
//! ```text
//! Resolve → ShapeDetect → Validate → Decode[0..n) → Invoke → Done
//! ```
//!
//! - **Resolve**: find the method in the shared set, then (for `&mut`
//!   receivers) in the exclusive set
//! - **ShapeDetect**: split the payload into raw per-argument fragments; a
//!   payload that is not an array is one fragment
//! - **Validate**: reject abstract parameters and fragment counts the
//!   signature cannot take
//! - **Decode**: decode every fragment into a fresh value of its declared
//!   parameter type (the variadic element type past the fixed parameters)
//! - **Invoke**: call the method once and hand back its raw results
//!
//! Every error surfaces before the method runs, so a failed invocation never
//! has side effects on the target.

use std::any::type_name;

use serde_json::value::RawValue;
use tracing::{debug, trace};

use crate::{
    config::InvokerConfig,
    error::{InvokeError, InvokeResult},
    method::MethodDescriptor,
    method_set::{Invocable, Receiver},
    value::DynValue,
};

/// Invokes `method` on `target` with the default configuration.
pub fn invoke<'a, T: Invocable>(
    target: impl Into<Receiver<'a, T>>,
    method: &str,
    arguments_json: &[u8],
) -> InvokeResult<Vec<DynValue>> {
    Invoker::default().invoke(target, method, arguments_json)
}

#[derive(Debug, Clone, Default)]
pub struct Invoker {
    config: InvokerConfig,
}

impl Invoker {
    pub fn new(config: InvokerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, target, arguments_json),
        fields(target_type = type_name::<T>(), payload_len = arguments_json.len()),
        err(level = "debug")
    )]
    pub fn invoke<'a, T: Invocable>(
        &self,
        target: impl Into<Receiver<'a, T>>,
        method: &str,
        arguments_json: &[u8],
    ) -> InvokeResult<Vec<DynValue>> {
        let receiver = target.into();
        let methods = T::method_set();

        let entry = methods.resolve(method, receiver.is_addressable())?;
        let descriptor = entry.descriptor();
        debug!("resolved {}", descriptor);

        let fragments = self.split_arguments(arguments_json)?;
        descriptor.validate(fragments.len())?;

        let args = self.decode_arguments(descriptor, &fragments)?;
        debug!("decoded {} arguments", args.len());

        let results = entry.call(receiver, args)?;
        debug!("{} returned {} values", descriptor.name(), results.len());
        Ok(results)
    }

    /// Descriptors of every method `T` exposes.
    pub fn describe<T: Invocable>(&self) -> Vec<MethodDescriptor> {
        T::method_set().descriptors()
    }

    /// Splits the payload into raw argument fragments.
    ///
    /// A JSON array yields one fragment per element. Anything else is a
    /// single fragment when `single_value_fallback` is on.
    pub fn split_arguments(&self, payload: &[u8]) -> InvokeResult<Vec<Box<RawValue>>> {
        if let Some(limit) = self.config.max_payload_bytes {
            if payload.len() > limit {
                return Err(InvokeError::PayloadTooLarge {
                    limit,
                    actual: payload.len(),
                });
            }
        }

        match serde_json::from_slice::<Vec<Box<RawValue>>>(payload) {
            Ok(fragments) => Ok(fragments),
            Err(err) if !self.config.single_value_fallback => {
                Err(InvokeError::MalformedPayload(err))
            }
            Err(err) => {
                trace!("payload is not an array ({}), trying a single value", err);
                let single: Box<RawValue> =
                    serde_json::from_slice(payload).map_err(InvokeError::MalformedPayload)?;
                Ok(vec![single])
            }
        }
    }

    fn decode_arguments(
        &self,
        descriptor: &MethodDescriptor,
        fragments: &[Box<RawValue>],
    ) -> InvokeResult<Vec<DynValue>> {
        fragments
            .iter()
            .enumerate()
            .map(|(index, fragment)| self.decode_argument(descriptor, index, fragment))
            .collect()
    }

    fn decode_argument(
        &self,
        descriptor: &MethodDescriptor,
        index: usize,
        fragment: &RawValue,
    ) -> InvokeResult<DynValue> {
        let param = descriptor.param_for(index).ok_or_else(|| {
            InvokeError::internal(format!(
                "no parameter of {} for argument {}",
                descriptor.name(),
                index
            ))
        })?;
        if self.config.trace_arguments {
            trace!(index, param = param.name(), fragment = fragment.get(), "decoding");
        }

        let decode = param
            .decoder()
            .ok_or_else(|| InvokeError::UnsupportedParameterKind {
                method: descriptor.name().to_string(),
                index,
                type_name: param.name(),
            })?;
        decode(fragment).map_err(|source| InvokeError::DecodeFailure {
            method: descriptor.name().to_string(),
            index,
            type_name: param.name(),
            source,
        })
    }
}
