//! # byname: invoke methods by name with JSON arguments
//!
//! `byname` calls a method of a Rust value when all the caller has is the
//! method's name and a JSON document holding the arguments. The method's
//! declared parameter types drive decoding: each JSON element is decoded
//! into a fresh value of the type its position requires, then the method
//! runs exactly once with those values.
//!
//! ## Building blocks
//!
//! - Targets: [`Invocable`] types register their methods on a [`MethodSet`]
//!   ([`method_set`])
//! - Signatures: [`MethodDescriptor`] and [`TypeDescriptor`] describe
//!   parameters at runtime ([`method`], [`types`])
//! - Invocation: [`Invoker`] and [`invoke`] run the resolve, decode and call
//!   pipeline ([`invoker`])
//! - Values: arguments and results travel as [`DynValue`] ([`value`])
//! - Type erasure: [`DynInvocable`] for heterogeneous targets ([`dynamic`])
//! - Events: typed callback tables ([`trigger`])
//!
//! ## Example
//!
//! ```
//! use byname::{Invocable, MethodSet};
//!
//! struct Text;
//!
//! impl Text {
//!     fn join(&self, sep: String, parts: Vec<String>) -> String {
//!         parts.join(&sep)
//!     }
//! }
//!
//! impl Invocable for Text {
//!     fn register_methods(methods: &mut MethodSet<Self>) {
//!         methods.variadic("join", Text::join);
//!     }
//! }
//!
//! let results = byname::invoke(&Text, "join", br#"["-", "a", "b", "c"]"#).unwrap();
//! assert_eq!(results[0].downcast_ref::<String>().unwrap(), "a-b-c");
//! ```

pub mod config;
pub mod dynamic;
pub mod error;
pub mod invoker;
pub mod method;
pub mod method_set;
pub mod trigger;
pub mod types;
pub mod value;

// Re-exports
pub use config::InvokerConfig;
pub use dynamic::DynInvocable;
pub use error::*;
pub use invoker::{invoke, Invoker};
pub use method::{Arity, Handler, MethodDescriptor, MethodEntry, ReceiverKind, VariadicHandler};
pub use method_set::{Invocable, MethodSet, Receiver};
pub use types::{Abstract, Param, TypeDescriptor, TypeKind};
pub use value::{DynValue, IntoResults};
