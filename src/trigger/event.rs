use std::{any::Any, borrow::Cow, fmt, marker::PhantomData, sync::Arc};

use tracing::{trace, warn};

use super::table::CallbackTable;

/// Name of an event whose payload is a `T`.
pub struct EventName<T> {
    name: Cow<'static, str>,
    _payload: PhantomData<fn(&T)>,
}

impl<T: Any> EventName<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _payload: PhantomData,
        }
    }

    pub fn owned(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            _payload: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers `callback` for this event on `table`.
    pub fn on<C, F>(&self, table: &C, callback: F)
    where
        C: CallbackTable + ?Sized,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let name = self.name.clone();
        table.register_callback(
            &self.name,
            Arc::new(move |event: &dyn Any| match event.downcast_ref::<T>() {
                Some(event) => callback(event),
                None => warn!(
                    "event {} carries a payload of another type than {}; callback skipped",
                    name,
                    std::any::type_name::<T>()
                ),
            }),
        );
    }

    /// Calls every callback registered under this name and returns how many
    /// were called, including ones that skipped a mismatched payload.
    pub fn trigger<C>(&self, table: &C, event: &T) -> usize
    where
        C: CallbackTable + ?Sized,
    {
        let callbacks = table.callbacks(&self.name);
        trace!("triggering {} with {} callbacks", self.name, callbacks.len());
        for callback in &callbacks {
            callback(event as &dyn Any);
        }
        callbacks.len()
    }
}

impl<T> Clone for EventName<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _payload: PhantomData,
        }
    }
}

impl<T> fmt::Debug for EventName<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventName").field(&self.name).finish()
    }
}

impl<T> fmt::Display for EventName<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
