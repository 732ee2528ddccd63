//! # Event Trigger
//!
//! A typed publish/subscribe registry keyed by event name.
//!
//! An [`EventName<T>`] names an event and fixes its payload type. Callbacks
//! registered with [`EventName::on`] are stored type-erased in a
//! [`CallbackTable`]; [`EventName::trigger`] hands the payload to each of
//! them in registration order.
//!
//! Two tables are provided:
//!
//! - [`EventTable`]: single-threaded
//! - [`SharedEventTable`]: shareable across threads, backed by `DashMap`
//!
//! ```
//! use byname::trigger::{EventName, EventTable};
//!
//! const GREETED: EventName<String> = EventName::new("greeted");
//!
//! let table = EventTable::new();
//! GREETED.on(&table, |name: &String| assert_eq!(name, "world"));
//! assert_eq!(GREETED.trigger(&table, &"world".to_string()), 1);
//! ```

mod event;
mod table;

pub use event::EventName;
pub use table::{Callback, CallbackTable, EventTable, SharedEventTable};
