//! Client side of the marketplace order sync: the UI action that asks the
//! backend to pull vendor orders and reports the result back to the user.

pub mod actions;
pub mod effects;
pub mod form;
pub mod handler;
pub mod schedule;
pub mod timestamp;
pub mod transport;

pub use chrono_tz::Tz;

pub use actions::{ActionHandler, ActionRegistry, RegistryError, SYNC_ORDERS_ACTION};
pub use effects::{BusyScope, TracingEffects, UiEffects};
pub use form::{FormState, FROM_DATE_FIELD, TO_DATE_FIELD};
pub use handler::{SyncTriggerHandler, TriggerResult, BUSY_MESSAGE};
pub use schedule::{run_scheduled, DEFAULT_SYNC_PERIOD};
pub use timestamp::{format_to_iso8601, format_to_iso8601_in, NormalizeError};
pub use transport::{HttpRpcTransport, RpcTransport, TransportError};
