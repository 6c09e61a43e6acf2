//! The "sync orders" action: normalize the window, call the backend, report back.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono_tz::Tz;
use shared::{
    domain::{DateBoundaryPair, Notice, Severity, SyncOutcome, SyncedOrder},
    protocol::{SyncOrdersRequest, SyncOrdersResponse, SYNC_VENDOR_ORDERS_METHOD},
};
use tracing::{error, info, warn};

use crate::{
    actions::ActionHandler,
    effects::{BusyScope, UiEffects},
    form::{FormState, FROM_DATE_FIELD, TO_DATE_FIELD},
    timestamp::{format_to_iso8601, format_to_iso8601_in, NormalizeError},
    transport::{RpcTransport, TransportError},
};

pub const BUSY_MESSAGE: &str = "Syncing Amazon orders, please wait...";
pub const NOTICE_TITLE: &str = "Amazon Order Sync";

/// What a single invocation ended with. Every variant has already been shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerResult {
    Completed(SyncOutcome),
    InvalidInput {
        field: &'static str,
        error: NormalizeError,
    },
    AlreadyRunning,
}

impl TriggerResult {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Completed(SyncOutcome::Empty | SyncOutcome::Synced(_))
        )
    }
}

pub struct SyncTriggerHandler {
    transport: Arc<dyn RpcTransport>,
    effects: Arc<dyn UiEffects>,
    method: String,
    time_zone: Option<Tz>,
    in_flight: AtomicBool,
}

impl SyncTriggerHandler {
    pub fn new(transport: Arc<dyn RpcTransport>, effects: Arc<dyn UiEffects>) -> Self {
        Self {
            transport,
            effects,
            method: SYNC_VENDOR_ORDERS_METHOD.to_string(),
            time_zone: None,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Reads offset-less form dates in `tz` instead of the process time zone.
    pub fn with_time_zone(mut self, tz: Tz) -> Self {
        self.time_zone = Some(tz);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub async fn invoke(&self, form: &FormState) -> TriggerResult {
        let window = match read_window(form, self.time_zone.as_ref()) {
            Ok(window) => window,
            Err((field, error)) => {
                warn!(field, input = error.input(), %error, "rejecting sync window");
                self.effects.notify(&invalid_date_notice(field, &error));
                return TriggerResult::InvalidInput { field, error };
            }
        };

        let Some(_flight) = InFlight::acquire(&self.in_flight) else {
            info!(method = %self.method, "order sync already in progress");
            self.effects.notify(&Notice::new(
                Severity::Info,
                NOTICE_TITLE,
                "An order sync is already in progress.",
            ));
            return TriggerResult::AlreadyRunning;
        };

        let busy = BusyScope::enter(self.effects.as_ref(), BUSY_MESSAGE);
        let outcome = self.call(window).await;
        busy.release();

        self.effects.notify(&outcome_notice(&outcome));
        TriggerResult::Completed(outcome)
    }

    async fn call(&self, window: DateBoundaryPair) -> SyncOutcome {
        let request = SyncOrdersRequest::from(window);
        info!(
            method = %self.method,
            created_after = ?request.created_after.as_ref().map(|ts| ts.as_str()),
            created_before = ?request.created_before.as_ref().map(|ts| ts.as_str()),
            "starting order sync"
        );

        match self.request_orders(&request).await {
            Ok(response) => {
                let outcome = SyncOutcome::from(response);
                match &outcome {
                    SyncOutcome::Synced(orders) => {
                        let purchase_orders: Vec<&str> = orders
                            .iter()
                            .filter_map(SyncedOrder::purchase_order_number)
                            .collect();
                        info!(count = orders.len(), ?purchase_orders, "orders synced");
                    }
                    _ => info!("no orders to sync"),
                }
                outcome
            }
            Err(err) => {
                error!(method = %self.method, error = %err, "order sync failed");
                SyncOutcome::Failed(err.to_string())
            }
        }
    }

    async fn request_orders(
        &self,
        request: &SyncOrdersRequest,
    ) -> Result<SyncOrdersResponse, TransportError> {
        let decode = |source| TransportError::Decode {
            method: self.method.clone(),
            source,
        };
        let params = serde_json::to_value(request).map_err(decode)?;
        let reply = self.transport.call_method(&self.method, params).await?;
        serde_json::from_value(reply).map_err(decode)
    }
}

#[async_trait]
impl ActionHandler for SyncTriggerHandler {
    async fn handle(&self, form: &FormState) -> TriggerResult {
        self.invoke(form).await
    }
}

fn read_window(
    form: &FormState,
    tz: Option<&Tz>,
) -> Result<DateBoundaryPair, (&'static str, NormalizeError)> {
    let normalize = |field: &'static str| {
        let input = form.text(field);
        let normalized = match tz {
            Some(tz) => format_to_iso8601_in(input, tz),
            None => format_to_iso8601(input),
        };
        normalized.map_err(|e| (field, e))
    };
    Ok(DateBoundaryPair {
        from: normalize(FROM_DATE_FIELD)?,
        to: normalize(TO_DATE_FIELD)?,
    })
}

fn outcome_notice(outcome: &SyncOutcome) -> Notice {
    match outcome {
        SyncOutcome::Empty => Notice::new(
            Severity::Info,
            NOTICE_TITLE,
            "No new orders were found to sync.",
        ),
        SyncOutcome::Synced(orders) => Notice::new(
            Severity::Success,
            NOTICE_TITLE,
            format!("{} order(s) synced successfully.", orders.len()),
        ),
        SyncOutcome::Failed(_) => Notice::new(
            Severity::Error,
            NOTICE_TITLE,
            "Order sync failed. Please try again later.",
        ),
    }
}

fn invalid_date_notice(field: &str, error: &NormalizeError) -> Notice {
    let label = match field {
        FROM_DATE_FIELD => "From Date",
        TO_DATE_FIELD => "To Date",
        other => other,
    };
    Notice::new(
        Severity::Error,
        NOTICE_TITLE,
        format!("{label} is not a valid date: '{}'.", error.input()),
    )
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "tests/handler_tests.rs"]
mod tests;
