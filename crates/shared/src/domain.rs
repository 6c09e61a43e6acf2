use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format of timestamps sent over the wire: second precision, literal `Z`.
pub const WIRE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A UTC instant rendered as `YYYY-MM-DDTHH:mm:ssZ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireTimestamp(String);

impl WireTimestamp {
    /// Renders `instant` in wire format. Sub-second precision is dropped, not rounded.
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self(instant.format(WIRE_TIMESTAMP_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WireTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized lower/upper creation bounds for one sync request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateBoundaryPair {
    pub from: Option<WireTimestamp>,
    pub to: Option<WireTimestamp>,
}

/// One order record as returned by the remote sync method.
///
/// The payload shape belongs to the marketplace API and is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncedOrder(pub serde_json::Value);

impl SyncedOrder {
    pub fn purchase_order_number(&self) -> Option<&str> {
        self.0.get("purchaseOrderNumber")?.as_str()
    }
}

/// Result of one sync call, consumed once by the notice renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Empty,
    Synced(Vec<SyncedOrder>),
    Failed(String),
}

impl SyncOutcome {
    pub fn from_orders(orders: Option<Vec<SyncedOrder>>) -> Self {
        match orders {
            Some(orders) if !orders.is_empty() => Self::Synced(orders),
            _ => Self::Empty,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    /// Indicator colour used by the dialog layer.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Info => "yellow",
            Self::Success => "green",
            Self::Error => "red",
        }
    }
}

/// A modal notice shown to the user after an action settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }
}
