use serde::{Deserialize, Serialize};

use crate::domain::{DateBoundaryPair, SyncOutcome, SyncedOrder, WireTimestamp};

/// Fully-qualified name of the whitelisted backend method that pulls vendor orders.
pub const SYNC_VENDOR_ORDERS_METHOD: &str =
    "amazon_integration.amazon_integration.py.amazon.sync_amazon_vendor_orders";

/// Parameters of the vendor order sync method. Absent bounds are sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOrdersRequest {
    pub created_after: Option<WireTimestamp>,
    pub created_before: Option<WireTimestamp>,
}

impl From<DateBoundaryPair> for SyncOrdersRequest {
    fn from(pair: DateBoundaryPair) -> Self {
        Self {
            created_after: pair.from,
            created_before: pair.to,
        }
    }
}

/// Envelope every whitelisted method answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodResponse<T> {
    #[serde(default)]
    pub message: Option<T>,
}

pub type SyncOrdersResponse = MethodResponse<Vec<SyncedOrder>>;

impl From<SyncOrdersResponse> for SyncOutcome {
    fn from(response: SyncOrdersResponse) -> Self {
        SyncOutcome::from_orders(response.message)
    }
}
