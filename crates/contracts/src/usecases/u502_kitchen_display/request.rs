use serde::{Deserialize, Serialize};

use crate::domain::a005_order_line::aggregate::DeliveryStatus;

/// GET/PUT /api/kitchen/pause-status
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PauseStatus {
    #[serde(alias = "isPaused", alias = "paused")]
    pub is_paused: bool,
}

/// GET /api/kitchen/estimated-delay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDelay {
    /// Minutes
    pub delay: u32,
    pub open_batches: u32,
}

/// Base wait plus a fixed slice per batch still on the pass.
pub fn estimate_delay(base_minutes: u32, minutes_per_batch: u32, open_batches: u32) -> EstimatedDelay {
    EstimatedDelay {
        delay: base_minutes + minutes_per_batch.saturating_mul(open_batches),
        open_batches,
    }
}

/// PUT /api/orders/delivery-status/:batch_id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryStatusRequest {
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStatusResponse {
    pub success: bool,
    pub updated: u64,
    pub delivery_code: Option<String>,
}

/// POST /api/orders/restore
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestoreRequest {
    pub ids: Vec<String>,
}

/// Row ids bumped by a clear; kept by the screen for restore.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClearedRows {
    pub ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_delay() {
        assert_eq!(estimate_delay(10, 5, 0).delay, 10);
        assert_eq!(estimate_delay(10, 5, 4).delay, 30);
    }

    #[test]
    fn test_pause_status_aliases() {
        let status: PauseStatus = serde_json::from_str(r#"{"paused":true}"#).unwrap();
        assert!(status.is_paused);
        assert_eq!(serde_json::to_string(&status).unwrap(), r#"{"is_paused":true}"#);
    }
}
