//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Settings for the outbound mail dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Sender address.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Capacity of the bounded dispatch queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Delivery attempts per message before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay between delivery attempts in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_name: default_from_name(),
            from_address: default_from_address(),
            queue_capacity: default_queue_capacity(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

fn default_from_name() -> String {
    "RoomHub Booking".to_string()
}

fn default_from_address() -> String {
    "noreply@roomhub.local".to_string()
}

fn default_queue_capacity() -> usize {
    256
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    2000
}
