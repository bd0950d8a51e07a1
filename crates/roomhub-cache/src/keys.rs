//! Cache key builders for all RoomHub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses. Keys are unprefixed here;
//! the Redis backend applies the configured `key_prefix` when talking
//! to the server.

use uuid::Uuid;

/// Throttle flag for urge notifications on a booking.
pub fn urge(booking_id: Uuid) -> String {
    format!("urge:{booking_id}")
}

/// Cached email address of the notification-target administrator.
pub fn admin_email() -> String {
    "admin_email".to_string()
}

/// Registration captcha for an email address.
pub fn register_captcha(email: &str) -> String {
    format!("captcha:register:{}", email.to_lowercase())
}

/// Password-change captcha for an email address.
pub fn update_password_captcha(email: &str) -> String {
    format!("captcha:update_password:{}", email.to_lowercase())
}

/// Profile-update captcha for an email address.
pub fn update_user_captcha(email: &str) -> String {
    format!("captcha:update_user:{}", email.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urge_key() {
        let id = Uuid::nil();
        assert_eq!(urge(id), "urge:00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_captcha_key_lowercases_email() {
        assert_eq!(
            register_captcha("Alice@Example.COM"),
            "captcha:register:alice@example.com"
        );
    }
}
