// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Wall clock used for pending-authorization expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
