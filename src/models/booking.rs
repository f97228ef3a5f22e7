use crate::models::{pet::Pet, provider::Provider, provider::Service};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking lifecycle states.
///
/// Forward progression `pending → confirmed → in_progress → completed`
/// is driven by the provider/operator side; `cancelled` is user-initiated
/// and only reachable from `pending` or `confirmed`. `completed` and
/// `cancelled` are terminal.
#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum BookingStatus {
    #[default]
    #[display("pending")]
    #[serde(alias = "pending", rename(serialize = "pending"))]
    Pending,
    #[display("confirmed")]
    #[serde(alias = "confirmed", rename(serialize = "confirmed"))]
    Confirmed,
    #[display("in_progress")]
    #[serde(alias = "in_progress", rename(serialize = "in_progress"))]
    InProgress,
    #[display("completed")]
    #[serde(alias = "completed", rename(serialize = "completed"))]
    Completed,
    #[display("cancelled")]
    #[serde(alias = "cancelled", rename(serialize = "cancelled"))]
    Cancelled,
}

impl BookingStatus {
    /// Terminal states; bookings here belong to the "past" listing.
    pub fn is_settled(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    pub fn is_cancellable(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::InProgress)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
                | (BookingStatus::InProgress, BookingStatus::Completed)
        )
    }
}

/// A scheduled appointment linking one user's pet to one provider's
/// service at a specific date/time. `total_price` is a snapshot of the
/// service's `price_min` at creation time, never a live reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pet_id: Uuid,
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub booking_date: NaiveDate,
    #[serde(with = "crate::models::slot_time")]
    pub booking_time: NaiveTime,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub total_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A booking joined with its pet/provider/service snapshots for display.
/// Each join is optional: a deleted pet (or a catalog entry that has gone
/// away) leaves the id on the booking and an absent snapshot here.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    pub pet: Option<Pet>,
    pub provider: Option<Provider>,
    pub service: Option<Service>,
}

#[cfg(test)]
mod tests {
    use super::BookingStatus::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(InProgress));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Completed));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for next in [Pending, Confirmed, InProgress, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_no_skipping_forward() {
        assert!(!Pending.can_transition_to(InProgress));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!InProgress.can_transition_to(Cancelled));
    }

    #[test]
    fn test_settled_matches_past_filter() {
        assert!(Completed.is_settled());
        assert!(Cancelled.is_settled());
        assert!(!Pending.is_settled() && !Confirmed.is_settled() && !InProgress.is_settled());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<super::BookingStatus>("\"cancelled\"").unwrap(),
            Cancelled
        );
    }
}
