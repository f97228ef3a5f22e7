//! # Booking API Module
//!
//! The booking lifecycle engine: creation with full precondition checks,
//! user-initiated cancellation, and the list/detail queries backing the
//! bookings screen.

use crate::{api, config, errors, models, repo, slots, utils};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Input for the create-booking operation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBookingRequest {
    pub pet_id: Uuid,
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub booking_date: NaiveDate,
    #[serde(with = "crate::models::slot_time")]
    pub booking_time: NaiveTime,
    pub notes: Option<String>,
}

/// Which part of the lifecycle a bookings listing should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFilter {
    /// Bookings still moving through the lifecycle.
    Upcoming,
    /// Settled bookings (completed or cancelled).
    Past,
    All,
}

/// Creates a booking using the process-wide capacity configuration.
///
/// See [`create_with_capacity`] for the full precondition list.
pub async fn create(
    repo: &repo::ImplAppRepo,
    catalog: &repo::ImplCatalog,
    actor: Option<Uuid>,
    request: NewBookingRequest,
) -> errors::Result<models::booking::Booking> {
    create_with_capacity(repo, catalog, actor, request, config::APP_CONFIG.slot_capacity).await
}

/// Creates a booking after checking every precondition.
///
/// # Preconditions
/// * The actor is authenticated and owns the referenced pet.
/// * The provider and service exist, and the service belongs to that
///   provider.
/// * The date is today or later and the time is a member of the slot grid.
/// * When `slot_capacity` is set, the (provider, date, time) slot holds
///   fewer than that many active bookings; otherwise double-booking is
///   tolerated.
///
/// # Effects
/// Writes a single `pending` booking with a fresh id and a `total_price`
/// snapshot taken from the service's `price_min` at this moment.
pub async fn create_with_capacity(
    repo: &repo::ImplAppRepo,
    catalog: &repo::ImplCatalog,
    actor: Option<Uuid>,
    request: NewBookingRequest,
    slot_capacity: Option<u32>,
) -> errors::Result<models::booking::Booking> {
    let user_id = api::require_actor(actor)?;

    if repo
        .get_pet_by_id(request.pet_id, user_id)
        .await?
        .is_none()
    {
        return Err(errors::Error::validation(
            "pet_id",
            "pet does not exist for this user",
        ));
    }

    let Some(provider) = catalog.get_provider_by_id(request.provider_id).await? else {
        return Err(errors::Error::validation(
            "provider_id",
            "provider does not exist",
        ));
    };

    let Some(service) = catalog.get_service_by_id(request.service_id).await? else {
        return Err(errors::Error::validation(
            "service_id",
            "service does not exist",
        ));
    };

    if service.provider_id != provider.id {
        return Err(errors::Error::validation(
            "service_id",
            "service does not belong to the chosen provider",
        ));
    }

    if request.booking_date < utils::today() {
        return Err(errors::Error::validation(
            "booking_date",
            "must be today or later",
        ));
    }

    if !slots::is_bookable_slot(request.booking_time) {
        return Err(errors::Error::validation(
            "booking_time",
            "not a bookable time slot",
        ));
    }

    if let Some(capacity) = slot_capacity {
        let held = repo
            .count_active_bookings_for_slot(
                request.provider_id,
                request.booking_date,
                request.booking_time,
            )
            .await?;
        if held >= capacity {
            return Err(errors::Error::SlotFull);
        }
    }

    let booking = models::booking::Booking {
        id: Uuid::new_v4(),
        user_id,
        pet_id: request.pet_id,
        provider_id: request.provider_id,
        service_id: request.service_id,
        booking_date: request.booking_date,
        booking_time: request.booking_time,
        status: models::booking::BookingStatus::Pending,
        notes: request.notes,
        total_price: Some(service.price_min),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    repo.insert_booking(&booking).await?;

    log::info!(
        "user {user_id} booked service {} at provider {} for {} {}",
        booking.service_id,
        booking.provider_id,
        booking.booking_date,
        booking.booking_time.format("%H:%M"),
    );
    Ok(booking)
}

/// Cancels one of the actor's bookings.
///
/// # Errors
/// * [`errors::Error::NotFound`] when the booking does not exist for
///   this user. Someone else's booking is indistinguishable from a
///   missing one.
/// * [`errors::Error::InvalidState`] when the booking has progressed
///   past `confirmed` or is already settled.
pub async fn cancel(
    repo: &repo::ImplAppRepo,
    actor: Option<Uuid>,
    booking_id: Uuid,
) -> errors::Result<models::booking::Booking> {
    let user_id = api::require_actor(actor)?;

    let Some(detail) = repo.get_booking_by_id(booking_id, user_id).await? else {
        return Err(errors::Error::NotFound { entity: "booking" });
    };

    if !detail.booking.status.is_cancellable() {
        return Err(errors::Error::InvalidState {
            status: detail.booking.status,
            action: "cancel",
        });
    }

    let cancelled = repo
        .update_booking_status(booking_id, user_id, models::booking::BookingStatus::Cancelled)
        .await?
        .ok_or(errors::Error::NotFound { entity: "booking" })?;

    log::info!("user {user_id} cancelled booking {booking_id}");
    Ok(cancelled)
}

/// Lists the actor's bookings, hydrated and filtered by lifecycle phase.
///
/// Ordering is (booking_date, booking_time) ascending regardless of the
/// filter; `Upcoming` and `Past` partition `All` with no overlap.
pub async fn list(
    repo: &repo::ImplAppRepo,
    actor: Option<Uuid>,
    filter: BookingFilter,
) -> errors::Result<Vec<models::booking::BookingDetail>> {
    let user_id = api::require_actor(actor)?;

    let bookings = repo.get_bookings_by_user(user_id).await?;

    Ok(bookings
        .into_iter()
        .filter(|detail| match filter {
            BookingFilter::Upcoming => !detail.booking.status.is_settled(),
            BookingFilter::Past => detail.booking.status.is_settled(),
            BookingFilter::All => true,
        })
        .collect())
}

/// Fetches one of the actor's bookings with its joined snapshots.
pub async fn get(
    repo: &repo::ImplAppRepo,
    actor: Option<Uuid>,
    booking_id: Uuid,
) -> errors::Result<Option<models::booking::BookingDetail>> {
    let user_id = api::require_actor(actor)?;
    Ok(repo.get_booking_by_id(booking_id, user_id).await?)
}
