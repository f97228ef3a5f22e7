pub mod memory;
pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

/// Storage for user-owned data. Every read and write is scoped to the
/// owning user; a record belonging to someone else is simply absent.
/// Booking reads return hydrated details: the adapter performs the
/// pet/provider/service joins itself.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AppRepo: Send + Sync {
    async fn get_profile(&self, user_id: Uuid)
    -> anyhow::Result<Option<models::profile::Profile>>;

    async fn insert_profile(&self, profile: &models::profile::Profile) -> anyhow::Result<()>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        update: &models::profile::ProfileUpdate,
    ) -> anyhow::Result<Option<models::profile::Profile>>;

    async fn get_all_pets(&self, owner_id: Uuid) -> anyhow::Result<Vec<models::pet::Pet>>;

    async fn get_pet_by_id(
        &self,
        pet_id: Uuid,
        owner_id: Uuid,
    ) -> anyhow::Result<Option<models::pet::Pet>>;

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()>;

    async fn update_pet(
        &self,
        pet_id: Uuid,
        owner_id: Uuid,
        update: &models::pet::PetUpdate,
    ) -> anyhow::Result<Option<models::pet::Pet>>;

    async fn delete_pet(&self, pet_id: Uuid, owner_id: Uuid) -> anyhow::Result<bool>;

    /// All of the user's bookings, hydrated, sorted by
    /// (booking_date, booking_time) ascending.
    async fn get_bookings_by_user(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<models::booking::BookingDetail>>;

    async fn get_booking_by_id(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<models::booking::BookingDetail>>;

    async fn insert_booking(&self, booking: &models::booking::Booking) -> anyhow::Result<()>;

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        status: models::booking::BookingStatus,
    ) -> anyhow::Result<Option<models::booking::Booking>>;

    /// Bookings in a non-terminal status holding the given slot.
    async fn count_active_bookings_for_slot(
        &self,
        provider_id: Uuid,
        booking_date: NaiveDate,
        booking_time: NaiveTime,
    ) -> anyhow::Result<u32>;
}

/// Read-only provider/service reference data.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn get_all_providers(&self) -> anyhow::Result<Vec<models::provider::Provider>>;

    async fn get_provider_by_id(
        &self,
        provider_id: Uuid,
    ) -> anyhow::Result<Option<models::provider::Provider>>;

    async fn get_services_by_provider(
        &self,
        provider_id: Uuid,
    ) -> anyhow::Result<Vec<models::provider::Service>>;

    async fn get_service_by_id(
        &self,
        service_id: Uuid,
    ) -> anyhow::Result<Option<models::provider::Service>>;
}

pub type ImplAppRepo = Box<dyn AppRepo>;
pub type ImplCatalog = Box<dyn Catalog>;
