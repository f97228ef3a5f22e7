//! In-memory storage adapter, the local mock-store backend.
//!
//! Holds user data behind one `RwLock` and a read-only seeded catalog.
//! Joins for booking reads are resolved here so the core never scans
//! entity collections itself.

use super::{AppRepo, Catalog};
use crate::models::{
    booking::{Booking, BookingDetail, BookingStatus},
    pet::{Pet, PetUpdate},
    profile::{Profile, ProfileUpdate},
    provider::{Provider, Service},
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
    profiles: HashMap<Uuid, Profile>,
    pets: Vec<Pet>,
    bookings: Vec<Booking>,
}

#[derive(Clone)]
pub struct MemoryRepo {
    state: Arc<RwLock<MemoryState>>,
    catalog: Arc<Vec<Provider>>,
}

impl MemoryRepo {
    /// Empty store with an empty catalog.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
            catalog: Arc::new(Vec::new()),
        }
    }

    /// Empty store over a seeded provider catalog. Catalog rows are
    /// reference data and must be structurally valid up front.
    pub fn with_catalog(providers: Vec<Provider>) -> crate::errors::Result<Self> {
        for provider in &providers {
            provider.validate()?;
        }

        Ok(Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
            catalog: Arc::new(providers),
        })
    }

    fn find_service(&self, service_id: Uuid) -> Option<Service> {
        self.catalog
            .iter()
            .flat_map(|provider| provider.services.iter())
            .find(|service| service.id == service_id)
            .cloned()
    }

    fn hydrate(&self, state: &MemoryState, booking: &Booking) -> BookingDetail {
        BookingDetail {
            pet: state
                .pets
                .iter()
                .find(|pet| pet.id == booking.pet_id)
                .cloned(),
            provider: self
                .catalog
                .iter()
                .find(|provider| provider.id == booking.provider_id)
                .cloned(),
            service: self.find_service(booking.service_id),
            booking: booking.clone(),
        }
    }
}

impl Default for MemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppRepo for MemoryRepo {
    async fn get_profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let state = self.state.read().await;
        Ok(state.profiles.get(&user_id).cloned())
    }

    async fn insert_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        state.profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> anyhow::Result<Option<Profile>> {
        let mut state = self.state.write().await;

        Ok(state.profiles.get_mut(&user_id).map(|profile| {
            update.apply(profile);
            profile.clone()
        }))
    }

    async fn get_all_pets(&self, owner_id: Uuid) -> anyhow::Result<Vec<Pet>> {
        let state = self.state.read().await;
        Ok(state
            .pets
            .iter()
            .filter(|pet| pet.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get_pet_by_id(&self, pet_id: Uuid, owner_id: Uuid) -> anyhow::Result<Option<Pet>> {
        let state = self.state.read().await;
        Ok(state
            .pets
            .iter()
            .find(|pet| pet.id == pet_id && pet.owner_id == owner_id)
            .cloned())
    }

    async fn insert_pet(&self, pet: &Pet) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        state.pets.push(pet.clone());
        Ok(())
    }

    async fn update_pet(
        &self,
        pet_id: Uuid,
        owner_id: Uuid,
        update: &PetUpdate,
    ) -> anyhow::Result<Option<Pet>> {
        let mut state = self.state.write().await;

        Ok(state
            .pets
            .iter_mut()
            .find(|pet| pet.id == pet_id && pet.owner_id == owner_id)
            .map(|pet| {
                update.apply(pet);
                pet.clone()
            }))
    }

    async fn delete_pet(&self, pet_id: Uuid, owner_id: Uuid) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        let before = state.pets.len();

        // bookings referencing the pet are kept on purpose
        state
            .pets
            .retain(|pet| !(pet.id == pet_id && pet.owner_id == owner_id));

        Ok(state.pets.len() < before)
    }

    async fn get_bookings_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<BookingDetail>> {
        let state = self.state.read().await;

        let mut details: Vec<BookingDetail> = state
            .bookings
            .iter()
            .filter(|booking| booking.user_id == user_id)
            .map(|booking| self.hydrate(&state, booking))
            .collect();
        details.sort_by_key(|detail| (detail.booking.booking_date, detail.booking.booking_time));

        Ok(details)
    }

    async fn get_booking_by_id(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<BookingDetail>> {
        let state = self.state.read().await;

        Ok(state
            .bookings
            .iter()
            .find(|booking| booking.id == booking_id && booking.user_id == user_id)
            .map(|booking| self.hydrate(&state, booking)))
    }

    async fn insert_booking(&self, booking: &Booking) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        state.bookings.push(booking.clone());
        Ok(())
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        status: BookingStatus,
    ) -> anyhow::Result<Option<Booking>> {
        let mut state = self.state.write().await;

        Ok(state
            .bookings
            .iter_mut()
            .find(|booking| booking.id == booking_id && booking.user_id == user_id)
            .map(|booking| {
                booking.status = status;
                booking.updated_at = chrono::Utc::now();
                booking.clone()
            }))
    }

    async fn count_active_bookings_for_slot(
        &self,
        provider_id: Uuid,
        booking_date: NaiveDate,
        booking_time: NaiveTime,
    ) -> anyhow::Result<u32> {
        let state = self.state.read().await;

        Ok(state
            .bookings
            .iter()
            .filter(|booking| {
                booking.provider_id == provider_id
                    && booking.booking_date == booking_date
                    && booking.booking_time == booking_time
                    && !booking.status.is_settled()
            })
            .count() as u32)
    }
}

#[async_trait]
impl Catalog for MemoryRepo {
    async fn get_all_providers(&self) -> anyhow::Result<Vec<Provider>> {
        Ok(self.catalog.as_ref().clone())
    }

    async fn get_provider_by_id(&self, provider_id: Uuid) -> anyhow::Result<Option<Provider>> {
        Ok(self
            .catalog
            .iter()
            .find(|provider| provider.id == provider_id)
            .cloned())
    }

    async fn get_services_by_provider(&self, provider_id: Uuid) -> anyhow::Result<Vec<Service>> {
        Ok(self
            .catalog
            .iter()
            .find(|provider| provider.id == provider_id)
            .map(|provider| provider.services.clone())
            .unwrap_or_default())
    }

    async fn get_service_by_id(&self, service_id: Uuid) -> anyhow::Result<Option<Service>> {
        Ok(self.find_service(service_id))
    }
}
