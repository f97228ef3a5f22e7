use crate::models::{
    booking::{Booking, BookingDetail, BookingStatus},
    pet::{Pet, PetGender, PetSpecies, PetUpdate},
    profile::{Profile, ProfileUpdate},
    provider::{Provider, ProviderType, Service},
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};
use std::str::FromStr;
use uuid::Uuid;

use super::{AppRepo, Catalog, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

fn decode_enum<T: serde::de::DeserializeOwned + Default>(raw: &str) -> T {
    serde_json::from_str::<T>(&format!("\"{}\"", raw)).unwrap_or_default()
}

impl FromRow<'_, SqliteRow> for Profile {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let id: uuid::fmt::Hyphenated = row.try_get("id")?;

        Ok(Self {
            id: id.into(),
            phone: row.try_get("phone")?,
            display_name: row.try_get("display_name")?,
            avatar_url: row.try_get("avatar_url")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for Pet {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let id: uuid::fmt::Hyphenated = row.try_get("id")?;
        let owner_id: uuid::fmt::Hyphenated = row.try_get("owner_id")?;

        Ok(Self {
            id: id.into(),
            owner_id: owner_id.into(),
            name: row.try_get("name")?,
            species: decode_enum::<PetSpecies>(row.try_get::<&str, &str>("species")?),
            breed: row.try_get("breed")?,
            gender: row
                .try_get::<Option<String>, &str>("gender")?
                .and_then(|raw| serde_json::from_str::<PetGender>(&format!("\"{}\"", raw)).ok()),
            birth_date: row.try_get("birth_date")?,
            weight: row.try_get("weight")?,
            color: row.try_get("color")?,
            photo_url: row.try_get("photo_url")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for Booking {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let id: uuid::fmt::Hyphenated = row.try_get("id")?;
        let user_id: uuid::fmt::Hyphenated = row.try_get("user_id")?;
        let pet_id: uuid::fmt::Hyphenated = row.try_get("pet_id")?;
        let provider_id: uuid::fmt::Hyphenated = row.try_get("provider_id")?;
        let service_id: uuid::fmt::Hyphenated = row.try_get("service_id")?;

        Ok(Self {
            id: id.into(),
            user_id: user_id.into(),
            pet_id: pet_id.into(),
            provider_id: provider_id.into(),
            service_id: service_id.into(),
            booking_date: row.try_get("booking_date")?,
            booking_time: row.try_get("booking_time")?,
            status: decode_enum::<BookingStatus>(row.try_get::<&str, &str>("status")?),
            notes: row.try_get("notes")?,
            total_price: row
                .try_get::<Option<String>, &str>("total_price")?
                .and_then(|raw| Decimal::from_str(&raw).ok()),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

// services are attached separately; see get_provider_by_id
impl FromRow<'_, SqliteRow> for Provider {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let id: uuid::fmt::Hyphenated = row.try_get("id")?;

        Ok(Self {
            id: id.into(),
            business_name: row.try_get("business_name")?,
            business_type: serde_json::from_str::<ProviderType>(&format!(
                "\"{}\"",
                row.try_get::<String, &str>("business_type")?
            ))
            .unwrap_or(ProviderType::Veterinary),
            description: row.try_get("description")?,
            address: row.try_get("address")?,
            district: row.try_get("district")?,
            province: row.try_get("province")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            website: row.try_get("website")?,
            logo_url: row.try_get("logo_url")?,
            photos: serde_json::from_str(row.try_get::<&str, &str>("photos")?)
                .unwrap_or_default(),
            rating: row.try_get("rating")?,
            review_count: row.try_get("review_count")?,
            services: Vec::new(),
            opening_hours: serde_json::from_str(row.try_get::<&str, &str>("opening_hours")?)
                .unwrap_or_default(),
            is_verified: row.try_get("is_verified")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for Service {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let id: uuid::fmt::Hyphenated = row.try_get("id")?;
        let provider_id: uuid::fmt::Hyphenated = row.try_get("provider_id")?;

        Ok(Self {
            id: id.into(),
            provider_id: provider_id.into(),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            duration_minutes: row.try_get("duration_minutes")?,
            price_min: Decimal::from_str(row.try_get::<&str, &str>("price_min")?)
                .unwrap_or_default(),
            price_max: Decimal::from_str(row.try_get::<&str, &str>("price_max")?)
                .unwrap_or_default(),
            pet_types: serde_json::from_str(row.try_get::<&str, &str>("pet_types")?)
                .unwrap_or_default(),
            is_available: row.try_get("is_available")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl SqlxSqliteRepo {
    /// Creates the tables and indexes on a fresh database.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        for statement in sqlite_queries::SCHEMA {
            sqlx::query(statement).execute(&self.db_pool).await?;
        }
        Ok(())
    }

    /// Loads or replaces one catalog provider and its services. Catalog
    /// rows are reference data maintained by operators, not end users.
    pub async fn upsert_provider(&self, provider: &Provider) -> anyhow::Result<()> {
        provider.validate()?;

        let mut transaction = self.db_pool.begin().await?;

        sqlx::query(sqlite_queries::QUERY_UPSERT_PROVIDER)
            .bind(provider.id.to_string())
            .bind(&provider.business_name)
            .bind(provider.business_type.to_string())
            .bind(&provider.description)
            .bind(&provider.address)
            .bind(&provider.district)
            .bind(&provider.province)
            .bind(&provider.phone)
            .bind(&provider.email)
            .bind(&provider.website)
            .bind(&provider.logo_url)
            .bind(serde_json::to_string(&provider.photos)?)
            .bind(provider.rating)
            .bind(provider.review_count)
            .bind(serde_json::to_string(&provider.opening_hours)?)
            .bind(provider.is_verified)
            .bind(provider.created_at)
            .execute(&mut *transaction)
            .await?;

        for service in &provider.services {
            sqlx::query(sqlite_queries::QUERY_UPSERT_SERVICE)
                .bind(service.id.to_string())
                .bind(service.provider_id.to_string())
                .bind(&service.name)
                .bind(&service.description)
                .bind(service.duration_minutes)
                .bind(service.price_min.to_string())
                .bind(service.price_max.to_string())
                .bind(serde_json::to_string(&service.pet_types)?)
                .bind(service.is_available)
                .bind(service.created_at)
                .execute(&mut *transaction)
                .await?;
        }

        transaction.commit().await?;
        Ok(())
    }

    async fn get_pet_any_owner(&self, pet_id: Uuid) -> anyhow::Result<Option<Pet>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_PET_ANY_OWNER)
            .bind(pet_id.to_string())
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn hydrate(&self, booking: Booking) -> anyhow::Result<BookingDetail> {
        Ok(BookingDetail {
            pet: self.get_pet_any_owner(booking.pet_id).await?,
            provider: self.get_provider_by_id(booking.provider_id).await?,
            service: self.get_service_by_id(booking.service_id).await?,
            booking,
        })
    }
}

#[async_trait]
impl AppRepo for SqlxSqliteRepo {
    async fn get_profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_PROFILE)
            .bind(user_id.to_string())
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn insert_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_PROFILE)
            .bind(profile.id.to_string())
            .bind(&profile.phone)
            .bind(&profile.display_name)
            .bind(&profile.avatar_url)
            .bind(profile.created_at)
            .bind(profile.updated_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> anyhow::Result<Option<Profile>> {
        let Some(mut profile) = self.get_profile(user_id).await? else {
            return Ok(None);
        };
        update.apply(&mut profile);

        sqlx::query(sqlite_queries::QUERY_UPDATE_PROFILE)
            .bind(profile.id.to_string())
            .bind(&profile.display_name)
            .bind(&profile.avatar_url)
            .bind(profile.updated_at)
            .execute(&self.db_pool)
            .await?;

        Ok(Some(profile))
    }

    async fn get_all_pets(&self, owner_id: Uuid) -> anyhow::Result<Vec<Pet>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_ALL_PETS)
            .bind(owner_id.to_string())
            .fetch_all(&self.db_pool)
            .await?)
    }

    async fn get_pet_by_id(&self, pet_id: Uuid, owner_id: Uuid) -> anyhow::Result<Option<Pet>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_PET_BY_ID)
            .bind(pet_id.to_string())
            .bind(owner_id.to_string())
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn insert_pet(&self, pet: &Pet) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_PET)
            .bind(pet.id.to_string())
            .bind(pet.owner_id.to_string())
            .bind(&pet.name)
            .bind(pet.species.to_string())
            .bind(&pet.breed)
            .bind(pet.gender.map(|gender| gender.to_string()))
            .bind(pet.birth_date)
            .bind(pet.weight)
            .bind(&pet.color)
            .bind(&pet.photo_url)
            .bind(&pet.notes)
            .bind(pet.created_at)
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn update_pet(
        &self,
        pet_id: Uuid,
        owner_id: Uuid,
        update: &PetUpdate,
    ) -> anyhow::Result<Option<Pet>> {
        let Some(mut pet) = self.get_pet_by_id(pet_id, owner_id).await? else {
            return Ok(None);
        };
        update.apply(&mut pet);

        sqlx::query(sqlite_queries::QUERY_UPDATE_PET)
            .bind(pet.id.to_string())
            .bind(pet.owner_id.to_string())
            .bind(&pet.name)
            .bind(pet.species.to_string())
            .bind(&pet.breed)
            .bind(pet.gender.map(|gender| gender.to_string()))
            .bind(pet.birth_date)
            .bind(pet.weight)
            .bind(&pet.color)
            .bind(&pet.photo_url)
            .bind(&pet.notes)
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await?;

        Ok(Some(pet))
    }

    async fn delete_pet(&self, pet_id: Uuid, owner_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(sqlite_queries::QUERY_DELETE_PET)
            .bind(pet_id.to_string())
            .bind(owner_id.to_string())
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_bookings_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<BookingDetail>> {
        let bookings: Vec<Booking> = sqlx::query_as(sqlite_queries::QUERY_GET_BOOKINGS_BY_USER)
            .bind(user_id.to_string())
            .fetch_all(&self.db_pool)
            .await?;

        let mut details = Vec::with_capacity(bookings.len());
        for booking in bookings {
            details.push(self.hydrate(booking).await?);
        }

        Ok(details)
    }

    async fn get_booking_by_id(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<BookingDetail>> {
        let booking: Option<Booking> = sqlx::query_as(sqlite_queries::QUERY_GET_BOOKING_BY_ID)
            .bind(booking_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.db_pool)
            .await?;

        match booking {
            Some(booking) => Ok(Some(self.hydrate(booking).await?)),
            None => Ok(None),
        }
    }

    async fn insert_booking(&self, booking: &Booking) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_BOOKING)
            .bind(booking.id.to_string())
            .bind(booking.user_id.to_string())
            .bind(booking.pet_id.to_string())
            .bind(booking.provider_id.to_string())
            .bind(booking.service_id.to_string())
            .bind(booking.booking_date)
            .bind(booking.booking_time)
            .bind(booking.status.to_string())
            .bind(&booking.notes)
            .bind(booking.total_price.map(|price| price.to_string()))
            .bind(booking.created_at)
            .bind(booking.updated_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        status: BookingStatus,
    ) -> anyhow::Result<Option<Booking>> {
        let result = sqlx::query(sqlite_queries::QUERY_UPDATE_BOOKING_STATUS)
            .bind(booking_id.to_string())
            .bind(user_id.to_string())
            .bind(status.to_string())
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_BOOKING_BY_ID)
            .bind(booking_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn count_active_bookings_for_slot(
        &self,
        provider_id: Uuid,
        booking_date: NaiveDate,
        booking_time: NaiveTime,
    ) -> anyhow::Result<u32> {
        let count: i64 = sqlx::query_scalar(sqlite_queries::QUERY_COUNT_ACTIVE_BOOKINGS_FOR_SLOT)
            .bind(provider_id.to_string())
            .bind(booking_date)
            .bind(booking_time)
            .fetch_one(&self.db_pool)
            .await?;

        Ok(count as u32)
    }
}

#[async_trait]
impl Catalog for SqlxSqliteRepo {
    async fn get_all_providers(&self) -> anyhow::Result<Vec<Provider>> {
        let providers: Vec<Provider> = sqlx::query_as(sqlite_queries::QUERY_GET_ALL_PROVIDERS)
            .fetch_all(&self.db_pool)
            .await?;

        let mut hydrated = Vec::with_capacity(providers.len());
        for mut provider in providers {
            provider.services = self.get_services_by_provider(provider.id).await?;
            hydrated.push(provider);
        }

        Ok(hydrated)
    }

    async fn get_provider_by_id(&self, provider_id: Uuid) -> anyhow::Result<Option<Provider>> {
        let provider: Option<Provider> = sqlx::query_as(sqlite_queries::QUERY_GET_PROVIDER_BY_ID)
            .bind(provider_id.to_string())
            .fetch_optional(&self.db_pool)
            .await?;

        match provider {
            Some(mut provider) => {
                provider.services = self.get_services_by_provider(provider.id).await?;
                Ok(Some(provider))
            }
            None => Ok(None),
        }
    }

    async fn get_services_by_provider(&self, provider_id: Uuid) -> anyhow::Result<Vec<Service>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_SERVICES_BY_PROVIDER)
            .bind(provider_id.to_string())
            .fetch_all(&self.db_pool)
            .await?)
    }

    async fn get_service_by_id(&self, service_id: Uuid) -> anyhow::Result<Option<Service>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_SERVICE_BY_ID)
            .bind(service_id.to_string())
            .fetch_optional(&self.db_pool)
            .await?)
    }
}
