use crate::{consts, errors, models};
use chrono::{DateTime, NaiveTime, Utc, Weekday};
use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Display, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum ProviderType {
    #[display("veterinary")]
    #[serde(alias = "veterinary", rename(serialize = "veterinary"))]
    Veterinary,
    #[display("grooming")]
    #[serde(alias = "grooming", rename(serialize = "grooming"))]
    Grooming,
    #[display("boarding")]
    #[serde(alias = "boarding", rename(serialize = "boarding"))]
    Boarding,
    #[display("pet_shop")]
    #[serde(alias = "pet_shop", rename(serialize = "pet_shop"))]
    PetShop,
    #[display("training")]
    #[serde(alias = "training", rename(serialize = "training"))]
    Training,
    #[display("pet_sitting")]
    #[serde(alias = "pet_sitting", rename(serialize = "pet_sitting"))]
    PetSitting,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DayHours {
    #[serde(with = "crate::models::slot_time")]
    pub open: NaiveTime,
    #[serde(with = "crate::models::slot_time")]
    pub close: NaiveTime,
}

/// Weekly opening schedule; an absent day means closed that day.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct OpeningHours {
    pub monday: Option<DayHours>,
    pub tuesday: Option<DayHours>,
    pub wednesday: Option<DayHours>,
    pub thursday: Option<DayHours>,
    pub friday: Option<DayHours>,
    pub saturday: Option<DayHours>,
    pub sunday: Option<DayHours>,
}

impl OpeningHours {
    pub fn for_weekday(&self, weekday: Weekday) -> Option<&DayHours> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }
}

/// A service business from the shared read-only catalog. Not created by
/// end users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    pub id: Uuid,
    pub business_name: String,
    pub business_type: ProviderType,
    pub description: Option<String>,
    pub address: String,
    pub district: String,
    pub province: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub photos: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
    pub services: Vec<Service>,
    pub opening_hours: OpeningHours,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Provider {
    /// Structural validity of catalog data, applied when a catalog is
    /// loaded into an adapter.
    pub fn validate(&self) -> errors::Result<()> {
        if self.business_name.trim().is_empty() {
            return Err(errors::Error::validation(
                "business_name",
                "must not be empty",
            ));
        }
        if !(0.0..=consts::MAX_PROVIDER_RATING).contains(&self.rating) {
            return Err(errors::Error::validation("rating", "must be within 0.0-5.0"));
        }
        for service in &self.services {
            if service.provider_id != self.id {
                return Err(errors::Error::validation(
                    "provider_id",
                    format!("service {} belongs to another provider", service.id),
                ));
            }
            service.validate()?;
        }
        Ok(())
    }
}

/// A bookable offering belonging to one provider. `price_min == price_max`
/// denotes a fixed price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: u32,
    pub price_min: Decimal,
    pub price_max: Decimal,
    /// Species the service accepts; empty means all.
    pub pet_types: Vec<models::pet::PetSpecies>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn validate(&self) -> errors::Result<()> {
        if self.name.trim().is_empty() {
            return Err(errors::Error::validation("name", "must not be empty"));
        }
        if self.duration_minutes == 0 {
            return Err(errors::Error::validation(
                "duration_minutes",
                "must be positive",
            ));
        }
        if self.price_max < self.price_min {
            return Err(errors::Error::validation(
                "price_max",
                "must not be below price_min",
            ));
        }
        Ok(())
    }

    pub fn accepts(&self, species: models::pet::PetSpecies) -> bool {
        self.pet_types.is_empty() || self.pet_types.contains(&species)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::models::pet::PetSpecies;
    use rust_decimal_macros::dec;

    pub fn test_service(provider_id: Uuid) -> Service {
        Service {
            id: Uuid::new_v4(),
            provider_id,
            name: "Basic grooming".to_string(),
            description: None,
            duration_minutes: 60,
            price_min: dec!(500),
            price_max: dec!(800),
            pet_types: vec![],
            is_available: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_service_price_range_validation() {
        let provider_id = Uuid::new_v4();
        let service = Service {
            price_min: dec!(800),
            price_max: dec!(500),
            ..test_service(provider_id)
        };

        assert!(matches!(
            service.validate(),
            Err(Error::Validation {
                field: "price_max",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_pet_types_accepts_all_species() {
        let service = test_service(Uuid::new_v4());
        assert!(service.accepts(PetSpecies::Dog));
        assert!(service.accepts(PetSpecies::Other));

        let cats_only = Service {
            pet_types: vec![PetSpecies::Cat],
            ..service
        };
        assert!(cats_only.accepts(PetSpecies::Cat));
        assert!(!cats_only.accepts(PetSpecies::Dog));
    }

    #[test]
    fn test_opening_hours_weekday_lookup() {
        let hours = OpeningHours {
            monday: Some(DayHours {
                open: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                close: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            }),
            ..OpeningHours::default()
        };

        assert!(hours.for_weekday(Weekday::Mon).is_some());
        assert!(hours.for_weekday(Weekday::Sun).is_none());
    }

    #[test]
    fn test_provider_type_enum_is_closed() {
        assert!(serde_json::from_str::<ProviderType>("\"daycare\"").is_err());
        assert_eq!(
            serde_json::from_str::<ProviderType>("\"pet_sitting\"").unwrap(),
            ProviderType::PetSitting
        );
    }
}
