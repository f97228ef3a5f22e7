use crate::{errors, utils};
use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum PetSpecies {
    #[default]
    #[display("dog")]
    #[serde(alias = "dog", rename(serialize = "dog"))]
    Dog,
    #[display("cat")]
    #[serde(alias = "cat", rename(serialize = "cat"))]
    Cat,
    #[display("bird")]
    #[serde(alias = "bird", rename(serialize = "bird"))]
    Bird,
    #[display("rabbit")]
    #[serde(alias = "rabbit", rename(serialize = "rabbit"))]
    Rabbit,
    #[display("other")]
    #[serde(alias = "other", rename(serialize = "other"))]
    Other,
}

#[derive(Debug, Display, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum PetGender {
    #[display("male")]
    #[serde(alias = "male", rename(serialize = "male"))]
    Male,
    #[display("female")]
    #[serde(alias = "female", rename(serialize = "female"))]
    Female,
}

/// Owned by exactly one [`Profile`](crate::models::profile::Profile).
/// Deleting a pet never cascades to its historical bookings; those keep
/// the pet_id and simply hydrate with an absent pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub species: PetSpecies,
    pub breed: Option<String>,
    pub gender: Option<PetGender>,
    pub birth_date: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub color: Option<String>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for the add-pet operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPet {
    pub name: String,
    pub species: PetSpecies,
    pub breed: Option<String>,
    pub gender: Option<PetGender>,
    pub birth_date: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub color: Option<String>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
}

impl NewPet {
    pub fn validate(&self) -> errors::Result<()> {
        if self.name.trim().is_empty() {
            return Err(errors::Error::validation("name", "must not be empty"));
        }
        validate_weight(self.weight)?;
        validate_birth_date(self.birth_date)
    }

    pub fn into_pet(self, owner_id: Uuid) -> Pet {
        Pet {
            id: Uuid::new_v4(),
            owner_id,
            name: self.name,
            species: self.species,
            breed: self.breed,
            gender: self.gender,
            birth_date: self.birth_date,
            weight: self.weight,
            color: self.color,
            photo_url: self.photo_url,
            notes: self.notes,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial pet mutation; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PetUpdate {
    pub name: Option<String>,
    pub species: Option<PetSpecies>,
    pub breed: Option<String>,
    pub gender: Option<PetGender>,
    pub birth_date: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub color: Option<String>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
}

impl PetUpdate {
    pub fn validate(&self) -> errors::Result<()> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(errors::Error::validation("name", "must not be empty"));
        }
        validate_weight(self.weight)?;
        validate_birth_date(self.birth_date)
    }

    pub fn apply(&self, pet: &mut Pet) {
        if let Some(name) = &self.name {
            pet.name = name.clone();
        }
        if let Some(species) = self.species {
            pet.species = species;
        }
        if let Some(breed) = &self.breed {
            pet.breed = Some(breed.clone());
        }
        if let Some(gender) = self.gender {
            pet.gender = Some(gender);
        }
        if let Some(birth_date) = self.birth_date {
            pet.birth_date = Some(birth_date);
        }
        if let Some(weight) = self.weight {
            pet.weight = Some(weight);
        }
        if let Some(color) = &self.color {
            pet.color = Some(color.clone());
        }
        if let Some(photo_url) = &self.photo_url {
            pet.photo_url = Some(photo_url.clone());
        }
        if let Some(notes) = &self.notes {
            pet.notes = Some(notes.clone());
        }
        pet.updated_at = Utc::now();
    }
}

fn validate_weight(weight: Option<f64>) -> errors::Result<()> {
    if let Some(value) = weight
        && value <= 0.0
    {
        return Err(errors::Error::validation("weight", "must be positive"));
    }
    Ok(())
}

fn validate_birth_date(birth_date: Option<NaiveDate>) -> errors::Result<()> {
    if let Some(date) = birth_date
        && date > utils::today()
    {
        return Err(errors::Error::validation(
            "birth_date",
            "must not be in the future",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use chrono::Duration;

    fn valid_new_pet() -> NewPet {
        NewPet {
            name: "Mali".to_string(),
            species: PetSpecies::Cat,
            weight: Some(3.4),
            ..NewPet::default()
        }
    }

    #[test]
    fn test_new_pet_valid() {
        assert!(valid_new_pet().validate().is_ok());
    }

    #[test]
    fn test_new_pet_rejects_blank_name() {
        let pet = NewPet {
            name: "   ".to_string(),
            ..valid_new_pet()
        };

        assert!(matches!(
            pet.validate(),
            Err(Error::Validation { field: "name", .. })
        ));
    }

    #[test]
    fn test_new_pet_rejects_non_positive_weight() {
        let pet = NewPet {
            weight: Some(0.0),
            ..valid_new_pet()
        };

        assert!(matches!(
            pet.validate(),
            Err(Error::Validation {
                field: "weight",
                ..
            })
        ));
    }

    #[test]
    fn test_new_pet_rejects_future_birth_date() {
        let pet = NewPet {
            birth_date: Some(utils::today() + Duration::days(1)),
            ..valid_new_pet()
        };

        assert!(matches!(
            pet.validate(),
            Err(Error::Validation {
                field: "birth_date",
                ..
            })
        ));
    }

    #[test]
    fn test_species_enum_is_closed() {
        assert!(serde_json::from_str::<PetSpecies>("\"hamster\"").is_err());
        assert_eq!(
            serde_json::from_str::<PetSpecies>("\"rabbit\"").unwrap(),
            PetSpecies::Rabbit
        );
    }

    #[test]
    fn test_update_apply_leaves_unset_fields() {
        let mut pet = valid_new_pet().into_pet(Uuid::new_v4());
        let update = PetUpdate {
            name: Some("Mali II".to_string()),
            ..PetUpdate::default()
        };

        update.apply(&mut pet);

        assert_eq!(pet.name, "Mali II");
        assert_eq!(pet.species, PetSpecies::Cat);
        assert_eq!(pet.weight, Some(3.4));
    }
}
