//! # Pet API Module
//!
//! Pet management operations. Every operation is scoped to the acting
//! user; pets belonging to someone else behave as if they do not exist.

use crate::{api, errors, models, repo};
use uuid::Uuid;

/// Lists the actor's pets, oldest first.
pub async fn list(
    repo: &repo::ImplAppRepo,
    actor: Option<Uuid>,
) -> errors::Result<Vec<models::pet::Pet>> {
    let owner_id = api::require_actor(actor)?;
    Ok(repo.get_all_pets(owner_id).await?)
}

/// Fetches one of the actor's pets; absent is a normal outcome.
pub async fn get(
    repo: &repo::ImplAppRepo,
    actor: Option<Uuid>,
    pet_id: Uuid,
) -> errors::Result<Option<models::pet::Pet>> {
    let owner_id = api::require_actor(actor)?;
    Ok(repo.get_pet_by_id(pet_id, owner_id).await?)
}

/// Registers a new pet under the actor.
///
/// # Errors
/// [`errors::Error::Validation`] when the input fails structural checks
/// (blank name, non-positive weight, future birth date).
pub async fn create(
    repo: &repo::ImplAppRepo,
    actor: Option<Uuid>,
    new_pet: models::pet::NewPet,
) -> errors::Result<models::pet::Pet> {
    let owner_id = api::require_actor(actor)?;
    new_pet.validate()?;

    let pet = new_pet.into_pet(owner_id);
    repo.insert_pet(&pet).await?;

    log::info!("user {owner_id} added pet {}", pet.id);
    Ok(pet)
}

/// Applies a partial update to one of the actor's pets.
pub async fn update(
    repo: &repo::ImplAppRepo,
    actor: Option<Uuid>,
    pet_id: Uuid,
    update: &models::pet::PetUpdate,
) -> errors::Result<models::pet::Pet> {
    let owner_id = api::require_actor(actor)?;
    update.validate()?;

    repo.update_pet(pet_id, owner_id, update)
        .await?
        .ok_or(errors::Error::NotFound { entity: "pet" })
}

/// Removes one of the actor's pets.
///
/// Historical bookings referencing the pet are left untouched; they
/// hydrate with an absent pet snapshot from then on.
pub async fn delete(
    repo: &repo::ImplAppRepo,
    actor: Option<Uuid>,
    pet_id: Uuid,
) -> errors::Result<()> {
    let owner_id = api::require_actor(actor)?;

    if !repo.delete_pet(pet_id, owner_id).await? {
        return Err(errors::Error::NotFound { entity: "pet" });
    }

    log::info!("user {owner_id} removed pet {pet_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::models::pet::{NewPet, PetSpecies, PetUpdate};
    use crate::repo::MockAppRepo;
    use mockall::predicate::*;

    fn valid_new_pet() -> NewPet {
        NewPet {
            name: "Taro".to_string(),
            species: PetSpecies::Dog,
            weight: Some(12.5),
            ..NewPet::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_owner_and_fresh_id() {
        let owner_id = Uuid::new_v4();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_insert_pet()
            .withf(move |pet| pet.owner_id == owner_id && pet.name == "Taro")
            .times(1)
            .returning(|_| Ok(()));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let pet = create(&mock_repo, Some(owner_id), valid_new_pet())
            .await
            .unwrap();

        assert_eq!(pet.owner_id, owner_id);
        assert_eq!(pet.species, PetSpecies::Dog);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_storage() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_insert_pet().times(0);
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let result = create(
            &mock_repo,
            Some(Uuid::new_v4()),
            NewPet {
                name: "  ".to_string(),
                ..valid_new_pet()
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::Validation { field: "name", .. })
        ));
    }

    #[tokio::test]
    async fn test_create_requires_actor() {
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(MockAppRepo::new());

        let result = create(&mock_repo, None, valid_new_pet()).await;

        assert!(matches!(result, Err(Error::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_update_unknown_pet_is_not_found() {
        let owner_id = Uuid::new_v4();
        let pet_id = Uuid::new_v4();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_update_pet()
            .with(eq(pet_id), eq(owner_id), always())
            .times(1)
            .returning(|_, _, _| Ok(None));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let result = update(&mock_repo, Some(owner_id), pet_id, &PetUpdate::default()).await;

        assert!(matches!(result, Err(Error::NotFound { entity: "pet" })));
    }

    #[tokio::test]
    async fn test_delete_reports_missing_pet() {
        let owner_id = Uuid::new_v4();
        let pet_id = Uuid::new_v4();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_delete_pet()
            .with(eq(pet_id), eq(owner_id))
            .times(1)
            .returning(|_, _| Ok(false));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let result = delete(&mock_repo, Some(owner_id), pet_id).await;

        assert!(matches!(result, Err(Error::NotFound { entity: "pet" })));
    }

    #[tokio::test]
    async fn test_list_scopes_to_actor() {
        let owner_id = Uuid::new_v4();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_all_pets()
            .with(eq(owner_id))
            .times(1)
            .returning(|_| Ok(vec![]));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let pets = list(&mock_repo, Some(owner_id)).await.unwrap();

        assert!(pets.is_empty());
    }
}
