//! # User API Module
//!
//! Profile management and phone-based identity. Users are identified by
//! an E.164-normalized phone number; the profile row is created lazily
//! on first authentication.

use crate::{api, consts, errors, models, repo};
use serde::Serialize;
use uuid::Uuid;

/// Normalizes a raw phone number into E.164 form.
///
/// Accepts local formatting (spaces, dashes, parentheses). A leading `0`
/// is treated as the local prefix and replaced with the default country
/// code; a leading `+` is kept as-is; bare digits get a `+` prepended.
///
/// # Errors
/// Returns [`errors::Error::Validation`] when the input contains
/// non-numeric characters or the digit count falls outside E.164 bounds.
pub fn normalize_phone(raw: &str) -> errors::Result<String> {
    let compact: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    let (has_plus, rest) = match compact.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, compact.as_str()),
    };

    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
        return Err(errors::Error::validation(
            "phone",
            "must contain only digits after the optional leading +",
        ));
    }

    let digits = match (has_plus, rest.strip_prefix('0')) {
        // local prefix, swap in the default country code
        (false, Some(national)) => {
            format!("{}{national}", consts::DEFAULT_COUNTRY_CODE.trim_start_matches('+'))
        }
        // E.164 country codes never start with 0
        (true, Some(_)) => {
            return Err(errors::Error::validation(
                "phone",
                "country code must not start with 0",
            ));
        }
        _ => rest.to_string(),
    };

    if !(consts::E164_MIN_DIGITS..=consts::E164_MAX_DIGITS).contains(&digits.len()) {
        return Err(errors::Error::validation(
            "phone",
            format!(
                "must have between {} and {} digits",
                consts::E164_MIN_DIGITS,
                consts::E164_MAX_DIGITS
            ),
        ));
    }

    Ok(format!("+{digits}"))
}

/// Gets the actor's profile or creates a default one from their phone.
///
/// Implements the get-or-create pattern used on first authentication:
/// an existing profile is returned untouched, otherwise a fresh one is
/// written with the normalized phone and no display name.
///
/// # Arguments
/// * `repo` - Repository instance for storage operations
/// * `actor` - Acting user id from the session, if any
/// * `phone` - Raw phone number as entered at sign-in
pub async fn get_or_create_profile(
    repo: &repo::ImplAppRepo,
    actor: Option<Uuid>,
    phone: &str,
) -> errors::Result<models::profile::Profile> {
    let user_id = api::require_actor(actor)?;
    let phone = normalize_phone(phone)?;

    if let Some(profile) = repo.get_profile(user_id).await? {
        return Ok(profile);
    }

    let profile = models::profile::Profile::create_default_from_phone(user_id, &phone);
    repo.insert_profile(&profile).await?;

    log::info!("created profile for user {user_id}");
    Ok(profile)
}

/// Retrieves the actor's profile; absent is a normal outcome.
pub async fn get_profile(
    repo: &repo::ImplAppRepo,
    actor: Option<Uuid>,
) -> errors::Result<Option<models::profile::Profile>> {
    let user_id = api::require_actor(actor)?;
    Ok(repo.get_profile(user_id).await?)
}

/// Applies a partial update to the actor's profile.
///
/// # Errors
/// [`errors::Error::NotFound`] when no profile row exists yet.
pub async fn update_profile(
    repo: &repo::ImplAppRepo,
    actor: Option<Uuid>,
    update: &models::profile::ProfileUpdate,
) -> errors::Result<models::profile::Profile> {
    let user_id = api::require_actor(actor)?;

    repo.update_profile(user_id, update)
        .await?
        .ok_or(errors::Error::NotFound { entity: "profile" })
}

/// Aggregate counters rendered on the user's home screen.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct UserStats {
    pub pet_count: usize,
    pub booking_count: usize,
}

/// Counts the actor's pets and bookings.
pub async fn get_user_stats(
    repo: &repo::ImplAppRepo,
    actor: Option<Uuid>,
) -> errors::Result<UserStats> {
    let user_id = api::require_actor(actor)?;

    let pet_count = repo.get_all_pets(user_id).await?.len();
    let booking_count = repo.get_bookings_by_user(user_id).await?.len();

    Ok(UserStats {
        pet_count,
        booking_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::models::profile::{Profile, ProfileUpdate};
    use crate::repo::MockAppRepo;
    use mockall::predicate::*;

    fn create_test_profile(user_id: Uuid, phone: &str) -> Profile {
        Profile::create_default_from_phone(user_id, phone)
    }

    #[test]
    fn test_normalize_phone_local_prefix() {
        assert_eq!(normalize_phone("081-234-5678").unwrap(), "+66812345678");
        assert_eq!(normalize_phone("0812345678").unwrap(), "+66812345678");
    }

    #[test]
    fn test_normalize_phone_already_e164() {
        assert_eq!(normalize_phone("+66 81 234 5678").unwrap(), "+66812345678");
        assert_eq!(normalize_phone("66812345678").unwrap(), "+66812345678");
    }

    #[test]
    fn test_normalize_phone_rejects_zero_after_country_code_marker() {
        assert!(matches!(
            normalize_phone("+0812345678"),
            Err(Error::Validation { field: "phone", .. })
        ));
    }

    #[test]
    fn test_normalize_phone_rejects_garbage() {
        assert!(matches!(
            normalize_phone("call me"),
            Err(Error::Validation { field: "phone", .. })
        ));
        assert!(matches!(
            normalize_phone("+66-12"),
            Err(Error::Validation { field: "phone", .. })
        ));
        assert!(matches!(
            normalize_phone(""),
            Err(Error::Validation { field: "phone", .. })
        ));
    }

    #[tokio::test]
    async fn test_get_or_create_profile_existing() {
        let user_id = Uuid::new_v4();
        let existing = create_test_profile(user_id, "+66812345678");

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_profile()
            .with(eq(user_id))
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_insert_profile().times(0);
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let result = get_or_create_profile(&mock_repo, Some(user_id), "0812345678").await;

        assert!(result.is_ok_and(|profile| profile.id == user_id));
    }

    #[tokio::test]
    async fn test_get_or_create_profile_new_user_stores_normalized_phone() {
        let user_id = Uuid::new_v4();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_profile()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_insert_profile()
            .withf(|profile| profile.phone == "+66812345678")
            .times(1)
            .returning(|_| Ok(()));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let result = get_or_create_profile(&mock_repo, Some(user_id), "081 234 5678").await;

        let profile = result.unwrap();
        assert_eq!(profile.phone, "+66812345678");
        assert!(profile.display_name.is_none());
    }

    #[tokio::test]
    async fn test_get_or_create_profile_requires_actor() {
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(MockAppRepo::new());

        let result = get_or_create_profile(&mock_repo, None, "0812345678").await;

        assert!(matches!(result, Err(Error::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_update_profile_not_found() {
        let user_id = Uuid::new_v4();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_update_profile()
            .times(1)
            .returning(|_, _| Ok(None));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let result = update_profile(&mock_repo, Some(user_id), &ProfileUpdate::default()).await;

        assert!(matches!(
            result,
            Err(Error::NotFound { entity: "profile" })
        ));
    }

    #[tokio::test]
    async fn test_get_user_stats_counts_both_collections() {
        let user_id = Uuid::new_v4();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_all_pets()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(vec![]));
        mock_repo
            .expect_get_bookings_by_user()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(vec![]));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let stats = get_user_stats(&mock_repo, Some(user_id)).await.unwrap();

        assert_eq!(
            stats,
            UserStats {
                pet_count: 0,
                booking_count: 0
            }
        );
    }

    #[tokio::test]
    async fn test_get_profile_propagates_storage_error() {
        let user_id = Uuid::new_v4();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_profile()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("database connection error")));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let result = get_profile(&mock_repo, Some(user_id)).await;

        assert!(matches!(result, Err(Error::Storage(_))));
    }
}
