//! Provider onboarding, profile upkeep, and service offerings.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait, Set};
use tracing::instrument;
use uuid::Uuid;

use crate::booking::domain::UserSummary;
use crate::errors::ServiceError;
use crate::media::{self, MediaStore};
use models::role::Role;
use models::service_offering::PortfolioImage;
use models::{provider_profile, service_offering, user};

/// A provider profile with its account and current offerings, as shown
/// on the public browse pages.
#[derive(Debug, serde::Serialize)]
pub struct ProviderView {
    #[serde(flatten)]
    pub profile: provider_profile::Model,
    pub user: UserSummary,
    pub offerings: Vec<service_offering::Model>,
}

#[derive(Clone, Debug, Default)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub experience: Option<i32>,
    pub service_categories: Option<Vec<String>>,
    pub new_images: Vec<Vec<u8>>,
}

#[derive(Clone, Debug)]
pub struct NewOffering {
    pub service_category: String,
    pub sub_categories: Vec<String>,
    pub keywords: Vec<String>,
    pub description: String,
    pub images: Vec<Vec<u8>>,
}

fn user_summary(u: user::Model) -> UserSummary {
    UserSummary {
        id: u.id,
        name: u.name,
        phone_number: u.phone_number,
        profile_image: u.profile_image,
        email: u.email,
    }
}

/// Turn a customer account into a provider. Creates the profile and
/// flips the account role in one call.
#[instrument(skip(db, bio, service_categories))]
pub async fn become_provider(
    db: &DatabaseConnection,
    user_id: Uuid,
    bio: &str,
    experience: i32,
    service_categories: &[String],
) -> Result<provider_profile::Model, ServiceError> {
    let account = user::Entity::find_by_id(user_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound("user not found".into()))?;
    if provider_profile::find_by_user(db, user_id).await?.is_some() {
        return Err(ServiceError::Validation(
            "you are already registered as a provider".into(),
        ));
    }
    let profile = provider_profile::create(db, account.id, bio, experience, service_categories).await?;
    user::set_role(db, account.id, Role::Provider).await?;
    tracing::info!(profile_id = %profile.id, "provider profile created");
    Ok(profile)
}

/// Update the caller's provider profile. New portfolio images are
/// uploaded concurrently and appended once all of them have landed.
#[instrument(skip(db, media, update))]
pub async fn update_profile(
    db: &DatabaseConnection,
    media: &dyn MediaStore,
    folder: &str,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Result<provider_profile::Model, ServiceError> {
    let profile = provider_profile::find_by_user(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("provider profile not found".into()))?;

    if let Some(categories) = &update.service_categories {
        provider_profile::validate_categories(categories)?;
    }
    if let Some(experience) = update.experience {
        if experience < 0 {
            return Err(ServiceError::Validation("experience must be non-negative".into()));
        }
    }

    let mut portfolio: Vec<String> =
        serde_json::from_value(profile.portfolio_images.clone()).unwrap_or_default();
    if !update.new_images.is_empty() {
        let uploaded = media::upload_all(media, folder, update.new_images).await?;
        portfolio.extend(uploaded.into_iter().map(|m| m.url));
    }

    let mut am = profile.into_active_model();
    if let Some(bio) = update.bio {
        am.bio = Set(bio);
    }
    if let Some(experience) = update.experience {
        am.experience = Set(experience);
    }
    if let Some(categories) = update.service_categories {
        am.service_categories = Set(serde_json::json!(categories));
    }
    am.portfolio_images = Set(serde_json::json!(portfolio));
    am.updated_at = Set(chrono::Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Publish a new offering under the caller's profile. Images are
/// mandatory and the category must be one the profile advertises.
#[instrument(skip(db, media, offering))]
pub async fn add_offering(
    db: &DatabaseConnection,
    media: &dyn MediaStore,
    folder: &str,
    user_id: Uuid,
    offering: NewOffering,
) -> Result<service_offering::Model, ServiceError> {
    if offering.images.is_empty() {
        return Err(ServiceError::Validation(
            "portfolio images are required for a service".into(),
        ));
    }
    let profile = provider_profile::find_by_user(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("provider profile not found".into()))?;
    if !profile.offers_category(&offering.service_category) {
        return Err(ServiceError::Validation(
            "the profile does not advertise this category".into(),
        ));
    }

    let uploaded = media::upload_all(media, folder, offering.images).await?;
    let images: Vec<PortfolioImage> = uploaded
        .into_iter()
        .map(|m| PortfolioImage { url: m.url, public_id: m.public_id })
        .collect();

    let created = service_offering::create(
        db,
        profile.id,
        &offering.service_category,
        &offering.sub_categories,
        &offering.keywords,
        &offering.description,
        &images,
    )
    .await?;
    tracing::info!(offering_id = %created.id, "service offering published");
    Ok(created)
}

/// Remove one of the caller's offerings along with its hosted images.
#[instrument(skip(db, media))]
pub async fn delete_offering(
    db: &DatabaseConnection,
    media: &dyn MediaStore,
    user_id: Uuid,
    offering_id: Uuid,
) -> Result<(), ServiceError> {
    let profile = provider_profile::find_by_user(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("provider profile not found".into()))?;
    let offering = service_offering::Entity::find_by_id(offering_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound("service offering not found".into()))?;
    if offering.provider_profile_id != profile.id {
        return Err(ServiceError::Forbidden(
            "you can only delete your own offerings".into(),
        ));
    }

    let public_ids: Vec<String> = offering.images().into_iter().map(|i| i.public_id).collect();
    media::delete_all(media, public_ids).await?;

    service_offering::Entity::delete_by_id(offering.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    tracing::info!(offering_id = %offering_id, "service offering removed");
    Ok(())
}

/// One page of provider profiles with accounts and offerings attached.
pub async fn list_providers(
    db: &DatabaseConnection,
    page: common::pagination::Pagination,
) -> Result<Vec<ProviderView>, ServiceError> {
    use sea_orm::QuerySelect;
    let (page_index, per_page) = page.normalize();
    let profiles = provider_profile::Entity::find()
        .offset(page_index * per_page)
        .limit(per_page)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let mut views = Vec::with_capacity(profiles.len());
    for profile in profiles {
        views.push(attach(db, profile).await?);
    }
    Ok(views)
}

pub async fn get_provider(
    db: &DatabaseConnection,
    profile_id: Uuid,
) -> Result<ProviderView, ServiceError> {
    let profile = provider_profile::Entity::find_by_id(profile_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound("provider profile not found".into()))?;
    attach(db, profile).await
}

async fn attach(
    db: &DatabaseConnection,
    profile: provider_profile::Model,
) -> Result<ProviderView, ServiceError> {
    let account = profile
        .find_related(user::Entity)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound("user not found".into()))?;
    let offerings = service_offering::list_by_profile(db, profile.id).await?;
    Ok(ProviderView { user: user_summary(account), offerings, profile })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::mock::MockMediaStore;
    use crate::test_support;

    #[tokio::test]
    async fn become_provider_flips_role_once() {
        let Some(db) = test_support::get_db().await else { return };
        let account = test_support::seed_customer(&db, "become").await;

        let profile = become_provider(&db, account.id, "ten years of tutoring", 10, &["Tutoring".into()])
            .await
            .expect("become provider");
        assert_eq!(profile.user_id, account.id);

        let refreshed = user::Entity::find_by_id(account.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(refreshed.role, "provider");

        let err = become_provider(&db, account.id, "again", 1, &["Tutoring".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn offering_lifecycle_with_media_cleanup() {
        let Some(db) = test_support::get_db().await else { return };
        let media = MockMediaStore::default();
        let (account, profile) = test_support::seed_provider(&db, "offer", &["Tutoring"]).await;

        let err = add_offering(
            &db,
            &media,
            "localhands",
            account.id,
            NewOffering {
                service_category: "Tutoring".into(),
                sub_categories: vec![],
                keywords: vec![],
                description: "math".into(),
                images: vec![],
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let offering = add_offering(
            &db,
            &media,
            "localhands",
            account.id,
            NewOffering {
                service_category: "Tutoring".into(),
                sub_categories: vec!["algebra".into()],
                keywords: vec!["math".into()],
                description: "high school math".into(),
                images: vec![vec![1, 2], vec![3, 4]],
            },
        )
        .await
        .expect("add offering");
        assert_eq!(offering.provider_profile_id, profile.id);
        assert_eq!(offering.images().len(), 2);

        delete_offering(&db, &media, account.id, offering.id)
            .await
            .expect("delete offering");
        assert_eq!(media.deleted.lock().unwrap().len(), 2);
        assert!(service_offering::Entity::find_by_id(offering.id)
            .one(&db)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn offering_category_must_be_advertised() {
        let Some(db) = test_support::get_db().await else { return };
        let media = MockMediaStore::default();
        let (account, _) = test_support::seed_provider(&db, "cat", &["Tutoring"]).await;

        let err = add_offering(
            &db,
            &media,
            "localhands",
            account.id,
            NewOffering {
                service_category: "Plumbing".into(),
                sub_categories: vec![],
                keywords: vec![],
                description: "pipes".into(),
                images: vec![vec![0]],
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn profile_update_appends_uploaded_images() {
        let Some(db) = test_support::get_db().await else { return };
        let media = MockMediaStore::default();
        let (account, _) = test_support::seed_provider(&db, "upd", &["Tutoring"]).await;

        let updated = update_profile(
            &db,
            &media,
            "localhands",
            account.id,
            ProfileUpdate {
                bio: Some("updated bio".into()),
                new_images: vec![vec![9], vec![8]],
                ..Default::default()
            },
        )
        .await
        .expect("update profile");
        assert_eq!(updated.bio, "updated bio");
        let urls: Vec<String> = serde_json::from_value(updated.portfolio_images).unwrap();
        assert_eq!(urls.len(), 2);
    }
}
