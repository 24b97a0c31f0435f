//! Comments customers leave on provider profiles.

use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::instrument;
use uuid::Uuid;

use crate::actor::Actor;
use crate::booking::domain::UserSummary;
use crate::errors::ServiceError;
use models::{comment, provider_profile, user};

/// A comment with its author attached, as served on public profile
/// pages.
#[derive(Debug, serde::Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: comment::Model,
    pub author: UserSummary,
}

/// Leave a comment on a profile. Providers cannot comment on their own
/// profile.
#[instrument(skip(db, body))]
pub async fn create(
    db: &DatabaseConnection,
    author_id: Uuid,
    profile_id: Uuid,
    body: &str,
) -> Result<comment::Model, ServiceError> {
    let profile = provider_profile::Entity::find_by_id(profile_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound("provider profile not found".into()))?;
    if profile.user_id == author_id {
        return Err(ServiceError::Validation(
            "you cannot comment on your own profile".into(),
        ));
    }
    Ok(comment::create(db, profile.id, author_id, body).await?)
}

/// All comments on a profile, newest first, with authors attached.
pub async fn list_for_profile(
    db: &DatabaseConnection,
    profile_id: Uuid,
) -> Result<Vec<CommentView>, ServiceError> {
    let rows = comment::list_by_profile(db, profile_id).await?;
    let author_ids: Vec<Uuid> = rows.iter().map(|c| c.customer_id).collect();
    let authors = {
        use sea_orm::{ColumnTrait, QueryFilter};
        user::Entity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
    };
    let by_id: std::collections::HashMap<Uuid, user::Model> =
        authors.into_iter().map(|u| (u.id, u)).collect();
    Ok(rows
        .into_iter()
        .map(|c| {
            let author = by_id
                .get(&c.customer_id)
                .map(|u| UserSummary {
                    id: u.id,
                    name: u.name.clone(),
                    phone_number: u.phone_number.clone(),
                    profile_image: u.profile_image.clone(),
                    email: u.email.clone(),
                })
                .unwrap_or(UserSummary {
                    id: c.customer_id,
                    name: String::new(),
                    phone_number: String::new(),
                    profile_image: None,
                    email: String::new(),
                });
            CommentView { author, comment: c }
        })
        .collect())
}

/// Authors may edit their own comments only.
#[instrument(skip(db, body))]
pub async fn update(
    db: &DatabaseConnection,
    actor: &Actor,
    comment_id: Uuid,
    body: &str,
) -> Result<comment::Model, ServiceError> {
    let existing = comment::Entity::find_by_id(comment_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound("comment not found".into()))?;
    if existing.customer_id != actor.id {
        return Err(ServiceError::Forbidden(
            "you can only update your own comments".into(),
        ));
    }
    Ok(comment::update_body(db, existing.id, body).await?)
}

/// The author or an admin may remove a comment.
#[instrument(skip(db))]
pub async fn delete(
    db: &DatabaseConnection,
    actor: &Actor,
    comment_id: Uuid,
) -> Result<(), ServiceError> {
    let existing = comment::Entity::find_by_id(comment_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound("comment not found".into()))?;
    if existing.customer_id != actor.id && !actor.is_admin() {
        return Err(ServiceError::Forbidden(
            "you can only delete your own comments".into(),
        ));
    }
    comment::delete(db, existing.id).await?;
    Ok(())
}
