use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;
use crate::user;

/// Fixed list of bookable service categories. Adding a category means
/// adding it here.
pub const ALLOWED_SERVICE_CATEGORIES: [&str; 16] = [
    "Baking (Cookies/Cakes)",
    "Home Catering",
    "Handmade Crafts",
    "Tailoring & Alterations",
    "Knitting & Crochet",
    "Embroidery",
    "Makeup Artist",
    "Henna Artist",
    "Childcare / Babysitting",
    "Tutoring",
    "Event Planning",
    "Graphic Design",
    "Content Writing",
    "Social Media Management",
    "Home Cleaning",
    "Laundry Services",
];

pub fn is_allowed_category(category: &str) -> bool {
    ALLOWED_SERVICE_CATEGORIES.contains(&category)
}

pub fn validate_categories(categories: &[String]) -> Result<(), errors::ModelError> {
    for c in categories {
        if !is_allowed_category(c) {
            return Err(errors::ModelError::Validation(format!("unknown service category: {}", c)));
        }
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider_profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub experience: i32,
    /// JSON array of strings from `ALLOWED_SERVICE_CATEGORIES`.
    pub service_categories: Json,
    /// JSON array of image URLs.
    pub portfolio_images: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    ServiceOffering,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::ServiceOffering => Entity::has_many(crate::service_offering::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::service_offering::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceOffering.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Advertised categories as plain strings.
    pub fn categories(&self) -> Vec<String> {
        self.service_categories
            .as_array()
            .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
            .unwrap_or_default()
    }

    pub fn offers_category(&self, category: &str) -> bool {
        self.categories().iter().any(|c| c == category)
    }
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: Uuid,
    bio: &str,
    experience: i32,
    service_categories: &[String],
) -> Result<Model, errors::ModelError> {
    if bio.trim().is_empty() {
        return Err(errors::ModelError::Validation("bio required".into()));
    }
    if experience < 0 {
        return Err(errors::ModelError::Validation("experience must be non-negative".into()));
    }
    validate_categories(service_categories)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        bio: Set(bio.to_string()),
        experience: Set(experience),
        service_categories: Set(serde_json::json!(service_categories)),
        portfolio_images: Set(serde_json::json!([])),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_user(db: &DatabaseConnection, user_id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_membership() {
        assert!(is_allowed_category("Tutoring"));
        assert!(is_allowed_category("Laundry Services"));
        assert!(!is_allowed_category("tutoring"));
        assert!(!is_allowed_category("Plumbing"));
    }

    #[test]
    fn validate_categories_rejects_unknown() {
        let ok = vec!["Tutoring".to_string(), "Embroidery".to_string()];
        assert!(validate_categories(&ok).is_ok());
        let bad = vec!["Tutoring".to_string(), "Plumbing".to_string()];
        assert!(validate_categories(&bad).is_err());
    }

    #[test]
    fn related_selects_build_in_both_directions() {
        let _ = Entity::find().find_also_related(user::Entity);
        let _ = user::Entity::find().find_also_related(Entity);
        let _ = Entity::find().find_also_related(crate::service_offering::Entity);
        let _ = crate::service_offering::Entity::find().find_also_related(Entity);
    }

    #[test]
    fn offers_category_reads_json_array() {
        let m = Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            bio: "b".into(),
            experience: 1,
            service_categories: serde_json::json!(["Tutoring", "Embroidery"]),
            portfolio_images: serde_json::json!([]),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        };
        assert!(m.offers_category("Tutoring"));
        assert!(!m.offers_category("Home Catering"));
    }
}
