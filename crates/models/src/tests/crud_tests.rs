//! Entity-level CRUD exercised against a live database. Each test skips
//! itself when no database is reachable so the suite stays green on
//! machines without Postgres.
use chrono::{Duration, Utc};
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::booking_status::BookingStatus;
use crate::role::Role;
use crate::{booking, comment, db, provider_profile, service_offering, user, user_credentials};

async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

fn unique_email(tag: &str) -> String {
    format!("{}_{}@example.com", tag, Uuid::new_v4())
}

#[tokio::test]
async fn user_create_and_role_flip() {
    let Some(db) = get_db().await else { return };

    let u = user::create(&db, "Amal", &unique_email("crud"), "0500000001").await.expect("create user");
    assert_eq!(u.role, "customer");
    assert!(u.profile_image.is_none());

    let flipped = user::set_role(&db, u.id, Role::Provider).await.expect("set role");
    assert_eq!(flipped.role, "provider");
    assert_eq!(flipped.parsed_role().expect("parse"), Role::Provider);

    user::Entity::delete_by_id(u.id).exec(&db).await.expect("cleanup");
}

#[tokio::test]
async fn user_rejects_bad_fields() {
    let Some(db) = get_db().await else { return };

    assert!(user::create(&db, "", &unique_email("bad"), "05").await.is_err());
    assert!(user::create(&db, "A", "not-an-email", "05").await.is_err());
    assert!(user::create(&db, "A", &unique_email("bad"), " ").await.is_err());
}

#[tokio::test]
async fn credentials_upsert_replaces_hash() {
    let Some(db) = get_db().await else { return };

    let u = user::create(&db, "Cred", &unique_email("cred"), "0500000002").await.expect("create user");
    let c1 = user_credentials::upsert_password(&db, u.id, "hash-one", "argon2").await.expect("insert");
    let c2 = user_credentials::upsert_password(&db, u.id, "hash-two", "argon2").await.expect("update");
    assert_eq!(c1.id, c2.id);
    assert_eq!(c2.password_hash, "hash-two");

    let found = user_credentials::find_by_user(&db, u.id).await.expect("find").expect("present");
    assert_eq!(found.password_hash, "hash-two");

    user::Entity::delete_by_id(u.id).exec(&db).await.expect("cleanup");
}

#[tokio::test]
async fn booking_lifecycle_and_ordering() {
    let Some(db) = get_db().await else { return };

    let customer = user::create(&db, "Customer", &unique_email("bk_c"), "0500000003").await.expect("customer");
    let provider_user = user::create(&db, "Provider", &unique_email("bk_p"), "0500000004").await.expect("provider");
    let profile = provider_profile::create(&db, provider_user.id, "bakes", 3, &["Tutoring".to_string()])
        .await
        .expect("profile");

    let soon = Utc::now() + Duration::days(1);
    let later = Utc::now() + Duration::days(7);
    let b1 = booking::create(&db, customer.id, profile.id, "Tutoring", soon.into(), "").await.expect("b1");
    let b2 = booking::create(&db, customer.id, profile.id, "Tutoring", later.into(), "notes").await.expect("b2");
    assert_eq!(b1.status, "pending");

    // Newest scheduled date first
    let mine = booking::list_by_customer(&db, customer.id).await.expect("list");
    let ids: Vec<Uuid> = mine.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![b2.id, b1.id]);

    let updated = booking::set_status(&db, b1.id, BookingStatus::Accepted).await.expect("set status");
    assert_eq!(updated.status, "accepted");
    assert_eq!(updated.customer_id, customer.id);
    assert_eq!(updated.provider_profile_id, profile.id);

    booking::Entity::delete_by_id(b1.id).exec(&db).await.expect("cleanup");
    booking::Entity::delete_by_id(b2.id).exec(&db).await.expect("cleanup");
    provider_profile::Entity::delete_by_id(profile.id).exec(&db).await.expect("cleanup");
    user::Entity::delete_by_id(customer.id).exec(&db).await.expect("cleanup");
    user::Entity::delete_by_id(provider_user.id).exec(&db).await.expect("cleanup");
}

#[tokio::test]
async fn offering_requires_known_category() {
    let Some(db) = get_db().await else { return };

    let provider_user = user::create(&db, "Offer", &unique_email("off"), "0500000005").await.expect("user");
    let profile = provider_profile::create(&db, provider_user.id, "crafts", 1, &["Handmade Crafts".to_string()])
        .await
        .expect("profile");

    let err = service_offering::create(&db, profile.id, "Plumbing", &[], &[], "desc", &[]).await;
    assert!(err.is_err());

    let img = service_offering::PortfolioImage { url: "https://cdn/x.jpg".into(), public_id: "x".into() };
    let ok = service_offering::create(
        &db,
        profile.id,
        "Handmade Crafts",
        &["Pottery".to_string()],
        &["clay".to_string()],
        "desc",
        std::slice::from_ref(&img),
    )
    .await
    .expect("offering");
    assert_eq!(ok.images(), vec![img]);

    service_offering::Entity::delete_by_id(ok.id).exec(&db).await.expect("cleanup");
    provider_profile::Entity::delete_by_id(profile.id).exec(&db).await.expect("cleanup");
    user::Entity::delete_by_id(provider_user.id).exec(&db).await.expect("cleanup");
}

#[tokio::test]
async fn comment_crud() {
    let Some(db) = get_db().await else { return };

    let author = user::create(&db, "Author", &unique_email("cm_a"), "0500000006").await.expect("author");
    let provider_user = user::create(&db, "Target", &unique_email("cm_p"), "0500000007").await.expect("target");
    let profile = provider_profile::create(&db, provider_user.id, "sews", 2, &["Embroidery".to_string()])
        .await
        .expect("profile");

    let c = comment::create(&db, profile.id, author.id, "lovely work").await.expect("comment");
    let updated = comment::update_body(&db, c.id, "even lovelier").await.expect("update");
    assert_eq!(updated.body, "even lovelier");

    let listed = comment::list_by_profile(&db, profile.id).await.expect("list");
    assert!(listed.iter().any(|x| x.id == c.id));

    comment::delete(&db, c.id).await.expect("delete");
    let listed = comment::list_by_profile(&db, profile.id).await.expect("list");
    assert!(!listed.iter().any(|x| x.id == c.id));

    provider_profile::Entity::delete_by_id(profile.id).exec(&db).await.expect("cleanup");
    user::Entity::delete_by_id(author.id).exec(&db).await.expect("cleanup");
    user::Entity::delete_by_id(provider_user.id).exec(&db).await.expect("cleanup");
}
