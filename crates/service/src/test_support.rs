//! Shared setup for database-backed tests. Tests skip themselves when
//! no database is reachable so the suite stays green without Postgres.

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::role::Role;
use models::{db, provider_profile, user};

pub async fn get_db() -> Option<DatabaseConnection> {
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

pub fn unique_email(tag: &str) -> String {
    format!("{}_{}@example.com", tag, Uuid::new_v4())
}

pub async fn seed_customer(db: &DatabaseConnection, tag: &str) -> user::Model {
    user::create(db, "Test Customer", &unique_email(tag), "0500000000")
        .await
        .expect("seed customer")
}

pub async fn seed_provider(
    db: &DatabaseConnection,
    tag: &str,
    categories: &[&str],
) -> (user::Model, provider_profile::Model) {
    let account = user::create(db, "Test Provider", &unique_email(tag), "0500000001")
        .await
        .expect("seed provider user");
    let cats: Vec<String> = categories.iter().map(|c| c.to_string()).collect();
    let profile = provider_profile::create(db, account.id, "seasoned pro", 3, &cats)
        .await
        .expect("seed profile");
    let account = user::set_role(db, account.id, Role::Provider)
        .await
        .expect("seed role flip");
    (account, profile)
}
