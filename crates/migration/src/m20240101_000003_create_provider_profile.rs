//! Create `provider_profile` table with FK to `user`.
//!
//! One profile per provider user; the one-per-user rule is enforced by an
//! existence check in the service layer, not by a unique constraint.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProviderProfile::Table)
                    .if_not_exists()
                    .col(uuid(ProviderProfile::Id).primary_key())
                    .col(uuid(ProviderProfile::UserId).not_null())
                    .col(text(ProviderProfile::Bio).not_null())
                    .col(integer(ProviderProfile::Experience).not_null())
                    .col(json_binary(ProviderProfile::ServiceCategories).not_null())
                    .col(json_binary(ProviderProfile::PortfolioImages).not_null())
                    .col(timestamp_with_time_zone(ProviderProfile::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ProviderProfile::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provider_profile_user")
                            .from(ProviderProfile::Table, ProviderProfile::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProviderProfile::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProviderProfile { Table, Id, UserId, Bio, Experience, ServiceCategories, PortfolioImages, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
