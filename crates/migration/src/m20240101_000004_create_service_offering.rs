//! Create `service_offering` table with FK to `provider_profile`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceOffering::Table)
                    .if_not_exists()
                    .col(uuid(ServiceOffering::Id).primary_key())
                    .col(uuid(ServiceOffering::ProviderProfileId).not_null())
                    .col(string_len(ServiceOffering::ServiceCategory, 64).not_null())
                    .col(json_binary(ServiceOffering::SubCategories).not_null())
                    .col(json_binary(ServiceOffering::Keywords).not_null())
                    .col(text(ServiceOffering::Description).not_null())
                    .col(json_binary(ServiceOffering::PortfolioImages).not_null())
                    .col(timestamp_with_time_zone(ServiceOffering::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_offering_provider_profile")
                            .from(ServiceOffering::Table, ServiceOffering::ProviderProfileId)
                            .to(ProviderProfile::Table, ProviderProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceOffering::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceOffering { Table, Id, ProviderProfileId, ServiceCategory, SubCategories, Keywords, Description, PortfolioImages, CreatedAt }

#[derive(DeriveIden)]
enum ProviderProfile { Table, Id }
