//! Secondary indexes for the hot lookup paths: bookings by party, comments
//! and offerings by profile, profile by owning user.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_provider_profile_user_id")
                    .table(ProviderProfile::Table)
                    .col(ProviderProfile::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_service_offering_provider_profile_id")
                    .table(ServiceOffering::Table)
                    .col(ServiceOffering::ProviderProfileId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_customer_id")
                    .table(Booking::Table)
                    .col(Booking::CustomerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_provider_profile_id")
                    .table(Booking::Table)
                    .col(Booking::ProviderProfileId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_provider_profile_id")
                    .table(Comment::Table)
                    .col(Comment::ProviderProfileId)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_comment_provider_profile_id").table(Comment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_booking_provider_profile_id").table(Booking::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_booking_customer_id").table(Booking::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_offering_provider_profile_id").table(ServiceOffering::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_provider_profile_user_id").table(ProviderProfile::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum ProviderProfile { Table, UserId }

#[derive(DeriveIden)]
enum ServiceOffering { Table, ProviderProfileId }

#[derive(DeriveIden)]
enum Booking { Table, CustomerId, ProviderProfileId }

#[derive(DeriveIden)]
enum Comment { Table, ProviderProfileId }
