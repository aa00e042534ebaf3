//! Create `image` table.
//! Image bytes live inline; rows go away with their product.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Image::Table)
                    .if_not_exists()
                    .col(uuid(Image::Id).primary_key())
                    .col(string_len(Image::FileName, 255).not_null())
                    .col(string_len(Image::FileType, 128).not_null())
                    .col(blob(Image::Data).not_null())
                    .col(string_len(Image::DownloadUrl, 512).not_null())
                    .col(uuid(Image::ProductId).not_null())
                    .col(timestamp_with_time_zone(Image::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_image_product")
                            .from(Image::Table, Image::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Image::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Image {
    Table,
    Id,
    FileName,
    FileType,
    Data,
    DownloadUrl,
    ProductId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Product { Table, Id }
