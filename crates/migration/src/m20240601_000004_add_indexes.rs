use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Product: brand + name backs the combined filters and the count
        manager
            .create_index(
                Index::create()
                    .name("idx_product_brand_name")
                    .table(Product::Table)
                    .col(Product::Brand)
                    .col(Product::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_name")
                    .table(Product::Table)
                    .col(Product::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_category")
                    .table(Product::Table)
                    .col(Product::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Image: lookups by owning product
        manager
            .create_index(
                Index::create()
                    .name("idx_image_product")
                    .table(Image::Table)
                    .col(Image::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_product_brand_name").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_name").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_category").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_image_product").table(Image::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product { Table, Brand, Name, CategoryId }

#[derive(DeriveIden)]
enum Image { Table, ProductId }
