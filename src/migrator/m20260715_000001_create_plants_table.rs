use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Plants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Plants::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Plants::Name).string().not_null())
                    .col(ColumnDef::new(Plants::PlantType).string().not_null())
                    .col(ColumnDef::new(Plants::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Plants::LastWatered).date_time())
                    .col(ColumnDef::new(Plants::SoilMoisture).double())
                    .col(
                        ColumnDef::new(Plants::HealthStatus)
                            .string()
                            .not_null()
                            .default("healthy"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Plants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Plants {
    Table,
    Id,
    Name,
    PlantType,
    CreatedAt,
    LastWatered,
    SoilMoisture,
    HealthStatus,
}
