use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create Detections Table
        // plant_id is intentionally NOT a foreign key: detections survive
        // plant deletion and may reference ids that never existed.
        manager
            .create_table(
                Table::create()
                    .table(Detections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Detections::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Detections::PlantId).uuid().not_null())
                    .col(ColumnDef::new(Detections::ImageData).text().not_null())
                    .col(ColumnDef::new(Detections::DiseaseName).string().not_null())
                    .col(ColumnDef::new(Detections::Confidence).double().not_null())
                    .col(ColumnDef::new(Detections::Severity).string().not_null())
                    .col(ColumnDef::new(Detections::Treatment).text().not_null())
                    .col(ColumnDef::new(Detections::Description).text().not_null())
                    .col(ColumnDef::new(Detections::Timestamp).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create Sensor Readings Table
        manager
            .create_table(
                Table::create()
                    .table(SensorReadings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SensorReadings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SensorReadings::PlantId).uuid().not_null())
                    .col(
                        ColumnDef::new(SensorReadings::SoilMoisture)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SensorReadings::Temperature)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SensorReadings::Humidity).double().not_null())
                    .col(
                        ColumnDef::new(SensorReadings::LightLevel)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SensorReadings::Timestamp)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SensorReadings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Detections::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Detections {
    Table,
    Id,
    PlantId,
    ImageData,
    DiseaseName,
    Confidence,
    Severity,
    Treatment,
    Description,
    Timestamp,
}

#[derive(DeriveIden)]
enum SensorReadings {
    Table,
    Id,
    PlantId,
    SoilMoisture,
    Temperature,
    Humidity,
    LightLevel,
    Timestamp,
}
