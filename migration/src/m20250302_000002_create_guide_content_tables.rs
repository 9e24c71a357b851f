use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Guides {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Locations {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Packages {
    Table,
    Id,
    GuideId,
    Title,
    Slug,
    Description,
    Duration,
    Price,
    DiscountPrice,
    IncludedServices,
    ExcludedServices,
    MaxPeople,
    IsActive,
    IsFeatured,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PackageLocations {
    Table,
    PackageId,
    LocationId,
}

#[derive(DeriveIden)]
enum Schedules {
    Table,
    Id,
    GuideId,
    LocationId,
    StartDate,
    EndDate,
    Notes,
    IsAvailable,
}

#[derive(DeriveIden)]
enum GalleryItems {
    Table,
    Id,
    GuideId,
    ImageUrl,
    Title,
    Description,
    SortOrder,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    Id,
    GuideId,
    Title,
    YoutubeUrl,
    Description,
    SortOrder,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    GuideId,
    AuthorName,
    Email,
    Rating,
    Comment,
    IsApproved,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Badges {
    Table,
    Id,
    Name,
    Description,
    Icon,
    Color,
}

#[derive(DeriveIden)]
enum BadgeAssignments {
    Table,
    Id,
    GuideId,
    BadgeId,
    AssignedBy,
    AssignedAt,
}

/// Every row owned by a guide goes away with the guide.
fn owned_by_guide(table: impl IntoIden + 'static, column: impl IntoIden + 'static, name: &str) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(Guides::Table, Guides::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Packages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Packages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Packages::GuideId).uuid().not_null())
                    .col(ColumnDef::new(Packages::Title).string().not_null())
                    .col(ColumnDef::new(Packages::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Packages::Description).text().not_null())
                    .col(ColumnDef::new(Packages::Duration).string_len(100).not_null())
                    .col(ColumnDef::new(Packages::Price).double().not_null())
                    .col(ColumnDef::new(Packages::DiscountPrice).double().null())
                    .col(
                        ColumnDef::new(Packages::IncludedServices)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Packages::ExcludedServices)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Packages::MaxPeople).integer().not_null().default(1))
                    .col(ColumnDef::new(Packages::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Packages::IsFeatured).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Packages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Packages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(&mut owned_by_guide(
                        Packages::Table,
                        Packages::GuideId,
                        "fk_packages_guide_id",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PackageLocations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PackageLocations::PackageId).uuid().not_null())
                    .col(ColumnDef::new(PackageLocations::LocationId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(PackageLocations::PackageId)
                            .col(PackageLocations::LocationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_package_locations_package_id")
                            .from(PackageLocations::Table, PackageLocations::PackageId)
                            .to(Packages::Table, Packages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_package_locations_location_id")
                            .from(PackageLocations::Table, PackageLocations::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Schedules::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Schedules::GuideId).uuid().not_null())
                    .col(ColumnDef::new(Schedules::LocationId).uuid().not_null())
                    .col(ColumnDef::new(Schedules::StartDate).date().not_null())
                    .col(ColumnDef::new(Schedules::EndDate).date().not_null())
                    .col(ColumnDef::new(Schedules::Notes).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Schedules::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(&mut owned_by_guide(
                        Schedules::Table,
                        Schedules::GuideId,
                        "fk_schedules_guide_id",
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedules_location_id")
                            .from(Schedules::Table, Schedules::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE schedules ADD CONSTRAINT chk_schedules_date_range CHECK (start_date <= end_date)",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GalleryItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GalleryItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(GalleryItems::GuideId).uuid().not_null())
                    .col(ColumnDef::new(GalleryItems::ImageUrl).string().not_null())
                    .col(ColumnDef::new(GalleryItems::Title).string().not_null().default(""))
                    .col(ColumnDef::new(GalleryItems::Description).text().not_null().default(""))
                    .col(ColumnDef::new(GalleryItems::SortOrder).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(GalleryItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut owned_by_guide(
                        GalleryItems::Table,
                        GalleryItems::GuideId,
                        "fk_gallery_items_guide_id",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Videos::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Videos::GuideId).uuid().not_null())
                    .col(ColumnDef::new(Videos::Title).string().not_null())
                    .col(ColumnDef::new(Videos::YoutubeUrl).string().not_null())
                    .col(ColumnDef::new(Videos::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Videos::SortOrder).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Videos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut owned_by_guide(
                        Videos::Table,
                        Videos::GuideId,
                        "fk_videos_guide_id",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reviews::GuideId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::AuthorName).string_len(100).not_null())
                    .col(ColumnDef::new(Reviews::Email).string().not_null().default(""))
                    .col(ColumnDef::new(Reviews::Rating).integer().not_null())
                    .col(ColumnDef::new(Reviews::Comment).text().not_null())
                    .col(
                        ColumnDef::new(Reviews::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut owned_by_guide(
                        Reviews::Table,
                        Reviews::GuideId,
                        "fk_reviews_guide_id",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE reviews ADD CONSTRAINT chk_reviews_rating_range CHECK (rating BETWEEN 1 AND 5)",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Badges::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Badges::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Badges::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Badges::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Badges::Icon).string_len(100).not_null().default(""))
                    .col(ColumnDef::new(Badges::Color).string_len(20).not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BadgeAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BadgeAssignments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BadgeAssignments::GuideId).uuid().not_null())
                    .col(ColumnDef::new(BadgeAssignments::BadgeId).uuid().not_null())
                    .col(ColumnDef::new(BadgeAssignments::AssignedBy).uuid().null())
                    .col(
                        ColumnDef::new(BadgeAssignments::AssignedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut owned_by_guide(
                        BadgeAssignments::Table,
                        BadgeAssignments::GuideId,
                        "fk_badge_assignments_guide_id",
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_badge_assignments_badge_id")
                            .from(BadgeAssignments::Table, BadgeAssignments::BadgeId)
                            .to(Badges::Table, Badges::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_badge_assignments_assigned_by")
                            .from(BadgeAssignments::Table, BadgeAssignments::AssignedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_badge_assignments_guide_badge_unique")
                    .table(BadgeAssignments::Table)
                    .col(BadgeAssignments::GuideId)
                    .col(BadgeAssignments::BadgeId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BadgeAssignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Badges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Videos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalleryItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PackageLocations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Packages::Table).to_owned())
            .await
    }
}
