use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Languages {
    Table,
    Id,
    Name,
    Code,
}

#[derive(DeriveIden)]
enum Specialties {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Certifications {
    Table,
    Id,
    Name,
    IssuingOrganization,
    Description,
}

#[derive(DeriveIden)]
enum Locations {
    Table,
    Id,
    Name,
    City,
    Country,
    Description,
    IsPopular,
}

#[derive(DeriveIden)]
enum Guides {
    Table,
    Id,
    UserId,
    Slug,
    Bio,
    PhoneNumber,
    ProfileImageUrl,
    BannerImageUrl,
    YearsOfExperience,
    Website,
    Twitter,
    Instagram,
    Facebook,
    Linkedin,
    Youtube,
    IsActive,
    IsVerified,
    IsFeatured,
    IsRecommended,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GuideLanguages {
    Table,
    GuideId,
    LanguageId,
}

#[derive(DeriveIden)]
enum GuideSpecialties {
    Table,
    GuideId,
    SpecialtyId,
}

#[derive(DeriveIden)]
enum GuideCertifications {
    Table,
    GuideId,
    CertificationId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Languages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Languages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Languages::Name).string_len(100).not_null().unique_key())
                    .col(ColumnDef::new(Languages::Code).string_len(10).not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Specialties::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Specialties::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Specialties::Name).string_len(100).not_null().unique_key())
                    .col(ColumnDef::new(Specialties::Description).text().not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Certifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Certifications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Certifications::Name).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Certifications::IssuingOrganization)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Certifications::Description).text().not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Locations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Locations::Name).string().not_null())
                    .col(ColumnDef::new(Locations::City).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Locations::Country)
                            .string_len(100)
                            .not_null()
                            .default("Saudi Arabia"),
                    )
                    .col(ColumnDef::new(Locations::Description).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Locations::IsPopular)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Guides::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Guides::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Guides::UserId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Guides::Slug).string_len(100).not_null().unique_key())
                    .col(ColumnDef::new(Guides::Bio).text().not_null().default(""))
                    .col(ColumnDef::new(Guides::PhoneNumber).string_len(20).not_null().default(""))
                    .col(ColumnDef::new(Guides::ProfileImageUrl).string().null())
                    .col(ColumnDef::new(Guides::BannerImageUrl).string().null())
                    .col(
                        ColumnDef::new(Guides::YearsOfExperience)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Guides::Website).string().null())
                    .col(ColumnDef::new(Guides::Twitter).string().null())
                    .col(ColumnDef::new(Guides::Instagram).string().null())
                    .col(ColumnDef::new(Guides::Facebook).string().null())
                    .col(ColumnDef::new(Guides::Linkedin).string().null())
                    .col(ColumnDef::new(Guides::Youtube).string().null())
                    .col(ColumnDef::new(Guides::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Guides::IsVerified).boolean().not_null().default(false))
                    .col(ColumnDef::new(Guides::IsFeatured).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Guides::IsRecommended)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Guides::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Guides::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guides_user_id")
                            .from(Guides::Table, Guides::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE guides ADD CONSTRAINT chk_guides_years_of_experience CHECK (years_of_experience >= 0)",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GuideLanguages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GuideLanguages::GuideId).uuid().not_null())
                    .col(ColumnDef::new(GuideLanguages::LanguageId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(GuideLanguages::GuideId)
                            .col(GuideLanguages::LanguageId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guide_languages_guide_id")
                            .from(GuideLanguages::Table, GuideLanguages::GuideId)
                            .to(Guides::Table, Guides::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guide_languages_language_id")
                            .from(GuideLanguages::Table, GuideLanguages::LanguageId)
                            .to(Languages::Table, Languages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GuideSpecialties::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GuideSpecialties::GuideId).uuid().not_null())
                    .col(ColumnDef::new(GuideSpecialties::SpecialtyId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(GuideSpecialties::GuideId)
                            .col(GuideSpecialties::SpecialtyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guide_specialties_guide_id")
                            .from(GuideSpecialties::Table, GuideSpecialties::GuideId)
                            .to(Guides::Table, Guides::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guide_specialties_specialty_id")
                            .from(GuideSpecialties::Table, GuideSpecialties::SpecialtyId)
                            .to(Specialties::Table, Specialties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GuideCertifications::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GuideCertifications::GuideId).uuid().not_null())
                    .col(
                        ColumnDef::new(GuideCertifications::CertificationId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(GuideCertifications::GuideId)
                            .col(GuideCertifications::CertificationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guide_certifications_guide_id")
                            .from(GuideCertifications::Table, GuideCertifications::GuideId)
                            .to(Guides::Table, Guides::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guide_certifications_certification_id")
                            .from(
                                GuideCertifications::Table,
                                GuideCertifications::CertificationId,
                            )
                            .to(Certifications::Table, Certifications::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuideCertifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GuideSpecialties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GuideLanguages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Guides::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Certifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Specialties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Languages::Table).to_owned())
            .await
    }
}
