use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum BlogAuthors {
    Table,
    Id,
    Name,
    Bio,
    ProfileImageUrl,
}

#[derive(DeriveIden)]
enum BlogCategories {
    Table,
    Id,
    Name,
    Slug,
}

#[derive(DeriveIden)]
enum BlogTags {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    Title,
    Slug,
    PostDate,
    Intro,
    Body,
    AuthorId,
    FeaturedImageUrl,
    ReadTime,
    ViewCount,
    Status,
    FirstPublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BlogPostTags {
    Table,
    PostId,
    TagId,
}

/// `position` keeps the order in which categories were assigned to a post.
#[derive(DeriveIden)]
enum BlogPostCategories {
    Table,
    PostId,
    CategoryId,
    Position,
}

#[derive(DeriveIden)]
enum Pages {
    Table,
    Id,
    Title,
    Slug,
    Body,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogAuthors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogAuthors::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BlogAuthors::Name).string().not_null())
                    .col(ColumnDef::new(BlogAuthors::Bio).text().not_null().default(""))
                    .col(ColumnDef::new(BlogAuthors::ProfileImageUrl).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogCategories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogCategories::Name).string().not_null())
                    .col(
                        ColumnDef::new(BlogCategories::Slug)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogTags::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BlogTags::Name).string_len(100).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogPosts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BlogPosts::Title).string().not_null())
                    .col(ColumnDef::new(BlogPosts::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(BlogPosts::PostDate).date().not_null())
                    .col(ColumnDef::new(BlogPosts::Intro).string_len(250).not_null())
                    .col(ColumnDef::new(BlogPosts::Body).text().not_null().default(""))
                    .col(ColumnDef::new(BlogPosts::AuthorId).uuid().null())
                    .col(ColumnDef::new(BlogPosts::FeaturedImageUrl).string().null())
                    .col(
                        ColumnDef::new(BlogPosts::ReadTime)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::Status)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::FirstPublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_posts_author_id")
                            .from(BlogPosts::Table, BlogPosts::AuthorId)
                            .to(BlogAuthors::Table, BlogAuthors::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE blog_posts ADD CONSTRAINT chk_blog_posts_view_count CHECK (view_count >= 0)",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPostTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogPostTags::PostId).uuid().not_null())
                    .col(ColumnDef::new(BlogPostTags::TagId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(BlogPostTags::PostId)
                            .col(BlogPostTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_tags_post_id")
                            .from(BlogPostTags::Table, BlogPostTags::PostId)
                            .to(BlogPosts::Table, BlogPosts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_tags_tag_id")
                            .from(BlogPostTags::Table, BlogPostTags::TagId)
                            .to(BlogTags::Table, BlogTags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPostCategories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogPostCategories::PostId).uuid().not_null())
                    .col(ColumnDef::new(BlogPostCategories::CategoryId).uuid().not_null())
                    .col(
                        ColumnDef::new(BlogPostCategories::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(BlogPostCategories::PostId)
                            .col(BlogPostCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_categories_post_id")
                            .from(BlogPostCategories::Table, BlogPostCategories::PostId)
                            .to(BlogPosts::Table, BlogPosts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_categories_category_id")
                            .from(BlogPostCategories::Table, BlogPostCategories::CategoryId)
                            .to(BlogCategories::Table, BlogCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Pages::Title).string().not_null())
                    .col(ColumnDef::new(Pages::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Pages::Body).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Pages::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Pages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPostCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPostTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogAuthors::Table).to_owned())
            .await
    }
}
