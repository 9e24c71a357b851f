use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Status,
    FirstPublishedAt,
    ViewCount,
}

#[derive(DeriveIden)]
enum BlogPostCategories {
    Table,
    CategoryId,
}

#[derive(DeriveIden)]
enum BlogPostTags {
    Table,
    TagId,
}

#[derive(DeriveIden)]
enum Packages {
    Table,
    GuideId,
}

#[derive(DeriveIden)]
enum PackageLocations {
    Table,
    LocationId,
}

#[derive(DeriveIden)]
enum Schedules {
    Table,
    GuideId,
    LocationId,
    StartDate,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    GuideId,
    IsApproved,
}

#[derive(DeriveIden)]
enum GalleryItems {
    Table,
    GuideId,
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    GuideId,
}

const INDEX_NAMES: [&str; 10] = [
    "idx_blog_posts_status_published",
    "idx_blog_posts_view_count",
    "idx_blog_post_categories_category_id",
    "idx_blog_post_tags_tag_id",
    "idx_packages_guide_id",
    "idx_package_locations_location_id",
    "idx_schedules_guide_start",
    "idx_schedules_location_id",
    "idx_reviews_guide_approved",
    "idx_gallery_items_guide_id",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Published listing, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_status_published")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::Status)
                    .col(BlogPosts::FirstPublishedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_view_count")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::ViewCount)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_post_categories_category_id")
                    .table(BlogPostCategories::Table)
                    .col(BlogPostCategories::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_post_tags_tag_id")
                    .table(BlogPostTags::Table)
                    .col(BlogPostTags::TagId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_packages_guide_id")
                    .table(Packages::Table)
                    .col(Packages::GuideId)
                    .to_owned(),
            )
            .await?;

        // Directory location filter walks package_locations by location
        manager
            .create_index(
                Index::create()
                    .name("idx_package_locations_location_id")
                    .table(PackageLocations::Table)
                    .col(PackageLocations::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_guide_start")
                    .table(Schedules::Table)
                    .col(Schedules::GuideId)
                    .col(Schedules::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_location_id")
                    .table(Schedules::Table)
                    .col(Schedules::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_guide_approved")
                    .table(Reviews::Table)
                    .col(Reviews::GuideId)
                    .col(Reviews::IsApproved)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gallery_items_guide_id")
                    .table(GalleryItems::Table)
                    .col(GalleryItems::GuideId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_videos_guide_id")
                    .table(Videos::Table)
                    .col(Videos::GuideId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_videos_guide_id").to_owned())
            .await?;
        for name in INDEX_NAMES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).to_owned())
                .await?;
        }

        Ok(())
    }
}
