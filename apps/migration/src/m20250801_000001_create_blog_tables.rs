use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPostTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPostTypes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BlogPostTypes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPosts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogPosts::Title).string().not_null())
                    .col(ColumnDef::new(BlogPosts::Body).text().not_null())
                    .col(ColumnDef::new(BlogPosts::TypeId).big_integer().not_null())
                    .col(ColumnDef::new(BlogPosts::BloggerKind).string().not_null())
                    .col(ColumnDef::new(BlogPosts::BloggerId).uuid().not_null())
                    .col(
                        ColumnDef::new(BlogPosts::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(BlogPosts::PublishedOn).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(BlogPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_posts_type_id")
                            .from(BlogPosts::Table, BlogPosts::TypeId)
                            .to(BlogPostTypes::Table, BlogPostTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index listings read newest-first.
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_created_at")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogTags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogTags::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BlogTags::Label)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPostTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogPostTags::PostId).big_integer().not_null())
                    .col(ColumnDef::new(BlogPostTags::TagId).big_integer().not_null())
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

        // Comments keep no foreign key: removing a post does not cascade
        // into the pluggable comment backend.
        manager
            .create_table(
                Table::create()
                    .table(BlogComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogComments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogComments::PostId).big_integer().not_null())
                    .col(ColumnDef::new(BlogComments::AuthorName).string().not_null())
                    .col(ColumnDef::new(BlogComments::Body).text().not_null())
                    .col(
                        ColumnDef::new(BlogComments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_comments_post_id")
                    .table(BlogComments::Table)
                    .col(BlogComments::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPostTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPostTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlogPostTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    Title,
    Body,
    TypeId,
    BloggerKind,
    BloggerId,
    IsPublished,
    PublishedOn,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BlogTags {
    Table,
    Id,
    Label,
}

#[derive(DeriveIden)]
enum BlogPostTags {
    Table,
    PostId,
    TagId,
}

#[derive(DeriveIden)]
enum BlogComments {
    Table,
    Id,
    PostId,
    AuthorName,
    Body,
    CreatedAt,
}
