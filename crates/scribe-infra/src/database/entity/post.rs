//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use scribe_core::domain::AuthorRef;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub type_id: i64,
    pub blogger_kind: String,
    pub blogger_id: Uuid,
    pub is_published: bool,
    pub published_on: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post_type::Entity",
        from = "Column::TypeId",
        to = "super::post_type::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    PostType,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTag,
}

impl Related<super::post_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostType.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM model to the domain post. Tags live in the tag
/// store and are hydrated separately.
impl From<Model> for scribe_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            body: model.body,
            type_id: model.type_id,
            blogger: AuthorRef::new(model.blogger_kind, model.blogger_id),
            tags: Vec::new(),
            is_published: model.is_published,
            published_on: model.published_on.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from the domain post to a SeaORM active model. An unsaved
/// post (`id == 0`) leaves the primary key unset so the sequence assigns
/// it.
impl From<scribe_core::domain::Post> for ActiveModel {
    fn from(post: scribe_core::domain::Post) -> Self {
        Self {
            id: if post.id == 0 { NotSet } else { Set(post.id) },
            title: Set(post.title),
            body: Set(post.body),
            type_id: Set(post.type_id),
            blogger_kind: Set(post.blogger.kind),
            blogger_id: Set(post.blogger.id),
            is_published: Set(post.is_published),
            published_on: Set(post.published_on.map(Into::into)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
