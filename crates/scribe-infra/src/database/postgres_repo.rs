//! PostgreSQL repository implementations.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, JoinType, NotSet, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait, TryIntoModel,
};

use scribe_core::domain::{Comment, Post, PostType};
use scribe_core::error::RepoError;
use scribe_core::ports::{
    CommentStore, PostFilter, PostRepository, SavedPost, TagStore, TypeRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::post_type::{self, Entity as PostTypeEntity};
use super::entity::tag::{self, Entity as TagEntity};

fn query_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

fn constraint_or_query(e: sea_orm::DbErr) -> RepoError {
    let message = e.to_string();
    if message.contains("duplicate") || message.contains("unique") {
        RepoError::Constraint(message)
    } else {
        RepoError::Query(message)
    }
}

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.map(Into::into))
    }

    async fn save(&self, mut post: Post) -> Result<SavedPost, RepoError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        let now = Utc::now();

        if post.id == 0 {
            post.created_at = now;
            post.published_on = None;
        } else {
            // Row lock so the first-publish decision runs against the
            // committed prior state, not a stale copy.
            let stored = PostEntity::find_by_id(post.id)
                .lock_exclusive()
                .one(&txn)
                .await
                .map_err(query_err)?
                .ok_or(RepoError::NotFound)?;
            post.created_at = stored.created_at.into();
            post.published_on = stored.published_on.map(Into::into);
        }

        let mut newly_published = false;
        if post.is_published && post.published_on.is_none() {
            post.published_on = Some(now);
            newly_published = true;
        }
        post.updated_at = now;

        let active: post::ActiveModel = post.into();
        let saved = active.save(&txn).await.map_err(constraint_or_query)?;
        let model = saved.try_into_model().map_err(query_err)?;
        txn.commit().await.map_err(query_err)?;

        Ok(SavedPost {
            post: model.into(),
            newly_published,
        })
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find();
        if let Some(type_id) = filter.type_id {
            query = query.filter(post::Column::TypeId.eq(type_id));
        }
        if let Some(ids) = &filter.ids {
            query = query.filter(post::Column::Id.is_in(ids.iter().copied()));
        }

        let models = query
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL post type repository. The unique index on `name` is the
/// hard constraint behind find-or-create.
pub struct PostgresTypeRepository {
    db: DbConn,
}

impl PostgresTypeRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TypeRepository for PostgresTypeRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<PostType>, RepoError> {
        let result = PostTypeEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<PostType>, RepoError> {
        let result = PostTypeEntity::find()
            .filter(post_type::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.map(Into::into))
    }

    async fn insert(&self, name: &str) -> Result<PostType, RepoError> {
        let active = post_type::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        };
        let model = active.insert(&self.db).await.map_err(constraint_or_query)?;
        Ok(model.into())
    }

    async fn list(&self) -> Result<Vec<PostType>, RepoError> {
        let models = PostTypeEntity::find()
            .order_by_asc(post_type::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL tag storage: a tags table plus a post/tag junction.
pub struct PostgresTagStore {
    db: DbConn,
}

impl PostgresTagStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Get-or-create a tag row, falling back to a re-read when a
    /// concurrent writer wins the unique-label race.
    async fn find_or_insert_tag(&self, label: &str) -> Result<tag::Model, RepoError> {
        if let Some(existing) = TagEntity::find()
            .filter(tag::Column::Label.eq(label))
            .one(&self.db)
            .await
            .map_err(query_err)?
        {
            return Ok(existing);
        }

        let active = tag::ActiveModel {
            id: NotSet,
            label: Set(label.to_string()),
        };
        match active.insert(&self.db).await {
            Ok(created) => Ok(created),
            Err(e) => {
                let err = constraint_or_query(e);
                if !matches!(err, RepoError::Constraint(_)) {
                    return Err(err);
                }
                match TagEntity::find()
                    .filter(tag::Column::Label.eq(label))
                    .one(&self.db)
                    .await
                    .map_err(query_err)?
                {
                    Some(winner) => Ok(winner),
                    None => Err(err),
                }
            }
        }
    }
}

#[async_trait]
impl TagStore for PostgresTagStore {
    async fn tags_for(&self, post_id: i64) -> Result<Vec<String>, RepoError> {
        let models = TagEntity::find()
            .join(JoinType::InnerJoin, tag::Relation::PostTag.def())
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Label)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(models.into_iter().map(|model| model.label).collect())
    }

    async fn posts_tagged(&self, label: &str) -> Result<Vec<i64>, RepoError> {
        let models = PostTagEntity::find()
            .join(JoinType::InnerJoin, post_tag::Relation::Tag.def())
            .filter(tag::Column::Label.eq(label))
            .all(&self.db)
            .await
            .map_err(query_err)?;
        let mut ids: Vec<i64> = models.into_iter().map(|model| model.post_id).collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn set_tags(&self, post_id: i64, labels: &[String]) -> Result<(), RepoError> {
        let normalized: BTreeSet<String> = labels
            .iter()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect();

        let mut tag_ids = Vec::with_capacity(normalized.len());
        for label in &normalized {
            tag_ids.push(self.find_or_insert_tag(label).await?.id);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&txn)
            .await
            .map_err(query_err)?;
        for tag_id in tag_ids {
            let junction = post_tag::ActiveModel {
                post_id: Set(post_id),
                tag_id: Set(tag_id),
            };
            PostTagEntity::insert(junction)
                .exec_without_returning(&txn)
                .await
                .map_err(query_err)?;
        }
        txn.commit().await.map_err(query_err)?;
        Ok(())
    }
}

/// PostgreSQL comment backend.
pub struct PostgresCommentStore {
    db: DbConn,
}

impl PostgresCommentStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentStore for PostgresCommentStore {
    async fn comments_for(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let models = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn add(&self, comment: Comment) -> Result<Comment, RepoError> {
        let active: comment::ActiveModel = comment.into();
        let model = active.insert(&self.db).await.map_err(query_err)?;
        Ok(model.into())
    }
}
