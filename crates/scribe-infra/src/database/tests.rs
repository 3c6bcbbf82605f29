//! Mock-database tests for the PostgreSQL repositories.

use sea_orm::{DatabaseBackend, MockDatabase};

use scribe_core::domain::Post;
use scribe_core::error::RepoError;
use scribe_core::ports::{PostRepository, TypeRepository};

use super::entity::{post, post_type};
use super::postgres_repo::{PostgresPostRepository, PostgresTypeRepository};

#[tokio::test]
async fn finds_a_post_by_id_and_maps_it_to_the_domain() {
    let now = chrono::Utc::now();
    let blogger_id = uuid::Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: 42,
            title: "Test Post".to_owned(),
            body: "A sufficiently long body.".to_owned(),
            type_id: 1,
            blogger_kind: "user".to_owned(),
            blogger_id,
            is_published: true,
            published_on: Some(now.into()),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(42).await.unwrap();
    let post = result.unwrap();
    assert_eq!(post.id, 42);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.blogger.kind, "user");
    assert_eq!(post.blogger.id, blogger_id);
    assert!(post.published_on.is_some());
}

#[tokio::test]
async fn finds_a_type_by_name() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_type::Model {
            id: 2,
            name: "press".to_owned(),
        }]])
        .into_connection();

    let repo = PostgresTypeRepository::new(db);

    let found = repo.find_by_name("press").await.unwrap().unwrap();
    assert_eq!(found.id, 2);
    assert_eq!(found.name, "press");
}

#[tokio::test]
async fn duplicate_type_names_surface_as_constraint_violations() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(vec![sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"blog_post_types_name_key\""
                .to_owned(),
        )])
        .into_connection();

    let repo = PostgresTypeRepository::new(db);

    let error = repo.insert("press").await.unwrap_err();
    assert!(matches!(error, RepoError::Constraint(_)));
}
