//! Integration tests for the PostgreSQL store.
//!
//! Exercises the repository layer against a real database. Run with
//! `DATABASE_URL` pointing at a disposable server and `--ignored`.

use assert_matches::assert_matches;
use sqlx::PgPool;
use taskdeck_core::project::NewProject;
use taskdeck_core::todo::{NewTodo, Priority, UpdateTodo};
use taskdeck_core::types::DbId;
use taskdeck_db::models::user::CreateUser;
use taskdeck_db::{PgStore, Store, StoreError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(store: &PgStore, email: &str) -> DbId {
    store
        .create_user(&CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            full_name: None,
        })
        .await
        .expect("user creation should succeed")
        .id
}

fn new_todo(title: &str) -> NewTodo {
    NewTodo {
        title: title.to_string(),
        priority: Priority::Low,
        project_id: None,
        due_date: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_todo_applies_defaults(pool: PgPool) {
    let store = PgStore::new(pool);
    let owner = create_user(&store, "defaults@test.com").await;

    let todo = store.create_todo(owner, &new_todo("Buy milk")).await.unwrap();

    assert_eq!(todo.title, "Buy milk");
    assert!(!todo.completed);
    assert_eq!(todo.priority, Priority::Low);
    assert_eq!(todo.user_id, owner);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_list_is_scoped_and_joined(pool: PgPool) {
    let store = PgStore::new(pool);
    let alice = create_user(&store, "alice@test.com").await;
    let bob = create_user(&store, "bob@test.com").await;

    let project = store
        .create_project(
            alice,
            &NewProject {
                name: "Errands".into(),
                color: "#22c55e".into(),
            },
        )
        .await
        .unwrap();
    let with_project = NewTodo {
        project_id: Some(project.id),
        ..new_todo("older")
    };
    store.create_todo(alice, &with_project).await.unwrap();
    store.create_todo(alice, &new_todo("newer")).await.unwrap();
    store.create_todo(bob, &new_todo("bob's")).await.unwrap();

    let listed = store.list_todos(alice).await.unwrap();
    let titles: Vec<_> = listed.iter().map(|t| t.todo.title.as_str()).collect();
    assert_eq!(titles, ["newer", "older"]);
    assert_eq!(listed[1].project.as_ref().map(|p| p.name.as_str()), Some("Errands"));
    assert!(listed[0].project.is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_partial_update_and_clear(pool: PgPool) {
    let store = PgStore::new(pool);
    let owner = create_user(&store, "update@test.com").await;
    let project = store
        .create_project(
            owner,
            &NewProject {
                name: "Work".into(),
                color: "#3b82f6".into(),
            },
        )
        .await
        .unwrap();
    let todo = store
        .create_todo(
            owner,
            &NewTodo {
                priority: Priority::High,
                project_id: Some(project.id),
                ..new_todo("Ship it")
            },
        )
        .await
        .unwrap();

    let completed = store
        .update_todo(
            owner,
            todo.id,
            &UpdateTodo {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("row should match");
    assert!(completed.completed);
    assert_eq!(completed.title, "Ship it");
    assert_eq!(completed.priority, Priority::High);
    assert_eq!(completed.project_id, Some(project.id));

    let cleared = store
        .update_todo(
            owner,
            todo.id,
            &UpdateTodo {
                project_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("row should match");
    assert_eq!(cleared.project_id, None);
    assert!(cleared.completed);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_other_owner_cannot_touch_row(pool: PgPool) {
    let store = PgStore::new(pool);
    let alice = create_user(&store, "owner@test.com").await;
    let mallory = create_user(&store, "mallory@test.com").await;
    let todo = store.create_todo(alice, &new_todo("private")).await.unwrap();

    let patch = UpdateTodo {
        title: Some("pwned".into()),
        ..Default::default()
    };
    assert!(store.update_todo(mallory, todo.id, &patch).await.unwrap().is_none());
    assert!(!store.delete_todo(mallory, todo.id).await.unwrap());

    let listed = store.list_todos(alice).await.unwrap();
    assert_eq!(listed[0].todo.title, "private");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_is_idempotent(pool: PgPool) {
    let store = PgStore::new(pool);
    let owner = create_user(&store, "delete@test.com").await;
    let todo = store.create_todo(owner, &new_todo("gone")).await.unwrap();

    assert!(store.delete_todo(owner, todo.id).await.unwrap());
    assert!(!store.delete_todo(owner, todo.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_email_is_conflict(pool: PgPool) {
    let store = PgStore::new(pool);
    create_user(&store, "dup@test.com").await;

    let result = store
        .create_user(&CreateUser {
            email: "dup@test.com".into(),
            password_hash: "x".into(),
            full_name: None,
        })
        .await;
    assert_matches!(result, Err(StoreError::Conflict(_)));
}
