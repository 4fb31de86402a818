//! Tests for the user service.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserRepository;
use mockall::predicate::eq;
use rstest::rstest;

fn make_service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

#[tokio::test]
async fn list_users_returns_repository_order() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_all_sorted_by_last_name()
        .times(1)
        .return_once(|| {
            Ok(vec![
                User::new(UserId::new(1), "Doe", "Joe"),
                User::new(UserId::new(3), "First", "Joe"),
                User::new(UserId::new(2), "Second", "Joe"),
            ])
        });

    let users = make_service(repo).list_users().await.expect("list succeeds");
    let last_names: Vec<&str> = users.iter().map(User::last_name).collect();
    assert_eq!(last_names, ["Doe", "First", "Second"]);
}

#[tokio::test]
async fn find_user_returns_stored_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(UserId::new(5)))
        .times(1)
        .return_once(|id| Ok(Some(User::new(id, "User", "One"))));

    let user = make_service(repo)
        .find_user(UserId::new(5))
        .await
        .expect("user exists");
    assert_eq!(user.last_name(), "User");
    assert_eq!(user.first_name(), "One");
}

#[tokio::test]
async fn find_user_reports_missing_id() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = make_service(repo)
        .find_user(UserId::new(1))
        .await
        .expect_err("missing user");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "User with id = 1 not found");
}

#[tokio::test]
async fn create_user_checks_example_then_saves() {
    let mut repo = MockUserRepository::new();
    let mut sequence = mockall::Sequence::new();
    repo.expect_exists_by_example()
        .withf(|example| {
            example.last_name.as_deref() == Some("last")
                && example.first_name.as_deref() == Some("name")
        })
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_| Ok(false));
    repo.expect_save()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|user| Ok(user.clone().with_id(UserId::new(1))));

    let user = make_service(repo)
        .create_user(NewUser::new("last", "name"))
        .await
        .expect("create succeeds");
    assert_eq!(user.id(), UserId::new(1));
    assert_eq!(user.last_name(), "last");
    assert_eq!(user.first_name(), "name");
}

#[tokio::test]
async fn create_user_rejects_duplicates_without_saving() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_example()
        .times(1)
        .return_once(|_| Ok(true));
    repo.expect_save().never();

    let error = make_service(repo)
        .create_user(NewUser::new("last", "name"))
        .await
        .expect_err("duplicate rejected");
    assert_eq!(error.code(), ErrorCode::AlreadyExists);
    assert_eq!(error.message(), "User last name exists.");
}

#[tokio::test]
async fn delete_user_removes_existing_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_id()
        .with(eq(UserId::new(4)))
        .times(1)
        .return_once(|_| Ok(true));
    repo.expect_delete_by_id()
        .with(eq(UserId::new(4)))
        .times(1)
        .return_once(|_| Ok(()));

    make_service(repo)
        .delete_user(UserId::new(4))
        .await
        .expect("delete succeeds");
}

#[tokio::test]
async fn delete_user_reports_missing_id_without_deleting() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_id().times(1).return_once(|_| Ok(false));
    repo.expect_delete_by_id().never();

    let error = make_service(repo)
        .delete_user(UserId::new(1))
        .await
        .expect_err("missing user");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "User with id = 1 not found");
}

#[rstest]
#[case(UserPersistenceError::connection("database unavailable"))]
#[case(UserPersistenceError::query("database error"))]
#[case(UserPersistenceError::unique_violation("users_last_name_first_name_key"))]
#[tokio::test]
async fn persistence_failures_map_to_internal_errors(#[case] failure: UserPersistenceError) {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_example()
        .times(1)
        .return_once(|_| Ok(false));
    repo.expect_save().times(1).return_once(move |_| Err(failure));

    let error = make_service(repo)
        .create_user(NewUser::new("Doe", "Joe"))
        .await
        .expect_err("persistence failure");
    assert_eq!(error.code(), ErrorCode::InternalError);
}
