//! Integration tests for the secret DAL over SQLite.

mod common;

use common::test_db::{reopen, TestDatabase};
use proptest::prelude::*;
use secretkeeper::{DalErrorKind, Secret, SecretDal, SecretQuery};

#[tokio::test]
async fn end_to_end_create_find_delete() {
    let db = TestDatabase::new("end_to_end").await;
    let secret = Secret::new("abc", "topsecret");

    db.dal.create_secret(&secret).await.unwrap();

    let found = db.dal.find_secret(SecretQuery::find_by_secret_id("abc")).await.unwrap();
    assert_eq!(found, Secret::new("abc", "topsecret"));

    db.dal.delete_secret(SecretQuery::delete_by_secret_id("abc")).await.unwrap();

    let result = db.dal.find_secret(SecretQuery::find_by_secret_id("abc")).await;
    let err = result.as_ref().unwrap_err();
    assert_eq!(err.kind(), DalErrorKind::UnknownSecret);
    assert_eq!(result.unwrap_or_default(), Secret::default());
}

#[tokio::test]
async fn find_missing_secret_is_unknown_not_storage() {
    let db = TestDatabase::new("find_missing").await;

    let err = db.dal.find_secret(SecretQuery::find_by_secret_id("nonexistent")).await.unwrap_err();
    assert_eq!(err.kind(), DalErrorKind::UnknownSecret);
    assert!(err.store_error().is_none());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let db = TestDatabase::new("delete_idempotent").await;
    db.dal.create_secret(&Secret::new("abc", "v")).await.unwrap();

    db.dal.delete_secret(SecretQuery::delete_by_secret_id("abc")).await.unwrap();
    db.dal.delete_secret(SecretQuery::delete_by_secret_id("abc")).await.unwrap();
    db.dal.delete_secret(SecretQuery::delete_by_secret_id("never-existed")).await.unwrap();
}

#[tokio::test]
async fn delete_leaves_other_secrets_alone() {
    let db = TestDatabase::new("delete_scoped").await;
    db.dal.create_secret(&Secret::new("a", "1")).await.unwrap();
    db.dal.create_secret(&Secret::new("b", "2")).await.unwrap();

    db.dal.delete_secret(SecretQuery::delete_by_secret_id("a")).await.unwrap();

    let b = db.dal.find_secret(SecretQuery::find_by_secret_id("b")).await.unwrap();
    assert_eq!(b.value, "2");
}

#[tokio::test]
async fn mismatched_queries_are_bad_queries() {
    let db = TestDatabase::new("bad_query").await;
    db.dal.create_secret(&Secret::new("abc", "v")).await.unwrap();

    let err = db.dal.find_secret(SecretQuery::delete_by_secret_id("abc")).await.unwrap_err();
    assert_eq!(err.kind(), DalErrorKind::BadQuery);

    let err = db.dal.delete_secret(SecretQuery::find_by_secret_id("abc")).await.unwrap_err();
    assert_eq!(err.kind(), DalErrorKind::BadQuery);

    // The rejected delete must not have touched the row
    assert!(db.dal.find_secret(SecretQuery::find_by_secret_id("abc")).await.is_ok());
}

#[tokio::test]
async fn bad_query_is_reported_even_when_storage_is_down() {
    let db = TestDatabase::new("bad_query_broken").await;
    db.break_connection().await;

    let err = db.dal.find_secret(SecretQuery::delete_by_secret_id("abc")).await.unwrap_err();
    assert_eq!(err.kind(), DalErrorKind::BadQuery);
}

#[tokio::test]
async fn duplicate_create_is_storage_error_and_keeps_original() {
    let db = TestDatabase::new("duplicate").await;
    db.dal.create_secret(&Secret::new("abc", "original")).await.unwrap();

    let err = db.dal.create_secret(&Secret::new("abc", "replacement")).await.unwrap_err();
    assert_eq!(err.kind(), DalErrorKind::Storage);
    assert!(err.store_error().is_some_and(|e| e.is_unique_violation()));

    let found = db.dal.find_secret(SecretQuery::find_by_secret_id("abc")).await.unwrap();
    assert_eq!(found, Secret::new("abc", "original"));
}

#[tokio::test]
async fn broken_storage_surfaces_storage_errors() {
    let db = TestDatabase::new("broken").await;
    db.break_connection().await;

    let err = db.dal.create_secret(&Secret::new("abc", "v")).await.unwrap_err();
    assert_eq!(err.kind(), DalErrorKind::Storage);

    let err = db.dal.find_secret(SecretQuery::find_by_secret_id("abc")).await.unwrap_err();
    assert_eq!(err.kind(), DalErrorKind::Storage);

    let err = db.dal.delete_secret(SecretQuery::delete_by_secret_id("abc")).await.unwrap_err();
    assert_eq!(err.kind(), DalErrorKind::Storage);
}

#[tokio::test]
async fn concurrent_creates_with_same_id_let_exactly_one_win() {
    let db = TestDatabase::new("concurrent").await;
    let other = reopen(&db).await;

    let first = Secret::new("race", "from-first");
    let second = Secret::new("race", "from-second");
    let (a, b) = tokio::join!(db.dal.create_secret(&first), other.create_secret(&second));

    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1, "exactly one create must succeed");
    let loser = a.err().or(b.err()).unwrap();
    assert_eq!(loser.kind(), DalErrorKind::Storage);

    let stored = db.dal.find_secret(SecretQuery::find_by_secret_id("race")).await.unwrap();
    assert!(stored == first || stored == second);
}

#[tokio::test]
async fn writes_are_visible_across_connections() {
    let db = TestDatabase::new("no_cache").await;
    let other = reopen(&db).await;

    db.dal.create_secret(&Secret::new("abc", "v1")).await.unwrap();
    assert_eq!(other.find_secret(SecretQuery::find_by_secret_id("abc")).await.unwrap().value, "v1");

    // Rotation is delete-then-create by the caller
    other.delete_secret(SecretQuery::delete_by_secret_id("abc")).await.unwrap();
    other.create_secret(&Secret::new("abc", "v2")).await.unwrap();
    assert_eq!(db.dal.find_secret(SecretQuery::find_by_secret_id("abc")).await.unwrap().value, "v2");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn create_then_find_returns_same_secret(
        secret_id in "[A-Za-z0-9_.:-]{1,64}",
        value in "[^\\x00]{0,256}",
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let found = runtime.block_on(async {
            let db = TestDatabase::new("roundtrip").await;
            db.dal.create_secret(&Secret::new(secret_id.clone(), value.clone())).await.unwrap();
            db.dal.find_secret(SecretQuery::find_by_secret_id(secret_id.clone())).await.unwrap()
        });

        prop_assert_eq!(found, Secret::new(secret_id, value));
    }
}
