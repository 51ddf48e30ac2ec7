//! Tests for url_db (use in-memory DB helper from db).

use crate::url_db::db::open_memory;
use crate::url_db::{InsertUrl, NewCheck, UrlDb};
use std::collections::HashSet;

fn check(status_code: i64, h1: &str) -> NewCheck {
    NewCheck {
        status_code,
        h1: Some(h1.to_string()),
        title: None,
        description: None,
    }
}

#[tokio::test]
async fn insert_then_existing_returns_same_id() {
    let db = open_memory().await.unwrap();
    let first = db.insert_url("https://example.com").await.unwrap();
    let InsertUrl::Inserted(id) = first else {
        panic!("expected Inserted, got {first:?}");
    };
    let second = db.insert_url("https://example.com").await.unwrap();
    assert_eq!(second, InsertUrl::Existing(id));
    assert_eq!(db.count_urls().await.unwrap(), 1);
}

#[tokio::test]
async fn unique_constraint_rejects_raw_duplicate() {
    let db = open_memory().await.unwrap();
    db.insert_url("https://example.com").await.unwrap();
    let err = sqlx::query("INSERT INTO urls (name, created_at) VALUES ('https://example.com', 0)")
        .execute(&db.pool)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(e) => assert!(e.is_unique_violation()),
        other => panic!("expected database error, got {other:?}"),
    }
}

#[tokio::test]
async fn find_url_by_id_and_name() {
    let db = open_memory().await.unwrap();
    assert!(db.find_url(1).await.unwrap().is_none());

    let InsertUrl::Inserted(id) = db.insert_url("https://a.example.com").await.unwrap() else {
        panic!("expected Inserted");
    };
    let url = db.find_url(id).await.unwrap().expect("url exists");
    assert_eq!(url.id, id);
    assert_eq!(url.name, "https://a.example.com");
    assert!(url.created_at > 0);

    let by_name = db
        .find_url_by_name("https://a.example.com")
        .await
        .unwrap()
        .expect("url exists");
    assert_eq!(by_name, url);
    assert!(db.find_url(id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn list_urls_newest_first_with_last_check() {
    let db = open_memory().await.unwrap();
    assert!(db.list_urls().await.unwrap().is_empty());

    let InsertUrl::Inserted(a) = db.insert_url("https://a.com").await.unwrap() else {
        panic!("expected Inserted");
    };
    let InsertUrl::Inserted(b) = db.insert_url("https://b.com").await.unwrap() else {
        panic!("expected Inserted");
    };
    db.insert_check(a, &check(500, "first")).await.unwrap();
    db.insert_check(a, &check(200, "second")).await.unwrap();

    let list = db.list_urls().await.unwrap();
    assert_eq!(list.len(), 2);
    // Newest first
    assert_eq!(list[0].url.id, b);
    assert_eq!(list[0].last_check_at, None);
    assert_eq!(list[0].last_status_code, None);
    assert_eq!(list[1].url.id, a);
    assert!(list[1].last_check_at.is_some());
    // Status of the latest check, not the largest status.
    assert_eq!(list[1].last_status_code, Some(200));
}

#[tokio::test]
async fn list_checks_newest_first_with_ascending_seq() {
    let db = open_memory().await.unwrap();
    let InsertUrl::Inserted(a) = db.insert_url("https://a.com").await.unwrap() else {
        panic!("expected Inserted");
    };
    let InsertUrl::Inserted(b) = db.insert_url("https://b.com").await.unwrap() else {
        panic!("expected Inserted");
    };

    let c1 = db.insert_check(a, &check(200, "one")).await.unwrap();
    db.insert_check(b, &check(200, "other url")).await.unwrap();
    let c2 = db.insert_check(a, &check(301, "two")).await.unwrap();
    let c3 = db.insert_check(a, &check(404, "three")).await.unwrap();

    let checks = db.list_checks(a).await.unwrap();
    let ids: Vec<_> = checks.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![c3, c2, c1]);
    let seqs: Vec<_> = checks.iter().map(|c| c.seq).collect();
    assert_eq!(seqs, vec![3, 2, 1]);
    assert_eq!(checks[2].h1.as_deref(), Some("one"));
    assert!(checks.iter().all(|c| c.url_id == a));

    // Numbering is per URL.
    let other = db.list_checks(b).await.unwrap();
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].seq, 1);
}

#[tokio::test]
async fn check_fields_roundtrip() {
    let db = open_memory().await.unwrap();
    let InsertUrl::Inserted(id) = db.insert_url("https://example.com").await.unwrap() else {
        panic!("expected Inserted");
    };
    let new_check = NewCheck {
        status_code: 200,
        h1: Some("Test Header".to_string()),
        title: Some("Test Page".to_string()),
        description: None,
    };
    let check_id = db.insert_check(id, &new_check).await.unwrap();

    let checks = db.list_checks(id).await.unwrap();
    assert_eq!(checks.len(), 1);
    let stored = &checks[0];
    assert_eq!(stored.id, check_id);
    assert_eq!(stored.status_code, 200);
    assert_eq!(stored.h1.as_deref(), Some("Test Header"));
    assert_eq!(stored.title.as_deref(), Some("Test Page"));
    assert_eq!(stored.description, None);
}

#[tokio::test]
async fn check_for_unknown_url_rejected_by_foreign_key() {
    let db = open_memory().await.unwrap();
    assert!(db.insert_check(42, &check(200, "orphan")).await.is_err());
    assert!(db.list_checks(42).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_inserts_of_distinct_names_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let db = UrlDb::open_at(dir.path().join("urls.db"), 8).await.unwrap();

    for round in 0..5 {
        let mut handles = Vec::new();
        for i in 0..16 {
            let db = db.clone();
            let name = format!("https://site{round}-{i}.example.com");
            handles.push(tokio::spawn(async move { db.insert_url(&name).await }));
        }
        for handle in handles {
            let inserted = handle.await.unwrap().expect("insert must not fail under contention");
            assert!(matches!(inserted, InsertUrl::Inserted(_)), "{inserted:?}");
        }
    }
    assert_eq!(db.count_urls().await.unwrap(), 80);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_inserts_of_same_name_collapse_to_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let db = UrlDb::open_at(dir.path().join("urls.db"), 8).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            db.insert_url("https://example.com").await
        }));
    }

    let mut inserted = 0;
    let mut ids = HashSet::new();
    for handle in handles {
        match handle.await.unwrap().expect("insert must not fail under contention") {
            InsertUrl::Inserted(id) => {
                inserted += 1;
                ids.insert(id);
            }
            InsertUrl::Existing(id) => {
                ids.insert(id);
            }
        }
    }
    assert_eq!(inserted, 1);
    assert_eq!(ids.len(), 1);
    assert_eq!(db.count_urls().await.unwrap(), 1);
}
