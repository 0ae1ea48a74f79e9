//! In-process tests for the SQLite contact store and the service on top
//! of it, each against a fresh database in a temp directory.

use std::sync::Arc;

use chrono::NaiveDate;
use contact_book::book::Book;
use contact_book::edit::add_contact;
use contact_book::{db, migrate, users};
use contact_book_core::clock::FixedClock;
use contact_book_core::filter::ListQuery;
use contact_book_core::models::{Contact, ContactPayload, UserId};
use tempfile::TempDir;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    _tmp: TempDir,
    book: Book,
    alice: UserId,
    bob: UserId,
}

async fn setup_on(today: NaiveDate) -> Fixture {
    let tmp = TempDir::new().unwrap();
    let pool = db::connect_path(&tmp.path().join("contacts.sqlite"))
        .await
        .unwrap();
    migrate::migrate_pool(&pool).await.unwrap();

    let alice = users::create_user(&pool, "alice", "alice@example.com")
        .await
        .unwrap()
        .id;
    let bob = users::create_user(&pool, "bob", "bob@example.com")
        .await
        .unwrap()
        .id;

    Fixture {
        _tmp: tmp,
        book: Book::from_pool(pool, Arc::new(FixedClock(today))),
        alice,
        bob,
    }
}

async fn setup() -> Fixture {
    setup_on(ymd(2024, 1, 28)).await
}

fn payload(first: &str, last: &str, email: &str, phone: &str) -> ContactPayload {
    ContactPayload {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        date_of_birth: ymd(1985, 10, 8),
    }
}

fn born(first: &str, phone: &str, date_of_birth: NaiveDate) -> ContactPayload {
    ContactPayload {
        date_of_birth,
        ..payload(
            first,
            "Doe",
            &format!("{}@example.com", first.to_lowercase()),
            phone,
        )
    }
}

fn ids(contacts: &[Contact]) -> Vec<i64> {
    contacts.iter().map(|c| c.id).collect()
}

fn filters(first: Option<&str>, last: Option<&str>, email: Option<&str>) -> ListQuery {
    ListQuery {
        skip: 0,
        limit: 100,
        first_name: first.map(str::to_string),
        last_name: last.map(str::to_string),
        email: email.map(str::to_string),
    }
}

/// Seeds four contacts owned by alice, ids 1..=4.
async fn seed_toms(f: &Fixture) {
    let svc = f.book.service();
    for p in [
        payload("Tom", "X", "tom1@z.com", "5550001"),
        payload("Tom", "Other", "y@z.com", "5550002"),
        payload("Tom", "Other", "tom3@z.com", "5550003"),
        payload("Ann", "X", "y@z.com", "5550004"),
    ] {
        svc.create(&p, f.alice).await.unwrap();
    }
}

#[tokio::test]
async fn test_create_and_get_roundtrip() {
    let f = setup().await;
    let svc = f.book.service();

    let created = svc
        .create(
            &payload("Buster", "Johns", "buster@meta.ua", "+35428421424"),
            f.alice,
        )
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.user_id, f.alice);

    // reads are not owner-scoped
    let fetched = svc.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
    assert_eq!(svc.get_by_id(99).await.unwrap(), None);
}

#[tokio::test]
async fn test_create_with_unknown_owner_fails() {
    let f = setup().await;
    let result = f
        .book
        .service()
        .create(&payload("A", "B", "a@x.com", "5550001"), UserId(404))
        .await;
    assert!(result.is_err(), "foreign key violation should propagate");
}

#[tokio::test]
async fn test_list_first_name_with_alternatives() {
    let f = setup().await;
    seed_toms(&f).await;

    let found = f
        .book
        .service()
        .list(filters(Some("Tom"), Some("X"), Some("y@z.com")))
        .await
        .unwrap();
    assert_eq!(ids(&found), vec![1, 2]);
}

#[tokio::test]
async fn test_list_first_name_with_single_alternative() {
    let f = setup().await;
    seed_toms(&f).await;
    let svc = f.book.service();

    let by_last = svc
        .list(filters(Some("Tom"), Some("Other"), None))
        .await
        .unwrap();
    assert_eq!(ids(&by_last), vec![2, 3]);

    let by_email = svc
        .list(filters(Some("Tom"), None, Some("y@z.com")))
        .await
        .unwrap();
    assert_eq!(ids(&by_email), vec![2]);

    let alone = svc.list(filters(Some("Tom"), None, None)).await.unwrap();
    assert_eq!(ids(&alone), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_list_last_name_and_email_are_anded() {
    let f = setup().await;
    seed_toms(&f).await;
    let svc = f.book.service();

    let both = svc
        .list(filters(None, Some("X"), Some("y@z.com")))
        .await
        .unwrap();
    assert_eq!(ids(&both), vec![4]);

    let last_only = svc.list(filters(None, Some("X"), None)).await.unwrap();
    assert_eq!(ids(&last_only), vec![1, 4]);

    let email_only = svc.list(filters(None, None, Some("y@z.com"))).await.unwrap();
    assert_eq!(ids(&email_only), vec![2, 4]);
}

#[tokio::test]
async fn test_list_paging_applies_only_without_filters() {
    let f = setup().await;
    seed_toms(&f).await;
    let svc = f.book.service();

    let page = svc
        .list(ListQuery {
            skip: 1,
            limit: 2,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(&page), vec![2, 3]);

    let filtered = svc
        .list(ListQuery {
            skip: 1,
            limit: 1,
            first_name: Some("Tom".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(&filtered), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_verify_email_phone_priority() {
    let f = setup().await;
    let svc = f.book.service();
    svc.create(&payload("A", "B", "a@x.com", "555-0100"), f.alice)
        .await
        .unwrap();
    svc.create(&payload("C", "D", "c@x.com", "555-0200"), f.bob)
        .await
        .unwrap();

    assert_eq!(
        svc.verify_email_phone("a@x.com", "555-0200").await.unwrap(),
        Some("a@x.com".to_string())
    );
    assert_eq!(
        svc.verify_email_phone("new@x.com", "555-0200")
            .await
            .unwrap(),
        Some("555-0200".to_string())
    );
    assert_eq!(
        svc.verify_email_phone("new@x.com", "555-0300")
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_update_is_owner_scoped() {
    let f = setup().await;
    let svc = f.book.service();
    let created = svc
        .create(&payload("A", "B", "a@x.com", "5550001"), f.alice)
        .await
        .unwrap();
    let new = ContactPayload {
        date_of_birth: ymd(1999, 12, 31),
        ..payload("Z", "Y", "z@x.com", "5559999")
    };

    assert_eq!(svc.update(created.id, &new, f.bob).await.unwrap(), None);
    assert_eq!(
        svc.get_by_id(created.id).await.unwrap(),
        Some(created.clone())
    );

    let updated = svc
        .update(created.id, &new, f.alice)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.user_id, f.alice);
    assert_eq!(updated.first_name, "Z");
    assert_eq!(updated.date_of_birth, ymd(1999, 12, 31));
    assert_eq!(svc.get_by_id(created.id).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn test_remove_is_owner_scoped_and_permanent() {
    let f = setup().await;
    let svc = f.book.service();
    let created = svc
        .create(&payload("A", "B", "a@x.com", "5550001"), f.alice)
        .await
        .unwrap();

    assert_eq!(svc.remove(created.id, f.bob).await.unwrap(), None);
    assert!(svc.get_by_id(created.id).await.unwrap().is_some());

    assert_eq!(
        svc.remove(created.id, f.alice).await.unwrap(),
        Some(created.clone())
    );
    assert_eq!(svc.get_by_id(created.id).await.unwrap(), None);
    assert_eq!(svc.remove(created.id, f.alice).await.unwrap(), None);
}

#[tokio::test]
async fn test_upcoming_birthdays_month_bounded() {
    let f = setup_on(ymd(2024, 1, 28)).await;
    let svc = f.book.service();
    svc.create(&born("Thirtieth", "5550001", ymd(1990, 1, 30)), f.alice)
        .await
        .unwrap();
    svc.create(&born("Third", "5550002", ymd(1990, 2, 3)), f.alice)
        .await
        .unwrap();
    svc.create(&born("Today", "5550003", ymd(2001, 1, 28)), f.bob)
        .await
        .unwrap();

    let upcoming = svc.upcoming_birthdays(0, 100).await.unwrap();
    let names: Vec<_> = upcoming.iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(names, vec!["Thirtieth", "Today"]);

    // the slice is taken before the window is applied
    let sliced = svc.upcoming_birthdays(1, 1).await.unwrap();
    assert!(sliced.is_empty());
}

#[tokio::test]
async fn test_add_contact_rejects_duplicates_and_invalid_payloads() {
    let f = setup().await;

    let first = add_contact(&f.book, &payload("A", "B", "a@x.com", "5550001"), f.alice)
        .await
        .unwrap();
    assert_eq!(first.id, 1);

    let dup_email = add_contact(&f.book, &payload("C", "D", "a@x.com", "5550002"), f.bob)
        .await
        .unwrap_err();
    assert_eq!(dup_email.to_string(), "contact with a@x.com already exists");

    let dup_phone = add_contact(&f.book, &payload("C", "D", "c@x.com", "5550001"), f.bob)
        .await
        .unwrap_err();
    assert_eq!(dup_phone.to_string(), "contact with 5550001 already exists");

    let invalid = add_contact(&f.book, &payload("C", "D", "not-an-email", "5550003"), f.bob)
        .await
        .unwrap_err();
    assert!(invalid.to_string().contains("invalid email"));

    assert_eq!(f.book.service().get_by_id(2).await.unwrap(), None);
}
