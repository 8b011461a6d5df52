use chrono::{Duration, Utc};

use sib_api::domain::repository::{OtpRepository, RecordRepository};
use sib_api::infra::db::{DbOtpRepository, DbRecordRepository};

use crate::helpers::{seed_otp, sqlite_db};

// ── DbRecordRepository ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_assign_ids_and_round_trip_records() {
    let repo = DbRecordRepository {
        db: sqlite_db().await,
    };

    let now = Utc::now();
    let first = repo.insert("first", now).await.unwrap();
    let second = repo.insert("second", now).await.unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(first.created_at, first.updated_at);

    let all = repo.list_all().await.unwrap();
    let texts: Vec<&str> = all.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);

    let found = repo.find_by_id(second.id).await.unwrap().unwrap();
    assert_eq!(found.text, "second");
}

#[tokio::test]
async fn should_report_missing_rows_without_error() {
    let repo = DbRecordRepository {
        db: sqlite_db().await,
    };

    assert!(repo.find_by_id(9999).await.unwrap().is_none());
    assert!(!repo.update_text(9999, "x", Utc::now()).await.unwrap());
    assert!(!repo.delete(9999).await.unwrap());
}

#[tokio::test]
async fn should_update_text_and_timestamp_only() {
    let repo = DbRecordRepository {
        db: sqlite_db().await,
    };

    let created = repo.insert("draft", Utc::now()).await.unwrap();
    let later = created.created_at + Duration::seconds(5);
    assert!(repo.update_text(created.id, "final", later).await.unwrap());

    let updated = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(updated.text, "final");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > updated.created_at);
}

#[tokio::test]
async fn should_delete_record_once() {
    let repo = DbRecordRepository {
        db: sqlite_db().await,
    };

    let record = repo.insert("temp", Utc::now()).await.unwrap();
    assert!(repo.delete(record.id).await.unwrap());
    assert!(!repo.delete(record.id).await.unwrap());
    assert!(repo.list_all().await.unwrap().is_empty());
}

// ── DbOtpRepository ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_redeem_fresh_code_exactly_once() {
    let db = sqlite_db().await;
    seed_otp(&db, "123456", false, Utc::now() + Duration::hours(1)).await;
    let repo = DbOtpRepository { db };

    assert!(repo.redeem("123456", Utc::now()).await.unwrap());
    assert!(!repo.redeem("123456", Utc::now()).await.unwrap());

    let otp = repo.find_by_code("123456").await.unwrap().unwrap();
    assert!(otp.used);
}

#[tokio::test]
async fn should_not_redeem_expired_or_unknown_code() {
    let db = sqlite_db().await;
    seed_otp(&db, "expired", false, Utc::now() - Duration::hours(1)).await;
    let repo = DbOtpRepository { db };

    assert!(!repo.redeem("expired", Utc::now()).await.unwrap());
    assert!(!repo.redeem("unknown", Utc::now()).await.unwrap());

    let otp = repo.find_by_code("expired").await.unwrap().unwrap();
    assert!(!otp.used, "expired code must not be flipped to used");
    assert!(repo.find_by_code("unknown").await.unwrap().is_none());
}

#[tokio::test]
async fn should_let_only_one_concurrent_redemption_win() {
    let db = sqlite_db().await;
    seed_otp(&db, "race", false, Utc::now() + Duration::hours(1)).await;

    let a = DbOtpRepository { db: db.clone() };
    let b = DbOtpRepository { db };
    let now = Utc::now();
    let (first, second) = tokio::join!(a.redeem("race", now), b.redeem("race", now));

    let wins = [first.unwrap(), second.unwrap()]
        .into_iter()
        .filter(|won| *won)
        .count();
    assert_eq!(wins, 1);
}
