use chrono::NaiveDate;

use vacancy::model::{Customer, Hotel};
use vacancy::service::Service;
use vacancy::store::JsonStore;
use vacancy::writer::{self, WriterHandle};
use vacancy::Error;

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

async fn handle_in(dir: &tempfile::TempDir) -> WriterHandle {
    writer::spawn(Service::new(JsonStore::new(dir.path())))
}

#[tokio::test]
async fn reserve_conflict_cancel_rebook() {
    let dir = tempfile::tempdir().unwrap();
    let handle = handle_in(&dir).await;

    handle
        .create_hotel(Hotel::new("H1", "Michelle Inn", "Nagoya", 2).unwrap())
        .await
        .unwrap();
    handle
        .create_customer(Customer::new("C1", "Michelle", "michelle@example.com").unwrap())
        .await
        .unwrap();

    // Auto-assignment with both rooms free picks room 1.
    let r1 = handle
        .reserve("R1", "H1", "C1", day("2026-02-25"), day("2026-02-28"), None)
        .await
        .unwrap();
    assert_eq!(r1.room_no, Some(1));

    // Room 1 is occupied over an overlapping range.
    let err = handle
        .reserve("R2", "H1", "C1", day("2026-02-26"), day("2026-02-27"), Some(1))
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    // Cancelling frees the room for the very range that just conflicted.
    handle.cancel("R1").await.unwrap();
    let r3 = handle
        .reserve("R3", "H1", "C1", day("2026-02-26"), day("2026-02-27"), Some(1))
        .await
        .unwrap();
    assert_eq!(r3.room_no, Some(1));
}

#[tokio::test]
async fn state_survives_writer_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let handle = handle_in(&dir).await;
        handle
            .create_hotel(Hotel::new("H1", "Michelle Inn", "Nagoya", 1).unwrap())
            .await
            .unwrap();
        handle
            .create_customer(Customer::new("C1", "Michelle", "michelle@example.com").unwrap())
            .await
            .unwrap();
        handle
            .reserve("R1", "H1", "C1", day("2026-02-25"), day("2026-02-28"), None)
            .await
            .unwrap();
    }

    // A fresh writer over the same data directory sees the booking.
    let handle = handle_in(&dir).await;
    let err = handle
        .reserve("R2", "H1", "C1", day("2026-02-25"), day("2026-02-28"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoAvailability { .. }));
}

#[tokio::test]
async fn hotel_delete_cascade_through_the_writer() {
    let dir = tempfile::tempdir().unwrap();
    let handle = handle_in(&dir).await;

    handle
        .create_hotel(Hotel::new("H1", "Michelle Inn", "Nagoya", 2).unwrap())
        .await
        .unwrap();
    handle
        .create_hotel(Hotel::new("H2", "Annex", "Nagoya", 2).unwrap())
        .await
        .unwrap();
    handle
        .create_customer(Customer::new("C1", "Michelle", "michelle@example.com").unwrap())
        .await
        .unwrap();
    handle
        .reserve("R1", "H1", "C1", day("2026-02-25"), day("2026-02-28"), None)
        .await
        .unwrap();
    handle
        .reserve("R2", "H2", "C1", day("2026-02-25"), day("2026-02-28"), None)
        .await
        .unwrap();

    handle.delete_hotel("H1").await.unwrap();

    assert!(matches!(handle.get_hotel("H1").await, Err(Error::NotFound { .. })));
    assert!(matches!(handle.cancel("R1").await, Err(Error::NotFound { .. })));
    handle.cancel("R2").await.unwrap();
}
