use serde_json::Value;
use tracing::warn;

use crate::model::{DateRange, Record, Reservation};

/// Decode the reservations on one `(hotel, room)` pair, skipping records that
/// fail to parse. Bad stored data must not block the availability check.
fn active_on_room(reservations: &[Record], hotel_id: &str, room_no: u32) -> Vec<Reservation> {
    let mut active = Vec::new();
    for record in reservations {
        let same_hotel = record.get("hotel_id").and_then(Value::as_str) == Some(hotel_id);
        let same_room = record.get("room_no").and_then(Value::as_u64) == Some(u64::from(room_no));
        if !(same_hotel && same_room) {
            continue;
        }
        match Reservation::from_record(record) {
            Ok(resv) => active.push(resv),
            Err(e) => warn!(error = %e, "skipping invalid reservation record"),
        }
    }
    active
}

/// True when any existing reservation on `(hotel_id, room_no)` overlaps the
/// requested range. Half-open: same-day checkout/checkin is not a conflict.
pub(super) fn room_busy(
    reservations: &[Record],
    hotel_id: &str,
    room_no: u32,
    range: &DateRange,
) -> bool {
    active_on_room(reservations, hotel_id, room_no)
        .iter()
        .any(|r| r.range().overlaps(range))
}

/// First-fit allocation: lowest free room number wins. Deterministic, and
/// entirely per-room — rooms and hotels never interact.
pub(super) fn find_room(
    reservations: &[Record],
    hotel_id: &str,
    rooms_total: u32,
    range: &DateRange,
) -> Option<u32> {
    (1..=rooms_total).find(|&room_no| !room_busy(reservations, hotel_id, room_no, range))
}
