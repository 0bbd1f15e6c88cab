use chrono::NaiveDate;

use crate::error::Error;
use crate::model::{DateRange, Reservation};
use crate::store::Kind;

use super::conflict::{find_room, room_busy};
use super::{field_str, require_id, Service};

impl Service {
    /// Reserve a room. Preconditions short-circuit in order: hotel exists,
    /// customer exists, reservation id is fresh, then the room is either
    /// allocated first-fit or the requested one is bounds- and
    /// overlap-checked.
    pub fn reserve(
        &self,
        resv_id: &str,
        hotel_id: &str,
        customer_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        room_no: Option<u32>,
    ) -> Result<Reservation, Error> {
        let hotel = self.get_hotel(hotel_id)?;
        self.get_customer(customer_id)?;
        require_id(resv_id, "resv_id")?;

        let mut reservations = self.store.load(Kind::Reservations)?;
        let exists = self
            .snapshot_index(&reservations, "resv_id", Kind::Reservations)
            .contains(resv_id);
        if exists {
            return Err(Error::AlreadyExists { kind: "reservation", id: resv_id.into() });
        }

        let range = DateRange::new(check_in, check_out)?;
        let room_no = match room_no {
            Some(requested) => {
                if requested == 0 || requested > hotel.rooms_total {
                    return Err(Error::Validation(format!(
                        "room_no {requested} is outside 1..={}",
                        hotel.rooms_total
                    )));
                }
                if room_busy(&reservations, hotel_id, requested, &range) {
                    return Err(Error::RoomBusy {
                        hotel_id: hotel_id.into(),
                        room_no: requested,
                    });
                }
                requested
            }
            None => find_room(&reservations, hotel_id, hotel.rooms_total, &range)
                .ok_or_else(|| Error::NoAvailability { hotel_id: hotel_id.into() })?,
        };

        // Full construction re-validates ids and date ordering. Redundant
        // with the checks above; keeps the record boundary self-defending.
        let created =
            Reservation::new(resv_id, hotel_id, customer_id, check_in, check_out, Some(room_no))?;
        reservations.push(created.to_record());
        self.store.save(Kind::Reservations, &reservations)?;
        Ok(created)
    }

    /// No cascade: cancelling a reservation has no downstream effects.
    pub fn cancel(&self, resv_id: &str) -> Result<(), Error> {
        require_id(resv_id, "resv_id")?;
        let mut reservations = self.store.load(Kind::Reservations)?;
        let before = reservations.len();
        reservations.retain(|record| field_str(record, "resv_id") != Some(resv_id));
        if reservations.len() == before {
            return Err(Error::NotFound { kind: "reservation", id: resv_id.into() });
        }
        self.store.save(Kind::Reservations, &reservations)
    }
}
