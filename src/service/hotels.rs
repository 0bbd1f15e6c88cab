use crate::error::Error;
use crate::model::{Hotel, HotelPatch};
use crate::store::Kind;

use super::{field_str, require_id, Service};

impl Service {
    pub fn create_hotel(&self, hotel: Hotel) -> Result<(), Error> {
        let mut hotels = self.store.load(Kind::Hotels)?;
        let exists = self
            .snapshot_index(&hotels, "hotel_id", Kind::Hotels)
            .contains(&hotel.hotel_id);
        if exists {
            return Err(Error::AlreadyExists { kind: "hotel", id: hotel.hotel_id });
        }
        hotels.push(hotel.to_record());
        self.store.save(Kind::Hotels, &hotels)
    }

    pub fn get_hotel(&self, hotel_id: &str) -> Result<Hotel, Error> {
        require_id(hotel_id, "hotel_id")?;
        let hotels = self.store.load(Kind::Hotels)?;
        let indexed = self.snapshot_index(&hotels, "hotel_id", Kind::Hotels);
        let record = indexed.get(hotel_id).ok_or_else(|| Error::NotFound {
            kind: "hotel",
            id: hotel_id.into(),
        })?;
        Hotel::from_record(record)
    }

    /// Partial patch: only present fields change, then the merged record is
    /// re-validated as a whole. Validation failure leaves storage untouched.
    pub fn update_hotel(&self, hotel_id: &str, patch: &HotelPatch) -> Result<Hotel, Error> {
        require_id(hotel_id, "hotel_id")?;
        let mut hotels = self.store.load(Kind::Hotels)?;
        let mut updated: Option<Hotel> = None;
        for record in hotels.iter_mut() {
            if field_str(record, "hotel_id") != Some(hotel_id) {
                continue;
            }
            let patched = patch.apply(&Hotel::from_record(record)?)?;
            *record = patched.to_record();
            updated = Some(patched);
        }
        let updated = updated.ok_or_else(|| Error::NotFound {
            kind: "hotel",
            id: hotel_id.into(),
        })?;
        self.store.save(Kind::Hotels, &hotels)?;
        Ok(updated)
    }

    /// Cascade: reservations referencing the deleted hotel go with it. Two
    /// writes, no cross-file atomicity (single-writer model, accepted
    /// limitation).
    pub fn delete_hotel(&self, hotel_id: &str) -> Result<(), Error> {
        require_id(hotel_id, "hotel_id")?;
        let mut hotels = self.store.load(Kind::Hotels)?;
        let before = hotels.len();
        hotels.retain(|record| field_str(record, "hotel_id") != Some(hotel_id));
        if hotels.len() == before {
            return Err(Error::NotFound { kind: "hotel", id: hotel_id.into() });
        }

        let mut reservations = self.store.load(Kind::Reservations)?;
        reservations.retain(|record| field_str(record, "hotel_id") != Some(hotel_id));

        self.store.save(Kind::Hotels, &hotels)?;
        self.store.save(Kind::Reservations, &reservations)
    }
}
