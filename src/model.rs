use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// A persisted record: a string-keyed JSON object. Unknown keys are tolerated
/// on deserialization and dropped on the next full save.
pub type Record = Map<String, Value>;

/// Half-open stay `[check_in, check_out)` — checkout day is free for the next
/// guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, Error> {
        if check_out <= check_in {
            return Err(Error::Validation("check_out must be after check_in".into()));
        }
        Ok(Self { check_in, check_out })
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub hotel_id: String,
    pub name: String,
    pub city: String,
    /// Rooms are implicit integers `1..=rooms_total`, not modeled entities.
    pub rooms_total: u32,
}

impl Hotel {
    pub fn new(
        hotel_id: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
        rooms_total: u32,
    ) -> Result<Self, Error> {
        let hotel = Self {
            hotel_id: hotel_id.into(),
            name: name.into(),
            city: city.into(),
            rooms_total,
        };
        hotel.validate()?;
        Ok(hotel)
    }

    fn validate(&self) -> Result<(), Error> {
        non_blank(&self.hotel_id, "hotel_id")?;
        non_blank(&self.name, "name")?;
        non_blank(&self.city, "city")?;
        if self.rooms_total == 0 {
            return Err(Error::Validation("rooms_total must be a positive integer".into()));
        }
        Ok(())
    }

    pub fn to_record(&self) -> Record {
        record_of(self)
    }

    pub fn from_record(record: &Record) -> Result<Self, Error> {
        let hotel: Self = decode(record, "hotel")?;
        hotel.validate()?;
        Ok(hotel)
    }
}

/// Optional-field patch for `update_hotel`: only present fields change, then
/// the merged result is re-validated as a whole.
#[derive(Debug, Clone, Default)]
pub struct HotelPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub rooms_total: Option<u32>,
}

impl HotelPatch {
    pub fn apply(&self, base: &Hotel) -> Result<Hotel, Error> {
        Hotel::new(
            base.hotel_id.clone(),
            self.name.clone().unwrap_or_else(|| base.name.clone()),
            self.city.clone().unwrap_or_else(|| base.city.clone()),
            self.rooms_total.unwrap_or(base.rooms_total),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub name_full: String,
    pub email: String,
}

impl Customer {
    pub fn new(
        customer_id: impl Into<String>,
        name_full: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, Error> {
        let customer = Self {
            customer_id: customer_id.into(),
            name_full: name_full.into(),
            email: email.into(),
        };
        customer.validate()?;
        Ok(customer)
    }

    fn validate(&self) -> Result<(), Error> {
        non_blank(&self.customer_id, "customer_id")?;
        non_blank(&self.name_full, "name_full")?;
        non_blank(&self.email, "email")?;
        // Shape check only, not RFC validation: exactly one '@', text on both sides.
        if self.email.matches('@').count() != 1
            || self.email.starts_with('@')
            || self.email.ends_with('@')
        {
            return Err(Error::Validation(
                "email must contain a single '@' with text on both sides".into(),
            ));
        }
        Ok(())
    }

    pub fn to_record(&self) -> Record {
        record_of(self)
    }

    pub fn from_record(record: &Record) -> Result<Self, Error> {
        let customer: Self = decode(record, "customer")?;
        customer.validate()?;
        Ok(customer)
    }
}

/// Optional-field patch for `update_customer`.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name_full: Option<String>,
    pub email: Option<String>,
}

impl CustomerPatch {
    pub fn apply(&self, base: &Customer) -> Result<Customer, Error> {
        Customer::new(
            base.customer_id.clone(),
            self.name_full.clone().unwrap_or_else(|| base.name_full.clone()),
            self.email.clone().unwrap_or_else(|| base.email.clone()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub resv_id: String,
    pub hotel_id: String,
    pub customer_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// `None` only before allocation — the engine always persists a room.
    #[serde(default)]
    pub room_no: Option<u32>,
}

impl Reservation {
    pub fn new(
        resv_id: impl Into<String>,
        hotel_id: impl Into<String>,
        customer_id: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
        room_no: Option<u32>,
    ) -> Result<Self, Error> {
        let resv = Self {
            resv_id: resv_id.into(),
            hotel_id: hotel_id.into(),
            customer_id: customer_id.into(),
            check_in,
            check_out,
            room_no,
        };
        resv.validate()?;
        Ok(resv)
    }

    fn validate(&self) -> Result<(), Error> {
        non_blank(&self.resv_id, "resv_id")?;
        non_blank(&self.hotel_id, "hotel_id")?;
        non_blank(&self.customer_id, "customer_id")?;
        if self.check_out <= self.check_in {
            return Err(Error::Validation("check_out must be after check_in".into()));
        }
        if self.room_no == Some(0) {
            return Err(Error::Validation("room_no must be a positive integer".into()));
        }
        Ok(())
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }

    pub fn to_record(&self) -> Record {
        record_of(self)
    }

    pub fn from_record(record: &Record) -> Result<Self, Error> {
        let resv: Self = decode(record, "reservation")?;
        resv.validate()?;
        Ok(resv)
    }
}

fn non_blank(value: &str, field: &'static str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} must be a non-empty string")));
    }
    Ok(())
}

fn record_of<T: Serialize>(value: &T) -> Record {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => unreachable!("entity serialized to a non-object"),
    }
}

fn decode<T: for<'de> Deserialize<'de>>(record: &Record, kind: &str) -> Result<T, Error> {
    serde_json::from_value(Value::Object(record.clone()))
        .map_err(|e| Error::Validation(format!("invalid {kind} record: {e}")))
}
