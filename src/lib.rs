pub mod error;
pub mod model;
pub mod service;
pub mod store;
pub mod writer;

pub use error::Error;
pub use model::{Customer, CustomerPatch, DateRange, Hotel, HotelPatch, Record, Reservation};
pub use service::Service;
pub use store::{JsonStore, Kind};
pub use writer::WriterHandle;
