//! Single-writer front for the engine. Concurrent callers hold cloned
//! handles; every operation is sent down one channel and executed by the
//! task that owns the `Service`, so mutations serialize instead of racing
//! on the collection files.

use chrono::NaiveDate;
use tokio::sync::{mpsc, oneshot};

use crate::error::Error;
use crate::model::{Customer, CustomerPatch, Hotel, HotelPatch, Reservation};
use crate::service::Service;

enum Command {
    CreateHotel {
        hotel: Hotel,
        reply: oneshot::Sender<Result<(), Error>>,
    },
    GetHotel {
        hotel_id: String,
        reply: oneshot::Sender<Result<Hotel, Error>>,
    },
    UpdateHotel {
        hotel_id: String,
        patch: HotelPatch,
        reply: oneshot::Sender<Result<Hotel, Error>>,
    },
    DeleteHotel {
        hotel_id: String,
        reply: oneshot::Sender<Result<(), Error>>,
    },
    CreateCustomer {
        customer: Customer,
        reply: oneshot::Sender<Result<(), Error>>,
    },
    GetCustomer {
        customer_id: String,
        reply: oneshot::Sender<Result<Customer, Error>>,
    },
    UpdateCustomer {
        customer_id: String,
        patch: CustomerPatch,
        reply: oneshot::Sender<Result<Customer, Error>>,
    },
    DeleteCustomer {
        customer_id: String,
        reply: oneshot::Sender<Result<(), Error>>,
    },
    Reserve {
        resv_id: String,
        hotel_id: String,
        customer_id: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
        room_no: Option<u32>,
        reply: oneshot::Sender<Result<Reservation, Error>>,
    },
    Cancel {
        resv_id: String,
        reply: oneshot::Sender<Result<(), Error>>,
    },
}

/// Background task that owns the service and drains commands one at a time.
async fn writer_loop(service: Service, mut rx: mpsc::Receiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::CreateHotel { hotel, reply } => {
                let _ = reply.send(service.create_hotel(hotel));
            }
            Command::GetHotel { hotel_id, reply } => {
                let _ = reply.send(service.get_hotel(&hotel_id));
            }
            Command::UpdateHotel { hotel_id, patch, reply } => {
                let _ = reply.send(service.update_hotel(&hotel_id, &patch));
            }
            Command::DeleteHotel { hotel_id, reply } => {
                let _ = reply.send(service.delete_hotel(&hotel_id));
            }
            Command::CreateCustomer { customer, reply } => {
                let _ = reply.send(service.create_customer(customer));
            }
            Command::GetCustomer { customer_id, reply } => {
                let _ = reply.send(service.get_customer(&customer_id));
            }
            Command::UpdateCustomer { customer_id, patch, reply } => {
                let _ = reply.send(service.update_customer(&customer_id, &patch));
            }
            Command::DeleteCustomer { customer_id, reply } => {
                let _ = reply.send(service.delete_customer(&customer_id));
            }
            Command::Reserve {
                resv_id,
                hotel_id,
                customer_id,
                check_in,
                check_out,
                room_no,
                reply,
            } => {
                let _ = reply.send(service.reserve(
                    &resv_id,
                    &hotel_id,
                    &customer_id,
                    check_in,
                    check_out,
                    room_no,
                ));
            }
            Command::Cancel { resv_id, reply } => {
                let _ = reply.send(service.cancel(&resv_id));
            }
        }
    }
}

/// Cloneable handle to the writer task.
#[derive(Clone)]
pub struct WriterHandle {
    tx: mpsc::Sender<Command>,
}

/// Spawn the writer task and hand back its handle.
pub fn spawn(service: Service) -> WriterHandle {
    let (tx, rx) = mpsc::channel(256);
    tokio::spawn(writer_loop(service, rx));
    WriterHandle { tx }
}

impl WriterHandle {
    async fn dispatch<T>(
        &self,
        command: Command,
        rx: oneshot::Receiver<Result<T, Error>>,
    ) -> Result<T, Error> {
        self.tx.send(command).await.map_err(|_| Error::Shutdown)?;
        rx.await.map_err(|_| Error::Shutdown)?
    }

    pub async fn create_hotel(&self, hotel: Hotel) -> Result<(), Error> {
        let (reply, rx) = oneshot::channel();
        self.dispatch(Command::CreateHotel { hotel, reply }, rx).await
    }

    pub async fn get_hotel(&self, hotel_id: &str) -> Result<Hotel, Error> {
        let (reply, rx) = oneshot::channel();
        let hotel_id = hotel_id.to_string();
        self.dispatch(Command::GetHotel { hotel_id, reply }, rx).await
    }

    pub async fn update_hotel(&self, hotel_id: &str, patch: HotelPatch) -> Result<Hotel, Error> {
        let (reply, rx) = oneshot::channel();
        let hotel_id = hotel_id.to_string();
        self.dispatch(Command::UpdateHotel { hotel_id, patch, reply }, rx).await
    }

    pub async fn delete_hotel(&self, hotel_id: &str) -> Result<(), Error> {
        let (reply, rx) = oneshot::channel();
        let hotel_id = hotel_id.to_string();
        self.dispatch(Command::DeleteHotel { hotel_id, reply }, rx).await
    }

    pub async fn create_customer(&self, customer: Customer) -> Result<(), Error> {
        let (reply, rx) = oneshot::channel();
        self.dispatch(Command::CreateCustomer { customer, reply }, rx).await
    }

    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer, Error> {
        let (reply, rx) = oneshot::channel();
        let customer_id = customer_id.to_string();
        self.dispatch(Command::GetCustomer { customer_id, reply }, rx).await
    }

    pub async fn update_customer(
        &self,
        customer_id: &str,
        patch: CustomerPatch,
    ) -> Result<Customer, Error> {
        let (reply, rx) = oneshot::channel();
        let customer_id = customer_id.to_string();
        self.dispatch(Command::UpdateCustomer { customer_id, patch, reply }, rx).await
    }

    pub async fn delete_customer(&self, customer_id: &str) -> Result<(), Error> {
        let (reply, rx) = oneshot::channel();
        let customer_id = customer_id.to_string();
        self.dispatch(Command::DeleteCustomer { customer_id, reply }, rx).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn reserve(
        &self,
        resv_id: &str,
        hotel_id: &str,
        customer_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        room_no: Option<u32>,
    ) -> Result<Reservation, Error> {
        let (reply, rx) = oneshot::channel();
        let command = Command::Reserve {
            resv_id: resv_id.to_string(),
            hotel_id: hotel_id.to_string(),
            customer_id: customer_id.to_string(),
            check_in,
            check_out,
            room_no,
            reply,
        };
        self.dispatch(command, rx).await
    }

    pub async fn cancel(&self, resv_id: &str) -> Result<(), Error> {
        let (reply, rx) = oneshot::channel();
        let resv_id = resv_id.to_string();
        self.dispatch(Command::Cancel { resv_id, reply }, rx).await
    }
}
