use std::process::ExitCode;

use chrono::NaiveDate;
use tracing::info;

use vacancy::model::{Customer, Hotel};
use vacancy::service::Service;
use vacancy::store::JsonStore;
use vacancy::writer::{self, WriterHandle};
use vacancy::Error;

const USAGE: &str = "usage: vacancy <seed|demo>

  seed   create the demo hotel and customer if absent
  demo   seed, reserve a room, then cancel it

config: VACANCY_DATA_DIR (default ./data)";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let data_dir = std::env::var("VACANCY_DATA_DIR").unwrap_or_else(|_| "./data".into());
    let handle = writer::spawn(Service::new(JsonStore::new(&data_dir)));
    info!("data_dir: {data_dir}");

    let command = std::env::args().nth(1).unwrap_or_default();
    let result = match command.as_str() {
        "seed" => seed(&handle).await,
        "demo" => demo(&handle).await,
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn seed(handle: &WriterHandle) -> Result<(), Error> {
    let hotel = Hotel::new("H1", "Michelle Inn", "Nagoya", 2)?;
    match handle.create_hotel(hotel).await {
        Ok(()) => info!("created hotel H1"),
        Err(e) if e.is_conflict() => info!("hotel H1 already present"),
        Err(e) => return Err(e),
    }

    let customer = Customer::new("C1", "Michelle", "michelle@example.com")?;
    match handle.create_customer(customer).await {
        Ok(()) => info!("created customer C1"),
        Err(e) if e.is_conflict() => info!("customer C1 already present"),
        Err(e) => return Err(e),
    }
    Ok(())
}

async fn demo(handle: &WriterHandle) -> Result<(), Error> {
    seed(handle).await?;

    let check_in: NaiveDate = "2026-07-01".parse().expect("literal date");
    let check_out: NaiveDate = "2026-07-03".parse().expect("literal date");
    let resv = handle
        .reserve("RDEMO1", "H1", "C1", check_in, check_out, None)
        .await?;
    info!(resv_id = %resv.resv_id, room_no = ?resv.room_no, "reserved");

    handle.cancel(&resv.resv_id).await?;
    info!(resv_id = %resv.resv_id, "cancelled");
    Ok(())
}
