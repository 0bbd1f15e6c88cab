use crate::error::Error;
use crate::model::{Customer, CustomerPatch};
use crate::store::Kind;

use super::{field_str, require_id, Service};

impl Service {
    pub fn create_customer(&self, customer: Customer) -> Result<(), Error> {
        let mut customers = self.store.load(Kind::Customers)?;
        let exists = self
            .snapshot_index(&customers, "customer_id", Kind::Customers)
            .contains(&customer.customer_id);
        if exists {
            return Err(Error::AlreadyExists { kind: "customer", id: customer.customer_id });
        }
        customers.push(customer.to_record());
        self.store.save(Kind::Customers, &customers)
    }

    pub fn get_customer(&self, customer_id: &str) -> Result<Customer, Error> {
        require_id(customer_id, "customer_id")?;
        let customers = self.store.load(Kind::Customers)?;
        let indexed = self.snapshot_index(&customers, "customer_id", Kind::Customers);
        let record = indexed.get(customer_id).ok_or_else(|| Error::NotFound {
            kind: "customer",
            id: customer_id.into(),
        })?;
        Customer::from_record(record)
    }

    pub fn update_customer(
        &self,
        customer_id: &str,
        patch: &CustomerPatch,
    ) -> Result<Customer, Error> {
        require_id(customer_id, "customer_id")?;
        let mut customers = self.store.load(Kind::Customers)?;
        let mut updated: Option<Customer> = None;
        for record in customers.iter_mut() {
            if field_str(record, "customer_id") != Some(customer_id) {
                continue;
            }
            let patched = patch.apply(&Customer::from_record(record)?)?;
            *record = patched.to_record();
            updated = Some(patched);
        }
        let updated = updated.ok_or_else(|| Error::NotFound {
            kind: "customer",
            id: customer_id.into(),
        })?;
        self.store.save(Kind::Customers, &customers)?;
        Ok(updated)
    }

    /// Cascade mirror of `delete_hotel`: the customer's reservations are
    /// dropped in the same logical operation.
    pub fn delete_customer(&self, customer_id: &str) -> Result<(), Error> {
        require_id(customer_id, "customer_id")?;
        let mut customers = self.store.load(Kind::Customers)?;
        let before = customers.len();
        customers.retain(|record| field_str(record, "customer_id") != Some(customer_id));
        if customers.len() == before {
            return Err(Error::NotFound { kind: "customer", id: customer_id.into() });
        }

        let mut reservations = self.store.load(Kind::Reservations)?;
        reservations.retain(|record| field_str(record, "customer_id") != Some(customer_id));

        self.store.save(Kind::Customers, &customers)?;
        self.store.save(Kind::Reservations, &reservations)
    }
}
