//! Contact service: the seven operations front ends call.
//!
//! Thin composition over a [`ContactStore`] and a [`Clock`]. Reads are
//! global; `update` and `remove` only touch contacts owned by the caller.
//! Store errors are passed through unchanged.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, instrument};

use crate::birthday;
use crate::clock::Clock;
use crate::filter::{ContactFilter, ListQuery};
use crate::models::{Contact, ContactId, ContactPayload, UserId};
use crate::store::ContactStore;

#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
    clock: Arc<dyn Clock>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The clock this service measures "today" with.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    #[instrument(name = "contacts.service.get_by_id", skip(self))]
    pub async fn get_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
        let contact = self.store.get_contact(id).await?;
        debug!(found = contact.is_some(), "looked up contact");
        Ok(contact)
    }

    #[instrument(name = "contacts.service.list", skip(self, query))]
    pub async fn list(&self, query: ListQuery) -> Result<Vec<Contact>> {
        let filter = ContactFilter::from(query);
        debug!(?filter, "listing contacts");
        let contacts = self.store.list_contacts(&filter).await?;
        debug!(count = contacts.len(), "listed contacts");
        Ok(contacts)
    }

    /// Return the first value already taken by another contact: the email
    /// if it is in use, otherwise the phone if it is in use.
    #[instrument(name = "contacts.service.verify_email_phone", skip(self))]
    pub async fn verify_email_phone(&self, email: &str, phone: &str) -> Result<Option<String>> {
        if let Some(taken) = self.store.find_email(email).await? {
            debug!("email already in use");
            return Ok(Some(taken));
        }
        let taken = self.store.find_phone(phone).await?;
        if taken.is_some() {
            debug!("phone already in use");
        }
        Ok(taken)
    }

    /// Contacts in the `skip`/`limit` slice whose birthday is in the window
    /// (see [`birthday`]). The slice is taken before filtering.
    #[instrument(name = "contacts.service.upcoming_birthdays", skip(self))]
    pub async fn upcoming_birthdays(&self, skip: u32, limit: u32) -> Result<Vec<Contact>> {
        let today = self.clock.today();
        let page = self
            .store
            .list_contacts(&ContactFilter::page(skip, limit))
            .await?;
        let upcoming = birthday::retain_upcoming(page, today);
        debug!(%today, count = upcoming.len(), "computed upcoming birthdays");
        Ok(upcoming)
    }

    #[instrument(name = "contacts.service.create", skip(self, payload, owner), fields(owner = %owner))]
    pub async fn create(&self, payload: &ContactPayload, owner: UserId) -> Result<Contact> {
        let contact = self.store.insert_contact(payload, owner).await?;
        info!(contact_id = contact.id, "created contact");
        Ok(contact)
    }

    #[instrument(name = "contacts.service.update", skip(self, payload, owner), fields(owner = %owner))]
    pub async fn update(
        &self,
        id: ContactId,
        payload: &ContactPayload,
        owner: UserId,
    ) -> Result<Option<Contact>> {
        let updated = self.store.update_owned(id, payload, owner).await?;
        match &updated {
            Some(_) => info!("updated contact"),
            None => debug!("no contact with this id owned by caller"),
        }
        Ok(updated)
    }

    #[instrument(name = "contacts.service.remove", skip(self, owner), fields(owner = %owner))]
    pub async fn remove(&self, id: ContactId, owner: UserId) -> Result<Option<Contact>> {
        let removed = self.store.delete_owned(id, owner).await?;
        match &removed {
            Some(_) => info!("removed contact"),
            None => debug!("no contact with this id owned by caller"),
        }
        Ok(removed)
    }
}
