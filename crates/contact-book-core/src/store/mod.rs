//! Storage abstraction for contact-book.
//!
//! The [`ContactStore`] trait is the record-store interface the contact
//! service runs against: point lookup, one-branch filtered reads,
//! existence probes for duplicate detection, and owner-scoped mutation.
//! Backends: SQLite (in the `contact-book` crate) and [`memory`].
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::filter::ContactFilter;
use crate::models::{Contact, ContactId, ContactPayload, UserId};

/// Abstract storage backend for contacts.
///
/// "Not found" is always `Ok(None)`; `Err` is reserved for the backend
/// itself failing (I/O, constraint violations) and is never retried.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`get_contact`](ContactStore::get_contact) | Lookup by id, any owner |
/// | [`list_contacts`](ContactStore::list_contacts) | Run one [`ContactFilter`] branch, ordered by id |
/// | [`find_email`](ContactStore::find_email) | Email of any contact with this email |
/// | [`find_phone`](ContactStore::find_phone) | Phone of any contact with this phone |
/// | [`insert_contact`](ContactStore::insert_contact) | Persist a new contact, assigning its id |
/// | [`update_owned`](ContactStore::update_owned) | Overwrite a contact owned by `owner` |
/// | [`delete_owned`](ContactStore::delete_owned) | Delete a contact owned by `owner` |
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Retrieve a contact by id, regardless of owner.
    async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>>;

    /// Return the contacts selected by `filter`, ordered by id.
    ///
    /// [`ContactFilter::Page`] applies `skip`/`limit`; every other branch
    /// returns all matches.
    async fn list_contacts(&self, filter: &ContactFilter) -> Result<Vec<Contact>>;

    /// The stored email value if any contact uses `email`.
    async fn find_email(&self, email: &str) -> Result<Option<String>>;

    /// The stored phone value if any contact uses `phone`.
    async fn find_phone(&self, phone: &str) -> Result<Option<String>>;

    /// Persist a new contact owned by `owner` and return it with its id.
    async fn insert_contact(&self, payload: &ContactPayload, owner: UserId) -> Result<Contact>;

    /// Overwrite the editable fields of contact `id` if `owner` owns it.
    async fn update_owned(
        &self,
        id: ContactId,
        payload: &ContactPayload,
        owner: UserId,
    ) -> Result<Option<Contact>>;

    /// Delete contact `id` if `owner` owns it, returning the deleted record.
    async fn delete_owned(&self, id: ContactId, owner: UserId) -> Result<Option<Contact>>;
}
