//! In-memory [`ContactStore`] implementation for testing.
//!
//! Keeps contacts in a `BTreeMap` keyed by id behind `std::sync::RwLock`,
//! so iteration order is id order like the SQLite backend. Ids start at 1
//! and are never reused.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::filter::ContactFilter;
use crate::models::{Contact, ContactId, ContactPayload, UserId};

use super::ContactStore;

struct Inner {
    contacts: BTreeMap<ContactId, Contact>,
    next_id: ContactId,
}

/// In-memory contact store.
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                contacts: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| anyhow!("in-memory contact store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| anyhow!("in-memory contact store lock poisoned"))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn owned_by(contact: &Contact, owner: UserId) -> bool {
    contact.user_id == owner
}

#[async_trait]
impl ContactStore for InMemoryStore {
    async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>> {
        Ok(self.read()?.contacts.get(&id).cloned())
    }

    async fn list_contacts(&self, filter: &ContactFilter) -> Result<Vec<Contact>> {
        let inner = self.read()?;
        let matching = inner.contacts.values().filter(|c| filter.matches(c));
        let contacts = match filter {
            ContactFilter::Page { skip, limit } => matching
                .skip(*skip as usize)
                .take(*limit as usize)
                .cloned()
                .collect(),
            _ => matching.cloned().collect(),
        };
        Ok(contacts)
    }

    async fn find_email(&self, email: &str) -> Result<Option<String>> {
        Ok(self
            .read()?
            .contacts
            .values()
            .find(|c| c.email == email)
            .map(|c| c.email.clone()))
    }

    async fn find_phone(&self, phone: &str) -> Result<Option<String>> {
        Ok(self
            .read()?
            .contacts
            .values()
            .find(|c| c.phone == phone)
            .map(|c| c.phone.clone()))
    }

    async fn insert_contact(&self, payload: &ContactPayload, owner: UserId) -> Result<Contact> {
        let mut inner = self.write()?;
        let id = inner.next_id;
        inner.next_id += 1;
        let contact = Contact::from_payload(id, payload, owner);
        inner.contacts.insert(id, contact.clone());
        Ok(contact)
    }

    async fn update_owned(
        &self,
        id: ContactId,
        payload: &ContactPayload,
        owner: UserId,
    ) -> Result<Option<Contact>> {
        let mut inner = self.write()?;
        Ok(match inner.contacts.get_mut(&id) {
            Some(contact) if owned_by(contact, owner) => {
                contact.apply(payload);
                Some(contact.clone())
            }
            _ => None,
        })
    }

    async fn delete_owned(&self, id: ContactId, owner: UserId) -> Result<Option<Contact>> {
        let mut inner = self.write()?;
        let owned = inner
            .contacts
            .get(&id)
            .is_some_and(|c| owned_by(c, owner));
        if !owned {
            return Ok(None);
        }
        Ok(inner.contacts.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn payload(first: &str, email: &str, phone: &str) -> ContactPayload {
        ContactPayload {
            first_name: first.to_string(),
            last_name: "Johns".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 10, 8).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_not_reused() {
        let store = InMemoryStore::new();
        let a = store
            .insert_contact(&payload("A", "a@x.com", "5550001"), UserId(1))
            .await
            .unwrap();
        let b = store
            .insert_contact(&payload("B", "b@x.com", "5550002"), UserId(1))
            .await
            .unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        store.delete_owned(b.id, UserId(1)).await.unwrap();
        let c = store
            .insert_contact(&payload("C", "c@x.com", "5550003"), UserId(1))
            .await
            .unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn test_page_skips_and_limits_in_id_order() {
        let store = InMemoryStore::new();
        for i in 0..5 {
            store
                .insert_contact(
                    &payload(&format!("N{i}"), &format!("n{i}@x.com"), "5550000"),
                    UserId(1),
                )
                .await
                .unwrap();
        }
        let page = store
            .list_contacts(&ContactFilter::page(1, 2))
            .await
            .unwrap();
        let ids: Vec<_> = page.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_find_probes() {
        let store = InMemoryStore::new();
        store
            .insert_contact(&payload("A", "a@x.com", "5550001"), UserId(1))
            .await
            .unwrap();
        assert_eq!(
            store.find_email("a@x.com").await.unwrap().as_deref(),
            Some("a@x.com")
        );
        assert_eq!(store.find_email("z@x.com").await.unwrap(), None);
        assert_eq!(
            store.find_phone("5550001").await.unwrap().as_deref(),
            Some("5550001")
        );
        assert_eq!(store.find_phone("5559999").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_by_other_owner_is_noop() {
        let store = InMemoryStore::new();
        let a = store
            .insert_contact(&payload("A", "a@x.com", "5550001"), UserId(1))
            .await
            .unwrap();
        assert_eq!(store.delete_owned(a.id, UserId(2)).await.unwrap(), None);
        assert_eq!(store.get_contact(a.id).await.unwrap(), Some(a));
    }
}
