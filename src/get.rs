//! Contact retrieval by id (`contacts get <id>`).
//!
//! Lookup is not scoped to the caller: any contact id can be read.

use std::sync::Arc;

use anyhow::{bail, Result};

use contact_book_core::clock::SystemClock;
use contact_book_core::models::{Contact, ContactId};

use crate::book::Book;
use crate::config::Config;
use crate::render;

/// Retrieves a contact by id, failing when it does not exist.
pub async fn get_contact(config: &Config, id: ContactId) -> Result<Contact> {
    let book = Book::open(config, Arc::new(SystemClock)).await?;
    let result = book.service().get_by_id(id).await;
    book.close().await;

    match result? {
        Some(contact) => Ok(contact),
        None => bail!("contact not found: {}", id),
    }
}

/// CLI entry point for `contacts get <id>`.
pub async fn run_get(config: &Config, id: ContactId, json: bool) -> Result<()> {
    let contact = get_contact(config, id).await?;
    if json {
        render::print_json(&contact)
    } else {
        render::print_contact(&contact);
        Ok(())
    }
}
