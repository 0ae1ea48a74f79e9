//! # contact-book
//!
//! A contacts backend: users store, search, and retrieve personal contact
//! records (name, email, phone, date of birth), with an upcoming-birthday
//! query. Contacts can be read by anyone but only changed by their owner.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────────┐   ┌──────────────┐   ┌──────────┐
//! │   CLI    │──▶│ ContactService │──▶│ ContactStore │──▶│  SQLite  │
//! │(contacts)│   │ filter+birthday│   │    trait     │   │   (WAL)  │
//! └──────────┘   └────────────────┘   └──────────────┘   └──────────┘
//! ```
//!
//! The service, filters, birthday window, and store trait live in the
//! `contact-book-core` crate; this crate adds the SQLite backend,
//! configuration, logging, and the `contacts` binary.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`db`] | SQLite connection pool (WAL, foreign keys) |
//! | [`migrate`] | Idempotent schema migrations |
//! | [`sqlite_store`] | SQLite [`ContactStore`](contact_book_core::store::ContactStore) |
//! | [`book`] | Opens a database and wires the service |
//! | [`users`] | Minimal user registry |
//! | [`get`] | `contacts get` |
//! | [`list`] | `contacts list` and `contacts birthdays` |
//! | [`edit`] | `contacts add/update/remove/check` |
//! | [`render`] | Text and JSON output |
//! | [`logging`] | `tracing` subscriber setup |

pub mod book;
pub mod config;
pub mod db;
pub mod edit;
pub mod get;
pub mod list;
pub mod logging;
pub mod migrate;
pub mod render;
pub mod sqlite_store;
pub mod users;

pub use contact_book_core::models::{Contact, ContactPayload, UserId};
pub use contact_book_core::service::ContactService;
