//! # contact-book core
//!
//! Storage-agnostic logic for contact-book: data models, payload
//! validation, listing filter dispatch, the upcoming-birthday window, the
//! [`store::ContactStore`] trait, and the [`service::ContactService`]
//! that composes them.
//!
//! This crate contains no sqlx, filesystem I/O, or CLI code.

pub mod birthday;
pub mod clock;
pub mod filter;
pub mod models;
pub mod service;
pub mod store;
pub mod validate;
