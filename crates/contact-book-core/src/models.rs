//! Core data models for contact-book.
//!
//! A [`Contact`] is always owned by exactly one user, identified by a
//! [`UserId`]. Callers hand the store a [`ContactPayload`] (the five
//! user-editable fields) and the store assigns the [`ContactId`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// System-assigned contact identifier.
pub type ContactId = i64;

/// Opaque identity of an authenticated user.
///
/// Produced by whatever authenticates the caller; the store only compares
/// it against the owner recorded on each contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub user_id: UserId,
}

impl Contact {
    /// Build a record from a payload, an assigned id, and its owner.
    pub fn from_payload(id: ContactId, payload: &ContactPayload, owner: UserId) -> Self {
        Self {
            id,
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            date_of_birth: payload.date_of_birth,
            user_id: owner,
        }
    }

    /// Overwrite every editable field with the payload's values.
    pub fn apply(&mut self, payload: &ContactPayload) {
        self.first_name = payload.first_name.clone();
        self.last_name = payload.last_name.clone();
        self.email = payload.email.clone();
        self.phone = payload.phone.clone();
        self.date_of_birth = payload.date_of_birth;
    }
}

/// The editable fields of a contact, as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
}

/// A registered user, as far as this crate cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: i64,
}
