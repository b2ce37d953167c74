//! # Domain Models
//!
//! These structs represent the core entities of adboard.
//! Identifiers are store-assigned `i64` counters starting at 1.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A single classified advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ad {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub author_id: i64,
    pub published: bool,
    pub creation_time: DateTime<Utc>,
    /// Refreshed on every mutation; never earlier than `creation_time`.
    pub update_time: DateTime<Utc>,
}

impl Ad {
    /// Builds the stored record for a freshly created ad.
    pub fn from_new(id: i64, new_ad: NewAd, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new_ad.title,
            text: new_ad.text,
            author_id: new_ad.author_id,
            published: new_ad.published,
            creation_time: now,
            update_time: now,
        }
    }

    /// Advances `update_time`, strictly, even when the clock has not moved.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.update_time = if now > self.update_time {
            now
        } else {
            self.update_time + Duration::nanoseconds(1)
        };
    }
}

/// What a caller supplies to create an ad. The store fills in the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAd {
    pub title: String,
    pub text: String,
    pub author_id: i64,
    pub published: bool,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub second_name: String,
    /// Unique across the store
    pub nickname: String,
    /// Stored and compared as plain text.
    pub password: String,
    pub email: String,
    pub phone: String,
}

impl User {
    pub fn from_new(id: i64, new_user: NewUser) -> Self {
        Self {
            id,
            first_name: new_user.first_name,
            second_name: new_user.second_name,
            nickname: new_user.nickname,
            password: new_user.password,
            email: new_user.email,
            phone: new_user.phone,
        }
    }

    pub fn apply(&mut self, profile: ProfileUpdate) {
        self.first_name = profile.first_name;
        self.second_name = profile.second_name;
        self.email = profile.email;
        self.phone = profile.phone;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub second_name: String,
    pub nickname: String,
    pub password: String,
    pub email: String,
    pub phone: String,
}

/// The mutable subset of a user's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub second_name: String,
    pub email: String,
    pub phone: String,
}

/// Conjunctive ad query. `None` leaves a field unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdFilter {
    pub published: Option<bool>,
    pub author_id: Option<i64>,
    /// Case-sensitive exact prefix of the title
    pub title_prefix: Option<String>,
    /// Inclusive lower bound: keeps ads with `creation_time >= bound`.
    pub created_since: Option<DateTime<Utc>>,
}

impl AdFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when every present predicate holds for `ad`.
    pub fn matches(&self, ad: &Ad) -> bool {
        if let Some(published) = self.published {
            if ad.published != published {
                return false;
            }
        }
        if let Some(author_id) = self.author_id {
            if ad.author_id != author_id {
                return false;
            }
        }
        if let Some(prefix) = &self.title_prefix {
            if !ad.title.starts_with(prefix.as_str()) {
                return false;
            }
        }
        if let Some(bound) = self.created_since {
            if bound > ad.creation_time {
                return false;
            }
        }
        true
    }
}

/// Outcome of checking a bearer token against the identifier a request asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCheck {
    Authorized,
    SignatureInvalid,
    /// Undecodable, expired, or otherwise unusable
    Malformed,
    IdentifierMismatch,
}

impl TokenCheck {
    pub fn is_authorized(self) -> bool {
        self == Self::Authorized
    }
}
