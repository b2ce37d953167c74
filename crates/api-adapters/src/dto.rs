//! Request and response shapes of the `/api/v1` surface.
//!
//! Success bodies are `{"data": ..., "error": null}`; failures put the message
//! in `error` and leave `data` null.

use chrono::{DateTime, Utc};
use domains::{Ad, AdFilter, NewUser, ProfileUpdate, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateAdRequest {
    pub title: String,
    pub text: String,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAdRequest {
    pub title: String,
    pub text: String,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ChangeAdStatusRequest {
    pub published: bool,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub second_name: String,
    pub nickname: String,
    pub password: String,
    pub email: String,
    pub phone: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            second_name: req.second_name,
            nickname: req.nickname,
            password: req.password,
            email: req.email,
            phone: req.phone,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub nickname: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub second_name: String,
    pub email: String,
    pub phone: String,
}

impl From<UpdateUserRequest> for ProfileUpdate {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            second_name: req.second_name,
            email: req.email,
            phone: req.phone,
        }
    }
}

/// Raw `GET /ads` query string. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ListAdsQuery {
    pub published: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub creation: Option<String>,
}

impl ListAdsQuery {
    /// `Ok(None)` when no parameter was given, meaning the default
    /// published-only listing.
    pub fn into_filter(self) -> Result<Option<AdFilter>, String> {
        if self.published.is_none()
            && self.author.is_none()
            && self.title.is_none()
            && self.creation.is_none()
        {
            return Ok(None);
        }

        let published = match self.published.as_deref() {
            None | Some("") => None,
            Some("1") | Some("true") => Some(true),
            Some("0") | Some("false") => Some(false),
            Some(other) => return Err(format!("invalid published value: {other}")),
        };

        let author_id = match self.author.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|err| format!("invalid author value {raw}: {err}"))?,
            ),
        };

        let created_since = match self.creation.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(raw)
                    .map_err(|err| format!("invalid creation value {raw}: {err}"))?
                    .with_timezone(&Utc),
            ),
        };

        Ok(Some(AdFilter {
            published,
            author_id,
            title_prefix: self.title,
            created_since,
        }))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdResponse {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub author_id: i64,
    pub published: bool,
    pub creation_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl From<Ad> for AdResponse {
    fn from(ad: Ad) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            text: ad.text,
            author_id: ad.author_id,
            published: ad.published,
            creation_time: ad.creation_time,
            update_time: ad.update_time,
        }
    }
}

/// User as exposed over the wire: never includes the password.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub first_name: String,
    pub second_name: String,
    pub nickname: String,
    pub email: String,
    pub phone: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            first_name: user.first_name,
            second_name: user.second_name,
            nickname: user.nickname,
            email: user.email,
            phone: user.phone,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
    pub error: Option<String>,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, error: None }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub data: Option<()>,
    pub error: String,
}

/// Body of a rejected bearer token.
#[derive(Debug, Serialize)]
pub struct TokenErrorResponse {
    pub message: &'static str,
}

pub const DELETE_SUCCESS: &str = "delete success";
