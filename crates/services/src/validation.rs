//! Length bounds on user-supplied text. Counts are in characters, not bytes.

use domains::{DomainError, DomainResult, NewUser, ProfileUpdate};

pub const TITLE_MAX: usize = 100;
pub const TEXT_MAX: usize = 500;
pub const USER_FIELD_MAX: usize = 100;

fn check_len(field: &str, value: &str, max: usize) -> DomainResult<()> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(DomainError::BadRequest(format!(
            "{field} must be between 1 and {max} characters, got {len}"
        )));
    }
    Ok(())
}

pub fn validate_ad(title: &str, text: &str) -> DomainResult<()> {
    check_len("title", title, TITLE_MAX)?;
    check_len("text", text, TEXT_MAX)
}

pub fn validate_new_user(user: &NewUser) -> DomainResult<()> {
    check_len("first_name", &user.first_name, USER_FIELD_MAX)?;
    check_len("second_name", &user.second_name, USER_FIELD_MAX)?;
    check_len("nickname", &user.nickname, USER_FIELD_MAX)?;
    check_len("password", &user.password, USER_FIELD_MAX)?;
    check_len("email", &user.email, USER_FIELD_MAX)?;
    check_len("phone", &user.phone, USER_FIELD_MAX)
}

pub fn validate_profile(profile: &ProfileUpdate) -> DomainResult<()> {
    check_len("first_name", &profile.first_name, USER_FIELD_MAX)?;
    check_len("second_name", &profile.second_name, USER_FIELD_MAX)?;
    check_len("email", &profile.email, USER_FIELD_MAX)?;
    check_len("phone", &profile.phone, USER_FIELD_MAX)
}
