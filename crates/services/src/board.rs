use std::sync::Arc;

use domains::{AdRepository, TokenAuthority, TokenCheck, UserRepository};

/// The application service: the only caller of both stores.
///
/// Holds no ad or user state of its own. Cross-store checks (author exists,
/// then mutate the ad) are not atomic as a pair; each store serializes only
/// its own calls.
#[derive(Clone)]
pub struct BoardService {
    pub(crate) ads: Arc<dyn AdRepository>,
    pub(crate) users: Arc<dyn UserRepository>,
    pub(crate) tokens: Arc<dyn TokenAuthority>,
}

impl BoardService {
    pub fn new(
        ads: Arc<dyn AdRepository>,
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenAuthority>,
    ) -> Self {
        Self { ads, users, tokens }
    }

    /// Checks that `token` was issued for `user_id` and is still valid.
    pub fn authorize(&self, token: &str, user_id: i64) -> TokenCheck {
        let check = self.tokens.verify(token, user_id);
        if !check.is_authorized() {
            tracing::warn!(user_id, ?check, "token rejected");
        }
        check
    }
}
