use std::collections::BTreeMap;

use async_trait::async_trait;
use domains::{DomainError, DomainResult, NewUser, ProfileUpdate, User, UserRepository};
use tokio::sync::Mutex;

#[derive(Default)]
struct UserTable {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

/// Process-local `UserRepository`.
#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let mut table = self.inner.lock().await;
        if table
            .users
            .values()
            .any(|existing| existing.nickname == new_user.nickname)
        {
            return Err(DomainError::Conflict(format!(
                "nickname {} is already taken",
                new_user.nickname
            )));
        }

        table.last_id += 1;
        let user = User::from_new(table.last_id, new_user);
        table.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get(&self, id: i64) -> DomainResult<User> {
        let table = self.inner.lock().await;
        table
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    async fn get_by_nickname(&self, nickname: &str) -> DomainResult<User> {
        let table = self.inner.lock().await;
        table
            .users
            .values()
            .find(|user| user.nickname == nickname)
            .cloned()
            .ok_or_else(|| DomainError::nickname_not_found(nickname))
    }

    async fn update(&self, id: i64, profile: ProfileUpdate) -> DomainResult<User> {
        let mut table = self.inner.lock().await;
        let user = table
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::user_not_found(id))?;
        user.apply(profile);
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let mut table = self.inner.lock().await;
        table
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::user_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timur() -> NewUser {
        NewUser {
            first_name: "Timur".into(),
            second_name: "Zykov".into(),
            nickname: "skyberg11".into(),
            password: "abacaba".into(),
            email: "e@x.com".into(),
            phone: "123".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_nickname_is_rejected_without_consuming_an_id() {
        let repo = InMemoryUserRepository::new();
        let first = repo.create(timur()).await.unwrap();
        assert_eq!(first.id, 1);

        let mut clash = timur();
        clash.first_name = "Timur1".into();
        let err = repo.create(clash).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.get(1).await.unwrap(), first);

        let mut other = timur();
        other.nickname = "abacaba".into();
        assert_eq!(repo.create(other).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn lookup_by_nickname() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(timur()).await.unwrap();
        assert_eq!(repo.get_by_nickname("skyberg11").await.unwrap(), created);
        assert!(matches!(
            repo.get_by_nickname("nobody").await,
            Err(DomainError::NotFound(..))
        ));
    }

    #[tokio::test]
    async fn update_overwrites_profile_but_keeps_identity() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(timur()).await.unwrap();
        let updated = repo
            .update(
                created.id,
                ProfileUpdate {
                    first_name: "T".into(),
                    second_name: "Z".into(),
                    email: "new@x.com".into(),
                    phone: "456".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.nickname, "skyberg11");
        assert_eq!(updated.password, "abacaba");
        assert_eq!(updated.email, "new@x.com");
        assert_eq!(updated.phone, "456");
    }

    #[tokio::test]
    async fn delete_is_immediate() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(timur()).await.unwrap();
        repo.delete(created.id).await.unwrap();
        assert!(repo.get(created.id).await.is_err());
        assert!(repo.delete(created.id).await.is_err());
    }
}
