//! Ad operations: creation, ownership-guarded mutation, and listing.

use domains::{Ad, AdFilter, DomainError, DomainResult, NewAd};

use crate::board::BoardService;
use crate::validation::validate_ad;

impl BoardService {
    /// Creates an unpublished ad. Nothing reaches the store unless the author
    /// exists and both fields are within bounds.
    #[tracing::instrument(skip(self, title, text))]
    pub async fn create_ad(&self, title: &str, text: &str, author_id: i64) -> DomainResult<Ad> {
        self.users.get(author_id).await?;

        let new_ad = NewAd {
            title: title.to_string(),
            text: text.to_string(),
            author_id,
            published: false,
        };
        validate_ad(&new_ad.title, &new_ad.text)?;

        let ad = self.ads.create(new_ad).await?;
        tracing::info!(ad_id = ad.id, "ad created");
        Ok(ad)
    }

    pub async fn get_ad(&self, id: i64) -> DomainResult<Ad> {
        self.ads.get(id).await
    }

    #[tracing::instrument(skip(self, title, text))]
    pub async fn update_ad(
        &self,
        id: i64,
        user_id: i64,
        title: &str,
        text: &str,
    ) -> DomainResult<Ad> {
        self.owned_ad(id, user_id).await?;
        validate_ad(title, text)?;
        self.ads.update(id, title, text).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn change_ad_status(
        &self,
        id: i64,
        user_id: i64,
        published: bool,
    ) -> DomainResult<Ad> {
        self.owned_ad(id, user_id).await?;
        self.ads.update_status(id, published).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_ad(&self, id: i64, user_id: i64) -> DomainResult<()> {
        self.owned_ad(id, user_id).await?;
        self.ads.delete(id).await?;
        tracing::info!("ad deleted");
        Ok(())
    }

    /// Every ad matching all present predicates, published or not.
    pub async fn list_ads(&self, filter: &AdFilter) -> DomainResult<Vec<Ad>> {
        self.ads.get_ads(filter).await
    }

    pub async fn list_published_ads(&self) -> DomainResult<Vec<Ad>> {
        self.ads.get_all_ads().await
    }

    /// Loads ad `id` after checking that `user_id` exists and wrote it.
    async fn owned_ad(&self, id: i64, user_id: i64) -> DomainResult<Ad> {
        self.users.get(user_id).await?;
        let ad = self.ads.get(id).await?;
        if ad.author_id != user_id {
            tracing::warn!(author_id = ad.author_id, "non-author attempted to modify ad");
            return Err(DomainError::AccessDenied(format!(
                "user {user_id} is not the author of ad {id}"
            )));
        }
        Ok(ad)
    }
}
