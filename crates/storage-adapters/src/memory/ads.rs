use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use domains::{Ad, AdFilter, AdRepository, DomainError, DomainResult, NewAd};
use tokio::sync::Mutex;

#[derive(Default)]
struct AdTable {
    ads: BTreeMap<i64, Ad>,
    last_id: i64,
}

/// Process-local `AdRepository`. One mutex guards the map and the counter.
#[derive(Default)]
pub struct InMemoryAdRepository {
    inner: Mutex<AdTable>,
}

impl InMemoryAdRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdRepository for InMemoryAdRepository {
    async fn create(&self, new_ad: NewAd) -> DomainResult<Ad> {
        let mut table = self.inner.lock().await;
        table.last_id += 1;
        let ad = Ad::from_new(table.last_id, new_ad, Utc::now());
        table.ads.insert(ad.id, ad.clone());
        tracing::debug!(ad_id = ad.id, author_id = ad.author_id, "ad stored");
        Ok(ad)
    }

    async fn get(&self, id: i64) -> DomainResult<Ad> {
        let table = self.inner.lock().await;
        table
            .ads
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::ad_not_found(id))
    }

    async fn update(&self, id: i64, title: &str, text: &str) -> DomainResult<Ad> {
        let mut table = self.inner.lock().await;
        let ad = table
            .ads
            .get_mut(&id)
            .ok_or_else(|| DomainError::ad_not_found(id))?;
        ad.title = title.to_string();
        ad.text = text.to_string();
        ad.touch(Utc::now());
        Ok(ad.clone())
    }

    async fn update_status(&self, id: i64, published: bool) -> DomainResult<Ad> {
        let mut table = self.inner.lock().await;
        let ad = table
            .ads
            .get_mut(&id)
            .ok_or_else(|| DomainError::ad_not_found(id))?;
        ad.published = published;
        ad.touch(Utc::now());
        Ok(ad.clone())
    }

    async fn get_all_ads(&self) -> DomainResult<Vec<Ad>> {
        let table = self.inner.lock().await;
        Ok(table.ads.values().filter(|ad| ad.published).cloned().collect())
    }

    async fn get_ads(&self, filter: &AdFilter) -> DomainResult<Vec<Ad>> {
        let table = self.inner.lock().await;
        Ok(table
            .ads
            .values()
            .filter(|ad| filter.matches(ad))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let mut table = self.inner.lock().await;
        table
            .ads
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::ad_not_found(id))
    }
}
