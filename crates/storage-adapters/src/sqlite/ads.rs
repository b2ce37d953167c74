use async_trait::async_trait;
use chrono::Utc;
use domains::{Ad, AdFilter, AdRepository, DomainError, DomainResult, NewAd};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tokio::sync::Mutex;

use super::{open_pool, storage_err};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS ads (
    id            INTEGER PRIMARY KEY,
    title         TEXT    NOT NULL,
    text          TEXT    NOT NULL,
    author_id     INTEGER NOT NULL,
    published     BOOLEAN NOT NULL DEFAULT 0,
    creation_time TEXT    NOT NULL,
    update_time   TEXT    NOT NULL
)";

/// SQLite-backed `AdRepository`.
///
/// The mutex holds the last assigned identifier and is kept for the whole of
/// every operation, so reads and writes never interleave.
pub struct SqliteAdRepository {
    pool: SqlitePool,
    last_id: Mutex<i64>,
}

impl SqliteAdRepository {
    /// Connects, creates the `ads` table if needed, and resumes the counter.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let pool = open_pool(url).await?;
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        let last_id: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(id), 0) FROM ads")
            .fetch_one(&pool)
            .await?;
        tracing::info!(url, last_id, "ads table ready");
        Ok(Self {
            pool,
            last_id: Mutex::new(last_id),
        })
    }

    async fn fetch(&self, id: i64) -> DomainResult<Ad> {
        let row = sqlx::query("SELECT * FROM ads WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;
        match row {
            Some(row) => ad_from_row(&row).map_err(storage_err),
            None => Err(DomainError::ad_not_found(id)),
        }
    }

    async fn save(&self, ad: &Ad) -> DomainResult<()> {
        sqlx::query(
            "UPDATE ads SET title = ?, text = ?, published = ?, update_time = ? WHERE id = ?",
        )
        .bind(&ad.title)
        .bind(&ad.text)
        .bind(ad.published)
        .bind(ad.update_time)
        .bind(ad.id)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;
        Ok(())
    }

    async fn fetch_all(&self) -> DomainResult<Vec<Ad>> {
        sqlx::query("SELECT * FROM ads ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?
            .iter()
            .map(|row| ad_from_row(row).map_err(storage_err))
            .collect()
    }
}

fn ad_from_row(row: &SqliteRow) -> Result<Ad, sqlx::Error> {
    Ok(Ad {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        text: row.try_get("text")?,
        author_id: row.try_get("author_id")?,
        published: row.try_get("published")?,
        creation_time: row.try_get("creation_time")?,
        update_time: row.try_get("update_time")?,
    })
}

#[async_trait]
impl AdRepository for SqliteAdRepository {
    async fn create(&self, new_ad: NewAd) -> DomainResult<Ad> {
        let mut last_id = self.last_id.lock().await;
        let ad = Ad::from_new(*last_id + 1, new_ad, Utc::now());

        sqlx::query(
            "INSERT INTO ads (id, title, text, author_id, published, creation_time, update_time) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(ad.id)
        .bind(&ad.title)
        .bind(&ad.text)
        .bind(ad.author_id)
        .bind(ad.published)
        .bind(ad.creation_time)
        .bind(ad.update_time)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        *last_id = ad.id;
        Ok(ad)
    }

    async fn get(&self, id: i64) -> DomainResult<Ad> {
        let _guard = self.last_id.lock().await;
        self.fetch(id).await
    }

    async fn update(&self, id: i64, title: &str, text: &str) -> DomainResult<Ad> {
        let _guard = self.last_id.lock().await;
        let mut ad = self.fetch(id).await?;
        ad.title = title.to_string();
        ad.text = text.to_string();
        ad.touch(Utc::now());
        self.save(&ad).await?;
        Ok(ad)
    }

    async fn update_status(&self, id: i64, published: bool) -> DomainResult<Ad> {
        let _guard = self.last_id.lock().await;
        let mut ad = self.fetch(id).await?;
        ad.published = published;
        ad.touch(Utc::now());
        self.save(&ad).await?;
        Ok(ad)
    }

    async fn get_all_ads(&self) -> DomainResult<Vec<Ad>> {
        let _guard = self.last_id.lock().await;
        let ads = self.fetch_all().await?;
        Ok(ads.into_iter().filter(|ad| ad.published).collect())
    }

    async fn get_ads(&self, filter: &AdFilter) -> DomainResult<Vec<Ad>> {
        // Filtering stays in-process: SQLite's LIKE would fold ASCII case.
        let _guard = self.last_id.lock().await;
        let ads = self.fetch_all().await?;
        Ok(ads.into_iter().filter(|ad| filter.matches(ad)).collect())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let _guard = self.last_id.lock().await;
        let result = sqlx::query("DELETE FROM ads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::ad_not_found(id));
        }
        Ok(())
    }
}
