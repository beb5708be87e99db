use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::api::CatalogClient;
use crate::fixtures::FixtureCatalog;
use crate::media::{Category, ContentSection, Genre, Movie, PaginatedResponse};
use crate::settings::{AppSettings, DataSource};

/// Where catalog data comes from: the remote graph API or the compiled-in
/// fixture set. Every method resolves to a plain value; sources own their
/// failure handling.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn name(&self) -> &str;

    async fn movies(&self, page: u32) -> PaginatedResponse;

    async fn movie(&self, id: &str) -> Option<Movie>;

    async fn search(&self, query: &str, page: u32) -> PaginatedResponse;

    async fn movies_by_genre(&self, slug: &str, page: u32) -> PaginatedResponse;

    async fn trending(&self) -> Vec<Movie>;

    async fn recommendations(&self, id: &str) -> Vec<Movie>;

    async fn genres(&self) -> Vec<Genre>;
}

#[async_trait]
impl CatalogSource for CatalogClient {
    fn name(&self) -> &str {
        "remote"
    }

    async fn movies(&self, page: u32) -> PaginatedResponse {
        self.fetch_movies(page).await
    }

    async fn movie(&self, id: &str) -> Option<Movie> {
        self.fetch_movie_by_id(id).await
    }

    async fn search(&self, query: &str, page: u32) -> PaginatedResponse {
        self.search_movies(query, page).await
    }

    async fn movies_by_genre(&self, slug: &str, page: u32) -> PaginatedResponse {
        self.fetch_movies_by_genre(slug, page).await
    }

    async fn trending(&self) -> Vec<Movie> {
        self.fetch_trending().await
    }

    async fn recommendations(&self, id: &str) -> Vec<Movie> {
        self.fetch_recommendations(id).await
    }

    async fn genres(&self) -> Vec<Genre> {
        self.fetch_genres().await
    }
}

/// Cheaply clonable handle the UI threads through its tasks.
#[derive(Clone)]
pub struct Catalog {
    source: Arc<dyn CatalogSource>,
}

impl Catalog {
    pub fn remote(base_url: String) -> Self {
        Self {
            source: Arc::new(CatalogClient::new(base_url)),
        }
    }

    pub fn fixtures() -> Self {
        Self {
            source: Arc::new(FixtureCatalog::new()),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        let catalog = match settings.data_source {
            DataSource::Remote => Self::remote(settings.api_base_url.clone()),
            DataSource::Fixtures => Self::fixtures(),
        };
        info!(source = catalog.source.name(), "catalog source selected");
        catalog
    }

    pub async fn movies(&self, page: u32) -> PaginatedResponse {
        self.source.movies(page).await
    }

    pub async fn movie(&self, id: &str) -> Option<Movie> {
        self.source.movie(id).await
    }

    pub async fn search(&self, query: &str, page: u32) -> PaginatedResponse {
        self.source.search(query, page).await
    }

    pub async fn movies_by_genre(&self, slug: &str, page: u32) -> PaginatedResponse {
        self.source.movies_by_genre(slug, page).await
    }

    pub async fn trending(&self) -> Vec<Movie> {
        self.source.trending().await
    }

    pub async fn recommendations(&self, id: &str) -> Vec<Movie> {
        self.source.recommendations(id).await
    }

    pub async fn genres(&self) -> Vec<Genre> {
        self.source.genres().await
    }
}

/// Home rows: trending, the first catalog page, then one row per leading
/// genre. Rows that come back empty are dropped rather than rendered hollow.
pub async fn load_home_sections(catalog: Catalog) -> Vec<ContentSection> {
    let mut sections = Vec::new();

    let trending = catalog.trending().await;
    if !trending.is_empty() {
        sections.push(ContentSection {
            title: String::from("Trending Now"),
            category: Category::Trending,
            items: trending,
        });
    }

    let latest = catalog.movies(1).await;
    if !latest.movies.is_empty() {
        sections.push(ContentSection {
            title: String::from("New on MovieFlix"),
            category: Category::Catalog,
            items: latest.movies,
        });
    }

    for genre in catalog.genres().await.into_iter().take(2) {
        let page = catalog.movies_by_genre(&genre.slug, 1).await;
        if page.movies.is_empty() {
            continue;
        }
        sections.push(ContentSection {
            title: genre.name.clone(),
            category: Category::Genre(genre),
            items: page.movies,
        });
    }

    sections
}

/// The hero is the first trending title, upgraded with its full record when
/// the detail fetch succeeds.
pub async fn load_hero(catalog: Catalog) -> Option<Movie> {
    let first = catalog.trending().await.into_iter().next()?;
    match catalog.movie(&first.id).await {
        Some(full) => Some(full),
        None => Some(first),
    }
}

pub async fn load_genres(catalog: Catalog) -> Vec<Genre> {
    catalog.genres().await
}
