use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, RwLock};
use std::time::{Duration, Instant};

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};

use crate::media::{Genre, Movie, PaginatedResponse, RawMovie, RawMoviePage};

pub const DEFAULT_API_BASE_URL: &str = "https://neo4j-movies-api-production.up.railway.app";

/// Page size every list request asks for.
pub const PAGE_LIMIT: u32 = 20;

/// Staleness windows per query type. Short for the queries whose inputs churn
/// (search, recommendations), longer for the slow-moving catalog data.
const CATALOG_TTL: Duration = Duration::from_secs(5 * 60);
const SEARCH_TTL: Duration = Duration::from_secs(2 * 60);
const RECOMMENDATIONS_TTL: Duration = Duration::from_secs(2 * 60);
const TRENDING_TTL: Duration = Duration::from_secs(5 * 60);
const DETAIL_TTL: Duration = Duration::from_secs(5 * 60);
const GENRES_TTL: Duration = Duration::from_secs(10 * 60);

fn url_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    result
}

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Parse(String),
}

/// `/api/genres` answers with plain name strings on older deployments and
/// `{id, name, slug}` objects on newer ones. Accept both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawGenreEntry {
    Full {
        id: Option<String>,
        name: String,
        slug: Option<String>,
    },
    Name(String),
}

impl From<RawGenreEntry> for Genre {
    fn from(entry: RawGenreEntry) -> Self {
        match entry {
            RawGenreEntry::Name(name) => Genre::from_name(&name),
            RawGenreEntry::Full { id, name, slug } => {
                let slug = slug
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| crate::media::slugify(&name));
                Self {
                    id: id.filter(|s| !s.is_empty()).unwrap_or_else(|| slug.clone()),
                    name,
                    slug,
                }
            }
        }
    }
}

struct CacheEntry<T> {
    data: T,
    created_at: Instant,
    ttl: Duration,
}

impl<T: Clone> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            created_at: Instant::now(),
            ttl,
        }
    }

    fn is_fresh(&self) -> bool {
        self.created_at.elapsed() < self.ttl
    }
}

type Cache<T> = Arc<RwLock<HashMap<String, CacheEntry<T>>>>;

/// Client for the movie catalog API. Every public method resolves to a plain
/// value: failures are logged here and collapse to the empty shape of the
/// query, so callers never see an error state.
#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    http_client: Arc<reqwest::Client>,
    page_cache: Cache<PaginatedResponse>,
    list_cache: Cache<Vec<Movie>>,
    movie_cache: Cache<Option<Movie>>,
    genre_cache: Cache<Vec<Genre>>,
    inflight: Arc<StdMutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl CatalogClient {
    pub fn new(base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            http_client: Arc::new(reqwest::Client::new()),
            page_cache: Arc::new(RwLock::new(HashMap::new())),
            list_cache: Arc::new(RwLock::new(HashMap::new())),
            movie_cache: Arc::new(RwLock::new(HashMap::new())),
            genre_cache: Arc::new(RwLock::new(HashMap::new())),
            inflight: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    fn page_url(&self, path: &str, page: u32) -> String {
        format!(
            "{}{}?page={}&limit={}",
            self.base_url, path, page, PAGE_LIMIT
        )
    }

    fn search_url(&self, query: &str, page: u32) -> String {
        format!(
            "{}/api/movies/search?q={}&page={}&limit={}",
            self.base_url,
            url_encode(query),
            page,
            PAGE_LIMIT
        )
    }

    /// One gate per cache key: whoever locks it first issues the request, the
    /// rest wait and then read the entry the winner stored.
    fn inflight_gate(&self, key: &str) -> Arc<AsyncMutex<()>> {
        match self.inflight.lock() {
            Ok(mut inflight) => inflight
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone(),
            // A poisoned map only costs the deduplication, not the fetch.
            Err(_) => Arc::new(AsyncMutex::new(())),
        }
    }

    fn release_gate(&self, key: &str) {
        if let Ok(mut inflight) = self.inflight.lock() {
            inflight.remove(key);
        }
    }

    fn cached<T: Clone>(cache: &Cache<T>, key: &str) -> Option<T> {
        cache
            .read()
            .ok()?
            .get(key)
            .filter(|entry| entry.is_fresh())
            .map(|entry| entry.data.clone())
    }

    fn store<T: Clone>(cache: &Cache<T>, key: String, data: T, ttl: Duration) {
        if let Ok(mut cache) = cache.write() {
            cache.insert(key, CacheEntry::new(data, ttl));
        }
    }

    async fn fetch_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ApiError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(ApiError::Status(status));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Shared fetch path for paginated endpoints: cache hit, else at most one
    /// request per key with waiters attaching to the winner's result; failure
    /// collapses to the empty page.
    async fn fetch_page(&self, key: String, ttl: Duration, url: String) -> PaginatedResponse {
        if let Some(hit) = Self::cached(&self.page_cache, &key) {
            debug!(key = %key, "page cache hit");
            return hit;
        }

        let gate = self.inflight_gate(&key);
        let _guard = gate.lock().await;
        if let Some(hit) = Self::cached(&self.page_cache, &key) {
            return hit;
        }

        let page = match self.fetch_json::<RawMoviePage>(&url).await {
            Ok(raw) => {
                let page = PaginatedResponse::from(raw);
                Self::store(&self.page_cache, key.clone(), page.clone(), ttl);
                page
            }
            Err(err) => {
                warn!(key = %key, error = %err, "list fetch failed, serving empty page");
                PaginatedResponse::empty(PAGE_LIMIT)
            }
        };
        self.release_gate(&key);
        page
    }

    /// Same flow for the unpaged list endpoints (trending, recommendations),
    /// which still answer with the page envelope.
    async fn fetch_list(&self, key: String, ttl: Duration, url: String) -> Vec<Movie> {
        if let Some(hit) = Self::cached(&self.list_cache, &key) {
            debug!(key = %key, "list cache hit");
            return hit;
        }

        let gate = self.inflight_gate(&key);
        let _guard = gate.lock().await;
        if let Some(hit) = Self::cached(&self.list_cache, &key) {
            return hit;
        }

        let movies = match self.fetch_json::<RawMoviePage>(&url).await {
            Ok(raw) => {
                let movies: Vec<Movie> = raw.movies.into_iter().map(Movie::from).collect();
                Self::store(&self.list_cache, key.clone(), movies.clone(), ttl);
                movies
            }
            Err(err) => {
                warn!(key = %key, error = %err, "list fetch failed, serving empty list");
                Vec::new()
            }
        };
        self.release_gate(&key);
        movies
    }

    pub async fn fetch_movies(&self, page: u32) -> PaginatedResponse {
        let key = format!("movies_{}", page);
        let url = self.page_url("/api/movies", page);
        self.fetch_page(key, CATALOG_TTL, url).await
    }

    pub async fn search_movies(&self, query: &str, page: u32) -> PaginatedResponse {
        let key = format!("search_{}_{}", query, page);
        let url = self.search_url(query, page);
        self.fetch_page(key, SEARCH_TTL, url).await
    }

    pub async fn fetch_movies_by_genre(&self, slug: &str, page: u32) -> PaginatedResponse {
        let key = format!("genre_{}_{}", slug, page);
        let url = self.page_url(&format!("/api/movies/genre/{}", url_encode(slug)), page);
        self.fetch_page(key, CATALOG_TTL, url).await
    }

    pub async fn fetch_trending(&self) -> Vec<Movie> {
        let url = format!("{}/api/movies/trending", self.base_url);
        self.fetch_list(String::from("trending"), TRENDING_TTL, url)
            .await
    }

    pub async fn fetch_recommendations(&self, id: &str) -> Vec<Movie> {
        let key = format!("recommendations_{}", id);
        let url = format!("{}/api/recommendations/{}", self.base_url, url_encode(id));
        self.fetch_list(key, RECOMMENDATIONS_TTL, url).await
    }

    /// Single movie by id. `None` covers both an unknown id and a failed
    /// fetch; the presentation layer owns the not-found rendering.
    pub async fn fetch_movie_by_id(&self, id: &str) -> Option<Movie> {
        let key = format!("movie_{}", id);
        if let Some(hit) = Self::cached(&self.movie_cache, &key) {
            debug!(key = %key, "movie cache hit");
            return hit;
        }

        let gate = self.inflight_gate(&key);
        let _guard = gate.lock().await;
        if let Some(hit) = Self::cached(&self.movie_cache, &key) {
            return hit;
        }

        let url = format!("{}/api/movies/{}", self.base_url, url_encode(id));
        let movie = match self.fetch_json::<RawMovie>(&url).await {
            Ok(raw) => {
                let movie = Some(Movie::from(raw));
                Self::store(&self.movie_cache, key.clone(), movie.clone(), DETAIL_TTL);
                movie
            }
            Err(ApiError::Status(404)) => {
                debug!(id = %id, "movie not found");
                Self::store(&self.movie_cache, key.clone(), None, DETAIL_TTL);
                None
            }
            Err(err) => {
                warn!(id = %id, error = %err, "movie fetch failed");
                None
            }
        };
        self.release_gate(&key);
        movie
    }

    pub async fn fetch_genres(&self) -> Vec<Genre> {
        let key = String::from("genres");
        if let Some(hit) = Self::cached(&self.genre_cache, &key) {
            debug!("genre cache hit");
            return hit;
        }

        let gate = self.inflight_gate(&key);
        let _guard = gate.lock().await;
        if let Some(hit) = Self::cached(&self.genre_cache, &key) {
            return hit;
        }

        let url = format!("{}/api/genres", self.base_url);
        let genres = match self.fetch_json::<Vec<RawGenreEntry>>(&url).await {
            Ok(entries) => {
                let genres: Vec<Genre> = entries.into_iter().map(Genre::from).collect();
                Self::store(&self.genre_cache, key.clone(), genres.clone(), GENRES_TTL);
                genres
            }
            Err(err) => {
                warn!(error = %err, "genre fetch failed, serving empty list");
                Vec::new()
            }
        };
        self.release_gate(&key);
        genres
    }
}

pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, String> {
    reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(url_encode("blade runner"), "blade%20runner");
        assert_eq!(url_encode("sci-fi"), "sci-fi");
        assert_eq!(url_encode("a&b"), "a%26b");
    }

    #[test]
    fn cache_entry_expires_after_ttl() {
        let entry = CacheEntry::new(1u32, Duration::from_secs(60));
        assert!(entry.is_fresh());
        let expired = CacheEntry {
            data: 1u32,
            created_at: Instant::now() - Duration::from_secs(61),
            ttl: Duration::from_secs(60),
        };
        assert!(!expired.is_fresh());
    }

    #[test]
    fn empty_page_matches_failure_contract() {
        let empty = PaginatedResponse::empty(PAGE_LIMIT);
        assert_eq!(empty.page, None);
        assert_eq!(empty.limit, PAGE_LIMIT);
        assert_eq!(empty.total, 0);
        assert!(empty.movies.is_empty());
        assert!(!empty.has_next_page());
    }

    #[test]
    fn parses_page_envelope() {
        let raw: RawMoviePage = serde_json::from_str(
            r#"{"page": 2, "limit": 20, "total": 45, "movies": [{"id": "m1", "title": "Heat"}]}"#,
        )
        .expect("envelope deserializes");
        let page = PaginatedResponse::from(raw);
        assert_eq!(page.page, Some(2));
        assert_eq!(page.total, 45);
        assert_eq!(page.movies.len(), 1);
        assert!(page.has_next_page());
    }

    #[test]
    fn parses_genre_list_in_both_shapes() {
        let names: Vec<RawGenreEntry> =
            serde_json::from_str(r#"["Action", "Science Fiction"]"#).expect("names deserialize");
        let genres: Vec<Genre> = names.into_iter().map(Genre::from).collect();
        assert_eq!(genres[1].slug, "science-fiction");

        let objects: Vec<RawGenreEntry> = serde_json::from_str(
            r#"[{"id": "g1", "name": "Action", "slug": "action"}, {"name": "Film Noir"}]"#,
        )
        .expect("objects deserialize");
        let genres: Vec<Genre> = objects.into_iter().map(Genre::from).collect();
        assert_eq!(genres[0].id, "g1");
        assert_eq!(genres[1].slug, "film-noir");
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime builds")
            .block_on(future)
    }

    #[test]
    fn failed_list_fetch_collapses_to_the_empty_page() {
        // Nothing listens on the discard port, so the request fails fast.
        let client = CatalogClient::new(String::from("http://127.0.0.1:9"));
        let page = block_on(client.fetch_movies(1));
        assert_eq!(page.page, None);
        assert_eq!(page.limit, PAGE_LIMIT);
        assert_eq!(page.total, 0);
        assert!(page.movies.is_empty());

        assert!(block_on(client.fetch_movie_by_id("m1")).is_none());
        assert!(block_on(client.fetch_genres()).is_empty());
    }

    #[test]
    fn inflight_gates_are_shared_per_key() {
        let client = CatalogClient::new(String::from("https://api.example"));
        let first = client.inflight_gate("movies_1");
        let second = client.inflight_gate("movies_1");
        assert!(Arc::ptr_eq(&first, &second));

        client.release_gate("movies_1");
        let third = client.inflight_gate("movies_1");
        assert!(!Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = CatalogClient::new(String::from("https://api.example/"));
        assert_eq!(
            client.page_url("/api/movies", 1),
            "https://api.example/api/movies?page=1&limit=20"
        );
        assert_eq!(
            client.search_url("blade runner", 3),
            "https://api.example/api/movies/search?q=blade%20runner&page=3&limit=20"
        );
    }
}
