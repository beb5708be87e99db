use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use chrono::{Datelike, Local};
use iced::widget::image::Handle;
use iced::Color;
use serde::{Deserialize, Serialize};

pub fn simple_hash(s: &str) -> String {
    let mut hash: u64 = 5381;
    for byte in s.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    format!("{:016x}", hash)
}

fn get_cache_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".cache")
            .join("movieflix")
            .join("images")
    })
}

pub const BACKGROUND_BLACK: Color = Color::from_rgb(0.0, 0.0, 0.0);
pub const SURFACE_DARK_GRAY: Color = Color::from_rgb(0.078, 0.078, 0.078);
pub const ACCENT_RED: Color = Color::from_rgb(0.898, 0.035, 0.078);
pub const TEXT_WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const TEXT_GRAY: Color = Color::from_rgb(0.702, 0.702, 0.702);

pub const CAROUSEL_IDS: [&str; 8] = [
    "carousel-0",
    "carousel-1",
    "carousel-2",
    "carousel-3",
    "carousel-4",
    "carousel-5",
    "carousel-6",
    "carousel-7",
];

pub fn carousel_id(index: usize) -> Option<&'static str> {
    CAROUSEL_IDS.get(index).copied()
}

pub type MovieId = String;

pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/500x750?text=No+Poster";
pub const PLACEHOLDER_BACKDROP: &str = "https://via.placeholder.com/1920x1080?text=No+Backdrop";

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Home,
    Browse,
    Auth,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavItem {
    Home,
    Browse,
}

#[derive(Debug, Clone)]
pub enum LoadingState {
    Idle,
    Loading,
}

/// Lowercase, whitespace to hyphens. Matches the slugs the API uses in
/// `/api/movies/genre/{slug}` routes.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl Genre {
    pub fn from_name(name: &str) -> Self {
        let slug = slugify(name);
        Self {
            id: slug.clone(),
            name: name.to_string(),
            slug,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub photo: Option<String>,
    pub role: Option<String>,
}

impl Person {
    pub fn unknown() -> Self {
        Self {
            id: String::from("unknown"),
            name: String::from("Unknown"),
            photo: None,
            role: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub original_title: String,
    pub poster: String,
    pub backdrop: String,
    pub year: i32,
    pub duration: u32,
    pub rating: f32,
    pub synopsis: String,
    pub genres: Vec<Genre>,
    pub director: Person,
    pub actors: Vec<Person>,
    pub trailer_url: Option<String>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub release_date: String,
    pub language: String,
    pub tagline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResponse {
    pub page: Option<u32>,
    pub limit: u32,
    pub total: u32,
    pub movies: Vec<Movie>,
}

impl PaginatedResponse {
    /// The value every failed list fetch collapses to.
    pub fn empty(limit: u32) -> Self {
        Self {
            page: None,
            limit,
            total: 0,
            movies: Vec::new(),
        }
    }

    pub fn has_next_page(&self) -> bool {
        match self.page {
            Some(page) => crate::pagination::has_next_page(page, self.limit, self.total),
            None => false,
        }
    }
}

/// Which source a browse request was issued against. Responses carry this so
/// results for a superseded query can be discarded on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseQuery {
    Catalog,
    Search(String),
    Genre(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Category {
    Trending,
    Catalog,
    Genre(Genre),
}

#[derive(Debug, Clone)]
pub struct ContentSection {
    pub title: String,
    pub category: Category,
    pub items: Vec<Movie>,
}

#[derive(Debug, Clone)]
pub struct HeaderState {
    pub active_nav: NavItem,
}

impl Default for HeaderState {
    fn default() -> Self {
        Self {
            active_nav: NavItem::Home,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    cache: HashMap<String, Handle>,
    pending: HashSet<String>,
    failed: HashSet<String>,
    cache_directory: Option<PathBuf>,
}

impl ImageCache {
    pub fn new() -> Self {
        let cache_directory = get_cache_dir();
        if let Some(ref dir) = cache_directory {
            let _ = std::fs::create_dir_all(dir);
        }
        Self {
            cache: HashMap::new(),
            pending: HashSet::new(),
            failed: HashSet::new(),
            cache_directory,
        }
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.cache.get(url)
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.pending.remove(&url);
        self.failed.remove(&url);
        self.cache.insert(url, handle);
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    pub fn mark_pending(&mut self, url: String) {
        self.pending.insert(url);
    }

    /// Load failures are remembered so views fall back to a placeholder
    /// rendering instead of re-requesting the same broken URL every frame.
    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    pub fn mark_failed(&mut self, url: String) {
        self.pending.remove(&url);
        self.failed.insert(url);
    }

    pub fn get_cache_path(&self, url: &str) -> Option<PathBuf> {
        self.cache_directory
            .as_ref()
            .map(|dir| dir.join(simple_hash(url)))
    }
}

#[derive(Debug, Clone)]
pub enum ScrollDirection {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub enum Message {
    SessionLoaded(Option<User>),
    Auth(crate::auth_page::AuthMessage),
    AuthFinished(User),
    Logout,
    NavigateTo(Page),
    SearchQueryChanged(String),
    SearchSubmit,
    SearchDebounceTriggered,
    ClearSearch,
    SelectGenre(Option<Genre>),
    PageSelected(u32),
    BrowsePageLoaded {
        query: BrowseQuery,
        page: u32,
        response: PaginatedResponse,
    },
    SectionsLoaded(Vec<ContentSection>),
    HeroLoaded(Option<Box<Movie>>),
    GenresLoaded(Vec<Genre>),
    OpenDetail(MovieId),
    CloseDetail,
    DetailLoaded(MovieId, Option<Box<Movie>>),
    SimilarLoaded(MovieId, Vec<Movie>),
    HoverCard(Option<MovieId>),
    HoverCardDelayed(MovieId),
    DetailHoverCard(Option<MovieId>),
    HoverCarousel(Option<usize>),
    ScrollCarousel(usize, ScrollDirection),
    AnimateScroll(usize),
    CarouselScrolled(usize, f32),
    MainScrolled(f32),
    LoadImage(String),
    ImageLoaded(String, Result<Handle, String>),
    ToggleProfileMenu,
    CloseProfileMenu,
}

/// Raw movie payload as the graph API returns it: every field may be absent.
/// The `From` impl below is the single place defaulting policy lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMovie {
    pub id: Option<String>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub tagline: Option<String>,
    /// Date-like string, e.g. "1995-11-22".
    pub year: Option<String>,
    pub duration: Option<u32>,
    pub rating: Option<f32>,
    pub synopsis: Option<String>,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub release_date: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub genres: Vec<RawGenre>,
    pub director: Option<RawPerson>,
    #[serde(default)]
    pub actors: Vec<RawPerson>,
    pub trailer_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGenre {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPerson {
    pub id: Option<String>,
    pub name: String,
    pub role: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMoviePage {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub total: Option<u32>,
    #[serde(default)]
    pub movies: Vec<RawMovie>,
}

/// First hyphen-delimited segment of a date-like string, parsed as a year.
/// Unparsable or absent dates fall back to the current calendar year.
pub fn year_from_date(date: Option<&str>) -> i32 {
    date.and_then(|d| d.split('-').next())
        .and_then(|y| y.trim().parse::<i32>().ok())
        .unwrap_or_else(|| Local::now().year())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<RawGenre> for Genre {
    fn from(raw: RawGenre) -> Self {
        let slug = slugify(&raw.name);
        Self {
            id: non_empty(raw.id).unwrap_or_else(|| slug.clone()),
            name: raw.name,
            slug,
        }
    }
}

impl From<RawPerson> for Person {
    fn from(raw: RawPerson) -> Self {
        Self {
            id: non_empty(raw.id).unwrap_or_else(|| simple_hash(&raw.name)),
            name: raw.name,
            photo: non_empty(raw.photo),
            role: non_empty(raw.role),
        }
    }
}

impl From<RawMovie> for Movie {
    fn from(raw: RawMovie) -> Self {
        let title = non_empty(raw.title).unwrap_or_else(|| String::from("Untitled"));
        let poster_raw = non_empty(raw.poster);
        let backdrop = non_empty(raw.backdrop)
            .or_else(|| poster_raw.clone())
            .unwrap_or_else(|| String::from(PLACEHOLDER_BACKDROP));
        let poster = poster_raw.unwrap_or_else(|| String::from(PLACEHOLDER_POSTER));
        let year = year_from_date(raw.year.as_deref());

        Self {
            id: non_empty(raw.id).unwrap_or_else(|| simple_hash(&title)),
            original_title: non_empty(raw.original_title).unwrap_or_else(|| title.clone()),
            poster,
            backdrop,
            year,
            duration: raw.duration.unwrap_or(0),
            rating: raw.rating.unwrap_or(0.0),
            synopsis: non_empty(raw.synopsis)
                .unwrap_or_else(|| String::from("No synopsis available.")),
            genres: raw.genres.into_iter().map(Genre::from).collect(),
            director: raw
                .director
                .map(Person::from)
                .unwrap_or_else(Person::unknown),
            actors: raw.actors.into_iter().map(Person::from).collect(),
            trailer_url: non_empty(raw.trailer_url),
            budget: raw.budget,
            revenue: raw.revenue,
            release_date: non_empty(raw.release_date).or(raw.year).unwrap_or_default(),
            language: non_empty(raw.language).unwrap_or_else(|| String::from("en")),
            tagline: raw.tagline,
            title,
        }
    }
}

impl From<RawMoviePage> for PaginatedResponse {
    fn from(raw: RawMoviePage) -> Self {
        Self {
            page: raw.page,
            limit: raw.limit.unwrap_or(crate::api::PAGE_LIMIT),
            total: raw.total.unwrap_or(0),
            movies: raw.movies.into_iter().map(Movie::from).collect(),
        }
    }
}

pub fn truncate_synopsis(synopsis: &str, max_length: usize) -> String {
    if synopsis.len() <= max_length {
        return synopsis.to_string();
    }
    let truncated = &synopsis[..max_length];
    format!(
        "{}...",
        truncated.rfind(' ').map_or(truncated, |i| &truncated[..i])
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_raw() -> RawMovie {
        serde_json::from_str("{}").expect("empty payload deserializes")
    }

    #[test]
    fn maps_empty_payload_to_documented_defaults() {
        let movie = Movie::from(bare_raw());
        assert_eq!(movie.title, "Untitled");
        assert_eq!(movie.original_title, "Untitled");
        assert_eq!(movie.poster, PLACEHOLDER_POSTER);
        assert_eq!(movie.backdrop, PLACEHOLDER_BACKDROP);
        assert_eq!(movie.duration, 0);
        assert_eq!(movie.rating, 0.0);
        assert_eq!(movie.synopsis, "No synopsis available.");
        assert_eq!(movie.language, "en");
        assert_eq!(movie.release_date, "");
        assert_eq!(movie.director.name, "Unknown");
        assert_eq!(movie.director.id, "unknown");
        assert!(movie.genres.is_empty());
        assert!(movie.actors.is_empty());
        assert!(movie.trailer_url.is_none());
        assert!(movie.budget.is_none());
        assert!(movie.tagline.is_none());
    }

    #[test]
    fn extracts_year_from_hyphenated_date() {
        assert_eq!(year_from_date(Some("1995-11-22")), 1995);
        assert_eq!(year_from_date(Some("2003")), 2003);
    }

    #[test]
    fn falls_back_to_current_year_for_bad_dates() {
        let current = Local::now().year();
        assert_eq!(year_from_date(None), current);
        assert_eq!(year_from_date(Some("soon")), current);
        assert_eq!(year_from_date(Some("")), current);
    }

    #[test]
    fn backdrop_falls_back_to_poster_before_placeholder() {
        let mut raw = bare_raw();
        raw.poster = Some(String::from("https://img.example/poster.jpg"));
        let movie = Movie::from(raw);
        assert_eq!(movie.backdrop, "https://img.example/poster.jpg");
        assert_eq!(movie.poster, "https://img.example/poster.jpg");
    }

    #[test]
    fn release_date_falls_back_to_year_string() {
        let mut raw = bare_raw();
        raw.year = Some(String::from("1999-03-31"));
        let movie = Movie::from(raw);
        assert_eq!(movie.year, 1999);
        assert_eq!(movie.release_date, "1999-03-31");
    }

    #[test]
    fn derives_genre_slug_from_name() {
        let genre = Genre::from(RawGenre {
            id: None,
            name: String::from("Science Fiction"),
        });
        assert_eq!(genre.slug, "science-fiction");
        assert_eq!(genre.id, "science-fiction");
        assert_eq!(genre.name, "Science Fiction");
    }

    #[test]
    fn missing_ids_get_stable_fallbacks() {
        let mut raw = bare_raw();
        raw.title = Some(String::from("The Matrix"));
        let once = Movie::from(raw.clone());
        let twice = Movie::from(raw);
        assert_eq!(once.id, twice.id);
        assert!(!once.id.is_empty());
    }

    #[test]
    fn maps_full_payload_verbatim() {
        let raw: RawMovie = serde_json::from_str(
            r#"{
                "id": "m-603",
                "title": "The Matrix",
                "originalTitle": "The Matrix",
                "tagline": "Free your mind",
                "year": "1999-03-31",
                "duration": 136,
                "rating": 8.7,
                "synopsis": "A hacker discovers reality is a simulation.",
                "poster": "https://img.example/matrix.jpg",
                "backdrop": "https://img.example/matrix-wide.jpg",
                "budget": 63000000,
                "revenue": 463517383,
                "releaseDate": "1999-03-31",
                "language": "en",
                "genres": [{"id": "g1", "name": "Science Fiction"}],
                "director": {"id": "p1", "name": "Lana Wachowski"},
                "actors": [{"id": "p2", "name": "Keanu Reeves", "role": "Neo"}],
                "trailerUrl": "https://videos.example/matrix"
            }"#,
        )
        .expect("payload deserializes");

        let movie = Movie::from(raw);
        assert_eq!(movie.id, "m-603");
        assert_eq!(movie.year, 1999);
        assert_eq!(movie.duration, 136);
        assert_eq!(movie.director.name, "Lana Wachowski");
        assert_eq!(movie.actors[0].role.as_deref(), Some("Neo"));
        assert_eq!(movie.budget, Some(63_000_000));
        assert_eq!(
            movie.trailer_url.as_deref(),
            Some("https://videos.example/matrix")
        );
        assert_eq!(movie.genres[0].slug, "science-fiction");
    }

    #[test]
    fn truncates_synopsis_on_word_boundary() {
        let truncated = truncate_synopsis("A hacker discovers reality is a simulation.", 20);
        assert_eq!(truncated, "A hacker discovers...");
        assert_eq!(truncate_synopsis("short", 20), "short");
    }
}
