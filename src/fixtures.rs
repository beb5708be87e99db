//! Built-in catalog used when no remote API is configured. The records are
//! fully populated so every view renders the same way it would against the
//! live service.

use async_trait::async_trait;

use crate::api::PAGE_LIMIT;
use crate::catalog::CatalogSource;
use crate::media::{Genre, Movie, PaginatedResponse, Person};

fn person(id: &str, name: &str) -> Person {
    Person {
        id: String::from(id),
        name: String::from(name),
        photo: None,
        role: None,
    }
}

fn actor(id: &str, name: &str, role: &str) -> Person {
    Person {
        id: String::from(id),
        name: String::from(name),
        photo: None,
        role: Some(String::from(role)),
    }
}

#[allow(clippy::too_many_arguments)]
fn movie(
    id: &str,
    title: &str,
    year: i32,
    duration: u32,
    rating: f32,
    synopsis: &str,
    genres: &[&str],
    director: Person,
    actors: Vec<Person>,
    release_date: &str,
    tagline: &str,
) -> Movie {
    Movie {
        id: String::from(id),
        title: String::from(title),
        original_title: String::from(title),
        poster: format!("https://images.movieflix.dev/posters/{}.jpg", id),
        backdrop: format!("https://images.movieflix.dev/backdrops/{}.jpg", id),
        year,
        duration,
        rating,
        synopsis: String::from(synopsis),
        genres: genres.iter().map(|name| Genre::from_name(name)).collect(),
        director,
        actors,
        trailer_url: None,
        budget: None,
        revenue: None,
        release_date: String::from(release_date),
        language: String::from("en"),
        tagline: Some(String::from(tagline)),
    }
}

pub fn fixture_movies() -> Vec<Movie> {
    vec![
        movie(
            "1",
            "Midnight Circuit",
            2021,
            118,
            7.9,
            "A getaway driver takes one last job across a city locked down for the night.",
            &["Action", "Thriller"],
            person("d1", "Mara Ellison"),
            vec![
                actor("a1", "Dev Okafor", "Cole"),
                actor("a2", "Lena Voss", "Ria"),
            ],
            "2021-09-17",
            "Every light in the city is red.",
        ),
        movie(
            "2",
            "The Cartographer's Daughter",
            2019,
            131,
            8.2,
            "An archivist retraces her father's unfinished map through a country that no longer exists.",
            &["Drama", "Adventure"],
            person("d2", "Tomas Reinholt"),
            vec![
                actor("a3", "Ines Bakker", "Vera"),
                actor("a4", "Paul Ashworth", "Kessler"),
            ],
            "2019-02-08",
            "Some borders are drawn in memory.",
        ),
        movie(
            "3",
            "Low Orbit",
            2023,
            104,
            7.4,
            "Two salvage pilots discover their decommissioned station is not as empty as advertised.",
            &["Science Fiction", "Thriller"],
            person("d3", "Aiko Tanabe"),
            vec![
                actor("a5", "Marcus Hale", "Webb"),
                actor("a6", "Sofia Reyes", "Ituarte"),
            ],
            "2023-06-30",
            "Gravity is the least of their problems.",
        ),
        movie(
            "4",
            "Stray Harbor",
            2018,
            96,
            6.8,
            "A ferry town spends one unusual summer hosting a whale that refuses to leave.",
            &["Comedy", "Drama"],
            person("d4", "Bo Lindqvist"),
            vec![
                actor("a7", "Hannah Pruitt", "June"),
                actor("a8", "Dev Okafor", "Mayor Ellis"),
            ],
            "2018-07-13",
            "The tide brought company.",
        ),
        movie(
            "5",
            "Glasswing",
            2022,
            142,
            8.6,
            "A documentary crew follows a restorer rebuilding a cathedral window shattered in the war.",
            &["Drama"],
            person("d2", "Tomas Reinholt"),
            vec![
                actor("a9", "Camille Arno", "Herself"),
                actor("a10", "Viktor Duren", "Himself"),
            ],
            "2022-11-04",
            "Light remembers everything.",
        ),
        movie(
            "6",
            "Null Island",
            2020,
            109,
            7.1,
            "A cartography intern ships a typo that sends half the world's deliveries to coordinates 0,0.",
            &["Comedy", "Adventure"],
            person("d5", "Priya Raghavan"),
            vec![
                actor("a11", "Theo Marsh", "Finn"),
                actor("a12", "Lena Voss", "Adjoa"),
            ],
            "2020-03-06",
            "Somewhere had to be nowhere.",
        ),
    ]
}

/// Distinct genres across the fixture set, in first-seen order.
pub fn fixture_genres() -> Vec<Genre> {
    let mut genres: Vec<Genre> = Vec::new();
    for movie in fixture_movies() {
        for genre in movie.genres {
            if !genres.iter().any(|g| g.slug == genre.slug) {
                genres.push(genre);
            }
        }
    }
    genres
}

pub struct FixtureCatalog {
    movies: Vec<Movie>,
}

impl FixtureCatalog {
    pub fn new() -> Self {
        Self {
            movies: fixture_movies(),
        }
    }

    fn page_of(&self, movies: Vec<Movie>, page: u32) -> PaginatedResponse {
        let total = movies.len() as u32;
        let start = ((page.max(1) - 1) * PAGE_LIMIT) as usize;
        let movies: Vec<Movie> = movies
            .into_iter()
            .skip(start)
            .take(PAGE_LIMIT as usize)
            .collect();
        PaginatedResponse {
            page: Some(page.max(1)),
            limit: PAGE_LIMIT,
            total,
            movies,
        }
    }

    fn matches_query(movie: &Movie, needle: &str) -> bool {
        movie.title.to_lowercase().contains(needle)
            || movie.director.name.to_lowercase().contains(needle)
            || movie
                .actors
                .iter()
                .any(|a| a.name.to_lowercase().contains(needle))
    }
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for FixtureCatalog {
    fn name(&self) -> &str {
        "fixtures"
    }

    async fn movies(&self, page: u32) -> PaginatedResponse {
        self.page_of(self.movies.clone(), page)
    }

    async fn movie(&self, id: &str) -> Option<Movie> {
        self.movies.iter().find(|m| m.id == id).cloned()
    }

    async fn search(&self, query: &str, page: u32) -> PaginatedResponse {
        let needle = query.to_lowercase();
        let matches: Vec<Movie> = self
            .movies
            .iter()
            .filter(|m| Self::matches_query(m, &needle))
            .cloned()
            .collect();
        self.page_of(matches, page)
    }

    async fn movies_by_genre(&self, slug: &str, page: u32) -> PaginatedResponse {
        let matches: Vec<Movie> = self
            .movies
            .iter()
            .filter(|m| m.genres.iter().any(|g| g.slug == slug))
            .cloned()
            .collect();
        self.page_of(matches, page)
    }

    async fn trending(&self) -> Vec<Movie> {
        self.movies.clone()
    }

    async fn recommendations(&self, id: &str) -> Vec<Movie> {
        let Some(subject) = self.movies.iter().find(|m| m.id == id) else {
            return Vec::new();
        };
        self.movies
            .iter()
            .filter(|m| {
                m.id != subject.id
                    && m.genres
                        .iter()
                        .any(|g| subject.genres.iter().any(|sg| sg.slug == g.slug))
            })
            .cloned()
            .collect()
    }

    async fn genres(&self) -> Vec<Genre> {
        fixture_genres()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime builds")
            .block_on(future)
    }

    #[test]
    fn search_matches_title_cast_and_director() {
        let catalog = FixtureCatalog::new();
        let by_title = block_on(catalog.search("low orbit", 1));
        assert_eq!(by_title.movies.len(), 1);
        assert_eq!(by_title.movies[0].id, "3");

        let by_director = block_on(catalog.search("reinholt", 1));
        assert_eq!(by_director.movies.len(), 2);

        let by_actor = block_on(catalog.search("Dev Okafor", 1));
        assert_eq!(by_actor.movies.len(), 2);
    }

    #[test]
    fn genre_filter_matches_slugs() {
        let catalog = FixtureCatalog::new();
        let page = block_on(catalog.movies_by_genre("science-fiction", 1));
        assert_eq!(page.movies.len(), 1);
        assert_eq!(page.movies[0].title, "Low Orbit");
        assert_eq!(page.total, 1);
    }

    #[test]
    fn paging_reports_totals() {
        let catalog = FixtureCatalog::new();
        let page = block_on(catalog.movies(1));
        assert_eq!(page.page, Some(1));
        assert_eq!(page.total, 6);
        assert!(!page.has_next_page());

        let past_end = block_on(catalog.movies(2));
        assert!(past_end.movies.is_empty());
        assert_eq!(past_end.total, 6);
    }

    #[test]
    fn recommendations_share_a_genre_and_exclude_the_subject() {
        let catalog = FixtureCatalog::new();
        let similar = block_on(catalog.recommendations("1"));
        assert!(!similar.is_empty());
        assert!(similar.iter().all(|m| m.id != "1"));
        assert!(similar.iter().all(|m| {
            m.genres
                .iter()
                .any(|g| g.slug == "action" || g.slug == "thriller")
        }));

        assert!(block_on(catalog.recommendations("missing")).is_empty());
    }

    #[test]
    fn fixture_genres_are_distinct() {
        let genres = fixture_genres();
        let mut slugs: Vec<&str> = genres.iter().map(|g| g.slug.as_str()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), genres.len());
    }
}
