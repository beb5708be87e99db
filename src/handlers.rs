use std::time::{Duration, Instant};

use iced::Task;
use tracing::debug;

use crate::api::fetch_image_bytes;
use crate::auth;
use crate::catalog::{load_genres, load_hero, load_home_sections};
use crate::detail_handlers;
use crate::media::{
    carousel_id, BrowseQuery, ContentSection, Genre, LoadingState, Message, Movie, MovieId,
    NavItem, Page, PaginatedResponse, ScrollDirection, User,
};
use crate::MovieFlix;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

pub fn handle_message(app: &mut MovieFlix, message: Message) -> Task<Message> {
    match message {
        Message::SessionLoaded(user) => {
            app.session = user;
            Task::none()
        }
        Message::Auth(auth_message) => handle_auth_message(app, auth_message),
        Message::AuthFinished(user) => handle_auth_finished(app, user),
        Message::Logout => handle_logout(app),
        Message::NavigateTo(page) => handle_navigate(app, page),
        Message::SearchQueryChanged(query) => handle_search_query_changed(app, query),
        Message::SearchSubmit => handle_search_submit(app),
        Message::SearchDebounceTriggered => handle_search_debounce_triggered(app),
        Message::ClearSearch => handle_clear_search(app),
        Message::SelectGenre(genre) => handle_select_genre(app, genre),
        Message::PageSelected(page) => handle_page_selected(app, page),
        Message::BrowsePageLoaded {
            query,
            page,
            response,
        } => handle_browse_page_loaded(app, query, page, response),
        Message::SectionsLoaded(sections) => handle_sections_loaded(app, sections),
        Message::HeroLoaded(movie) => handle_hero_loaded(app, movie),
        Message::GenresLoaded(genres) => {
            app.genre_list = genres;
            Task::none()
        }
        Message::OpenDetail(id) => detail_handlers::handle_open_detail(app, id),
        Message::CloseDetail => detail_handlers::handle_close_detail(app),
        Message::DetailLoaded(id, movie) => detail_handlers::handle_detail_loaded(app, id, movie),
        Message::SimilarLoaded(id, movies) => {
            detail_handlers::handle_similar_loaded(app, id, movies)
        }
        Message::DetailHoverCard(id) => detail_handlers::handle_detail_hover_card(app, id),
        Message::HoverCard(id) => handle_hover_card(app, id),
        Message::HoverCardDelayed(id) => handle_hover_card_delayed(app, id),
        Message::HoverCarousel(index) => {
            if !app.detail_open {
                app.hovered_carousel = index;
            }
            Task::none()
        }
        Message::ScrollCarousel(index, direction) => handle_scroll_carousel(app, index, direction),
        Message::AnimateScroll(index) => handle_animate_scroll(app, index),
        Message::CarouselScrolled(index, offset) => {
            while app.carousel_scroll_offsets.len() <= index {
                app.carousel_scroll_offsets.push(0.0);
            }
            app.carousel_scroll_offsets[index] = offset;
            Task::none()
        }
        Message::MainScrolled(offset) => {
            app.main_scroll_offset = offset;
            Task::none()
        }
        Message::LoadImage(url) => handle_load_image(app, url),
        Message::ImageLoaded(url, result) => handle_image_loaded(app, url, result),
        Message::ToggleProfileMenu => {
            app.profile_menu_open = !app.profile_menu_open;
            Task::none()
        }
        Message::CloseProfileMenu => {
            app.profile_menu_open = false;
            Task::none()
        }
    }
}

impl MovieFlix {
    fn find_movie(&self, id: &str) -> Option<&Movie> {
        self.sections
            .iter()
            .flat_map(|section| section.items.iter())
            .chain(self.browse_results.iter().flat_map(|r| r.movies.iter()))
            .chain(self.detail_similar.iter())
            .chain(self.hero_movie.iter())
            .find(|movie| movie.id == id)
    }

    /// The browse grid reads from exactly one source at a time: active search
    /// text wins, then the genre filter, then the plain catalog.
    pub fn current_browse_query(&self) -> BrowseQuery {
        let query = self.search_query.trim();
        if !query.is_empty() {
            return BrowseQuery::Search(query.to_string());
        }
        if let Some(genre) = &self.selected_genre {
            return BrowseQuery::Genre(genre.slug.clone());
        }
        BrowseQuery::Catalog
    }
}

fn start_browse_fetch(app: &mut MovieFlix) -> Task<Message> {
    let Some(catalog) = app.catalog.clone() else {
        return Task::none();
    };
    let query = app.current_browse_query();
    let page = app.browse_page;
    app.browse_loading = true;

    Task::perform(
        async move {
            let response = match &query {
                BrowseQuery::Catalog => catalog.movies(page).await,
                BrowseQuery::Search(text) => catalog.search(text, page).await,
                BrowseQuery::Genre(slug) => catalog.movies_by_genre(slug, page).await,
            };
            (query, page, response)
        },
        |(query, page, response)| Message::BrowsePageLoaded {
            query,
            page,
            response,
        },
    )
}

fn handle_auth_message(
    app: &mut MovieFlix,
    message: crate::auth_page::AuthMessage,
) -> Task<Message> {
    if app.auth_pending {
        return Task::none();
    }
    if let Some(request) = app.auth_page.update(message) {
        app.auth_pending = true;
        return Task::perform(auth::submit(request), Message::AuthFinished);
    }
    Task::none()
}

fn handle_auth_finished(app: &mut MovieFlix, user: User) -> Task<Message> {
    app.session = Some(user);
    app.auth_pending = false;
    app.auth_page.reset();
    Task::done(Message::NavigateTo(Page::Home))
}

fn handle_logout(app: &mut MovieFlix) -> Task<Message> {
    app.session = None;
    app.profile_menu_open = false;
    Task::perform(auth::clear_session(), |_| Message::NavigateTo(Page::Home))
}

fn handle_navigate(app: &mut MovieFlix, page: Page) -> Task<Message> {
    app.current_page = page.clone();
    app.profile_menu_open = false;
    app.header_state.active_nav = match page {
        Page::Home => NavItem::Home,
        Page::Browse => NavItem::Browse,
        Page::Auth => app.header_state.active_nav.clone(),
    };

    if app.current_page == Page::Browse && app.browse_results.is_none() && !app.browse_loading {
        return start_browse_fetch(app);
    }
    Task::none()
}

/// Typing always lands the user on the browse grid at page 1 with the genre
/// filter cleared; the fetch itself waits for the debounce window.
fn handle_search_query_changed(app: &mut MovieFlix, query: String) -> Task<Message> {
    app.search_query = query;
    app.selected_genre = None;
    app.browse_page = 1;

    if app.search_query.trim().is_empty() {
        return Task::done(Message::ClearSearch);
    }

    app.current_page = Page::Browse;
    app.header_state.active_nav = NavItem::Browse;
    app.search_debounce_timer = Some(Instant::now());
    Task::none()
}

fn handle_search_debounce_triggered(app: &mut MovieFlix) -> Task<Message> {
    let Some(timer) = app.search_debounce_timer else {
        return Task::none();
    };
    if timer.elapsed() < SEARCH_DEBOUNCE {
        return Task::none();
    }
    app.search_debounce_timer = None;

    if app.search_query.trim().is_empty() {
        return Task::done(Message::ClearSearch);
    }
    start_browse_fetch(app)
}

fn handle_search_submit(app: &mut MovieFlix) -> Task<Message> {
    if app.search_query.trim().is_empty() {
        return Task::none();
    }
    app.search_debounce_timer = None;
    app.current_page = Page::Browse;
    app.header_state.active_nav = NavItem::Browse;
    start_browse_fetch(app)
}

fn handle_clear_search(app: &mut MovieFlix) -> Task<Message> {
    app.search_query.clear();
    app.search_debounce_timer = None;
    app.browse_page = 1;
    if app.current_page == Page::Browse {
        return start_browse_fetch(app);
    }
    Task::none()
}

fn handle_select_genre(app: &mut MovieFlix, genre: Option<Genre>) -> Task<Message> {
    app.selected_genre = genre;
    app.search_query.clear();
    app.search_debounce_timer = None;
    app.browse_page = 1;
    app.current_page = Page::Browse;
    app.header_state.active_nav = NavItem::Browse;
    start_browse_fetch(app)
}

fn handle_page_selected(app: &mut MovieFlix, page: u32) -> Task<Message> {
    app.browse_page = page.max(1);
    start_browse_fetch(app)
}

/// Results are only applied while they still describe what the user is
/// looking at; anything else was superseded mid-flight and is dropped.
fn handle_browse_page_loaded(
    app: &mut MovieFlix,
    query: BrowseQuery,
    page: u32,
    response: PaginatedResponse,
) -> Task<Message> {
    if query != app.current_browse_query() || page != app.browse_page {
        debug!(?query, page, "discarding superseded browse response");
        return Task::none();
    }
    app.browse_loading = false;
    let task = load_poster_images(app, &response.movies);
    app.browse_results = Some(response);
    task
}

fn handle_sections_loaded(app: &mut MovieFlix, sections: Vec<ContentSection>) -> Task<Message> {
    app.loading_state = LoadingState::Idle;
    let mut tasks = Vec::new();
    for section in &sections {
        tasks.push(load_poster_images_limited(app, &section.items, 12));
    }
    app.sections = sections;
    Task::batch(tasks)
}

fn handle_hero_loaded(app: &mut MovieFlix, movie: Option<Box<Movie>>) -> Task<Message> {
    let Some(movie) = movie else {
        return Task::none();
    };
    let movie = *movie;
    let mut urls = vec![movie.backdrop.clone(), movie.poster.clone()];
    urls.dedup();
    let tasks: Vec<Task<Message>> = urls
        .into_iter()
        .filter(|url| wants_image(app, url))
        .map(|url| Task::done(Message::LoadImage(url)))
        .collect();
    app.hero_movie = Some(movie);
    Task::batch(tasks)
}

fn wants_image(app: &MovieFlix, url: &str) -> bool {
    app.image_cache.get(url).is_none()
        && !app.image_cache.is_pending(url)
        && !app.image_cache.has_failed(url)
}

pub fn load_poster_images(app: &MovieFlix, movies: &[Movie]) -> Task<Message> {
    load_poster_images_limited(app, movies, movies.len())
}

fn load_poster_images_limited(app: &MovieFlix, movies: &[Movie], limit: usize) -> Task<Message> {
    let tasks: Vec<Task<Message>> = movies
        .iter()
        .take(limit)
        .filter(|movie| wants_image(app, &movie.poster))
        .map(|movie| Task::done(Message::LoadImage(movie.poster.clone())))
        .collect();
    Task::batch(tasks)
}

fn handle_hover_card(app: &mut MovieFlix, id: Option<MovieId>) -> Task<Message> {
    if app.detail_open {
        return Task::none();
    }
    match id {
        Some(movie_id) => {
            app.pending_hover_card = Some(movie_id.clone());
            Task::perform(
                async {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                },
                move |_| Message::HoverCardDelayed(movie_id.clone()),
            )
        }
        None => {
            app.pending_hover_card = None;
            app.hovered_card = None;
            Task::none()
        }
    }
}

fn handle_hover_card_delayed(app: &mut MovieFlix, movie_id: MovieId) -> Task<Message> {
    if app.detail_open {
        return Task::none();
    }
    if app.pending_hover_card.as_ref() != Some(&movie_id) {
        return Task::none();
    }
    let backdrop = app
        .find_movie(&movie_id)
        .map(|movie| movie.backdrop.clone());
    app.hovered_card = Some(movie_id);
    match backdrop {
        Some(url) if wants_image(app, &url) => Task::done(Message::LoadImage(url)),
        _ => Task::none(),
    }
}

fn handle_scroll_carousel(
    app: &mut MovieFlix,
    index: usize,
    direction: ScrollDirection,
) -> Task<Message> {
    let scroll_amount = 500.0;
    while app.carousel_scroll_offsets.len() <= index {
        app.carousel_scroll_offsets.push(0.0);
    }
    while app.carousel_scroll_targets.len() <= index {
        app.carousel_scroll_targets.push(0.0);
    }

    let current_target = app.carousel_scroll_targets[index];
    let new_target = match direction {
        ScrollDirection::Left => (current_target - scroll_amount).max(0.0),
        ScrollDirection::Right => current_target + scroll_amount,
    };
    app.carousel_scroll_targets[index] = new_target;
    Task::done(Message::AnimateScroll(index))
}

fn handle_animate_scroll(app: &mut MovieFlix, index: usize) -> Task<Message> {
    if index >= app.carousel_scroll_offsets.len() || index >= app.carousel_scroll_targets.len() {
        return Task::none();
    }

    let current = app.carousel_scroll_offsets[index];
    let target = app.carousel_scroll_targets[index];
    let diff = target - current;

    let Some(carousel_id_str) = carousel_id(index) else {
        return Task::none();
    };
    let id = iced::widget::Id::new(carousel_id_str);

    if diff.abs() < 1.0 {
        app.carousel_scroll_offsets[index] = target;
        let offset = iced::widget::scrollable::AbsoluteOffset { x: target, y: 0.0 };
        return iced::widget::operation::scroll_to(id, offset);
    }

    let new_offset = current + diff * 0.15;
    app.carousel_scroll_offsets[index] = new_offset;
    let offset = iced::widget::scrollable::AbsoluteOffset {
        x: new_offset,
        y: 0.0,
    };

    Task::batch([
        iced::widget::operation::scroll_to(id, offset),
        Task::perform(
            async { tokio::time::sleep(Duration::from_millis(16)).await },
            move |_| Message::AnimateScroll(index),
        ),
    ])
}

fn handle_load_image(app: &mut MovieFlix, url: String) -> Task<Message> {
    if !wants_image(app, &url) {
        return Task::none();
    }
    app.image_cache.mark_pending(url.clone());
    let image_url = url.clone();
    let cache_path = app.image_cache.get_cache_path(&url);

    Task::perform(
        async move {
            if let Some(ref path) = cache_path {
                if path.exists() {
                    if let Ok(bytes) = tokio::fs::read(path).await {
                        return (image_url, Ok(bytes), cache_path, true);
                    }
                }
            }
            let bytes = fetch_image_bytes(image_url.clone()).await;
            (image_url, bytes, cache_path, false)
        },
        |(url, result, cache_path, from_cache)| match result {
            Ok(bytes) => {
                if !from_cache {
                    if let Some(path) = cache_path {
                        let bytes_clone = bytes.clone();
                        std::thread::spawn(move || {
                            let _ = std::fs::write(path, &bytes_clone);
                        });
                    }
                }
                Message::ImageLoaded(url, Ok(iced::widget::image::Handle::from_bytes(bytes)))
            }
            Err(error) => Message::ImageLoaded(url, Err(error)),
        },
    )
}

fn handle_image_loaded(
    app: &mut MovieFlix,
    url: String,
    result: Result<iced::widget::image::Handle, String>,
) -> Task<Message> {
    match result {
        Ok(handle) => app.image_cache.insert(url, handle),
        Err(error) => {
            debug!(url = %url, error = %error, "image load failed, using placeholder");
            app.image_cache.mark_failed(url);
        }
    }
    Task::none()
}

pub fn startup_tasks(catalog: crate::catalog::Catalog) -> Task<Message> {
    let sections_catalog = catalog.clone();
    let hero_catalog = catalog.clone();
    let genres_catalog = catalog;
    Task::batch([
        Task::perform(auth::load_session(), Message::SessionLoaded),
        Task::perform(load_home_sections(sections_catalog), Message::SectionsLoaded),
        Task::perform(load_hero(hero_catalog), |movie| {
            Message::HeroLoaded(movie.map(Box::new))
        }),
        Task::perform(load_genres(genres_catalog), Message::GenresLoaded),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> MovieFlix {
        MovieFlix::default()
    }

    #[test]
    fn search_text_change_resets_page_and_clears_genre() {
        let mut app = app();
        app.selected_genre = Some(Genre::from_name("Action"));
        app.browse_page = 7;

        let _ = handle_message(&mut app, Message::SearchQueryChanged(String::from("blade")));

        assert_eq!(app.browse_page, 1);
        assert!(app.selected_genre.is_none());
        assert_eq!(app.current_page, Page::Browse);
        assert!(app.search_debounce_timer.is_some());
        assert_eq!(
            app.current_browse_query(),
            BrowseQuery::Search(String::from("blade"))
        );
    }

    #[test]
    fn genre_selection_resets_page_and_clears_search() {
        let mut app = app();
        app.search_query = String::from("blade");
        app.browse_page = 3;

        let _ = handle_message(
            &mut app,
            Message::SelectGenre(Some(Genre::from_name("Action"))),
        );

        assert_eq!(app.browse_page, 1);
        assert!(app.search_query.is_empty());
        assert!(app.search_debounce_timer.is_none());
        assert_eq!(
            app.current_browse_query(),
            BrowseQuery::Genre(String::from("action"))
        );
    }

    #[test]
    fn clearing_the_query_falls_back_to_the_catalog_source() {
        let mut app = app();
        assert_eq!(app.current_browse_query(), BrowseQuery::Catalog);
        app.search_query = String::from("   ");
        assert_eq!(app.current_browse_query(), BrowseQuery::Catalog);
    }

    #[test]
    fn superseded_browse_responses_are_discarded() {
        let mut app = app();
        app.search_query = String::from("matrix");
        app.browse_page = 1;

        let response = PaginatedResponse {
            page: Some(1),
            limit: 20,
            total: 1,
            movies: Vec::new(),
        };
        let _ = handle_message(
            &mut app,
            Message::BrowsePageLoaded {
                query: BrowseQuery::Search(String::from("old query")),
                page: 1,
                response: response.clone(),
            },
        );
        assert!(app.browse_results.is_none());

        let _ = handle_message(
            &mut app,
            Message::BrowsePageLoaded {
                query: BrowseQuery::Search(String::from("matrix")),
                page: 1,
                response,
            },
        );
        assert!(app.browse_results.is_some());
    }

    #[test]
    fn stale_page_numbers_are_discarded() {
        let mut app = app();
        app.browse_page = 2;
        let _ = handle_message(
            &mut app,
            Message::BrowsePageLoaded {
                query: BrowseQuery::Catalog,
                page: 1,
                response: PaginatedResponse::empty(20),
            },
        );
        assert!(app.browse_results.is_none());
    }

    #[test]
    fn debounce_waits_for_the_quiet_window() {
        let mut app = app();
        app.search_query = String::from("blade");
        app.search_debounce_timer = Some(Instant::now());
        let _ = handle_message(&mut app, Message::SearchDebounceTriggered);
        assert!(app.search_debounce_timer.is_some());

        app.search_debounce_timer = Some(Instant::now() - Duration::from_millis(400));
        let _ = handle_message(&mut app, Message::SearchDebounceTriggered);
        assert!(app.search_debounce_timer.is_none());
    }

    #[test]
    fn image_failures_mark_the_url_for_placeholder_fallback() {
        let mut app = app();
        let _ = handle_message(
            &mut app,
            Message::ImageLoaded(
                String::from("https://img.example/broken.jpg"),
                Err(String::from("404")),
            ),
        );
        assert!(app.image_cache.has_failed("https://img.example/broken.jpg"));
    }
}
