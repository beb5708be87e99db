use iced::Task;
use tracing::debug;

use crate::handlers::load_poster_images;
use crate::media::{Message, Movie, MovieId};
use crate::MovieFlix;

pub fn handle_open_detail(app: &mut MovieFlix, id: MovieId) -> Task<Message> {
    app.detail_open = true;
    app.detail_movie_id = Some(id.clone());
    app.detail_movie = None;
    app.detail_missing = false;
    app.detail_similar.clear();
    app.detail_hovered_card = None;
    app.hovered_card = None;
    app.pending_hover_card = None;

    let Some(catalog) = app.catalog.clone() else {
        return Task::none();
    };

    let movie_catalog = catalog.clone();
    let movie_id = id.clone();
    let load_movie = Task::perform(
        async move {
            let movie = movie_catalog.movie(&movie_id).await;
            (movie_id, movie)
        },
        |(id, movie)| Message::DetailLoaded(id, movie.map(Box::new)),
    );

    let load_similar = Task::perform(
        async move {
            let similar = catalog.recommendations(&id).await;
            (id, similar)
        },
        |(id, similar)| Message::SimilarLoaded(id, similar),
    );

    Task::batch([load_movie, load_similar])
}

pub fn handle_close_detail(app: &mut MovieFlix) -> Task<Message> {
    app.detail_open = false;
    app.detail_movie_id = None;
    app.detail_movie = None;
    app.detail_missing = false;
    app.detail_similar.clear();
    app.detail_hovered_card = None;
    Task::none()
}

pub fn handle_detail_loaded(
    app: &mut MovieFlix,
    id: MovieId,
    movie: Option<Box<Movie>>,
) -> Task<Message> {
    if app.detail_movie_id.as_ref() != Some(&id) {
        debug!(id = %id, "discarding detail for a closed or replaced overlay");
        return Task::none();
    }
    match movie {
        Some(movie) => {
            let movie = *movie;
            let tasks: Vec<Task<Message>> = [movie.backdrop.clone(), movie.poster.clone()]
                .into_iter()
                .map(|url| Task::done(Message::LoadImage(url)))
                .collect();
            app.detail_movie = Some(movie);
            Task::batch(tasks)
        }
        None => {
            app.detail_missing = true;
            Task::none()
        }
    }
}

pub fn handle_similar_loaded(
    app: &mut MovieFlix,
    id: MovieId,
    movies: Vec<Movie>,
) -> Task<Message> {
    if app.detail_movie_id.as_ref() != Some(&id) {
        return Task::none();
    }
    let task = load_poster_images(app, &movies);
    app.detail_similar = movies;
    task
}

pub fn handle_detail_hover_card(app: &mut MovieFlix, id: Option<MovieId>) -> Task<Message> {
    if !app.detail_open {
        return Task::none();
    }
    app.detail_hovered_card = id;
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_for_a_replaced_overlay_is_discarded() {
        let mut app = MovieFlix::default();
        app.detail_open = true;
        app.detail_movie_id = Some(String::from("2"));

        let _ = handle_detail_loaded(&mut app, String::from("1"), None);
        assert!(!app.detail_missing);
        assert!(app.detail_movie.is_none());
    }

    #[test]
    fn unknown_ids_flip_the_not_found_flag() {
        let mut app = MovieFlix::default();
        app.detail_open = true;
        app.detail_movie_id = Some(String::from("missing"));

        let _ = handle_detail_loaded(&mut app, String::from("missing"), None);
        assert!(app.detail_missing);
    }

    #[test]
    fn closing_the_overlay_resets_detail_state() {
        let mut app = MovieFlix::default();
        app.detail_open = true;
        app.detail_movie_id = Some(String::from("1"));
        app.detail_missing = true;

        let _ = handle_close_detail(&mut app);
        assert!(!app.detail_open);
        assert!(app.detail_movie_id.is_none());
        assert!(!app.detail_missing);
    }
}
