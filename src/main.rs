mod api;
mod auth;
mod auth_page;
mod browse;
mod cards;
mod catalog;
mod components;
mod detail_handlers;
mod detail_popup;
mod detail_sections;
mod fixtures;
mod handlers;
mod hero;
mod media;
mod pagination;
mod settings;

use std::time::Instant;

use iced::widget::container;
use iced::{Element, Font, Length, Size, Subscription, Task, Theme};
use tracing_subscriber::EnvFilter;

use auth_page::AuthPage;
use catalog::Catalog;
use media::{
    ContentSection, Genre, HeaderState, ImageCache, LoadingState, Message, Movie, MovieId, Page,
    PaginatedResponse, User, BACKGROUND_BLACK,
};
use settings::AppSettings;

pub struct MovieFlix {
    pub catalog: Option<Catalog>,
    pub session: Option<User>,
    pub current_page: Page,
    pub header_state: HeaderState,
    pub auth_page: AuthPage,
    pub auth_pending: bool,
    pub loading_state: LoadingState,
    pub hero_movie: Option<Movie>,
    pub sections: Vec<ContentSection>,
    pub genre_list: Vec<Genre>,
    pub search_query: String,
    pub search_debounce_timer: Option<Instant>,
    pub selected_genre: Option<Genre>,
    pub browse_page: u32,
    pub browse_results: Option<PaginatedResponse>,
    pub browse_loading: bool,
    pub image_cache: ImageCache,
    pub hovered_card: Option<MovieId>,
    pub pending_hover_card: Option<MovieId>,
    pub hovered_carousel: Option<usize>,
    pub carousel_scroll_offsets: Vec<f32>,
    pub carousel_scroll_targets: Vec<f32>,
    pub main_scroll_offset: f32,
    pub profile_menu_open: bool,
    pub detail_open: bool,
    pub detail_movie_id: Option<MovieId>,
    pub detail_movie: Option<Movie>,
    pub detail_missing: bool,
    pub detail_similar: Vec<Movie>,
    pub detail_hovered_card: Option<MovieId>,
}

impl Default for MovieFlix {
    fn default() -> Self {
        Self {
            catalog: None,
            session: None,
            current_page: Page::Home,
            header_state: HeaderState::default(),
            auth_page: AuthPage::default(),
            auth_pending: false,
            loading_state: LoadingState::Loading,
            hero_movie: None,
            sections: Vec::new(),
            genre_list: Vec::new(),
            search_query: String::new(),
            search_debounce_timer: None,
            selected_genre: None,
            browse_page: 1,
            browse_results: None,
            browse_loading: false,
            image_cache: ImageCache::new(),
            hovered_card: None,
            pending_hover_card: None,
            hovered_carousel: None,
            carousel_scroll_offsets: Vec::new(),
            carousel_scroll_targets: Vec::new(),
            main_scroll_offset: 0.0,
            profile_menu_open: false,
            detail_open: false,
            detail_movie_id: None,
            detail_movie: None,
            detail_missing: false,
            detail_similar: Vec::new(),
            detail_hovered_card: None,
        }
    }
}

impl MovieFlix {
    fn new() -> (Self, Task<Message>) {
        let settings = AppSettings::load_or_default();
        let catalog = Catalog::from_settings(&settings);

        (
            Self {
                catalog: Some(catalog.clone()),
                ..Default::default()
            },
            handlers::startup_tasks(catalog),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        if self.current_page == Page::Auth {
            return self.auth_page.view(self.auth_pending).map(Message::Auth);
        }

        let main_content = container(self.view_main_content())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_BLACK)),
                ..Default::default()
            });

        if self.detail_open {
            let popup_overlay = self.view_detail_overlay();
            return iced::widget::stack![main_content, popup_overlay]
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        main_content.into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subs = Vec::new();
        if self.search_debounce_timer.is_some() {
            subs.push(
                iced::time::every(std::time::Duration::from_millis(50))
                    .map(|_| Message::SearchDebounceTriggered),
            );
        }
        Subscription::batch(subs)
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("movieflix=info")),
        )
        .init();

    iced::application(MovieFlix::new, MovieFlix::update, MovieFlix::view)
        .title("MovieFlix")
        .theme(MovieFlix::theme)
        .window_size(Size::new(1280.0, 720.0))
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .default_font(Font::DEFAULT)
        .subscription(MovieFlix::subscription)
        .run()
}
