use iced::widget::{button, column, container, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::media::{
    BrowseQuery, Message, Movie, ACCENT_RED, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::pagination::{page_window, total_pages, PageItem};
use crate::MovieFlix;

const GRID_COLUMNS: usize = 5;
const GRID_CARD_WIDTH: f32 = 180.0;
const GRID_CARD_HEIGHT: f32 = 270.0;

impl MovieFlix {
    pub fn view_browse_page(&self) -> Element<'_, Message> {
        let browse_header = self.view_browse_header();
        let genre_chips = self.view_genre_chips();
        let results = self.view_browse_results();

        column![browse_header, genre_chips, results]
            .spacing(24)
            .padding(Padding::new(100.0).left(48.0).right(48.0).bottom(48.0))
            .width(Length::Fill)
            .into()
    }

    fn view_browse_header(&self) -> Element<'_, Message> {
        let title_text = match self.current_browse_query() {
            BrowseQuery::Search(query) => format!("Search results for \"{}\"", query),
            BrowseQuery::Genre(_) => match &self.selected_genre {
                Some(genre) => genre.name.clone(),
                None => String::from("Explore movies"),
            },
            BrowseQuery::Catalog => String::from("Explore movies"),
        };
        let title = text(title_text)
            .size(28)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let count_label: Element<Message> = match &self.browse_results {
            Some(results) if !self.browse_loading => {
                let count_text = if results.total == 1 {
                    String::from("1 movie found")
                } else {
                    format!("{} movies found", results.total)
                };
                text(count_text).size(16).color(TEXT_GRAY).into()
            }
            _ => text("Loading...").size(16).color(TEXT_GRAY).into(),
        };

        column![title, count_label]
            .spacing(8)
            .width(Length::Fill)
            .into()
    }

    fn view_genre_chips(&self) -> Element<'_, Message> {
        let mut chips: Vec<Element<Message>> = Vec::new();

        let all_active = self.selected_genre.is_none() && self.search_query.trim().is_empty();
        chips.push(self.view_genre_chip(String::from("All"), all_active, Message::SelectGenre(None)));

        for genre in &self.genre_list {
            let is_active = self
                .selected_genre
                .as_ref()
                .is_some_and(|g| g.slug == genre.slug);
            chips.push(self.view_genre_chip(
                genre.name.clone(),
                is_active,
                Message::SelectGenre(Some(genre.clone())),
            ));
        }

        Row::with_children(chips).spacing(8).into()
    }

    fn view_genre_chip(
        &self,
        label: String,
        is_active: bool,
        message: Message,
    ) -> Element<'_, Message> {
        button(
            text(label)
                .size(13)
                .color(TEXT_WHITE)
                .shaping(text::Shaping::Advanced),
        )
        .padding(Padding::new(6.0).left(14.0).right(14.0))
        .style(move |_theme, status| {
            let bg_color = if is_active {
                ACCENT_RED
            } else {
                match status {
                    button::Status::Hovered => Color::from_rgba(1.0, 1.0, 1.0, 0.15),
                    _ => SURFACE_DARK_GRAY,
                }
            };
            button::Style {
                background: Some(iced::Background::Color(bg_color)),
                text_color: TEXT_WHITE,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 16.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(message)
        .into()
    }

    fn view_browse_results(&self) -> Element<'_, Message> {
        let Some(results) = &self.browse_results else {
            return self.view_browse_empty("Loading...");
        };

        if results.movies.is_empty() {
            return self.view_browse_empty("No movies found.");
        }

        let mut rows: Vec<Element<Message>> = Vec::new();
        for chunk in results.movies.chunks(GRID_COLUMNS) {
            let row_cards: Vec<Element<Message>> = chunk
                .iter()
                .map(|movie| self.view_grid_card(movie))
                .collect();
            rows.push(
                Row::with_children(row_cards)
                    .spacing(16)
                    .align_y(iced::Alignment::Start)
                    .into(),
            );
        }

        let grid = Column::with_children(rows).spacing(24).width(Length::Fill);
        let pagination = self.view_pagination_bar();

        column![grid, pagination]
            .spacing(32)
            .width(Length::Fill)
            .into()
    }

    fn view_browse_empty(&self, label: &str) -> Element<'_, Message> {
        container(text(label.to_string()).size(16).color(TEXT_GRAY))
            .width(Length::Fill)
            .padding(Padding::new(48.0))
            .center_x(Length::Fill)
            .into()
    }

    fn view_grid_card(&self, movie: &Movie) -> Element<'_, Message> {
        let movie_id = movie.id.clone();
        let poster = self.view_card_poster(movie, GRID_CARD_WIDTH, GRID_CARD_HEIGHT);

        let poster_container = container(poster)
            .width(Length::Fixed(GRID_CARD_WIDTH))
            .height(Length::Fixed(GRID_CARD_HEIGHT))
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 8.0.into(),
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                    offset: iced::Vector::new(0.0, 4.0),
                    blur_radius: 8.0,
                },
                ..Default::default()
            });

        let title = text(movie.title.clone())
            .size(14)
            .color(TEXT_WHITE)
            .wrapping(text::Wrapping::Word);
        let metadata = text(format!("{}  ·  {:.1}★", movie.year, movie.rating))
            .size(12)
            .color(TEXT_GRAY);

        let card = column![poster_container, title, metadata]
            .spacing(6)
            .width(Length::Fixed(GRID_CARD_WIDTH));

        iced::widget::mouse_area(card)
            .on_press(Message::OpenDetail(movie_id))
            .into()
    }

    fn view_pagination_bar(&self) -> Element<'_, Message> {
        let Some(results) = &self.browse_results else {
            return Space::new().width(0).height(0).into();
        };
        let pages = total_pages(results.total, results.limit);
        if pages <= 1 {
            return Space::new().width(0).height(0).into();
        }
        let current = self.browse_page.min(pages);

        let mut items: Vec<Element<Message>> = Vec::new();
        if current > 1 {
            items.push(self.view_step_button("‹", Message::PageSelected(current - 1)));
        }
        items.extend(page_window(pages, current).into_iter().map(|item| match item {
            PageItem::Page(page) => self.view_page_button(page, page == current),
            PageItem::Ellipsis => container(text("…").size(14).color(TEXT_GRAY))
                .padding(Padding::new(8.0).left(6.0).right(6.0))
                .into(),
        }));
        if results.has_next_page() {
            items.push(self.view_step_button("›", Message::PageSelected(current + 1)));
        }

        container(
            Row::with_children(items)
                .spacing(8)
                .align_y(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
    }

    fn view_step_button(&self, label: &'static str, message: Message) -> Element<'_, Message> {
        button(text(label).size(14).color(TEXT_WHITE))
            .padding(Padding::new(8.0).left(12.0).right(12.0))
            .style(|_theme, status| {
                let bg_color = match status {
                    button::Status::Hovered => Color::from_rgba(1.0, 1.0, 1.0, 0.15),
                    _ => SURFACE_DARK_GRAY,
                };
                button::Style {
                    background: Some(iced::Background::Color(bg_color)),
                    text_color: TEXT_WHITE,
                    border: Border {
                        color: Color::TRANSPARENT,
                        width: 0.0,
                        radius: 6.0.into(),
                    },
                    shadow: Shadow::default(),
                    snap: false,
                }
            })
            .on_press(message)
            .into()
    }

    fn view_page_button(&self, page: u32, is_current: bool) -> Element<'_, Message> {
        let label = text(page.to_string()).size(14).color(TEXT_WHITE);

        let mut page_button = button(label)
            .padding(Padding::new(8.0).left(14.0).right(14.0))
            .style(move |_theme, status| {
                let bg_color = if is_current {
                    ACCENT_RED
                } else {
                    match status {
                        button::Status::Hovered => Color::from_rgba(1.0, 1.0, 1.0, 0.15),
                        _ => SURFACE_DARK_GRAY,
                    }
                };
                button::Style {
                    background: Some(iced::Background::Color(bg_color)),
                    text_color: TEXT_WHITE,
                    border: Border {
                        color: Color::TRANSPARENT,
                        width: 0.0,
                        radius: 6.0.into(),
                    },
                    shadow: Shadow::default(),
                    snap: false,
                }
            });
        if !is_current {
            page_button = page_button.on_press(Message::PageSelected(page));
        }
        page_button.into()
    }
}
