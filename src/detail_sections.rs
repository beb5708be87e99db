use iced::widget::{column, container, row, scrollable, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::detail_popup::{format_currency, format_full_date, format_rating_with_star};
use crate::hero::format_runtime;
use crate::media::{Message, Movie, Person, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE};
use crate::MovieFlix;

const MINI_HERO_HEIGHT: f32 = 380.0;
const SIMILAR_CARD_WIDTH: f32 = 150.0;
const SIMILAR_CARD_HEIGHT: f32 = 225.0;

fn hidden_horizontal_scrollbar_style(
    _theme: &iced::Theme,
    _status: scrollable::Status,
) -> scrollable::Style {
    let transparent_rail = scrollable::Rail {
        background: None,
        border: Border::default(),
        scroller: scrollable::Scroller {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
        },
    };
    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: transparent_rail.clone(),
        horizontal_rail: transparent_rail,
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            shadow: Shadow::default(),
            icon: Color::TRANSPARENT,
        },
    }
}

fn section_title(label: &str) -> iced::widget::Text<'static> {
    text(label.to_string())
        .size(18)
        .color(TEXT_WHITE)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        })
}

impl MovieFlix {
    pub fn view_detail_content(&self, movie: &Movie) -> Element<'_, Message> {
        let mut sections: Vec<Element<Message>> = vec![
            self.view_detail_mini_hero(movie),
            self.view_detail_about(movie),
            self.view_detail_facts(movie),
        ];

        if !movie.actors.is_empty() {
            sections.push(self.view_detail_cast(movie));
        }
        if let Some(trailer_url) = &movie.trailer_url {
            sections.push(self.view_detail_trailer(trailer_url));
        }
        if !self.detail_similar.is_empty() {
            sections.push(self.view_detail_similar());
        }

        Column::with_children(sections)
            .spacing(24)
            .padding(Padding::new(0.0).bottom(32.0))
            .width(Length::Fill)
            .into()
    }

    fn view_detail_mini_hero(&self, movie: &Movie) -> Element<'_, Message> {
        let backdrop: Element<Message> = {
            let handle = if self.image_cache.has_failed(&movie.backdrop) {
                None
            } else {
                self.image_cache.get(&movie.backdrop)
            };
            match handle {
                Some(h) => iced::widget::image(h.clone())
                    .width(Length::Fill)
                    .height(Length::Fixed(MINI_HERO_HEIGHT))
                    .content_fit(iced::ContentFit::Cover)
                    .into(),
                None => container(Space::new().width(Length::Fill).height(Length::Fill))
                    .width(Length::Fill)
                    .height(Length::Fixed(MINI_HERO_HEIGHT))
                    .style(|_theme| container::Style {
                        background: Some(iced::Background::Color(Color::from_rgb(
                            0.12, 0.12, 0.12,
                        ))),
                        ..Default::default()
                    })
                    .into(),
            }
        };

        let title = text(movie.title.clone())
            .size(36)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let mut title_block = column![title].spacing(6);
        if movie.original_title != movie.title {
            title_block = title_block.push(
                text(movie.original_title.clone())
                    .size(14)
                    .color(TEXT_GRAY),
            );
        }
        if let Some(tagline) = &movie.tagline {
            title_block = title_block.push(
                text(format!("\"{}\"", tagline))
                    .size(14)
                    .color(TEXT_GRAY)
                    .font(iced::Font {
                        style: iced::font::Style::Italic,
                        ..Default::default()
                    }),
            );
        }

        let title_overlay = container(title_block.padding(Padding::new(24.0)))
            .width(Length::Fill)
            .height(Length::Fixed(MINI_HERO_HEIGHT))
            .align_y(iced::alignment::Vertical::Bottom)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::PI)
                        .add_stop(0.0, Color::from_rgba(0.031, 0.031, 0.031, 0.95))
                        .add_stop(0.3, Color::from_rgba(0.031, 0.031, 0.031, 0.4))
                        .add_stop(0.6, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        iced::widget::stack![backdrop, title_overlay]
            .width(Length::Fill)
            .height(Length::Fixed(MINI_HERO_HEIGHT))
            .into()
    }

    fn view_detail_about(&self, movie: &Movie) -> Element<'_, Message> {
        let rating = text(format_rating_with_star(movie.rating))
            .size(14)
            .color(Color::from_rgb(0.95, 0.77, 0.06));
        let year = text(movie.year.to_string()).size(14).color(TEXT_GRAY);

        let mut metadata = row![rating, year]
            .spacing(16)
            .align_y(iced::Alignment::Center);
        if movie.duration > 0 {
            metadata = metadata.push(
                text(format_runtime(movie.duration))
                    .size(14)
                    .color(TEXT_GRAY),
            );
        }

        let genre_chips: Vec<Element<Message>> = movie
            .genres
            .iter()
            .map(|genre| {
                container(text(genre.name.clone()).size(12).color(TEXT_WHITE))
                    .padding(Padding::new(4.0).left(12.0).right(12.0))
                    .style(|_theme| container::Style {
                        background: Some(iced::Background::Color(Color::from_rgba(
                            1.0, 1.0, 1.0, 0.1,
                        ))),
                        border: Border {
                            color: Color::TRANSPARENT,
                            width: 0.0,
                            radius: 12.0.into(),
                        },
                        ..Default::default()
                    })
                    .into()
            })
            .collect();

        let genre_row: Element<Message> = if genre_chips.is_empty() {
            text("No genre data").size(12).color(TEXT_GRAY).into()
        } else {
            Row::with_children(genre_chips).spacing(8).into()
        };

        let synopsis = text(movie.synopsis.clone()).size(14).color(TEXT_GRAY);

        column![metadata, genre_row, synopsis]
            .spacing(12)
            .padding(Padding::new(0.0).left(24.0).right(24.0))
            .width(Length::Fill)
            .into()
    }

    fn view_detail_facts(&self, movie: &Movie) -> Element<'_, Message> {
        let mut facts: Vec<(String, String)> = vec![
            (String::from("Director"), movie.director.name.clone()),
            (String::from("Language"), movie.language.to_uppercase()),
        ];
        if !movie.release_date.is_empty() {
            facts.push((
                String::from("Release date"),
                format_full_date(&movie.release_date),
            ));
        }
        if let Some(budget) = movie.budget {
            facts.push((String::from("Budget"), format_currency(budget)));
        }
        if let Some(revenue) = movie.revenue {
            facts.push((String::from("Revenue"), format_currency(revenue)));
        }

        let fact_columns: Vec<Element<Message>> = facts
            .into_iter()
            .map(|(label, value)| {
                column![
                    text(label).size(12).color(TEXT_GRAY),
                    text(value).size(14).color(TEXT_WHITE)
                ]
                .spacing(4)
                .into()
            })
            .collect();

        Row::with_children(fact_columns)
            .spacing(32)
            .padding(Padding::new(0.0).left(24.0).right(24.0))
            .into()
    }

    fn view_detail_cast(&self, movie: &Movie) -> Element<'_, Message> {
        let cast_chips: Vec<Element<Message>> = movie
            .actors
            .iter()
            .map(|actor| self.view_cast_chip(actor))
            .collect();

        column![
            section_title("Cast"),
            Row::with_children(cast_chips).spacing(8)
        ]
        .spacing(12)
        .padding(Padding::new(0.0).left(24.0).right(24.0))
        .into()
    }

    fn view_cast_chip(&self, actor: &Person) -> Element<'_, Message> {
        let label = match &actor.role {
            Some(role) => format!("{} as {}", actor.name, role),
            None => actor.name.clone(),
        };
        container(text(label).size(12).color(TEXT_WHITE))
            .padding(Padding::new(6.0).left(12.0).right(12.0))
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                border: Border {
                    color: Color::from_rgba(1.0, 1.0, 1.0, 0.15),
                    width: 1.0,
                    radius: 6.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    fn view_detail_trailer(&self, trailer_url: &str) -> Element<'_, Message> {
        column![
            section_title("Trailer"),
            text(trailer_url.to_string()).size(13).color(TEXT_GRAY)
        ]
        .spacing(8)
        .padding(Padding::new(0.0).left(24.0).right(24.0))
        .into()
    }

    fn view_detail_similar(&self) -> Element<'_, Message> {
        let cards: Vec<Element<Message>> = self
            .detail_similar
            .iter()
            .take(10)
            .map(|movie| self.view_similar_card(movie))
            .collect();

        let cards_row = Row::with_children(cards)
            .spacing(12)
            .align_y(iced::Alignment::Start);

        let scrollable_cards = scrollable(cards_row)
            .direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .style(hidden_horizontal_scrollbar_style);

        column![section_title("More like this"), scrollable_cards]
            .spacing(12)
            .padding(Padding::new(0.0).left(24.0).right(24.0))
            .into()
    }

    fn view_similar_card(&self, movie: &Movie) -> Element<'_, Message> {
        let movie_id = movie.id.clone();
        let is_hovered = self.detail_hovered_card.as_ref() == Some(&movie.id);
        let poster = self.view_card_poster(movie, SIMILAR_CARD_WIDTH, SIMILAR_CARD_HEIGHT);

        let card = container(poster)
            .width(Length::Fixed(SIMILAR_CARD_WIDTH))
            .height(Length::Fixed(SIMILAR_CARD_HEIGHT))
            .style(move |_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                border: Border {
                    color: if is_hovered {
                        Color::from_rgba(1.0, 1.0, 1.0, 0.6)
                    } else {
                        Color::TRANSPARENT
                    },
                    width: 2.0,
                    radius: 8.0.into(),
                },
                ..Default::default()
            });

        iced::widget::mouse_area(card)
            .on_enter(Message::DetailHoverCard(Some(movie_id.clone())))
            .on_exit(Message::DetailHoverCard(None))
            .on_press(Message::OpenDetail(movie_id))
            .into()
    }
}
