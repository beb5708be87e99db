use iced::widget::{button, column, container, row, scrollable, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::media::{
    carousel_id, ContentSection, Message, Movie, MovieId, ScrollDirection, ACCENT_RED,
    SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::MovieFlix;

const ICON_INFO_CIRCLE: char = '\u{F431}';
const ICON_FILM: char = '\u{F3A9}';
const ICON_CHEVRON_LEFT: char = '\u{F284}';
const ICON_CHEVRON_RIGHT: char = '\u{F285}';

const CARD_WIDTH: f32 = 150.0;
const CARD_HEIGHT: f32 = 225.0;
const EXPANDED_WIDTH: f32 = 400.0;
const EXPANDED_HEIGHT: f32 = 225.0;

fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

fn hidden_horizontal_scrollbar_style(
    _theme: &iced::Theme,
    _status: scrollable::Status,
) -> scrollable::Style {
    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: iced::Background::Color(Color::TRANSPARENT),
                border: Border::default(),
            },
        },
        horizontal_rail: scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: iced::Background::Color(Color::TRANSPARENT),
                border: Border::default(),
            },
        },
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            shadow: Shadow::default(),
            icon: Color::TRANSPARENT,
        },
    }
}

impl MovieFlix {
    pub fn view_carousels(&self) -> Element<'_, Message> {
        let carousels: Vec<Element<Message>> = self
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| {
                container(self.view_carousel_with_arrows(section, index))
                    .padding(Padding::new(0.0).left(48.0).right(48.0))
                    .into()
            })
            .collect();

        Column::with_children(carousels)
            .spacing(48)
            .padding(Padding::new(32.0).left(0.0).right(0.0).top(0.0))
            .width(Length::Fill)
            .into()
    }

    pub fn view_carousel_with_arrows(
        &self,
        section: &ContentSection,
        index: usize,
    ) -> Element<'_, Message> {
        let carousel_title = text(section.title.clone())
            .size(24)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let cards: Vec<Element<Message>> = section
            .items
            .iter()
            .take(20)
            .map(|movie| self.view_movie_card(movie))
            .collect();

        let cards_row = Row::with_children(cards)
            .spacing(16)
            .align_y(iced::Alignment::Start);

        let Some(carousel_id_str) = carousel_id(index) else {
            return self.view_plain_carousel(carousel_title.into(), cards_row.into());
        };
        let scrollable_id = iced::widget::Id::new(carousel_id_str);
        let carousel_index = index;
        let scrollable_cards = scrollable(cards_row)
            .id(scrollable_id)
            .on_scroll(move |viewport| {
                Message::CarouselScrolled(carousel_index, viewport.absolute_offset().x)
            })
            .direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .style(hidden_horizontal_scrollbar_style);

        let is_hovered = self.hovered_carousel == Some(index);
        let scroll_offset = self
            .carousel_scroll_offsets
            .get(index)
            .copied()
            .unwrap_or(0.0);
        let scroll_target = self
            .carousel_scroll_targets
            .get(index)
            .copied()
            .unwrap_or(0.0);

        let card_count = section.items.len().min(20);
        let total_width = (card_count as f32) * (CARD_WIDTH + 16.0) - 16.0;
        let can_scroll_left = scroll_target > 0.0 || scroll_offset > 1.0;
        let can_scroll_right = total_width > 800.0 && scroll_target < total_width - 800.0;

        let left_arrow: Element<Message> = if is_hovered && can_scroll_left {
            self.view_scroll_arrow(index, ScrollDirection::Left)
        } else {
            container(Space::new().width(0).height(0)).into()
        };
        let right_arrow: Element<Message> = if is_hovered && can_scroll_right {
            self.view_scroll_arrow(index, ScrollDirection::Right)
        } else {
            container(Space::new().width(0).height(0)).into()
        };

        let left_overlay = container(left_arrow)
            .width(Length::Fill)
            .height(Length::Fixed(CARD_HEIGHT))
            .align_x(iced::alignment::Horizontal::Left)
            .align_y(iced::alignment::Vertical::Center);
        let right_overlay = container(right_arrow)
            .width(Length::Fill)
            .height(Length::Fixed(CARD_HEIGHT))
            .align_x(iced::alignment::Horizontal::Right)
            .align_y(iced::alignment::Vertical::Center);

        let cards_with_arrows = iced::widget::stack![scrollable_cards, left_overlay, right_overlay]
            .width(Length::Fill)
            .height(Length::Fixed(CARD_HEIGHT));

        let carousel_content = column![carousel_title, cards_with_arrows]
            .spacing(20)
            .width(Length::Fill);

        iced::widget::mouse_area(carousel_content)
            .on_enter(Message::HoverCarousel(Some(index)))
            .on_exit(Message::HoverCarousel(None))
            .into()
    }

    fn view_plain_carousel<'a>(
        &'a self,
        title: Element<'a, Message>,
        cards_row: Element<'a, Message>,
    ) -> Element<'a, Message> {
        let scrollable_cards = scrollable(cards_row)
            .direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .style(hidden_horizontal_scrollbar_style);

        column![title, scrollable_cards]
            .spacing(20)
            .width(Length::Fill)
            .into()
    }

    fn view_scroll_arrow(&self, index: usize, direction: ScrollDirection) -> Element<'_, Message> {
        let icon_char = match direction {
            ScrollDirection::Left => ICON_CHEVRON_LEFT,
            ScrollDirection::Right => ICON_CHEVRON_RIGHT,
        };

        button(
            container(icon(icon_char).size(24).color(TEXT_WHITE))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .width(Length::Fixed(48.0))
        .height(Length::Fixed(80.0))
        .padding(0)
        .style(|_theme, status| {
            let bg_alpha = match status {
                button::Status::Hovered => 0.9,
                _ => 0.7,
            };
            button::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.0, 0.0, 0.0, bg_alpha,
                ))),
                text_color: TEXT_WHITE,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 4.0.into(),
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
                    offset: iced::Vector::new(0.0, 2.0),
                    blur_radius: 8.0,
                },
                snap: false,
            }
        })
        .on_press(Message::ScrollCarousel(index, direction))
        .into()
    }

    pub fn view_movie_card(&self, movie: &Movie) -> Element<'_, Message> {
        let movie_id = movie.id.clone();
        if self.hovered_card.as_ref() == Some(&movie.id) {
            return self.view_expanded_card(movie);
        }

        let poster_content = self.view_card_poster(movie, CARD_WIDTH, CARD_HEIGHT);

        let card_container = container(poster_content)
            .width(Length::Fixed(CARD_WIDTH))
            .height(Length::Fixed(CARD_HEIGHT))
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

        iced::widget::mouse_area(card_container)
            .on_enter(Message::HoverCard(Some(movie_id.clone())))
            .on_exit(Message::HoverCard(None))
            .on_press(Message::OpenDetail(movie_id))
            .into()
    }

    pub fn view_expanded_card(&self, movie: &Movie) -> Element<'_, Message> {
        let movie_id = movie.id.clone();
        let backdrop_content = self.view_card_backdrop(movie);
        let hover_overlay = self.view_expanded_hover_overlay(movie);

        let stacked_content = iced::widget::stack![backdrop_content, hover_overlay];

        let card_container = container(stacked_content)
            .width(Length::Fixed(EXPANDED_WIDTH))
            .height(Length::Fixed(EXPANDED_HEIGHT))
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 8.0.into(),
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
                    offset: iced::Vector::new(0.0, 6.0),
                    blur_radius: 12.0,
                },
                ..Default::default()
            });

        iced::widget::mouse_area(card_container)
            .on_enter(Message::HoverCard(Some(movie_id.clone())))
            .on_exit(Message::HoverCard(None))
            .on_press(Message::OpenDetail(movie_id))
            .into()
    }

    fn view_card_backdrop(&self, movie: &Movie) -> Element<'_, Message> {
        let handle = if self.image_cache.has_failed(&movie.backdrop) {
            None
        } else {
            self.image_cache.get(&movie.backdrop)
        };

        match handle {
            Some(h) => container(
                iced::widget::image(h.clone())
                    .width(Length::Fixed(EXPANDED_WIDTH))
                    .height(Length::Fixed(EXPANDED_HEIGHT))
                    .content_fit(iced::ContentFit::Cover),
            )
            .style(|_theme| container::Style {
                border: Border {
                    radius: 8.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .into(),
            None => container(Space::new().width(EXPANDED_WIDTH).height(EXPANDED_HEIGHT))
                .width(Length::Fixed(EXPANDED_WIDTH))
                .height(Length::Fixed(EXPANDED_HEIGHT))
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                    border: Border {
                        radius: 8.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .into(),
        }
    }

    fn view_expanded_hover_overlay(&self, movie: &Movie) -> Element<'_, Message> {
        let title = text(movie.title.clone())
            .size(16)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            })
            .wrapping(text::Wrapping::Word);

        let metadata = text(format!("{:.1}★  {}", movie.rating, movie.year))
            .size(13)
            .color(TEXT_GRAY);

        let details_button = self.view_expanded_details_button(movie.id.clone());

        let content_column = column![title, metadata, details_button]
            .spacing(8)
            .padding(Padding::new(12.0));

        let content_container = container(content_column)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(iced::alignment::Horizontal::Left)
            .align_y(iced::alignment::Vertical::Bottom);

        let bottom_gradient = container(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::PI)
                        .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.85))
                        .add_stop(0.25, Color::from_rgba(0.0, 0.0, 0.0, 0.4))
                        .add_stop(0.45, Color::from_rgba(0.0, 0.0, 0.0, 0.1))
                        .add_stop(0.6, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        container(
            iced::widget::stack![bottom_gradient, content_container]
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fixed(EXPANDED_WIDTH))
        .height(Length::Fixed(EXPANDED_HEIGHT))
        .style(|_theme| container::Style {
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
    }

    fn view_expanded_details_button(&self, movie_id: MovieId) -> Element<'_, Message> {
        button(
            row![
                icon(ICON_INFO_CIRCLE).size(14).color(TEXT_WHITE),
                text("Details").size(13).color(TEXT_WHITE)
            ]
            .spacing(6)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(8.0).left(14.0).right(16.0))
        .style(|_theme, status| {
            let bg_color = match status {
                button::Status::Hovered => Color::from_rgb(0.698, 0.027, 0.063),
                _ => ACCENT_RED,
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
        .on_press(Message::OpenDetail(movie_id))
        .into()
    }

    pub fn view_card_poster(&self, movie: &Movie, width: f32, height: f32) -> Element<'_, Message> {
        let handle = if self.image_cache.has_failed(&movie.poster) {
            None
        } else {
            self.image_cache.get(&movie.poster)
        };

        match handle {
            Some(h) => iced::widget::image(h.clone())
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => self.view_card_placeholder(&movie.title, width, height),
        }
    }

    pub fn view_card_placeholder(
        &self,
        title: &str,
        width: f32,
        height: f32,
    ) -> Element<'_, Message> {
        let placeholder = column![
            icon(ICON_FILM).size(40).color(TEXT_GRAY),
            text(title.to_string())
                .size(12)
                .color(TEXT_GRAY)
                .align_x(iced::alignment::Horizontal::Center)
                .wrapping(text::Wrapping::Word)
        ]
        .spacing(8)
        .align_x(iced::Alignment::Center)
        .padding(8);

        container(placeholder)
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                ..Default::default()
            })
            .into()
    }
}
