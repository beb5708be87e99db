use iced::widget::{button, column, container, row, text, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::media::{
    truncate_synopsis, Message, Movie, MovieId, Page, ACCENT_RED, SURFACE_DARK_GRAY, TEXT_GRAY,
    TEXT_WHITE,
};
use crate::MovieFlix;

const HERO_HEIGHT: f32 = 620.0;
const ICON_INFO_CIRCLE: char = '\u{F431}';
const ICON_GRID: char = '\u{F3FC}';

pub fn format_runtime(minutes: u32) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    match (h, m) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

impl MovieFlix {
    pub fn view_hero_section(&self) -> Element<'_, Message> {
        match &self.hero_movie {
            Some(movie) => self.view_hero_with_content(movie),
            None => self.view_hero_placeholder(),
        }
    }

    pub fn view_hero_placeholder(&self) -> Element<'_, Message> {
        container(
            text("No featured title available")
                .size(24)
                .color(TEXT_GRAY),
        )
        .width(Length::Fill)
        .height(Length::Fixed(HERO_HEIGHT))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
            ..Default::default()
        })
        .into()
    }

    pub fn view_hero_with_content(&self, movie: &Movie) -> Element<'_, Message> {
        let hero_title = text(movie.title.clone())
            .size(48)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let metadata_row = self.view_hero_metadata(movie);
        let truncated_synopsis = truncate_synopsis(&movie.synopsis, 200);
        let hero_synopsis =
            container(text(truncated_synopsis).size(16).color(TEXT_GRAY)).max_width(500.0);

        let details_button = self.view_hero_details_button(movie.id.clone());
        let browse_button = self.view_hero_browse_button();

        let button_row = row![details_button, browse_button]
            .spacing(12)
            .align_y(iced::Alignment::Center);

        let hero_text_content = column![hero_title, metadata_row, hero_synopsis, button_row]
            .spacing(20)
            .padding(Padding::new(64.0).left(64.0).right(64.0));

        let hero_left_gradient = container(hero_text_content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_y(iced::alignment::Vertical::Center)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(0.0)
                        .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.99))
                        .add_stop(0.3, Color::from_rgba(0.0, 0.0, 0.0, 0.9))
                        .add_stop(0.5, Color::from_rgba(0.0, 0.0, 0.0, 0.6))
                        .add_stop(0.7, Color::from_rgba(0.0, 0.0, 0.0, 0.25))
                        .add_stop(0.9, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        let hero_bottom_gradient = container(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::PI)
                        .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.15))
                        .add_stop(0.06, Color::from_rgba(0.0, 0.0, 0.0, 0.05))
                        .add_stop(0.12, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        let backdrop_element = self.view_hero_backdrop(movie);

        iced::widget::stack![backdrop_element, hero_bottom_gradient, hero_left_gradient]
            .width(Length::Fill)
            .height(Length::Fixed(HERO_HEIGHT))
            .into()
    }

    fn view_hero_backdrop(&self, movie: &Movie) -> Element<'_, Message> {
        let handle = if self.image_cache.has_failed(&movie.backdrop) {
            None
        } else {
            self.image_cache.get(&movie.backdrop)
        };

        match handle {
            Some(h) => container(
                iced::widget::image(h.clone())
                    .width(Length::Fill)
                    .height(Length::Fixed(HERO_HEIGHT))
                    .content_fit(iced::ContentFit::Cover),
            )
            .width(Length::Fill)
            .height(Length::Fixed(HERO_HEIGHT))
            .into(),
            None => container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fixed(HERO_HEIGHT))
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                    ..Default::default()
                })
                .into(),
        }
    }

    fn view_hero_metadata(&self, movie: &Movie) -> Element<'_, Message> {
        let rating = text(format!("{:.1}★", movie.rating))
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

        if !movie.genres.is_empty() {
            let genre_names = movie
                .genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(" · ");
            metadata = metadata.push(text(genre_names).size(14).color(TEXT_GRAY));
        }

        metadata.into()
    }

    fn view_hero_details_button(&self, movie_id: MovieId) -> Element<'_, Message> {
        button(
            row![
                icon(ICON_INFO_CIRCLE).size(16).color(TEXT_WHITE),
                text("Details").size(16).color(TEXT_WHITE)
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(12.0).left(24.0).right(24.0))
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

    fn view_hero_browse_button(&self) -> Element<'_, Message> {
        button(
            row![
                icon(ICON_GRID).size(16).color(TEXT_WHITE),
                text("Browse all").size(16).color(TEXT_WHITE)
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(12.0).left(24.0).right(24.0))
        .style(|_theme, status| {
            let bg_alpha = match status {
                button::Status::Hovered => 0.35,
                _ => 0.25,
            };
            button::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.5, 0.5, 0.5, bg_alpha,
                ))),
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
        .on_press(Message::NavigateTo(Page::Browse))
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_runtime_in_hours_and_minutes() {
        assert_eq!(format_runtime(45), "45m");
        assert_eq!(format_runtime(120), "2h");
        assert_eq!(format_runtime(136), "2h 16m");
    }
}
