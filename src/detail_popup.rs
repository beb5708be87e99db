use iced::widget::{button, column, container, scrollable, text, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::components::hidden_vertical_scrollbar_style;
use crate::media::{Message, Movie, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE};
use crate::MovieFlix;

const POPUP_WIDTH: f32 = 920.0;

pub const ICON_X_LG: char = '\u{F659}';

pub fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn format_full_date(date_str: &str) -> String {
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() != 3 || date_str.len() < 10 {
        return date_str.to_string();
    }
    format!("{}/{}/{}", parts[1], parts[2], parts[0])
}

pub fn format_rating_with_star(rating: f32) -> String {
    format!("{:.1}★", rating)
}

pub fn format_currency(amount: u64) -> String {
    if amount == 0 {
        return String::from("N/A");
    }
    let formatted = amount
        .to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",");
    format!("${}", formatted)
}

fn popup_container_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 16.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
            offset: iced::Vector::new(0.0, 25.0),
            blur_radius: 50.0,
        },
        ..Default::default()
    }
}

impl MovieFlix {
    pub fn view_detail_overlay(&self) -> Element<'_, Message> {
        let popup: Element<Message> = if self.detail_missing {
            self.view_detail_not_found()
        } else if let Some(movie) = &self.detail_movie {
            self.view_detail_popup(movie)
        } else {
            self.view_detail_loading_popup()
        };

        let popup_mouse_area = iced::widget::mouse_area(popup);

        let overlay_bg = iced::widget::mouse_area(
            container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        0.0, 0.0, 0.0, 0.85,
                    ))),
                    ..Default::default()
                }),
        )
        .on_press(Message::CloseDetail);

        let centered_popup = container(popup_mouse_area)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .padding(Padding::new(32.0));

        iced::widget::stack![overlay_bg, centered_popup]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_detail_popup(&self, movie: &Movie) -> Element<'_, Message> {
        let content = scrollable(self.view_detail_content(movie))
            .direction(scrollable::Direction::Vertical(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(hidden_vertical_scrollbar_style);

        let popup_with_close = iced::widget::stack![content, self.view_detail_close_button()]
            .width(Length::Fixed(POPUP_WIDTH))
            .height(Length::Fill);

        container(popup_with_close)
            .max_width(POPUP_WIDTH)
            .clip(true)
            .style(popup_container_style)
            .into()
    }

    fn view_detail_close_button(&self) -> Element<'_, Message> {
        let close_button = button(
            container(icon(ICON_X_LG).size(18).color(TEXT_WHITE))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .width(Length::Fixed(36.0))
        .height(Length::Fixed(36.0))
        .padding(0)
        .style(|_theme, status| {
            let bg_alpha = match status {
                button::Status::Hovered => 0.9,
                _ => 0.6,
            };
            button::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.0, 0.0, 0.0, bg_alpha,
                ))),
                text_color: TEXT_WHITE,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 18.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::CloseDetail);

        container(close_button)
            .width(Length::Fill)
            .align_x(iced::alignment::Horizontal::Right)
            .padding(Padding::new(16.0))
            .into()
    }

    fn view_detail_loading_popup(&self) -> Element<'_, Message> {
        container(text("Loading...").size(18).color(TEXT_GRAY))
            .width(Length::Fixed(420.0))
            .height(Length::Fixed(200.0))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(popup_container_style)
            .into()
    }

    /// Unknown ids land here: a dedicated view, not an error.
    fn view_detail_not_found(&self) -> Element<'_, Message> {
        let title = text("Movie not found")
            .size(24)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });
        let hint = text("This title is no longer in the catalog.")
            .size(14)
            .color(TEXT_GRAY);
        let back_button = button(text("Back to browsing").size(14).color(TEXT_WHITE))
            .padding(Padding::new(10.0).left(24.0).right(24.0))
            .style(|_theme, _status| button::Style {
                background: Some(iced::Background::Color(crate::media::ACCENT_RED)),
                text_color: TEXT_WHITE,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 6.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(Message::CloseDetail);

        container(
            column![title, hint, back_button]
                .spacing(16)
                .align_x(iced::Alignment::Center),
        )
        .width(Length::Fixed(420.0))
        .height(Length::Fixed(240.0))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(popup_container_style)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_full_dates_and_passes_partial_ones_through() {
        assert_eq!(format_full_date("1999-03-31"), "03/31/1999");
        assert_eq!(format_full_date("1999"), "1999");
        assert_eq!(format_full_date(""), "");
    }

    #[test]
    fn groups_currency_digits() {
        assert_eq!(format_currency(63_000_000), "$63,000,000");
        assert_eq!(format_currency(950), "$950");
        assert_eq!(format_currency(0), "N/A");
    }

    #[test]
    fn rounds_the_rating_to_one_decimal() {
        assert_eq!(format_rating_with_star(8.67), "8.7★");
        assert_eq!(format_rating_with_star(0.0), "0.0★");
    }
}
