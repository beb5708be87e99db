use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

use crate::auth::AuthRequest;
use crate::media::{ACCENT_RED, BACKGROUND_BLACK, TEXT_GRAY, TEXT_WHITE};

#[derive(Debug, Clone)]
pub enum AuthMessage {
    EmailChanged(String),
    PasswordChanged(String),
    NameChanged(String),
    ModeToggled,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

#[derive(Debug, Default)]
pub struct AuthPage {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub name: String,
    pub error: Option<String>,
}

impl AuthPage {
    /// Returns the request to run once the form validates. Validation is
    /// deliberately shallow: this session is a UI convenience, not an account
    /// system.
    pub fn update(&mut self, message: AuthMessage) -> Option<AuthRequest> {
        match message {
            AuthMessage::EmailChanged(email) => {
                self.email = email;
                self.error = None;
                None
            }
            AuthMessage::PasswordChanged(password) => {
                self.password = password;
                self.error = None;
                None
            }
            AuthMessage::NameChanged(name) => {
                self.name = name;
                self.error = None;
                None
            }
            AuthMessage::ModeToggled => {
                self.mode = match self.mode {
                    AuthMode::SignIn => AuthMode::Register,
                    AuthMode::Register => AuthMode::SignIn,
                };
                self.error = None;
                None
            }
            AuthMessage::Submitted => {
                let email = self.email.trim().to_string();
                if email.is_empty() || !email.contains('@') {
                    self.error = Some(String::from("Enter an email address"));
                    return None;
                }
                if self.password.is_empty() {
                    self.error = Some(String::from("Enter a password"));
                    return None;
                }
                match self.mode {
                    AuthMode::SignIn => Some(AuthRequest::Login {
                        email,
                        password: self.password.clone(),
                    }),
                    AuthMode::Register => {
                        let name = self.name.trim().to_string();
                        if name.is_empty() {
                            self.error = Some(String::from("Enter your name"));
                            return None;
                        }
                        Some(AuthRequest::Register { name, email })
                    }
                }
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn view(&self, pending: bool) -> Element<'_, AuthMessage> {
        let logo = text("MOVIEFLIX")
            .size(48)
            .color(ACCENT_RED)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let (title_label, submit_label, toggle_label) = match self.mode {
            AuthMode::SignIn => ("Sign in", "Sign in", "New here? Create an account"),
            AuthMode::Register => ("Create your account", "Register", "Have an account? Sign in"),
        };
        let title = text(title_label).size(28).color(TEXT_WHITE);
        let subtitle = text("Any email and password works in this demo")
            .size(14)
            .color(TEXT_GRAY);

        let name_input: Element<AuthMessage> = if self.mode == AuthMode::Register {
            text_input("Name", &self.name)
                .on_input(AuthMessage::NameChanged)
                .on_submit(AuthMessage::Submitted)
                .padding(12)
                .size(14)
                .width(Length::Fill)
                .into()
        } else {
            Space::new().height(0).into()
        };

        let email_input = text_input("Email", &self.email)
            .on_input(AuthMessage::EmailChanged)
            .on_submit(AuthMessage::Submitted)
            .padding(12)
            .size(14)
            .width(Length::Fill);

        let password_input = text_input("Password", &self.password)
            .on_input(AuthMessage::PasswordChanged)
            .on_submit(AuthMessage::Submitted)
            .secure(true)
            .padding(12)
            .size(14)
            .width(Length::Fill);

        let submit_text = if pending { "One moment..." } else { submit_label };
        let mut submit_button = button(text(submit_text).size(16).color(TEXT_WHITE))
            .padding([12, 32])
            .width(Length::Fill)
            .style(|_theme, status| {
                let bg = match status {
                    button::Status::Hovered => iced::Color::from_rgb(0.7, 0.02, 0.06),
                    _ => ACCENT_RED,
                };
                button::Style {
                    background: Some(iced::Background::Color(bg)),
                    text_color: TEXT_WHITE,
                    border: iced::Border::default().rounded(4),
                    ..Default::default()
                }
            });
        if !pending {
            submit_button = submit_button.on_press(AuthMessage::Submitted);
        }

        let toggle = button(text(toggle_label).size(13).color(TEXT_GRAY))
            .padding(0)
            .style(|_theme, _status| button::Style {
                background: None,
                text_color: TEXT_GRAY,
                ..Default::default()
            })
            .on_press(AuthMessage::ModeToggled);

        let demo_hint = text(format!(
            "Demo account: {} / {}",
            crate::auth::DEMO_EMAIL,
            crate::auth::DEMO_PASSWORD
        ))
        .size(12)
        .color(TEXT_GRAY);

        let error_text = if let Some(ref err) = self.error {
            text(err).size(14).color(ACCENT_RED)
        } else {
            text("").size(14)
        };

        let spacer = || Space::new().height(16);
        let small_spacer = || Space::new().height(4);

        let form = column![
            logo,
            spacer(),
            title,
            small_spacer(),
            subtitle,
            spacer(),
            name_input,
            small_spacer(),
            email_input,
            small_spacer(),
            password_input,
            spacer(),
            error_text,
            small_spacer(),
            submit_button,
            small_spacer(),
            toggle,
            spacer(),
            demo_hint,
        ]
        .width(Length::Fixed(400.0))
        .align_x(Alignment::Start);

        container(form)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_BLACK)),
                ..Default::default()
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_requires_a_plausible_email() {
        let mut page = AuthPage::default();
        assert!(page.update(AuthMessage::Submitted).is_none());
        assert!(page.error.is_some());

        page.update(AuthMessage::EmailChanged(String::from("not-an-email")));
        page.update(AuthMessage::PasswordChanged(String::from("pw")));
        assert!(page.update(AuthMessage::Submitted).is_none());
    }

    #[test]
    fn sign_in_builds_a_login_request() {
        let mut page = AuthPage::default();
        page.update(AuthMessage::EmailChanged(String::from("a@b.dev")));
        page.update(AuthMessage::PasswordChanged(String::from("pw")));
        let request = page.update(AuthMessage::Submitted);
        assert!(matches!(
            request,
            Some(AuthRequest::Login { email, .. }) if email == "a@b.dev"
        ));
    }

    #[test]
    fn register_requires_a_name() {
        let mut page = AuthPage::default();
        page.update(AuthMessage::ModeToggled);
        page.update(AuthMessage::EmailChanged(String::from("a@b.dev")));
        page.update(AuthMessage::PasswordChanged(String::from("pw")));
        assert!(page.update(AuthMessage::Submitted).is_none());

        page.update(AuthMessage::NameChanged(String::from("Ada")));
        let request = page.update(AuthMessage::Submitted);
        assert!(matches!(
            request,
            Some(AuthRequest::Register { name, .. }) if name == "Ada"
        ));
    }
}
