//! Local-only mock session. Any credentials sign in; the profile is written
//! to a JSON file whose presence is the whole "logged in" signal. There is no
//! hashing, no server check, no expiry.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::media::User;

pub const DEMO_EMAIL: &str = "demo@movieflix.dev";
pub const DEMO_PASSWORD: &str = "demo123";

const FAKE_LATENCY: Duration = Duration::from_millis(800);
const SESSION_FILE: &str = "movieflix_user.json";

#[derive(Debug, Clone)]
pub enum AuthRequest {
    Login { email: String, password: String },
    Register { name: String, email: String },
}

pub fn avatar_url(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", seed)
}

fn demo_user() -> User {
    User {
        id: String::from("1"),
        email: String::from(DEMO_EMAIL),
        name: String::from("Demo User"),
        avatar: Some(avatar_url("demo")),
    }
}

fn next_user_id() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().to_string())
        .unwrap_or_else(|_| String::from("0"))
}

fn fabricate_from_email(email: &str) -> User {
    let name = email.split('@').next().unwrap_or(email).to_string();
    User {
        id: next_user_id(),
        email: email.to_string(),
        name,
        avatar: Some(avatar_url(email)),
    }
}

/// Pure part of the flow: the demo pair maps to the fixed profile, anything
/// else fabricates one. No combination is rejected.
pub fn resolve(request: &AuthRequest) -> User {
    match request {
        AuthRequest::Login { email, password } => {
            if email == DEMO_EMAIL && password == DEMO_PASSWORD {
                demo_user()
            } else {
                fabricate_from_email(email)
            }
        }
        AuthRequest::Register { name, email } => User {
            id: next_user_id(),
            email: email.clone(),
            name: name.clone(),
            avatar: Some(avatar_url(email)),
        },
    }
}

/// Resolve the request after the simulated round trip and persist the result.
pub async fn submit(request: AuthRequest) -> User {
    tokio::time::sleep(FAKE_LATENCY).await;
    let user = resolve(&request);
    save_session(&user).await;
    user
}

pub fn session_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("movieflix")
            .join(SESSION_FILE)
    })
}

pub async fn load_session() -> Option<User> {
    let path = session_path()?;
    let content = tokio::fs::read_to_string(path).await.ok()?;
    serde_json::from_str(&content).ok()
}

pub async fn save_session(user: &User) {
    let Some(path) = session_path() else {
        warn!("no home directory, session not persisted");
        return;
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            warn!(error = %e, "could not create session directory");
            return;
        }
    }
    match serde_json::to_string_pretty(user) {
        Ok(content) => {
            if let Err(e) = tokio::fs::write(path, content).await {
                warn!(error = %e, "could not persist session");
            }
        }
        Err(e) => warn!(error = %e, "could not serialize session"),
    }
}

pub async fn clear_session() {
    if let Some(path) = session_path() {
        let _ = tokio::fs::remove_file(path).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_credentials_resolve_to_fixed_profile() {
        let user = resolve(&AuthRequest::Login {
            email: String::from(DEMO_EMAIL),
            password: String::from(DEMO_PASSWORD),
        });
        assert_eq!(user.id, "1");
        assert_eq!(user.name, "Demo User");
        assert_eq!(user.avatar.as_deref(), Some(avatar_url("demo").as_str()));
    }

    #[test]
    fn demo_email_with_wrong_password_fabricates_instead() {
        let user = resolve(&AuthRequest::Login {
            email: String::from(DEMO_EMAIL),
            password: String::from("nope"),
        });
        assert_ne!(user.id, "1");
        assert_eq!(user.name, "demo");
    }

    #[test]
    fn any_other_pair_fabricates_a_profile_from_the_email() {
        let user = resolve(&AuthRequest::Login {
            email: String::from("rosa.mendes@example.com"),
            password: String::from("anything-at-all"),
        });
        assert_eq!(user.name, "rosa.mendes");
        assert_eq!(user.email, "rosa.mendes@example.com");
        assert_eq!(
            user.avatar.as_deref(),
            Some("https://api.dicebear.com/7.x/avataaars/svg?seed=rosa.mendes@example.com")
        );
        assert!(user.id.parse::<u128>().is_ok());
    }

    #[test]
    fn registration_takes_the_supplied_name() {
        let user = resolve(&AuthRequest::Register {
            name: String::from("Rosa Mendes"),
            email: String::from("rosa@example.com"),
        });
        assert_eq!(user.name, "Rosa Mendes");
        assert_eq!(user.avatar.as_deref(), Some(avatar_url("rosa@example.com").as_str()));
    }

    #[test]
    fn session_file_round_trips_through_json() {
        let user = demo_user();
        let json = serde_json::to_string(&user).expect("serializes");
        let back: User = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, user);
    }
}
