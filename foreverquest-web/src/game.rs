//! Web-specific quest engine pieces
//!
//! Browser implementations of the foreverquest-game seams plus a re-export of
//! the core types.

use gloo::net::http::Request;

// Re-export all types from foreverquest-game
pub use foreverquest_game::*;

/// Where the quest document is served from, relative to the page.
pub const CONFIG_URL: &str = "quest_config.json";

#[derive(Debug, thiserror::Error)]
pub enum WebConfigError {
    #[error("Network error: {0}")]
    Network(#[from] gloo::net::Error),
    #[error("Config request failed with HTTP {0}")]
    Status(u16),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Fetch and parse the quest document.
///
/// # Errors
///
/// Returns an error if the request fails, the server answers with a non-success
/// status, or the body is not a valid quest document.
#[allow(clippy::future_not_send)] // gloo futures are not `Send` on wasm.
pub async fn fetch_config(url: &str) -> Result<QuestConfig, WebConfigError> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(WebConfigError::Status(response.status()));
    }
    let body = response.text().await?;
    Ok(QuestConfig::from_json(&body)?)
}

/// Session storage backed by `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSessionStorage;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WebSessionStorage {
    /// `localStorage`, or an error when the page has none or access is denied.
    fn backend() -> Result<web_sys::Storage, WebStorageError> {
        crate::dom::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .ok_or_else(|| WebStorageError::Storage(String::from("localStorage is unavailable")))
    }
}

impl SessionStorage for WebSessionStorage {
    type Error = WebStorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Self::backend()?
            .get_item(key)
            .map_err(|e| WebStorageError::Storage(crate::dom::js_error_message(&e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        Self::backend()?
            .set_item(key, value)
            .map_err(|e| WebStorageError::Storage(crate::dom::js_error_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        Self::backend()?
            .remove_item(key)
            .map_err(|e| WebStorageError::Storage(crate::dom::js_error_message(&e)))
    }
}

/// Save the session, logging instead of failing the interaction.
pub fn persist(session: &QuizSession) {
    if let Err(err) = save_session(&WebSessionStorage, session.state()) {
        log::error!("Failed to save session: {err}");
    }
}

/// Whatever the browser has stored; storage failures count as nothing stored.
#[must_use]
pub fn stored_resume() -> Resume {
    load_resumable(&WebSessionStorage).unwrap_or_else(|err| {
        log::warn!("Could not read saved session: {err}");
        Resume::Fresh
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_storage_degrades_instead_of_failing() {
        assert!(WebSessionStorage.read(constants::STATE_KEY).is_err());
        assert!(WebSessionStorage.write(constants::STATE_KEY, "{}").is_err());
        assert!(WebSessionStorage.remove(constants::STATE_KEY).is_err());
        assert_eq!(stored_resume(), Resume::Fresh);

        let session = QuizSession::start(
            QuestConfig::bundled().unwrap(),
            Settings::default(),
            chrono::Utc::now(),
        );
        persist(&session);
    }

    #[test]
    fn status_errors_render_code() {
        assert_eq!(
            WebConfigError::Status(404).to_string(),
            "Config request failed with HTTP 404"
        );
    }
}
