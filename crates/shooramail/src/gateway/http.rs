//! HTTP gateway implementation
//!
//! POSTs JSON to the ShooraMail backend. Uses synchronous HTTP (ureq) to be
//! executor-agnostic; the controller runs these calls off the UI thread via
//! the mirror driver.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use super::api::{FetchMailsResponse, LoginResponse, SettingsPayload};
use super::normalize::normalize_mails;
use super::{Credentials, LoginError, LoginOutcome, MailGateway};
use crate::models::{Folder, Message, MessageId};

/// Default backend base URL (the local development proxy)
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/";

/// HTTP client for the ShooraMail backend endpoints
pub struct HttpMailGateway {
    base: Url,
}

impl HttpMailGateway {
    /// Create a gateway against the given base URL
    pub fn new(base_url: &str) -> Result<Self> {
        // A trailing slash makes Url::join append instead of replacing the
        // last path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized)
            .with_context(|| format!("Invalid gateway base URL: {base_url}"))?;
        Ok(Self { base })
    }

    /// Full URL for an endpoint name
    fn endpoint(&self, name: &str) -> String {
        self.base
            .join(name)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| format!("{}{name}", self.base))
    }

    /// POST a JSON payload and parse the JSON response
    fn post_json<T: DeserializeOwned>(&self, name: &str, payload: &serde_json::Value) -> Result<T> {
        let mut response = ureq::post(&self.endpoint(name))
            .send_json(payload)
            .with_context(|| format!("Failed to send {name} request"))?;
        response
            .body_mut()
            .read_json()
            .with_context(|| format!("Failed to parse {name} response"))
    }

    /// POST a JSON payload where only success/failure matters
    fn post_ok(&self, name: &str, payload: &serde_json::Value) -> Result<()> {
        ureq::post(&self.endpoint(name))
            .send_json(payload)
            .with_context(|| format!("Failed to send {name} request"))?;
        Ok(())
    }
}

impl Default for HttpMailGateway {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }
}

impl MailGateway for HttpMailGateway {
    fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, LoginError> {
        let payload = json!({ "email": email, "password": password });
        let result = ureq::post(&self.endpoint("login")).send_json(&payload);

        match result {
            Ok(mut response) => {
                let parsed: LoginResponse = response
                    .body_mut()
                    .read_json()
                    .map_err(|e| LoginError::Unreachable(format!("bad login response: {e}")))?;
                Ok(LoginOutcome {
                    user_name: parsed.user_name,
                    email: parsed.email.unwrap_or_else(|| email.to_string()),
                    inbox: parsed
                        .mails
                        .map(|mails| normalize_mails(mails, Folder::Inbox)),
                })
            }
            Err(ureq::Error::StatusCode(code)) => Err(LoginError::from_status(code)),
            Err(e) => Err(LoginError::Unreachable(e.to_string())),
        }
    }

    fn fetch_inbox(&self, creds: &Credentials) -> Result<Vec<Message>> {
        let payload = json!({ "email": creds.email, "password": creds.password });
        let parsed: FetchMailsResponse = self.post_json("inbox-fetch", &payload)?;
        Ok(normalize_mails(parsed.mails.unwrap_or_default(), Folder::Inbox))
    }

    fn fetch_folder(&self, creds: &Credentials, folder: Folder) -> Result<Vec<Message>> {
        let payload = json!({
            "email": creds.email,
            "password": creds.password,
            "folder": folder.as_str(),
        });
        let parsed: FetchMailsResponse = self.post_json("folder-fetch", &payload)?;
        Ok(normalize_mails(parsed.mails.unwrap_or_default(), folder))
    }

    fn send_mail(&self, creds: &Credentials, to: &str, subject: &str, body: &str) -> Result<()> {
        let payload = json!({
            "email": creds.email,
            "to": to,
            "subject": subject,
            "body": body,
        });
        self.post_ok("send-mail", &payload)
    }

    fn move_mail(&self, creds: &Credentials, id: &MessageId, folder: Folder) -> Result<()> {
        let payload = json!({
            "email": creds.email,
            "id": id.as_str(),
            "folder": folder.as_str(),
        });
        self.post_ok("move-mail", &payload)
    }

    fn delete_mail(&self, creds: &Credentials, id: &MessageId) -> Result<()> {
        let payload = json!({ "email": creds.email, "id": id.as_str() });
        self.post_ok("delete-mail", &payload)
    }

    fn mark_read(&self, creds: &Credentials, id: &MessageId) -> Result<()> {
        let payload = json!({ "email": creds.email, "id": id.as_str() });
        self.post_ok("mark-read", &payload)
    }

    fn toggle_star(&self, creds: &Credentials, id: &MessageId, flagged: bool) -> Result<()> {
        let payload = json!({
            "email": creds.email,
            "id": id.as_str(),
            "flagged": flagged,
        });
        self.post_ok("toggle-star", &payload)
    }

    fn toggle_important(
        &self,
        creds: &Credentials,
        id: &MessageId,
        important: bool,
    ) -> Result<()> {
        let payload = json!({
            "email": creds.email,
            "id": id.as_str(),
            "important": important,
        });
        self.post_ok("toggle-important", &payload)
    }

    fn save_draft(&self, creds: &Credentials, to: &str, subject: &str, body: &str) -> Result<()> {
        let payload = json!({
            "email": creds.email,
            "to": to,
            "subject": subject,
            "body": body,
        });
        self.post_ok("save-draft", &payload)
    }

    fn save_settings(&self, creds: &Credentials, settings: &SettingsPayload) -> Result<()> {
        let payload = json!({
            "email": creds.email,
            "settings": settings,
        });
        self.post_ok("settings", &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_path() {
        let gateway = HttpMailGateway::new("http://localhost:5000/api").unwrap();
        assert_eq!(gateway.endpoint("login"), "http://localhost:5000/api/login");
        assert_eq!(
            gateway.endpoint("inbox-fetch"),
            "http://localhost:5000/api/inbox-fetch"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let gateway = HttpMailGateway::new("http://localhost:5000/api/").unwrap();
        assert_eq!(gateway.endpoint("send-mail"), "http://localhost:5000/api/send-mail");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(HttpMailGateway::new("not a url").is_err());
    }

    #[test]
    fn test_default_uses_local_backend() {
        let gateway = HttpMailGateway::default();
        assert_eq!(gateway.endpoint("login"), "http://localhost:5000/api/login");
    }
}
