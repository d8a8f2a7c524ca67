//! Session context for one signed-in dashboard session
//!
//! The session is constructed on successful login and handed to the mailbox
//! controller; it is the only place credentials live. An identity marker
//! (email only, never the password) is written to the config directory on
//! login and removed again on logout.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::gateway::Credentials;

/// Filename of the session identity marker in the config directory
const SESSION_FILE: &str = "session.json";

/// Persisted identity marker; holds the email only
#[derive(Debug, Serialize, Deserialize)]
struct SessionMarker {
    email: String,
}

/// Identity and credentials for the current dashboard session
#[derive(Debug, Clone)]
pub struct Session {
    /// Display name shown in the sidebar footer
    pub user_name: String,
    /// Account email address
    pub email: String,
    password: String,
}

impl Session {
    pub fn new(
        user_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Credentials for gateway calls
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    /// Write the identity marker to the config directory
    pub fn remember(&self) -> Result<()> {
        config::save_json(
            SESSION_FILE,
            &SessionMarker {
                email: self.email.clone(),
            },
        )
    }

    /// Remove the identity marker from the config directory
    pub fn forget(&self) -> Result<()> {
        config::remove(SESSION_FILE)
    }

    /// Email of the previously remembered session, if a marker exists
    pub fn remembered() -> Option<String> {
        config::load_json::<SessionMarker>(SESSION_FILE)
            .ok()
            .map(|marker| marker.email)
    }
}
