//! Inventory record types
//!
//! Wire field names are fixed for client compatibility.

use serde::{Deserialize, Serialize};

/// A server in the infrastructure inventory
///
/// Missing fields decode to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    #[serde(rename = "server_name")]
    pub name: String,
    pub ip_address: String,
    pub is_online: bool,
}

/// A free-text document submitted for background processing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub text: String,
}

impl Server {
    pub fn new(name: impl Into<String>, ip_address: impl Into<String>, is_online: bool) -> Self {
        Self {
            name: name.into(),
            ip_address: ip_address.into(),
            is_online,
        }
    }

    /// One-line operational summary, e.g. `Server web-01: Operating Normally`
    pub fn status_line(&self) -> String {
        let status = if self.is_online {
            "Operating Normally"
        } else {
            "Maintenance Needed"
        };
        format!("Server {}: {}", self.name, status)
    }

    /// Example entries used to pre-seed a fresh inventory
    pub fn examples() -> Vec<Server> {
        vec![
            Server::new("core-router-01", "10.0.0.1", true),
            Server::new("web-01", "10.0.1.10", true),
            Server::new("db-01", "10.0.2.20", false),
        ]
    }
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
