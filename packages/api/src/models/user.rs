//! # Authenticated identity
//!
//! [`UserInfo`] is what `/auth/me` returns and what the session store mirrors under
//! `user_info`. The server fills `attributes` from its identity provider, so the
//! keys present vary; [`UserInfo::display_name`] picks the friendliest one available.
//!
//! [`LoginRequest`] and [`LoginResponse`] are the two bodies of `POST /auth/login`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// User information safe to keep on the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl UserInfo {
    /// `name` attribute, then `given_name family_name`, then email, then username.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.attributes.get("name").filter(|n| !n.trim().is_empty()) {
            return name.clone();
        }
        let given = self.attributes.get("given_name").map(String::as_str).unwrap_or("");
        let family = self.attributes.get("family_name").map(String::as_str).unwrap_or("");
        let full = format!("{given} {family}").trim().to_string();
        if !full.is_empty() {
            return full;
        }
        self.email.clone().unwrap_or_else(|| self.username.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    pub user_info: UserInfo,
}

fn bearer() -> String {
    "bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = UserInfo {
            username: "ana".to_string(),
            email: None,
            attributes: BTreeMap::new(),
        };
        assert_eq!(user.display_name(), "ana");

        user.email = Some("ana@example.org".to_string());
        assert_eq!(user.display_name(), "ana@example.org");

        user.attributes.insert("given_name".to_string(), "Ana".to_string());
        assert_eq!(user.display_name(), "Ana");

        user.attributes.insert("name".to_string(), "Ana Rojas".to_string());
        assert_eq!(user.display_name(), "Ana Rojas");
    }

    #[test]
    fn test_login_response_without_attributes() {
        let json = r#"{
            "access_token": "tok",
            "token_type": "bearer",
            "user_info": {"username": "ana"}
        }"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "tok");
        assert!(response.user_info.attributes.is_empty());
        assert!(response.user_info.email.is_none());
    }
}
