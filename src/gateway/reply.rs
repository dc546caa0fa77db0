//! JSON bodies returned by the gateway endpoints.

use serde::Serialize;

pub const PROTECTED_DATA: &str = "Protected admin data";

/// Body shape shared by login, logout, admin and every auth failure.
#[derive(Debug, Serialize)]
pub struct Reply<'a> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<&'a str>,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a str>,
}

impl<'a> Reply<'a> {
    pub fn failure(message: &'a str) -> Self {
        Self {
            success: false,
            token: None,
            message,
            data: None,
        }
    }

    pub fn success(message: &'a str) -> Self {
        Self {
            success: true,
            token: None,
            message,
            data: None,
        }
    }

    pub fn login(token: &'a str) -> Self {
        Self {
            token: Some(token),
            ..Self::success("Login successful")
        }
    }

    pub fn access_granted() -> Self {
        Self {
            data: Some(PROTECTED_DATA),
            ..Self::success("Access granted")
        }
    }
}

/// `GET /` discovery document.
#[derive(Debug, Serialize)]
pub struct Discovery {
    pub message: &'static str,
    pub endpoints: [&'static str; 3],
}

impl Default for Discovery {
    fn default() -> Self {
        Self {
            message: "Bastion authentication gateway",
            endpoints: ["/login", "/logout", "/admin"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_reply_shape() {
        let body = serde_json::to_string(&Reply::login("abc")).unwrap();
        assert_eq!(
            body,
            r#"{"success":true,"token":"abc","message":"Login successful"}"#
        );
    }

    #[test]
    fn access_reply_shape() {
        let body = serde_json::to_string(&Reply::access_granted()).unwrap();
        assert_eq!(
            body,
            r#"{"success":true,"message":"Access granted","data":"Protected admin data"}"#
        );
    }
}
