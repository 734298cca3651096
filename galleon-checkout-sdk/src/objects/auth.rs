//! `/authenticate` request and response.
//!
//! The first schema used `AppID`/`ID`/`Device` in requests and camelCase in
//! responses; both spellings are still accepted.

use serde::{Deserialize, Serialize};

use crate::codec::lenient::string_or_number;

/// Request body for exchanging app credentials for an access token.
///
/// Sent once per client start, before any other call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    #[serde(alias = "AppID")]
    pub app_id: String,
    /// The caller's user identifier inside the app.
    #[serde(alias = "ID")]
    pub id: String,
    #[serde(alias = "Device")]
    pub device: String,
}

/// Response returned after a successful authentication.
///
/// `access_token` goes into the `Authorization` header of later calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    #[serde(alias = "accessToken")]
    pub access_token: String,
    #[serde(alias = "appId", alias = "appID")]
    pub app_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "externalId")]
    pub external_id: String,
}
