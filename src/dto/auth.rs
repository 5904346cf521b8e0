use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login form or JSON body. Fields are optional so that a missing field is a
/// validation error rather than a deserialization failure.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}
