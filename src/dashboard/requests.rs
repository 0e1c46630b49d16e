use serde::Deserialize;

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub telephone: Option<String>,
    pub role: Option<String>,
}
