use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub birthday: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ForgetPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

#[derive(Deserialize)]
pub struct SetPasswordRequest {
    pub password: String,
}

#[derive(Deserialize)]
pub struct InviteRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub title: String,
}
