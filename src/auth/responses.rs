use serde::Serialize;

#[derive(Default, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub err: String,
    pub token: String,
}

#[derive(Default, Serialize)]
pub struct InviteResponse {
    pub success: bool,
    pub err: String,
    // Set-password token for the invite link; shown to the inviting
    // admin since mail delivery is out of scope.
    pub invite_token: String,
}

crate::impl_err_response! {
    LoginResponse,
    InviteResponse,
}
