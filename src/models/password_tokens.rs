use crate::schema::password_tokens;
use chrono::NaiveDateTime;

#[derive(Queryable, Insertable)]
#[table_name = "password_tokens"]
pub struct PasswordToken {
    pub token: String,
    pub uid: u64,
    pub purpose: String,
    pub created_at: NaiveDateTime,
}

pub const TOKEN_PURPOSE_RESET: &str = "reset";
pub const TOKEN_PURPOSE_INVITE: &str = "invite";
