use crate::schema::users;
use chrono::NaiveDateTime;

#[derive(Queryable, Identifiable)]
#[primary_key(uid)]
#[table_name = "users"]
pub struct User {
    pub uid: u64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub telephone: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "users"]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub telephone: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(AsChangeset, Default)]
#[table_name = "users"]
pub struct UpdateUser {
    pub name: Option<String>,
    pub telephone: Option<String>,
    pub role: Option<String>,
}

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_DOCTOR: &str = "doctor";
pub const ROLE_PATIENT: &str = "patient";
pub const ROLE_STAFF: &str = "staff";
