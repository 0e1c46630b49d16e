use serde::Serialize;

use crate::nav::NavEntry;
use crate::query::{ListItem, SortValue};

#[derive(Clone, Serialize)]
pub struct UserItem {
    pub uid: u64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub telephone: String,
    pub created_at: String,
}

impl ListItem for UserItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.role]
    }

    fn status(&self) -> Option<&str> {
        // The users table filters by role through the status dropdown.
        Some(&self.role)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "email" => Some(SortValue::text(&self.email)),
            "role" => Some(SortValue::text(&self.role)),
            "created" => Some(SortValue::text(&self.created_at)),
            _ => None,
        }
    }
}

#[derive(Default, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub err: String,
    pub users: Vec<UserItem>,
}

#[derive(Default, Serialize)]
pub struct TopCardsResponse {
    pub success: bool,
    pub err: String,
    pub doctors: i64,
    pub patients: i64,
    pub appointments: i64,
    pub rooms: i64,
}

#[derive(Default, Serialize)]
pub struct NavResponse {
    pub success: bool,
    pub err: String,
    pub entries: Vec<NavEntry>,
}

crate::impl_err_response! {
    UserListResponse,
    TopCardsResponse,
    NavResponse,
}
