use serde::Serialize;

use crate::query::{ListItem, SortValue};

#[derive(Clone, Serialize)]
pub struct RoomItem {
    pub rid: u64,
    pub room_name: String,
    pub room_type: String,
    pub capacity: i32,
    pub is_available: bool,
}

impl ListItem for RoomItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.room_name, &self.room_type]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.room_name)),
            "type" => Some(SortValue::text(&self.room_type)),
            "capacity" => Some(SortValue::Int(i64::from(self.capacity))),
            _ => None,
        }
    }
}

#[derive(Default, Serialize)]
pub struct RoomListResponse {
    pub success: bool,
    pub err: String,
    pub rooms: Vec<RoomItem>,
}

crate::impl_err_response! {
    RoomListResponse,
}
