use serde::Deserialize;

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
pub struct CreateRoomRequest {
    pub room_name: String,
    #[serde(default)]
    pub room_type: String,
    #[serde(default)]
    pub capacity: i32,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

#[derive(Deserialize)]
pub struct UpdateRoomRequest {
    pub room_name: Option<String>,
    pub room_type: Option<String>,
    pub capacity: Option<i32>,
    pub is_available: Option<bool>,
}
