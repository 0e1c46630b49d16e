use crate::schema::rooms;

#[derive(Queryable)]
pub struct Room {
    pub rid: u64,
    pub room_name: String,
    pub room_type: String,
    pub capacity: i32,
    pub is_available: bool,
}

#[derive(Insertable)]
#[table_name = "rooms"]
pub struct NewRoom {
    pub room_name: String,
    pub room_type: String,
    pub capacity: i32,
    pub is_available: bool,
}

#[derive(AsChangeset, Default)]
#[table_name = "rooms"]
pub struct UpdateRoom {
    pub room_name: Option<String>,
    pub room_type: Option<String>,
    pub capacity: Option<i32>,
    pub is_available: Option<bool>,
}
