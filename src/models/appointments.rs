use crate::schema::appointments;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Queryable)]
pub struct Appointment {
    pub aid: u64,
    pub pid: u64,
    pub did: u64,
    pub rid: u64,
    pub appointment_date: NaiveDate,
    pub start_at: NaiveTime,
    pub end_at: NaiveTime,
    pub reason: String,
    pub status: String,
    pub created_by: u64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "appointments"]
pub struct NewAppointment {
    pub pid: u64,
    pub did: u64,
    pub rid: u64,
    pub appointment_date: NaiveDate,
    pub start_at: NaiveTime,
    pub end_at: NaiveTime,
    pub reason: String,
    pub status: String,
    pub created_by: u64,
    pub created_at: Option<NaiveDateTime>,
}

pub const APPOINT_STATUS_BOOKED: &str = "booked";
pub const APPOINT_STATUS_CHECKED_IN: &str = "checked-in";
pub const APPOINT_STATUS_COMPLETED: &str = "completed";
pub const APPOINT_STATUS_CANCELLED: &str = "cancelled";
