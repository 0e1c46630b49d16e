use chrono::NaiveDate;
use serde::Serialize;

use crate::query::{ListItem, SortValue};

#[derive(Default, Serialize)]
pub struct SlotItem {
    // 12-hour display strings, e.g. "02:30 PM".
    pub start: String,
    pub end: String,
}

#[derive(Default, Serialize)]
pub struct CreateAppointmentResponse {
    pub success: bool,
    pub err: String,
    pub available_slots: Vec<SlotItem>,
}

impl CreateAppointmentResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn conflict(slots: Vec<SlotItem>) -> Self {
        Self {
            success: false,
            err: "The requested time overlaps an existing booking".to_string(),
            available_slots: slots,
        }
    }
}

#[derive(Clone, Serialize)]
pub struct AppointmentItem {
    pub aid: u64,
    pub patient_name: String,
    pub doctor_name: String,
    pub room_name: String,
    pub appointment_date: NaiveDate,
    pub start_at: String,
    pub end_at: String,
    pub reason: String,
    pub status: String,
}

impl ListItem for AppointmentItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.patient_name,
            &self.doctor_name,
            &self.reason,
            &self.room_name,
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.appointment_date)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "date" => Some(SortValue::Date(self.appointment_date)),
            // "HH:MM" sorts chronologically as text.
            "start" => Some(SortValue::text(&self.start_at)),
            "patient" => Some(SortValue::text(&self.patient_name)),
            "doctor" => Some(SortValue::text(&self.doctor_name)),
            "status" => Some(SortValue::text(&self.status)),
            _ => None,
        }
    }
}

#[derive(Default, Serialize)]
pub struct AppointmentListResponse {
    pub success: bool,
    pub err: String,
    pub appointments: Vec<AppointmentItem>,
}

crate::impl_err_response! {
    CreateAppointmentResponse,
    AppointmentListResponse,
}
