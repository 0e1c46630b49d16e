use serde::Deserialize;

// Date/time fields default to empty so presence failures surface as
// field-level messages instead of a deserialization error.
#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub pid: u64,
    pub did: u64,
    pub rid: u64,
    #[serde(default)]
    pub appointment_date: String,
    #[serde(default)]
    pub start_at: String,
    #[serde(default)]
    pub end_at: String,
    #[serde(default)]
    pub reason: String,
}
