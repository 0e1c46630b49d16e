pub mod appointments;
pub mod case_histories;
pub mod doctors;
pub mod password_tokens;
pub mod patients;
pub mod rooms;
pub mod users;
