use crate::schema::patients;
use chrono::NaiveDate;

#[derive(Queryable)]
pub struct Patient {
    pub pid: u64,
    pub uid: u64,
    pub gender: String,
    pub birthday: Option<NaiveDate>,
}

#[derive(Insertable)]
#[table_name = "patients"]
pub struct NewPatient {
    pub uid: u64,
    pub gender: String,
    pub birthday: Option<NaiveDate>,
}
