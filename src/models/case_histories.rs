use crate::schema::{case_histories, medicines, reports};
use chrono::NaiveDateTime;

#[derive(Queryable)]
pub struct CaseHistory {
    pub cid: u64,
    pub aid: u64,
    pub did: u64,
    pub pid: u64,
    pub notes: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "case_histories"]
pub struct NewCaseHistory {
    pub aid: u64,
    pub did: u64,
    pub pid: u64,
    pub notes: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Queryable)]
pub struct Medicine {
    pub mid: u64,
    pub cid: u64,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

#[derive(Insertable)]
#[table_name = "medicines"]
pub struct NewMedicine {
    pub cid: u64,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

#[derive(Queryable)]
pub struct Report {
    pub report_id: u64,
    pub cid: u64,
    pub report_type: String,
    pub file_url: String,
    pub description: String,
}

#[derive(Insertable)]
#[table_name = "reports"]
pub struct NewReport {
    pub cid: u64,
    pub report_type: String,
    pub file_url: String,
    pub description: String,
}
