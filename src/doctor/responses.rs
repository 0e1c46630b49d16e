use chrono::NaiveDate;
use serde::Serialize;

use crate::query::{ListItem, SortValue};

#[derive(Clone, Serialize)]
pub struct DoctorItem {
    pub did: u64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub title: String,
    pub information: String,
}

impl ListItem for DoctorItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.department, &self.title]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "department" => Some(SortValue::text(&self.department)),
            _ => None,
        }
    }
}

#[derive(Default, Serialize)]
pub struct DoctorListResponse {
    pub success: bool,
    pub err: String,
    pub doctors: Vec<DoctorItem>,
}

#[derive(Clone, Serialize)]
pub struct CaseHistoryItem {
    pub cid: u64,
    pub aid: u64,
    pub patient_name: String,
    pub doctor_name: String,
    pub notes: String,
    pub created_at: String,
    #[serde(skip)]
    pub created_on: NaiveDate,
}

impl ListItem for CaseHistoryItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.patient_name, &self.doctor_name, &self.notes]
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.created_on)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "patient" => Some(SortValue::text(&self.patient_name)),
            "doctor" => Some(SortValue::text(&self.doctor_name)),
            "date" => Some(SortValue::Date(self.created_on)),
            _ => None,
        }
    }
}

#[derive(Default, Serialize)]
pub struct CaseHistoryListResponse {
    pub success: bool,
    pub err: String,
    pub case_histories: Vec<CaseHistoryItem>,
}

#[derive(Default, Serialize)]
pub struct MedicineItem {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

#[derive(Default, Serialize)]
pub struct ReportItem {
    pub report_type: String,
    pub file_url: String,
    pub description: String,
}

#[derive(Default, Serialize)]
pub struct CaseHistoryResponse {
    pub success: bool,
    pub err: String,
    pub cid: u64,
    pub aid: u64,
    pub patient_name: String,
    pub doctor_name: String,
    pub notes: String,
    pub created_at: String,
    pub medicines: Vec<MedicineItem>,
    pub reports: Vec<ReportItem>,
}

crate::impl_err_response! {
    DoctorListResponse,
    CaseHistoryListResponse,
    CaseHistoryResponse,
}
