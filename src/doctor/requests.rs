use serde::Deserialize;

#[derive(Deserialize)]
pub struct MedicineInput {
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Deserialize)]
pub struct ReportInput {
    pub report_type: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct CreateCaseHistoryRequest {
    pub aid: u64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub medicines: Vec<MedicineInput>,
    #[serde(default)]
    pub reports: Vec<ReportInput>,
}

// Medicines and reports are replaced wholesale on update.
#[derive(Deserialize)]
pub struct UpdateCaseHistoryRequest {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub medicines: Vec<MedicineInput>,
    #[serde(default)]
    pub reports: Vec<ReportInput>,
}
