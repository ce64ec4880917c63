use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub reported_by_email: String,
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub reported_by_email: String,
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: String,
    pub reported_by_email: String,
    pub product_id: String,
    pub product_name: String,
    pub reason: String,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        ReportResponse {
            id: report.id.map(|id| id.to_hex()).unwrap_or_default(),
            reported_by_email: report.reported_by_email,
            product_id: report.product_id,
            product_name: report.product_name,
            reason: report.reason,
        }
    }
}
