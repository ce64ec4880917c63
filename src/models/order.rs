use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A buyer's claim on a listing (collection `orders`).
///
/// `paid` is flipped together with the listing's own `paid` flag by the pay
/// workflow; see `services::consistency`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Listing id (hex)
    pub product_id: String,
    pub buyer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_location: Option<String>,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub created_at: i64,
}

/// Body for `POST /api/orders`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub product_id: String,
    pub buyer_email: String,
    pub buyer_name: Option<String>,
    pub product_name: Option<String>,
    pub price: Option<f64>,
    pub phone: Option<String>,
    pub meeting_location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub product_id: String,
    pub buyer_email: String,
    pub buyer_name: Option<String>,
    pub product_name: Option<String>,
    pub price: Option<f64>,
    pub phone: Option<String>,
    pub meeting_location: Option<String>,
    pub paid: bool,
    pub created_at: i64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id.map(|id| id.to_hex()).unwrap_or_default(),
            product_id: order.product_id,
            buyer_email: order.buyer_email,
            buyer_name: order.buyer_name,
            product_name: order.product_name,
            price: order.price,
            phone: order.phone,
            meeting_location: order.meeting_location,
            paid: order.paid,
            created_at: order.created_at,
        }
    }
}
