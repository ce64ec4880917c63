use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A GPU for sale (collection `products`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub seller_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub product_category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_use: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub advertised: bool,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub sold: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub posted_at: i64,
}

/// Body for `POST /api/products`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub seller_email: String,
    pub seller_name: Option<String>,
    pub product_name: Option<String>,
    pub product_category: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub condition: Option<String>,
    pub location: Option<String>,
    pub years_of_use: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub advertised: bool,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub sold: bool,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub id: String,
    pub seller_email: String,
    pub seller_name: Option<String>,
    pub product_name: Option<String>,
    pub product_category: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub condition: Option<String>,
    pub location: Option<String>,
    pub years_of_use: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub advertised: bool,
    pub paid: bool,
    pub sold: bool,
    pub verified: bool,
    pub posted_at: i64,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        ListingResponse {
            id: listing.id.map(|id| id.to_hex()).unwrap_or_default(),
            seller_email: listing.seller_email,
            seller_name: listing.seller_name,
            product_name: listing.product_name,
            product_category: listing.product_category,
            price: listing.price,
            original_price: listing.original_price,
            condition: listing.condition,
            location: listing.location,
            years_of_use: listing.years_of_use,
            description: listing.description,
            image_url: listing.image_url,
            advertised: listing.advertised,
            paid: listing.paid,
            sold: listing.sold,
            verified: listing.verified,
            posted_at: listing.posted_at,
        }
    }
}
