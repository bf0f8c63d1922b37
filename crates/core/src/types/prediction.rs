//! Wire types for the price-prediction and purchase-recording endpoints.
//!
//! Field names follow the backend's feature names exactly (they feed a label
//! encoder on the other side), hence the `Product_Category`-style renames.

use serde::{Deserialize, Serialize};

/// Product and environment context, sent for every prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductContext {
    #[serde(rename = "Product_Category")]
    pub product_category: String,
    #[serde(rename = "Purchase_Amount")]
    pub purchase_amount: f64,
    #[serde(rename = "Weather")]
    pub weather: String,
    #[serde(rename = "Time_of_Day")]
    pub time_of_day: String,
}

/// Demographic fields a guest must supply; the backend resolves these from
/// the stored profile for authenticated users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestProfile {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Occupation")]
    pub occupation: String,
    #[serde(rename = "Loyalty_Tier")]
    pub loyalty_tier: String,
    #[serde(rename = "User_Product_Count")]
    pub user_product_count: u32,
}

/// Body of a POST to the prediction endpoint.
///
/// Authenticated users send only the product context; guests send the
/// demographic profile as well. Untagged so both variants serialize as one
/// flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionRequest {
    Authenticated(ProductContext),
    Guest {
        #[serde(flatten)]
        profile: GuestProfile,
        #[serde(flatten)]
        product: ProductContext,
    },
}

impl PredictionRequest {
    /// The product context common to both variants.
    #[must_use]
    pub fn product(&self) -> &ProductContext {
        match self {
            Self::Authenticated(product) | Self::Guest { product, .. } => product,
        }
    }
}

/// A successful prediction from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub optimized_price: f64,
    /// Conversion probability in 0..1.
    #[serde(rename = "predicted_conversion_probability")]
    pub conversion_probability: f64,
    pub customer_segment: String,
}

/// The single cached prediction slot, reconstructed from storage.
///
/// The originating product category is cached twice at the storage level
/// (once as a display name, once as a category for the purchase record);
/// both surface here.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPrediction {
    /// Optimized price; always finite and strictly positive.
    pub price: f64,
    /// Display name for the follow-up cart action.
    pub product_name: String,
    /// Category logged with the purchase record.
    pub category: String,
}

/// Response body of a recorded purchase.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseReceipt {
    pub message: String,
    #[serde(default)]
    pub total_items_purchased: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_context() -> ProductContext {
        ProductContext {
            product_category: "Electronics".to_string(),
            purchase_amount: 1499.0,
            weather: "Sunny".to_string(),
            time_of_day: "Evening".to_string(),
        }
    }

    #[test]
    fn authenticated_request_carries_only_product_fields() {
        let body =
            serde_json::to_value(PredictionRequest::Authenticated(product_context())).unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert_eq!(object["Product_Category"], "Electronics");
        assert_eq!(object["Purchase_Amount"], 1499.0);
        assert!(!object.contains_key("Age"));
    }

    #[test]
    fn guest_request_flattens_profile_and_product() {
        let request = PredictionRequest::Guest {
            profile: GuestProfile {
                age: 30,
                gender: "Female".to_string(),
                city: "Mumbai".to_string(),
                occupation: "Engineer".to_string(),
                loyalty_tier: "Gold".to_string(),
                user_product_count: 5,
            },
            product: product_context(),
        };
        let body = serde_json::to_value(&request).unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 10);
        assert_eq!(object["Age"], 30);
        assert_eq!(object["Loyalty_Tier"], "Gold");
        assert_eq!(object["Time_of_Day"], "Evening");
    }

    #[test]
    fn prediction_deserializes_backend_field_names() {
        let prediction: Prediction = serde_json::from_str(
            r#"{
                "optimized_price": 1349.1,
                "predicted_conversion_probability": 0.8234,
                "customer_segment": "High-Value Shopper",
                "notes": "Price is dynamically adjusted."
            }"#,
        )
        .unwrap();
        assert!((prediction.conversion_probability - 0.8234).abs() < f64::EPSILON);
        assert_eq!(prediction.customer_segment, "High-Value Shopper");
    }
}
