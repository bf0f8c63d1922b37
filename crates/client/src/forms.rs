//! Prediction form input collection and validation.
//!
//! Fields arrive as the raw strings read from the form controls and are
//! parsed and bounds-checked here, before any network call. Field names in
//! messages match the backend's feature names, as the original form did.

use smartcart_core::{GuestProfile, PredictionRequest, ProductContext};
use thiserror::Error;

/// Why a submission was rejected before reaching the network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Authenticated submissions require only the product/context fields.
    #[error("Please fill in Product Category, Original Price, Weather, and Time of Day.")]
    IncompleteProductDetails,

    /// A guest field is empty or fails to parse.
    #[error("Please fill in all fields. Missing: {0}")]
    Missing(&'static str),

    #[error("{field} must be at least {min}.")]
    BelowMinimum { field: &'static str, min: f64 },

    #[error("{field} cannot be more than {max}.")]
    AboveMaximum { field: &'static str, max: f64 },
}

/// Raw prediction form state, one string per control.
#[derive(Debug, Clone, Default)]
pub struct PredictionForm {
    pub age: String,
    pub gender: String,
    pub city: String,
    pub occupation: String,
    pub loyalty_tier: String,
    pub user_product_count: String,
    pub product_category: String,
    pub purchase_amount: String,
    pub weather: String,
    pub time_of_day: String,
}

impl PredictionForm {
    /// The purchase amount currently in the form, if it parses.
    #[must_use]
    pub fn purchase_amount(&self) -> Option<f64> {
        parse_number(&self.purchase_amount)
    }

    /// Assemble the request body, validating every required field first.
    ///
    /// Authenticated users send only the product context (the backend
    /// resolves their profile); guests additionally send the demographic
    /// fields, validated in form order with the first failure reported.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered; no request body is
    /// produced and no network call should be made.
    pub fn to_request(&self, authenticated: bool) -> Result<PredictionRequest, ValidationError> {
        if authenticated {
            return self.product_context_or_incomplete().map(PredictionRequest::Authenticated);
        }

        let age = bounded_number("Age", &self.age, Some(1.0), Some(120.0))?;
        let gender = required_text("Gender", &self.gender)?;
        let city = required_text("City", &self.city)?;
        let occupation = required_text("Occupation", &self.occupation)?;
        let loyalty_tier = required_text("Loyalty_Tier", &self.loyalty_tier)?;
        let user_product_count =
            bounded_number("User_Product_Count", &self.user_product_count, Some(0.0), None)?;
        let product_category = required_text("Product_Category", &self.product_category)?;
        let purchase_amount =
            bounded_number("Purchase_Amount", &self.purchase_amount, Some(0.01), None)?;
        let weather = required_text("Weather", &self.weather)?;
        let time_of_day = required_text("Time_of_Day", &self.time_of_day)?;

        // Bounds were checked above, so the integer casts cannot overflow.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(PredictionRequest::Guest {
            profile: GuestProfile {
                age: age.trunc() as u32,
                gender,
                city,
                occupation,
                loyalty_tier,
                user_product_count: user_product_count.trunc() as u32,
            },
            product: ProductContext {
                product_category,
                purchase_amount,
                weather,
                time_of_day,
            },
        })
    }

    /// The product/context fields shared by both variants, or the combined
    /// authenticated-branch message when any of them is missing or invalid.
    fn product_context_or_incomplete(&self) -> Result<ProductContext, ValidationError> {
        let product_category = self.product_category.trim();
        let weather = self.weather.trim();
        let time_of_day = self.time_of_day.trim();
        let purchase_amount = parse_number(&self.purchase_amount).filter(|amount| *amount > 0.0);

        match (purchase_amount, product_category, weather, time_of_day) {
            (Some(purchase_amount), category, weather, time_of_day)
                if !category.is_empty() && !weather.is_empty() && !time_of_day.is_empty() =>
            {
                Ok(ProductContext {
                    product_category: category.to_string(),
                    purchase_amount,
                    weather: weather.to_string(),
                    time_of_day: time_of_day.to_string(),
                })
            }
            _ => Err(ValidationError::IncompleteProductDetails),
        }
    }
}

/// Parse a form control's value as a finite number.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// A text control that must not be left empty.
fn required_text(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(value.to_string())
}

/// A numeric control with optional minimum and maximum bounds.
fn bounded_number(
    field: &'static str,
    raw: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<f64, ValidationError> {
    let value = parse_number(raw).ok_or(ValidationError::Missing(field))?;
    if let Some(min) = min
        && value < min
    {
        return Err(ValidationError::BelowMinimum { field, min });
    }
    if let Some(max) = max
        && value > max
    {
        return Err(ValidationError::AboveMaximum { field, max });
    }
    Ok(value)
}
