//! The price-prediction page component.
//!
//! Each submission walks idle -> submitting -> (success | failure) -> idle;
//! the submit control is restored on every path out of `submitting`, which is
//! why the reset lives after the awaited inner call instead of inside any
//! branch.

use std::sync::Arc;

use chrono::Utc;
use smartcart_core::{CartItem, ItemId, PredictionRequest};

use crate::cart::CartStore;
use crate::config::ClientConfig;
use crate::forms::PredictionForm;
use crate::services::{PredictionClient, PredictionError};
use crate::shell::{PageShell, SoundCue};
use crate::views::{PredictionView, SubmitButtonView};

/// The prediction form page.
pub struct PredictPage {
    store: CartStore,
    client: PredictionClient,
    shell: Arc<dyn PageShell>,
    config: ClientConfig,
    submitting: bool,
}

impl PredictPage {
    #[must_use]
    pub fn new(
        store: CartStore,
        client: PredictionClient,
        shell: Arc<dyn PageShell>,
        config: ClientConfig,
    ) -> Self {
        Self {
            store,
            client,
            shell,
            config,
            submitting: false,
        }
    }

    /// Current state of the submit control.
    #[must_use]
    pub fn submit_button(&self) -> SubmitButtonView {
        if self.submitting {
            SubmitButtonView {
                enabled: false,
                label: "Predicting...",
            }
        } else {
            SubmitButtonView {
                enabled: true,
                label: "Predict Price",
            }
        }
    }

    /// Handle a form submission.
    ///
    /// Validation failures surface a message and never reach the network.
    /// Returns the result panel contents on success; `None` keeps the panel
    /// hidden.
    pub async fn submit(&mut self, form: &PredictionForm) -> Option<PredictionView> {
        let request = match form.to_request(self.config.authenticated) {
            Ok(request) => request,
            Err(e) => {
                self.shell.notify(&e.to_string());
                return None;
            }
        };

        self.submitting = true;
        let view = self.perform(&request).await;
        self.submitting = false;
        view
    }

    async fn perform(&self, request: &PredictionRequest) -> Option<PredictionView> {
        match self.client.predict(request).await {
            Ok(prediction) => {
                tracing::info!(
                    segment = %prediction.customer_segment,
                    optimized_price = prediction.optimized_price,
                    "Prediction received"
                );
                // Cache for the cart page; survives navigation.
                self.store.cache_prediction(
                    prediction.optimized_price,
                    &request.product().product_category,
                );
                self.shell.play_sound(SoundCue::Prediction);
                Some(PredictionView::from(&prediction))
            }
            Err(PredictionError::Rejected(message)) => {
                self.shell.notify(&format!("Prediction Error: {message}"));
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prediction request failed");
                self.shell.notify(&format!(
                    "An error occurred during prediction: {}",
                    e.user_message()
                ));
                None
            }
        }
    }

    /// Add the cached prediction to the cart as a synthetic offer entry.
    ///
    /// The time-based token guarantees the entry never merges with an
    /// existing one. The purchase amount currently in the form is captured
    /// as the original price for the purchase record.
    pub fn add_predicted_offer(&self, form: &PredictionForm) {
        let Some(cached) = self.store.cached_prediction() else {
            self.shell
                .notify("No valid predicted price to add to cart. Please predict first!");
            return;
        };

        let name = format!("Predicted Offer for {}", cached.product_name);
        let original_price = form.purchase_amount().unwrap_or(cached.price);
        self.store.add(CartItem {
            id: ItemId::offer_from_millis(Utc::now().timestamp_millis()),
            name: name.clone(),
            price: cached.price,
            original_price: Some(original_price),
            category: cached.category,
            quantity: 1,
            image: None,
        });
        self.shell.notify(&format!("\"{name}\" added to cart!"));
    }

    /// Navigate to the cart page.
    pub fn go_to_cart(&self) {
        self.shell.navigate(&self.config.cart_url);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::shell::RecordingShell;
    use crate::storage::LocalStore;

    fn test_config(authenticated: bool) -> ClientConfig {
        ClientConfig {
            api_base_url: url::Url::parse("http://127.0.0.1:9").unwrap(),
            predict_api_url: "http://127.0.0.1:9/predict_price".to_string(),
            cart_url: "/cart".to_string(),
            login_url: "/login".to_string(),
            home_url: None,
            authenticated,
            storage_path: PathBuf::from("unused.json"),
        }
    }

    fn page(authenticated: bool) -> (PredictPage, Arc<RecordingShell>, CartStore) {
        let shell = Arc::new(RecordingShell::new());
        let store = CartStore::new(Arc::new(LocalStore::in_memory()), shell.clone());
        let config = test_config(authenticated);
        let client = PredictionClient::new(&config).unwrap();
        (
            PredictPage::new(store.clone(), client, shell.clone(), config),
            shell,
            store,
        )
    }

    #[tokio::test]
    async fn invalid_form_notifies_and_keeps_panel_hidden() {
        let (mut page, shell, _) = page(false);
        let form = PredictionForm {
            age: "0".to_string(),
            ..PredictionForm::default()
        };

        let view = page.submit(&form).await;
        assert_eq!(view, None);
        assert_eq!(shell.notifications(), vec!["Age must be at least 1.".to_string()]);
        // The submit control never left its idle state.
        assert!(page.submit_button().enabled);
        assert_eq!(page.submit_button().label, "Predict Price");
    }

    #[tokio::test]
    async fn authenticated_form_skips_guest_validation() {
        let (mut page, shell, _) = page(true);
        // Only the product/context fields are present; guest fields empty.
        let form = PredictionForm {
            product_category: "Electronics".to_string(),
            purchase_amount: String::new(),
            weather: "Sunny".to_string(),
            time_of_day: "Evening".to_string(),
            ..PredictionForm::default()
        };

        let view = page.submit(&form).await;
        assert_eq!(view, None);
        assert_eq!(
            shell.notifications(),
            vec![
                "Please fill in Product Category, Original Price, Weather, and Time of Day."
                    .to_string()
            ]
        );
    }

    #[test]
    fn add_predicted_offer_without_cache_is_a_noop_with_message() {
        let (page, shell, store) = page(false);
        page.add_predicted_offer(&PredictionForm::default());

        assert_eq!(store.count(), 0);
        assert_eq!(
            shell.notifications(),
            vec!["No valid predicted price to add to cart. Please predict first!".to_string()]
        );
    }

    #[test]
    fn add_predicted_offer_builds_synthetic_entry() {
        let (page, _, store) = page(false);
        store.cache_prediction(1349.1, "Electronics");

        let form = PredictionForm {
            purchase_amount: "1499".to_string(),
            ..PredictionForm::default()
        };
        page.add_predicted_offer(&form);
        page.add_predicted_offer(&form);

        let cart = store.load();
        assert_eq!(cart.len(), 2, "offer entries never merge");
        let offer = &cart[0];
        assert!(offer.id.is_offer());
        assert_eq!(offer.name, "Predicted Offer for Electronics");
        assert!((offer.price - 1349.1).abs() < f64::EPSILON);
        assert_eq!(offer.original_price, Some(1499.0));
        assert_eq!(offer.category, "Electronics");
        assert_eq!(offer.quantity, 1);
    }

    #[test]
    fn go_to_cart_navigates_to_configured_url() {
        let (page, shell, _) = page(false);
        page.go_to_cart();
        assert_eq!(shell.navigations(), vec!["/cart".to_string()]);
    }
}
