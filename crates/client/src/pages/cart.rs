//! The cart page component: rendering, smart-price override, checkout.

use std::sync::Arc;

use smartcart_core::CartItem;

use crate::cart::CartStore;
use crate::config::ClientConfig;
use crate::services::PurchaseClient;
use crate::shell::{PageShell, SoundCue};
use crate::views::{
    CartLineView, CartPageView, ConfirmButtonView, ConfirmDialogView, SmartPriceOfferView,
    format_amount, format_price,
};

/// The cart page.
///
/// Holds the display-only state of one page view: the currently displayed
/// total (which a smart-price application may override) and the dialog and
/// confirm-control flags. Every render reloads the cart from storage and
/// recomputes everything, so a re-render reverts an applied override - the
/// underlying per-item prices are never changed.
pub struct CartPage {
    store: CartStore,
    purchase: PurchaseClient,
    shell: Arc<dyn PageShell>,
    config: ClientConfig,
    displayed_total: f64,
    dialog_open: bool,
    confirming: bool,
}

impl CartPage {
    #[must_use]
    pub fn new(
        store: CartStore,
        purchase: PurchaseClient,
        shell: Arc<dyn PageShell>,
        config: ClientConfig,
    ) -> Self {
        Self {
            store,
            purchase,
            shell,
            config,
            displayed_total: 0.0,
            dialog_open: false,
            confirming: false,
        }
    }

    /// Rebuild the whole page from storage.
    ///
    /// Computes both running sums; the calculated total becomes the
    /// displayed total. The smart-price offer is shown only while a valid
    /// cached prediction undercuts the calculated total strictly.
    pub fn render(&mut self) -> CartPageView {
        let cart = self.store.load();
        let total_calculated: f64 = cart.iter().map(CartItem::line_price).sum();
        self.displayed_total = total_calculated;

        let offer = self
            .store
            .cached_prediction()
            .filter(|cached| cached.price < total_calculated)
            .map(|cached| SmartPriceOfferView {
                predicted_price: format_price(cached.price),
            });

        Self::build_view(&cart, total_calculated, offer)
    }

    /// Handle a remove click for the entry at `index`.
    pub fn remove_item(&mut self, index: usize) -> CartPageView {
        self.store.remove(index);
        self.render()
    }

    /// Apply the cached prediction to the displayed total.
    ///
    /// One-shot and display-only: the persisted cart is untouched, and the
    /// returned view hides the offer section. Returns `None` (with a
    /// message) when the cached price offers no discount on the current
    /// displayed total.
    pub fn apply_smart_price(&mut self) -> Option<CartPageView> {
        let predicted_price = self
            .store
            .cached_prediction()
            .map_or(0.0, |cached| cached.price);

        if predicted_price > 0.0 && predicted_price < self.displayed_total {
            self.displayed_total = predicted_price;
            self.shell.play_sound(SoundCue::Checkout);
            self.shell.notify("🎉 Smart price applied successfully!");
            let cart = self.store.load();
            Some(Self::build_view(&cart, predicted_price, None))
        } else {
            self.shell.notify(
                "The predicted price does not offer a significant discount for this cart or isn't applicable.",
            );
            None
        }
    }

    /// Handle a pay click: open the confirmation dialog.
    ///
    /// Returns `None` (with a message) for an empty cart.
    pub fn pay(&mut self) -> Option<ConfirmDialogView> {
        if self.store.load().is_empty() {
            self.shell
                .notify("Your cart is empty. Please add items before paying.");
            return None;
        }

        self.dialog_open = true;
        Some(ConfirmDialogView {
            final_price: format_amount(self.displayed_total),
        })
    }

    /// Whether the confirmation dialog is open.
    #[must_use]
    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// Current state of the confirm control.
    #[must_use]
    pub fn confirm_button(&self) -> ConfirmButtonView {
        if self.confirming {
            ConfirmButtonView {
                enabled: false,
                label: "Processing...",
            }
        } else {
            ConfirmButtonView {
                enabled: true,
                label: "Confirm Payment",
            }
        }
    }

    /// Handle the confirm click inside the payment dialog.
    ///
    /// Unauthenticated sessions are sent to the login page with the cart and
    /// caches intact. Otherwise the whole cart is posted for recording, and
    /// the cleanup path then runs unconditionally - control re-enabled,
    /// dialog closed, cart and prediction caches cleared, navigation home -
    /// whether or not the POST succeeded.
    pub async fn confirm_payment(&mut self, payment_method: &str) {
        if !self.config.authenticated {
            self.shell
                .notify("Please log in to complete your purchase and log it to your history.");
            self.dialog_open = false;
            self.shell.navigate(&self.config.login_url);
            return;
        }

        let cart = self.store.load();
        let final_price = self.displayed_total;
        self.confirming = true;

        match self.purchase.complete(&cart).await {
            Ok(receipt) => {
                tracing::info!(
                    message = %receipt.message,
                    items = receipt.total_items_purchased,
                    "Purchase recorded"
                );
                self.shell.notify(&format!(
                    "✅ Payment of ₹{final_price:.2} successful via {payment_method}! Your purchase history has been updated."
                ));
            }
            Err(e) => {
                tracing::error!(error = %e, "Purchase completion failed");
                self.shell.notify(&format!(
                    "An error occurred during payment processing or recording: {}. Please try again.",
                    e.user_message()
                ));
            }
        }

        // Cleanup runs on both outcomes, including the failure path.
        self.confirming = false;
        self.dialog_open = false;
        self.store.clear_checkout_state();
        self.shell.navigate(self.config.home_url_or_default());
    }

    fn build_view(
        cart: &[CartItem],
        displayed_total: f64,
        offer: Option<SmartPriceOfferView>,
    ) -> CartPageView {
        let total_original: f64 = cart.iter().map(CartItem::original_line_price).sum();
        let lines = cart
            .iter()
            .enumerate()
            .map(|(index, item)| CartLineView::from_item(index, item))
            .collect();
        let empty = cart.is_empty();

        CartPageView {
            lines,
            empty,
            pay_enabled: !empty,
            total_original: format_amount(total_original),
            total_calculated: format_amount(displayed_total),
            offer,
        }
    }
}
