//! Promotional offer application
//!
//! Applying an offer records a backend sale correlating the item, the
//! discount and the guest's latest appointment, then rewrites the
//! matching cart line's unit price from the catalog base price. The
//! sale is created before any price mutation, so a discount never
//! exists without its sale record.

use rust_decimal::Decimal;
use shared::models::{ItemType, Sale, SaleCreate};
use tracing::{info, warn};

use crate::appointment::AppointmentLinker;
use crate::error::{CheckoutError, CheckoutResult};
use crate::http::SpaBackend;
use crate::money;
use crate::session::CheckoutSession;

pub struct OfferEngine;

impl OfferEngine {
    /// Fetch the offer reference data once per session
    pub async fn load_offers(
        backend: &dyn SpaBackend,
        session: &mut CheckoutSession,
    ) -> CheckoutResult<()> {
        if !session.offers_loaded {
            session.offers = backend.offers().await?;
            session.offers_loaded = true;
        }
        Ok(())
    }

    /// Fetch the product catalog once per session
    pub async fn load_products(
        backend: &dyn SpaBackend,
        session: &mut CheckoutSession,
    ) -> CheckoutResult<()> {
        if !session.products_loaded {
            session.products = backend.products().await?;
            session.products_loaded = true;
        }
        Ok(())
    }

    /// Apply an offer to the current cart
    pub async fn apply_offer(
        backend: &dyn SpaBackend,
        session: &mut CheckoutSession,
        offer_id: &str,
    ) -> CheckoutResult<Sale> {
        Self::load_offers(backend, session).await?;

        let Some(offer) = session.offers.iter().find(|o| o.id == offer_id).cloned() else {
            return Err(CheckoutError::NotFound(format!("offer {}", offer_id)));
        };

        // Product offers need the product in the cart before anything
        // else runs
        if offer.item_type == ItemType::Product && session.cart.line(&offer.item_id).is_none() {
            return Err(CheckoutError::MissingPrecondition(
                "Add the product to cart first, then apply the offer.".to_string(),
            ));
        }

        let Some(guest_id) = session.guest.as_ref().map(|g| g.id.clone()) else {
            return Err(CheckoutError::MissingPrecondition(
                "Resolve a guest before applying an offer.".to_string(),
            ));
        };

        let Some(appointment_id) =
            AppointmentLinker::resolve_latest(backend, session, &guest_id).await?
        else {
            return Err(CheckoutError::MissingPrecondition(
                "The guest has no appointment; offers can only be recorded against one."
                    .to_string(),
            ));
        };

        let sale = backend
            .create_sale(&SaleCreate {
                item_type: offer.item_type,
                item_id: offer.item_id.clone(),
                discount_id: offer.id.clone(),
                appointment_id,
                remarks: offer.description.clone(),
            })
            .await?;

        info!(sale_id = %sale.id, offer_id = %offer.id, "sale recorded for offer");
        session.sale_id = Some(sale.id.clone());

        // Rewrite the line price only now that the sale exists
        if offer.item_type == ItemType::Product {
            let base = Self::catalog_base_price(backend, session, &offer.item_id).await;
            let unit = money::apply_discount(base, offer.discount_type, offer.discount_value);
            session
                .cart
                .override_unit_price(&offer.item_id, money::to_f64(unit));
        }

        Ok(sale)
    }

    /// Discount base for a product
    ///
    /// The catalog sale price, never the line's current (possibly
    /// already discounted) price, so reapplying offers cannot compound.
    async fn catalog_base_price(
        backend: &dyn SpaBackend,
        session: &mut CheckoutSession,
        item_id: &str,
    ) -> Decimal {
        if let Err(err) = Self::load_products(backend, session).await {
            warn!(error = %err, "product catalog fetch failed, falling back to the cart price");
        }

        if let Some(product) = session.products.iter().find(|p| p.id == item_id) {
            return money::to_decimal(product.sale_price);
        }

        warn!(item_id, "product missing from catalog, using the cart line price as base");
        session
            .cart
            .line(item_id)
            .map(|l| money::to_decimal(l.unit_price))
            .unwrap_or(Decimal::ZERO)
    }
}
