//! Lotus Client - checkout engine for the Lotus front-desk console
//!
//! Orchestrates the product-sale flow against the Lotus REST backend:
//! guest resolution, invoice get-or-create, cart assembly, promotional
//! offer application, payment submission, and invoice artifact
//! generation with a local fallback.
//!
//! All mutable state lives in a [`CheckoutSession`] owned by the caller;
//! every operation borrows the session and a [`SpaBackend`], so one
//! session never outlives a single guest/transaction cycle.

pub mod appointment;
pub mod artifact;
pub mod cart;
pub mod config;
pub mod error;
pub mod guest;
pub mod http;
pub mod invoice;
pub mod money;
pub mod offer;
pub mod payment;
pub mod session;

pub use appointment::AppointmentLinker;
pub use artifact::{
    ArtifactEndpoint, ArtifactProbe, InvoiceArtifact, InvoiceArtifactGenerator, ProducedInvoice,
};
pub use cart::{Cart, CartLine, SelectionExtra, SelectionExtras};
pub use config::ClientConfig;
pub use error::{CheckoutError, CheckoutResult};
pub use guest::{GuestLookup, GuestResolver};
pub use http::{NetworkBackend, SpaBackend};
pub use invoice::InvoiceLedger;
pub use offer::OfferEngine;
pub use payment::{CheckoutRequest, PaymentOutcome, PaymentState, PaymentSubmitter};
pub use session::{CheckoutSession, Receipt, ReceiptLine};

// Re-export shared types for convenience
pub use shared::models::{
    AppointmentRef, DiscountType, Guest, GuestSnapshot, Invoice, ItemType, Offer, PaymentRequest,
    Product, Sale, SaleCreate,
};
