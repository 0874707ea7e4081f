//! Wire models for the Lotus backend API

pub mod appointment;
pub mod catalog;
pub mod guest;
pub mod invoice;
pub mod payment;
pub mod sale;

pub use appointment::AppointmentRef;
pub use catalog::{DiscountType, ItemType, Offer, Product};
pub use guest::{Guest, GuestSnapshot};
pub use invoice::{Invoice, InvoiceEnsured, InvoiceGenerated, InvoiceNumber};
pub use payment::{PaymentCreated, PaymentRequest};
pub use sale::{Sale, SaleCreate};
