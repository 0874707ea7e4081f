//! Invoice artifact generation
//!
//! Not every deployment exposes a working invoice renderer, so the
//! generator walks a fixed, prioritized endpoint chain and, when every
//! remote endpoint fails, synthesizes a minimal HTML invoice from the
//! session so the operator can always print something.

use tracing::{info, warn};

use crate::http::SpaBackend;
use crate::money;
use crate::session::CheckoutSession;

/// Remote endpoints tried in order, direct print first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactEndpoint {
    Print,
    Download,
    Pdf,
    PrintAlt,
    PrintById,
    Export,
}

impl ArtifactEndpoint {
    /// The probe order; adding or removing an endpoint is a one-line
    /// change here
    pub const CHAIN: [ArtifactEndpoint; 6] = [
        ArtifactEndpoint::Print,
        ArtifactEndpoint::Download,
        ArtifactEndpoint::Pdf,
        ArtifactEndpoint::PrintAlt,
        ArtifactEndpoint::PrintById,
        ArtifactEndpoint::Export,
    ];

    pub fn path(&self, invoice_id: &str) -> String {
        match self {
            Self::Print => format!("api/invoices/{}/print", invoice_id),
            Self::Download => format!("api/invoices/{}/download", invoice_id),
            Self::Pdf => format!("api/invoices/{}/pdf", invoice_id),
            Self::PrintAlt => format!("api/invoices/print/{}", invoice_id),
            Self::PrintById => format!("api/invoices/print-by-id/{}", invoice_id),
            Self::Export => format!("api/invoices/export/{}", invoice_id),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::Download => "download",
            Self::Pdf => "pdf",
            Self::PrintAlt => "print-alt",
            Self::PrintById => "print-by-id",
            Self::Export => "export",
        }
    }
}

/// What a single endpoint probe returned
#[derive(Debug, Clone)]
pub enum ArtifactProbe {
    /// A binary document (the usual success)
    Document {
        content_type: String,
        bytes: Vec<u8>,
    },
    /// A structured error body; the message is kept verbatim
    Error { message: String },
}

/// A viewable invoice document
#[derive(Debug, Clone)]
pub enum InvoiceArtifact {
    /// Remote document, offered as a named download
    Download {
        filename: String,
        content_type: String,
        bytes: Vec<u8>,
    },
    /// Client-synthesized HTML for manual printing
    Synthesized { html: String },
}

/// Result of [`InvoiceArtifactGenerator::produce`]
#[derive(Debug, Clone)]
pub struct ProducedInvoice {
    pub artifact: InvoiceArtifact,
    /// Verbatim error messages reported by probed endpoints
    pub endpoint_errors: Vec<String>,
}

pub struct InvoiceArtifactGenerator;

impl InvoiceArtifactGenerator {
    /// Produce a viewable document for an invoice
    ///
    /// Never fails: the synthesized fallback always yields something
    /// printable.
    pub async fn produce(
        backend: &dyn SpaBackend,
        session: &CheckoutSession,
        invoice_id: &str,
    ) -> ProducedInvoice {
        let mut endpoint_errors = Vec::new();

        for endpoint in ArtifactEndpoint::CHAIN {
            match backend.invoice_artifact(endpoint, invoice_id).await {
                Ok(ArtifactProbe::Document {
                    content_type,
                    bytes,
                }) => {
                    let reference = session
                        .invoice_no
                        .clone()
                        .unwrap_or_else(|| invoice_id.to_string());
                    info!(endpoint = endpoint.label(), %reference, "invoice document fetched");
                    return ProducedInvoice {
                        artifact: InvoiceArtifact::Download {
                            filename: format!("Invoice_{}.pdf", reference),
                            content_type,
                            bytes,
                        },
                        endpoint_errors,
                    };
                }
                Ok(ArtifactProbe::Error { message }) => {
                    warn!(endpoint = endpoint.label(), %message, "invoice endpoint reported an error");
                    endpoint_errors.push(message);
                }
                Err(err) => {
                    warn!(endpoint = endpoint.label(), error = %err, "invoice endpoint unreachable");
                    endpoint_errors.push(err.to_string());
                }
            }
        }

        info!(invoice_id, "all invoice endpoints failed, synthesizing a local document");
        ProducedInvoice {
            artifact: InvoiceArtifact::Synthesized {
                html: synthesize_html(session, invoice_id),
            },
            endpoint_errors,
        }
    }
}

/// Build a minimal printable invoice from the session
///
/// Prefers the last confirmed receipt (the cart is already reset after
/// a successful payment); falls back to the live cart mid-checkout.
fn synthesize_html(session: &CheckoutSession, invoice_id: &str) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Invoice</title>\n<style>\n");
    html.push_str("body { font-family: sans-serif; margin: 2em; }\n");
    html.push_str("table { width: 100%; border-collapse: collapse; }\n");
    html.push_str("th, td { border-bottom: 1px solid #ccc; padding: 4px 8px; text-align: left; }\n");
    html.push_str("td.amount, th.amount { text-align: right; }\n");
    html.push_str(".total { font-weight: bold; text-align: right; margin-top: 1em; }\n");
    html.push_str("</style>\n</head>\n<body>\n");

    let reference = session
        .invoice_no
        .as_deref()
        .or(session
            .last_receipt
            .as_ref()
            .and_then(|r| r.invoice_no.as_deref()))
        .unwrap_or(invoice_id);
    html.push_str(&format!("<h1>Invoice {}</h1>\n", escape_html(reference)));

    let guest_name = session
        .guest
        .as_ref()
        .map(|g| g.full_name.clone())
        .or_else(|| session.last_receipt.as_ref().and_then(|r| r.guest_name.clone()));
    if let Some(name) = guest_name {
        html.push_str(&format!("<p>Guest: {}</p>\n", escape_html(&name)));
    }

    html.push_str("<table>\n<tr><th>Item</th><th class=\"amount\">Qty</th>");
    html.push_str("<th class=\"amount\">Unit</th><th class=\"amount\">Total</th></tr>\n");

    let total;
    let mut method = None;
    if let Some(receipt) = &session.last_receipt {
        for line in &receipt.lines {
            push_row(
                &mut html,
                &line.name,
                line.quantity,
                line.unit_price,
                line.line_total,
            );
        }
        if let Some(package) = &receipt.package {
            push_row(&mut html, &package.name, 1, package.price, package.price);
        }
        if let Some(membership) = &receipt.membership {
            push_row(
                &mut html,
                &membership.name,
                1,
                membership.price,
                membership.price,
            );
        }
        total = money::to_decimal(receipt.amount);
        method = Some(receipt.method.clone());
    } else {
        for line in session.cart.lines() {
            push_row(
                &mut html,
                &line.name,
                line.quantity,
                line.unit_price,
                money::to_f64(money::line_total(line)),
            );
        }
        if let Some(package) = &session.cart.extras().package {
            push_row(&mut html, &package.name, 1, package.price, package.price);
        }
        if let Some(membership) = &session.cart.extras().membership {
            push_row(
                &mut html,
                &membership.name,
                1,
                membership.price,
                membership.price,
            );
        }
        total = session.cart.total();
    }

    html.push_str("</table>\n");
    html.push_str(&format!(
        "<p class=\"total\">Total: {}</p>\n",
        money::format_amount(total)
    ));
    if let Some(method) = method {
        html.push_str(&format!("<p>Payment method: {}</p>\n", escape_html(&method)));
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn push_row(html: &mut String, name: &str, quantity: u32, unit_price: f64, line_total: f64) {
    html.push_str(&format!(
        "<tr><td>{}</td><td class=\"amount\">{}</td><td class=\"amount\">{:.2}</td><td class=\"amount\">{:.2}</td></tr>\n",
        escape_html(name),
        quantity,
        unit_price,
        line_total
    ));
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
