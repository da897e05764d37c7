//! Subject, body, and SMS text for each event and audience.
//!
//! Rendering is a pure function of the event: the same event always yields
//! byte-identical output. Every user-supplied value is HTML-escaped before
//! it is placed in the HTML body.

use ascend_core::booking::BookingType;
use ascend_core::payment::format_amount;

use crate::event::{
    BookingDetails, ContactDetails, DownloadDetails, NotificationEvent, PaymentDetails,
};

/// Brand name used in subjects and signatures.
const BRAND: &str = "Ascend Career Coaching";

/// Who a rendered message is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Admin,
    Customer,
}

impl Audience {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }
}

/// One fully rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub text: String,
    pub html: String,
    /// Short form for SMS delivery.
    pub sms: String,
}

/// Render `event` for `audience`.
pub fn render(event: &NotificationEvent, audience: Audience) -> RenderedMessage {
    match (event, audience) {
        (NotificationEvent::Contact(d), Audience::Admin) => contact_admin(d),
        (NotificationEvent::Contact(d), Audience::Customer) => contact_customer(d),
        (NotificationEvent::BookingCreated(d), Audience::Admin) => booking_created_admin(d),
        (NotificationEvent::BookingCreated(d), Audience::Customer) => booking_created_customer(d),
        (NotificationEvent::BookingCompleted(d), Audience::Admin) => booking_completed_admin(d),
        (NotificationEvent::BookingCompleted(d), Audience::Customer) => {
            booking_completed_customer(d)
        }
        (NotificationEvent::PaymentCompleted(d), Audience::Admin) => payment_admin(d),
        (NotificationEvent::PaymentCompleted(d), Audience::Customer) => payment_customer(d),
        (NotificationEvent::ResourceDownload(d), Audience::Admin) => download_admin(d),
        (NotificationEvent::ResourceDownload(d), Audience::Customer) => download_customer(d),
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Layout helpers
// ---------------------------------------------------------------------------

/// Label/value rows shared by the text and HTML bodies.
type Rows = Vec<(&'static str, String)>;

fn text_body(intro: &str, rows: &Rows, outro: Option<&str>) -> String {
    let mut body = format!("{intro}\n\n");
    for (label, value) in rows {
        body.push_str(&format!("{label}: {value}\n"));
    }
    if let Some(outro) = outro {
        body.push_str(&format!("\n{outro}\n"));
    }
    body.push_str(&format!("\n{BRAND}\n"));
    body
}

fn html_body(heading: &str, intro: &str, rows: &Rows, outro: Option<&str>) -> String {
    let mut html = format!(
        "<div style=\"font-family:Arial,sans-serif;max-width:600px\">\
         <h2 style=\"color:#1e3a8a\">{}</h2><p>{}</p><table>",
        escape_html(heading),
        escape_html(intro),
    );
    for (label, value) in rows {
        html.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
            escape_html(label),
            escape_html(value),
        ));
    }
    html.push_str("</table>");
    if let Some(outro) = outro {
        html.push_str(&format!("<p>{}</p>", escape_html(outro)));
    }
    html.push_str(&format!("<p style=\"color:#6b7280\">{BRAND}</p></div>"));
    html
}

fn message(
    subject: String,
    intro: &str,
    rows: Rows,
    outro: Option<&str>,
    sms: String,
) -> RenderedMessage {
    RenderedMessage {
        text: text_body(intro, &rows, outro),
        html: html_body(&subject, intro, &rows, outro),
        subject,
        sms,
    }
}

fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

fn contact_admin(d: &ContactDetails) -> RenderedMessage {
    message(
        format!("New contact inquiry from {}", d.name),
        "A new contact form submission has arrived.",
        vec![
            ("Name", d.name.clone()),
            ("Email", d.email.clone()),
            ("Phone", or_dash(d.phone.as_deref())),
            ("Service interest", or_dash(d.service_interest.as_deref())),
            ("Message", d.message.clone()),
        ],
        None,
        format!("New inquiry from {} ({}).", d.name, d.email),
    )
}

fn contact_customer(d: &ContactDetails) -> RenderedMessage {
    message(
        format!("Thanks for reaching out, {}", d.name),
        "We have received your message and will get back to you within one business day.",
        vec![("Your message", d.message.clone())],
        None,
        format!("Hi {}, thanks for contacting {BRAND}. We will be in touch soon.", d.name),
    )
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

fn booking_rows(d: &BookingDetails) -> Rows {
    let mut rows: Rows = vec![
        ("Name", d.full_name.clone()),
        ("Mobile", d.mobile.clone()),
        ("Email", or_dash(d.email.as_deref())),
        ("Career stage", d.current_stage.label().to_string()),
        ("Package", d.package_name.clone()),
        ("Booking type", d.booking_type.label().to_string()),
    ];
    if let Some(amount) = d.amount {
        rows.push(("Amount", format_amount(amount)));
    }
    rows.push(("Booking id", d.booking_id.clone()));
    rows
}

fn booking_created_admin(d: &BookingDetails) -> RenderedMessage {
    let subject = match d.booking_type {
        BookingType::DiscoveryCall => format!("New discovery call request: {}", d.full_name),
        BookingType::Investment => format!("New {} booking: {}", d.package_name, d.full_name),
    };
    message(
        subject,
        "A new booking has been created.",
        booking_rows(d),
        None,
        format!(
            "New {} booking: {} ({}) for {}.",
            d.booking_type.label(),
            d.full_name,
            d.mobile,
            d.package_name
        ),
    )
}

fn booking_created_customer(d: &BookingDetails) -> RenderedMessage {
    let (intro, outro) = match d.booking_type {
        BookingType::DiscoveryCall => (
            "Thank you for requesting a discovery call.",
            "Our team will call you to schedule a convenient time.",
        ),
        BookingType::Investment => (
            "Thank you for choosing a coaching package.",
            "Complete your payment to confirm your place. You will receive a confirmation once it succeeds.",
        ),
    };
    message(
        format!("Your {BRAND} booking is received"),
        intro,
        booking_rows(d),
        Some(outro),
        format!(
            "Hi {}, we received your {} booking for {}. {}",
            d.full_name,
            d.booking_type.label(),
            d.package_name,
            outro
        ),
    )
}

fn booking_completed_admin(d: &BookingDetails) -> RenderedMessage {
    message(
        format!("Booking paid: {} ({})", d.full_name, d.package_name),
        "A booking has been paid in full and marked completed.",
        booking_rows(d),
        None,
        format!("Booking paid: {} for {}.", d.full_name, d.package_name),
    )
}

fn booking_completed_customer(d: &BookingDetails) -> RenderedMessage {
    let outro = "Your coach will contact you shortly to schedule your first session.";
    message(
        format!("Your {} booking is confirmed", d.package_name),
        "Your payment was successful and your booking is confirmed.",
        booking_rows(d),
        Some(outro),
        format!(
            "Hi {}, your {} booking is confirmed. {}",
            d.full_name, d.package_name, outro
        ),
    )
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

fn payment_rows(d: &PaymentDetails) -> Rows {
    vec![
        ("Customer", d.customer_name.clone()),
        ("Email", d.customer_email.clone()),
        (
            "Package",
            d.package_name.clone().unwrap_or_else(|| d.package_id.clone()),
        ),
        ("Amount", format_amount(d.amount)),
        ("Order id", d.order_id.clone()),
        ("Payment id", or_dash(d.gateway_payment_id.as_deref())),
    ]
}

fn payment_admin(d: &PaymentDetails) -> RenderedMessage {
    message(
        format!(
            "Payment received: {} from {}",
            format_amount(d.amount),
            d.customer_name
        ),
        "A payment has been verified.",
        payment_rows(d),
        None,
        format!(
            "Payment of {} received from {} (order {}).",
            format_amount(d.amount),
            d.customer_name,
            d.order_id
        ),
    )
}

fn payment_customer(d: &PaymentDetails) -> RenderedMessage {
    message(
        format!("Payment receipt: {}", format_amount(d.amount)),
        "Thank you. We have received your payment.",
        payment_rows(d),
        Some("Keep this email as your receipt."),
        format!(
            "Hi {}, we received your payment of {}. Thank you.",
            d.customer_name,
            format_amount(d.amount)
        ),
    )
}

// ---------------------------------------------------------------------------
// Resource download
// ---------------------------------------------------------------------------

fn download_admin(d: &DownloadDetails) -> RenderedMessage {
    message(
        format!("Resource downloaded: {}", d.resource_title),
        "A visitor downloaded a resource.",
        vec![
            ("Resource", d.resource_title.clone()),
            ("Name", d.name.clone()),
            ("Email", d.email.clone()),
        ],
        None,
        format!("{} ({}) downloaded {}.", d.name, d.email, d.resource_title),
    )
}

fn download_customer(d: &DownloadDetails) -> RenderedMessage {
    message(
        format!("Your download: {}", d.resource_title),
        "Thanks for your interest. Your resource is ready.",
        vec![
            ("Resource", d.resource_title.clone()),
            ("Link", d.media_url.clone()),
        ],
        None,
        format!("Hi {}, download {} here: {}", d.name, d.resource_title, d.media_url),
    )
}
