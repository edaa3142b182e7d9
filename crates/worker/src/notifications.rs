//! Notification composition for enriched leads.

use mailer::{MailConfig, OutboundEmail};
use serde_json::{Map, Value};

/// Rendering for template fields absent from a record. Independent of the
/// lead-id fallback, which is a key-derivation concern.
const MISSING_FIELD: &str = "unknown";

/// Build the notification email for an enriched lead.
///
/// Subject is `New Enriched Lead: {lead_id}`; the body is a fixed six-line
/// template. Name comes from the raw lead, owner/status/created from the
/// lookup record; absent fields render as `unknown`.
pub fn enriched_lead_email(
    config: &MailConfig,
    lead: &str,
    raw: &Map<String, Value>,
    lookup: &Map<String, Value>,
    enriched_key: &str,
) -> OutboundEmail {
    let body_text = format!(
        "Lead ID: {}\nName: {}\nOwner: {}\nStatus: {}\nCreated: {}\nS3 Key: {}",
        lead,
        field(raw, "display_name"),
        field(lookup, "lead_owner"),
        field(lookup, "status_label"),
        field(lookup, "date_created"),
        enriched_key,
    );

    OutboundEmail {
        from: config.from_address.clone(),
        to: config.recipients(),
        subject: format!("New Enriched Lead: {}", lead),
        body_text,
    }
}

fn field<'a>(record: &'a Map<String, Value>, name: &str) -> &'a str {
    record
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or(MISSING_FIELD)
}
