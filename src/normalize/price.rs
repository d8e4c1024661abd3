use crate::catalog::model::ProductRecord;
use crate::normalize::variants::coerce_to_list;
use serde_json::Value;

/// Pick the best human-readable price for a record, preferring sale fields.
/// Order: redPrice, yellowPrice, regularPrice (first non-empty after
/// trimming), then the first structured `prices` entry, then "N/A".
pub fn format_price(record: &ProductRecord) -> String {
    for direct in [
        record.red_price.as_deref(),
        record.yellow_price.as_deref(),
        record.regular_price.as_deref(),
    ] {
        if let Some(trimmed) = direct.map(str::trim).filter(|v| !v.is_empty()) {
            return trimmed.to_string();
        }
    }

    if let Some(first) = coerce_to_list(record.prices.as_ref())
        .and_then(|items| items.into_iter().next())
    {
        if let Some(formatted) = first
            .get("formattedPrice")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return formatted.to_string();
        }
        if let Some(numeric) = first.get("price").and_then(Value::as_f64) {
            return format!("${numeric:.2}");
        }
    }

    "N/A".to_string()
}
