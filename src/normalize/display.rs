use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Render a stored timestamp for humans. Absent or empty input yields
/// "Unknown"; a value that cannot be parsed is returned unchanged rather
/// than dropped.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(value) = raw.filter(|v| !v.trim().is_empty()) else {
        return "Unknown".to_string();
    };
    match parse_timestamp(value.trim()) {
        Some(local) => local.format("%c").to_string(),
        None => value.to_string(),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local));
    }
    // Postgres text casts render as "2024-01-05 12:34:56.789+00".
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%d %H:%M:%S%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Some(dt.with_timezone(&Local));
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(Local.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Local.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Humanize an underscore-delimited category slug:
/// "ladies_sport_bottoms_trousers" -> "Ladies Sport Bottoms Trousers".
pub fn format_category_name(raw: Option<&str>) -> String {
    let Some(value) = raw else {
        return String::new();
    };
    value
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Prefix relative asset paths with the retailer base URL. Absolute URLs
/// pass through untouched; missing values stay missing.
pub fn with_base(base: &str, value: Option<&str>) -> Option<String> {
    let value = value.filter(|v| !v.is_empty())?;
    if value.starts_with("http") {
        Some(value.to_string())
    } else {
        Some(format!("{base}{}", value.trim_start_matches('/')))
    }
}
