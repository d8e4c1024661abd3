use serde_json::Value;

/// Normalized size option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeEntry {
    pub name: String,
    pub stock: Option<i64>,
}

/// Normalized color swatch. Fields stay optional; an entry survives parsing
/// with either one present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwatchEntry {
    pub hex_color: Option<String>,
    pub color_name: Option<String>,
}

/// Variant columns arrive either as a native JSON array or as a JSON array
/// serialized into a string. Anything else (scalars, objects, broken JSON)
/// yields None and the caller falls back to an empty list.
pub fn coerce_to_list(raw: Option<&Value>) -> Option<Vec<Value>> {
    match raw? {
        Value::Array(items) => Some(items.clone()),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

/// Normalize a raw `sizes` value. The label comes from `name`, falling back
/// to `sizeCode`; entries without either are dropped. Stock keeps numbers
/// and coerces every other type to None.
pub fn parse_sizes(raw: Option<&Value>) -> Vec<SizeEntry> {
    let Some(items) = coerce_to_list(raw) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let name = obj
                .get("name")
                .and_then(Value::as_str)
                .or_else(|| obj.get("sizeCode").and_then(Value::as_str))?;
            let stock = obj.get("stock").and_then(Value::as_i64);
            Some(SizeEntry {
                name: name.to_string(),
                stock,
            })
        })
        .collect()
}

/// Normalize a raw `swatches` value; entries need at least one of
/// `hexColor`/`colorName` to survive.
pub fn parse_swatches(raw: Option<&Value>) -> Vec<SwatchEntry> {
    let Some(items) = coerce_to_list(raw) else {
        return Vec::new();
    };
    items.iter().filter_map(swatch_from_value).collect()
}

fn swatch_from_value(item: &Value) -> Option<SwatchEntry> {
    let obj = item.as_object()?;
    let hex_color = obj.get("hexColor").and_then(Value::as_str).map(String::from);
    let color_name = obj.get("colorName").and_then(Value::as_str).map(String::from);
    if hex_color.is_none() && color_name.is_none() {
        return None;
    }
    Some(SwatchEntry {
        hex_color,
        color_name,
    })
}

/// The single `productColor` object rendered as a swatch, used when a row
/// has no swatch list of its own.
pub fn product_color_swatch(raw: Option<&Value>) -> Option<SwatchEntry> {
    swatch_from_value(raw?)
}

/// Swatch list with the productColor fallback applied.
pub fn effective_swatches(swatches: Option<&Value>, product_color: Option<&Value>) -> Vec<SwatchEntry> {
    let parsed = parse_swatches(swatches);
    if !parsed.is_empty() {
        return parsed;
    }
    product_color_swatch(product_color).into_iter().collect()
}

/// De-duplication key for derived color options: lowercased trimmed name,
/// else lowercased trimmed hex, else nothing (the swatch contributes no
/// option).
pub fn color_key(swatch: &SwatchEntry) -> Option<String> {
    let name = swatch
        .color_name
        .as_deref()
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty());
    if name.is_some() {
        return name;
    }
    swatch
        .hex_color
        .as_deref()
        .map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty())
}

/// Human label for a swatch; "Color" when both fields are missing.
pub fn color_label(swatch: &SwatchEntry) -> String {
    swatch
        .color_name
        .clone()
        .or_else(|| swatch.hex_color.clone())
        .unwrap_or_else(|| "Color".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerce_accepts_native_and_string_encoded_arrays() {
        let native = json!([1, 2]);
        assert_eq!(coerce_to_list(Some(&native)).map(|v| v.len()), Some(2));
        let encoded = json!("[{\"name\":\"M\"}]");
        assert_eq!(coerce_to_list(Some(&encoded)).map(|v| v.len()), Some(1));
    }

    #[test]
    fn coerce_rejects_everything_else() {
        assert!(coerce_to_list(None).is_none());
        assert!(coerce_to_list(Some(&json!("not json"))).is_none());
        assert!(coerce_to_list(Some(&json!("{\"a\":1}"))).is_none());
        assert!(coerce_to_list(Some(&json!({"a": 1}))).is_none());
        assert!(coerce_to_list(Some(&json!(42))).is_none());
        assert!(coerce_to_list(Some(&Value::Null)).is_none());
    }

    #[test]
    fn sizes_parse_both_encodings_identically() {
        let native = json!([{"name": "M", "stock": 3}]);
        let encoded = json!("[{\"name\":\"M\",\"stock\":3}]");
        let expected = vec![SizeEntry {
            name: "M".into(),
            stock: Some(3),
        }];
        assert_eq!(parse_sizes(Some(&native)), expected);
        assert_eq!(parse_sizes(Some(&encoded)), expected);
    }

    #[test]
    fn sizes_never_fail_on_garbage() {
        assert!(parse_sizes(None).is_empty());
        assert!(parse_sizes(Some(&json!("not json"))).is_empty());
        assert!(parse_sizes(Some(&json!(7))).is_empty());
    }

    #[test]
    fn size_label_falls_back_to_size_code_and_drops_unnamed() {
        let raw = json!([
            {"sizeCode": "XL"},
            {"stock": 5},
            {"name": "S", "stock": "many"}
        ]);
        let sizes = parse_sizes(Some(&raw));
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes[0].name, "XL");
        assert_eq!(sizes[0].stock, None);
        assert_eq!(sizes[1].name, "S");
        assert_eq!(sizes[1].stock, None);
    }

    #[test]
    fn swatches_need_at_least_one_field() {
        let raw = json!([
            {"hexColor": "#fff"},
            {"colorName": "Bone"},
            {"note": "no color fields"},
            "not an object"
        ]);
        let swatches = parse_swatches(Some(&raw));
        assert_eq!(swatches.len(), 2);
    }

    #[test]
    fn product_color_fills_in_for_missing_swatches() {
        let color = json!({"hexColor": "#00ff00", "colorName": "Green"});
        let out = effective_swatches(None, Some(&color));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].color_name.as_deref(), Some("Green"));

        let swatches = json!([{"colorName": "Red"}]);
        let out = effective_swatches(Some(&swatches), Some(&color));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].color_name.as_deref(), Some("Red"));
    }

    #[test]
    fn color_key_prefers_name_over_hex() {
        let both = SwatchEntry {
            hex_color: Some("#ABCDEF".into()),
            color_name: Some("  Dusty Rose ".into()),
        };
        assert_eq!(color_key(&both).as_deref(), Some("dusty rose"));

        let hex_only = SwatchEntry {
            hex_color: Some("#ABCDEF".into()),
            color_name: None,
        };
        assert_eq!(color_key(&hex_only).as_deref(), Some("#abcdef"));

        let empty = SwatchEntry {
            hex_color: Some("   ".into()),
            color_name: Some("".into()),
        };
        assert_eq!(color_key(&empty), None);
    }

    #[test]
    fn color_label_has_a_last_resort() {
        let none = SwatchEntry {
            hex_color: None,
            color_name: None,
        };
        assert_eq!(color_label(&none), "Color");
    }
}
