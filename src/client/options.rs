//! Filter options derived from the current page of products. Keys are
//! de-duplicated first-wins so the first swatch spelling of a color owns
//! its label, then options are sorted alphabetically for display.

use crate::catalog::model::ProductRecord;
use crate::normalize::{color_key, color_label, effective_swatches, format_category_name};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorOption {
    /// Normalized key sent back as the `colors` filter value.
    pub value: String,
    pub label: String,
    /// Hex value for rendering a swatch chip, when the source had one.
    pub swatch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
}

pub fn color_options(products: &[ProductRecord]) -> Vec<ColorOption> {
    let mut map: IndexMap<String, ColorOption> = IndexMap::new();
    for product in products {
        let swatches = effective_swatches(product.swatches.as_ref(), product.product_color.as_ref());
        for swatch in swatches {
            let Some(key) = color_key(&swatch) else {
                continue;
            };
            map.entry(key.clone()).or_insert_with(|| ColorOption {
                value: key,
                label: color_label(&swatch),
                swatch: swatch.hex_color.clone(),
            });
        }
    }
    let mut options: Vec<ColorOption> = map.into_values().collect();
    options.sort_by(|a, b| a.label.cmp(&b.label));
    options
}

pub fn category_options(products: &[ProductRecord]) -> Vec<CategoryOption> {
    let mut map: IndexMap<String, ()> = IndexMap::new();
    for product in products {
        if let Some(category) = product.category.as_deref().map(str::trim) {
            if !category.is_empty() {
                map.entry(category.to_string()).or_insert(());
            }
        }
    }
    let mut options: Vec<CategoryOption> = map
        .into_keys()
        .map(|value| CategoryOption {
            label: format_category_name(Some(&value)),
            value,
        })
        .collect();
    options.sort_by(|a, b| a.label.cmp(&b.label));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(swatches: Option<serde_json::Value>, category: Option<&str>) -> ProductRecord {
        ProductRecord {
            article_code: "x".into(),
            swatches,
            category: category.map(String::from),
            ..ProductRecord::default()
        }
    }

    #[test]
    fn colors_dedupe_by_key_first_wins() {
        let products = vec![
            product(
                Some(json!([{"hexColor": "#001122", "colorName": "Navy"}])),
                None,
            ),
            product(
                Some(json!([{"hexColor": "#334455", "colorName": "navy"}])),
                None,
            ),
            product(Some(json!([{"colorName": "Beige"}])), None),
        ];
        let options = color_options(&products);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label, "Beige");
        assert_eq!(options[0].swatch, None);
        assert_eq!(options[1].label, "Navy");
        assert_eq!(options[1].swatch.as_deref(), Some("#001122"));
    }

    #[test]
    fn product_color_contributes_when_swatches_missing() {
        let mut p = product(None, None);
        p.product_color = Some(json!({"hexColor": "#fafafa", "colorName": "Chalk"}));
        let options = color_options(&[p]);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "chalk");
    }

    #[test]
    fn keyless_swatches_are_excluded() {
        let p = product(Some(json!([{"colorName": "  "}])), None);
        assert!(color_options(&[p]).is_empty());
    }

    #[test]
    fn categories_dedupe_trim_and_humanize() {
        let products = vec![
            product(None, Some(" men_shirts ")),
            product(None, Some("men_shirts")),
            product(None, Some("ladies_sport_bottoms_trousers")),
            product(None, Some("")),
            product(None, None),
        ];
        let options = category_options(&products);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label, "Ladies Sport Bottoms Trousers");
        assert_eq!(options[1].value, "men_shirts");
        assert_eq!(options[1].label, "Men Shirts");
    }
}
