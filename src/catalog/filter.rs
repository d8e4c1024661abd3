//! Filter predicates as an explicit intermediate structure. Each request
//! dimension contributes at most one predicate; the set is conjunctive and
//! each predicate's own multi-value matching is disjunctive. Stores translate
//! predicates to their own query language; `matches` gives the in-memory
//! reference semantics.

use crate::catalog::model::ProductRecord;
use crate::catalog::params::ListingParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Category must be an exact member of the list.
    CategoryIn(Vec<String>),
    /// Case-insensitive substring of title OR model-image alt text.
    Search(String),
    /// A non-empty redPrice or yellowPrice counts as discounted. The value is
    /// never compared against regularPrice.
    OnSale,
    /// Any prepared color pattern matches the serialized swatch text.
    ColorAny(Vec<String>),
}

/// Build the predicate set for sanitized parameters. Empty dimensions
/// contribute nothing, so an unfiltered request yields an empty set.
pub fn build_predicates(params: &ListingParams) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    if !params.categories.is_empty() {
        predicates.push(Predicate::CategoryIn(params.categories.clone()));
    }
    if !params.search.is_empty() {
        predicates.push(Predicate::Search(params.search.clone()));
    }
    if params.sale_only {
        predicates.push(Predicate::OnSale);
    }
    let patterns: Vec<String> = params
        .colors
        .iter()
        .map(|c| prepare_color_token(c))
        .filter(|p| !p.is_empty())
        .collect();
    if !patterns.is_empty() {
        predicates.push(Predicate::ColorAny(patterns));
    }

    predicates
}

/// Turn a requested color into a match pattern: strip residual wildcards,
/// then join whitespace-separated words with `%` so "light blue" matches
/// "light slate blue" and swatch text with markup between the words.
pub fn prepare_color_token(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| *c != '%').collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("%")
        .to_ascii_lowercase()
}

impl Predicate {
    /// In-memory evaluation of this predicate against one record.
    pub fn matches(&self, record: &ProductRecord) -> bool {
        match self {
            Self::CategoryIn(categories) => record
                .category
                .as_deref()
                .is_some_and(|c| categories.iter().any(|want| want == c)),
            Self::Search(term) => {
                let needle = term.to_ascii_lowercase();
                contains_ci(record.title.as_deref(), &needle)
                    || contains_ci(record.image_model_alt.as_deref(), &needle)
            }
            Self::OnSale => {
                has_text(record.red_price.as_deref()) || has_text(record.yellow_price.as_deref())
            }
            Self::ColorAny(patterns) => {
                let haystack = swatch_text(record);
                patterns.iter().any(|p| wildcard_contains(&haystack, p))
            }
        }
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn contains_ci(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack.is_some_and(|h| h.to_ascii_lowercase().contains(needle_lower))
}

/// The textual serialization colors are matched against: swatches first,
/// falling back to the single productColor object. Matching raw JSON text
/// can false-positive on hex fragments; that behavior is part of the
/// contract, not a bug to fix.
fn swatch_text(record: &ProductRecord) -> String {
    let mut out = String::new();
    if let Some(swatches) = &record.swatches {
        out.push_str(&swatches.to_string());
    }
    if let Some(color) = &record.product_color {
        out.push_str(&color.to_string());
    }
    out.to_ascii_lowercase()
}

/// `%`-separated pattern parts must appear in order as substrings.
fn wildcard_contains(haystack: &str, pattern: &str) -> bool {
    let mut rest = haystack;
    for part in pattern.split('%').filter(|p| !p.is_empty()) {
        match rest.find(part) {
            Some(idx) => rest = &rest[idx + part.len()..],
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> ProductRecord {
        ProductRecord {
            article_code: "0100".into(),
            title: Some("Relaxed Linen Shirt".into()),
            category: Some("men_shirts".into()),
            image_model_alt: Some("Model wearing beige shirt".into()),
            red_price: None,
            yellow_price: None,
            swatches: Some(json!([
                {"hexColor": "#aabbcc", "colorName": "Light Slate Blue"},
                {"hexColor": "#ff0000", "colorName": "Red"}
            ])),
            ..ProductRecord::default()
        }
    }

    #[test]
    fn empty_params_build_no_predicates() {
        let params = ListingParams::default();
        assert!(build_predicates(&params).is_empty());
    }

    #[test]
    fn each_dimension_contributes_one_predicate() {
        let mut params = ListingParams::default();
        params.categories = vec!["shoes".into()];
        params.search = "linen".into();
        params.sale_only = true;
        params.colors = vec!["light blue".into()];
        let predicates = build_predicates(&params);
        assert_eq!(predicates.len(), 4);
        assert!(predicates.contains(&Predicate::ColorAny(vec!["light%blue".into()])));
    }

    #[test]
    fn color_tokens_strip_wildcards_and_join_words() {
        assert_eq!(prepare_color_token("light blue"), "light%blue");
        assert_eq!(prepare_color_token("  Dusty   Rose "), "dusty%rose");
        assert_eq!(prepare_color_token("re%d"), "red");
        assert_eq!(prepare_color_token("%"), "");
    }

    #[test]
    fn category_is_exact_membership() {
        let r = record();
        assert!(Predicate::CategoryIn(vec!["men_shirts".into()]).matches(&r));
        assert!(!Predicate::CategoryIn(vec!["Men_Shirts".into()]).matches(&r));
        assert!(!Predicate::CategoryIn(vec!["shoes".into()]).matches(&r));
    }

    #[test]
    fn search_matches_title_or_model_alt() {
        let r = record();
        assert!(Predicate::Search("LINEN".into()).matches(&r));
        assert!(Predicate::Search("beige".into()).matches(&r));
        assert!(!Predicate::Search("denim".into()).matches(&r));
    }

    #[test]
    fn sale_needs_a_non_empty_discount_price() {
        let mut r = record();
        assert!(!Predicate::OnSale.matches(&r));
        r.red_price = Some(String::new());
        assert!(!Predicate::OnSale.matches(&r));
        r.yellow_price = Some("$12.99".into());
        assert!(Predicate::OnSale.matches(&r));
    }

    #[test]
    fn multi_word_color_matches_across_token_boundaries() {
        let r = record();
        let p = Predicate::ColorAny(vec![prepare_color_token("light blue")]);
        assert!(p.matches(&r));
    }

    #[test]
    fn any_requested_color_is_enough() {
        let r = record();
        let p = Predicate::ColorAny(vec![
            prepare_color_token("chartreuse"),
            prepare_color_token("red"),
        ]);
        assert!(p.matches(&r));
    }

    #[test]
    fn color_falls_back_to_product_color() {
        let mut r = record();
        r.swatches = None;
        r.product_color = Some(json!({"colorName": "Forest Green"}));
        assert!(Predicate::ColorAny(vec![prepare_color_token("forest green")]).matches(&r));
    }

    #[test]
    fn hex_fragments_can_false_positive() {
        // "bb" appears inside the first swatch's hex value; this is accepted.
        let r = record();
        assert!(Predicate::ColorAny(vec!["bb".into()]).matches(&r));
    }
}
