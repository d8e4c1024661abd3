//! Query-string sanitization. Every raw parameter is clamped or defaulted
//! here; nothing downstream ever sees an out-of-range value.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 200;
pub const MAX_SEARCH_LEN: usize = 120;
pub const MAX_LIST_ITEMS: usize = 20;

/// Raw query-string fields exactly as the client sent them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListingQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub search: Option<String>,
    pub categories: Option<String>,
    pub colors: Option<String>,
    #[serde(rename = "saleOnly")]
    pub sale_only: Option<String>,
}

/// Sortable timestamp columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    CreatedAt,
    #[default]
    UpdatedAt,
}

impl SortColumn {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("created_at") | Some("createdat") => Self::CreatedAt,
            _ => Self::UpdatedAt,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Column name quoted for direct interpolation into an ORDER BY clause.
    pub fn quoted_column(self) -> &'static str {
        match self {
            Self::CreatedAt => "\"createdAt\"",
            Self::UpdatedAt => "\"updatedAt\"",
        }
    }
}

/// Sort direction; anything that is not `asc` is descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sanitized, bounded listing parameters. Constructing this never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingParams {
    pub limit: i64,
    pub page: i64,
    pub sort: SortColumn,
    pub direction: SortDirection,
    pub search: String,
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub sale_only: bool,
}

impl Default for ListingParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: 1,
            sort: SortColumn::default(),
            direction: SortDirection::default(),
            search: String::new(),
            categories: Vec::new(),
            colors: Vec::new(),
            sale_only: false,
        }
    }
}

impl ListingParams {
    pub fn from_raw(raw: &RawListingQuery) -> Self {
        Self {
            limit: parse_limit(raw.limit.as_deref()),
            page: parse_page(raw.page.as_deref()),
            sort: SortColumn::parse(raw.sort.as_deref()),
            direction: SortDirection::parse(raw.direction.as_deref()),
            search: parse_search(raw.search.as_deref()),
            categories: parse_list(raw.categories.as_deref()),
            colors: parse_list(raw.colors.as_deref()),
            sale_only: parse_bool(raw.sale_only.as_deref()),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Floor-then-clamp to [1, MAX_LIMIT]; non-numeric input yields the default.
pub fn parse_limit(raw: Option<&str>) -> i64 {
    parse_whole_number(raw)
        .map(|n| n.clamp(1, MAX_LIMIT))
        .unwrap_or(DEFAULT_LIMIT)
}

/// Floor-then-clamp to [1, inf); non-numeric input yields page 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    parse_whole_number(raw).map(|n| n.max(1)).unwrap_or(1)
}

fn parse_whole_number(raw: Option<&str>) -> Option<i64> {
    let n = raw?.trim().parse::<f64>().ok().filter(|n| n.is_finite())?;
    let floored = n.floor();
    if floored >= i64::MAX as f64 {
        Some(i64::MAX)
    } else if floored <= i64::MIN as f64 {
        Some(i64::MIN)
    } else {
        Some(floored as i64)
    }
}

/// Strip pattern metacharacters, trim, and cap the length.
pub fn parse_search(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let stripped: String = raw.chars().filter(|c| *c != '%' && *c != '_').collect();
    stripped.trim().chars().take(MAX_SEARCH_LEN).collect()
}

/// Comma-separated list: trim segments, drop empties, keep the first 20.
pub fn parse_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_LIST_ITEMS)
        .map(str::to_string)
        .collect()
}

/// True only for a case-insensitive literal "true".
pub fn parse_bool(raw: Option<&str>) -> bool {
    raw.is_some_and(|s| s.trim().eq_ignore_ascii_case("true"))
}
