//! Display normalization for heterogeneous stored shapes. Everything in this
//! module degrades to an empty or placeholder value instead of erroring;
//! malformed persisted data must never take a page down.

pub mod display;
pub mod price;
pub mod variants;

pub use display::{format_category_name, format_date, with_base};
pub use price::format_price;
pub use variants::{
    coerce_to_list, color_key, color_label, effective_swatches, parse_sizes, parse_swatches,
    product_color_swatch, SizeEntry, SwatchEntry,
};
