//! Value layer for result-set data.
//!
//! Row values are dynamically typed:
//!
//! - **Value**: Tagged representation of a single cell (null, boolean, number, string)
//! - **DataType**: The runtime type of a non-null value
//!
//! Every place that shows a value to the user goes through
//! [`Value::to_display_string`], so the coercion rules live in one spot.

pub mod value;

pub use value::{DataType, Value};
