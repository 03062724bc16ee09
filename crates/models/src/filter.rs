//! Query criteria for listing toys.
//!
//! The HTTP layer hands these over straight from the query string, so every
//! field accepts the string forms a browser form produces (`""` means unset).

use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Sort keys accepted in `sortBy`: `price`, `createdAt` and `txt` (the name).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortBy {
    Price,
    CreatedAt,
    Name,
}

impl FromStr for SortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(SortBy::Price),
            "createdAt" => Ok(SortBy::CreatedAt),
            "txt" => Ok(SortBy::Name),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToyFilter {
    /// Case-insensitive pattern matched against the name.
    #[serde(default)]
    pub txt: String,
    /// A value that is not a number matches nothing.
    #[serde(default, deserialize_with = "price_bound")]
    pub max_price: Option<f64>,
    /// Only the literal `"true"` turns the stock filter on.
    #[serde(default, deserialize_with = "literal_true")]
    pub in_stock: bool,
    /// Unknown values leave the order untouched.
    #[serde(default, deserialize_with = "known_sort_by")]
    pub sort_by: Option<SortBy>,
    /// A negative or non-numeric index points past the last page.
    #[serde(default, deserialize_with = "page_index")]
    pub page_idx: Option<usize>,
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

fn price_bound<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_blank(deserializer)?.map(|s| s.parse().unwrap_or(f64::NAN)))
}

fn page_index<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_blank(deserializer)?.map(|s| s.parse().unwrap_or(usize::MAX)))
}

fn literal_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref() == Some("true"))
}

fn known_sort_by<'de, D>(deserializer: D) -> Result<Option<SortBy>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}
