//! Known order sheet headers and their lookup
//!
//! Header lookup is exact: case-sensitive and sensitive to inner whitespace
//! (the collection point header really does contain a double space). Near
//! misses are reported by [`KnownHeaders::validate`] but still count as absent.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const CONTACT_BY: &str = "Contact by";
pub const PAYMENT: &str = "payment";
pub const COLLECTION_POINT: &str = "ORDER WILL COLLECT  TAKE AWAY point";
pub const COLLECTION_TIME: &str = "TIME OF ORDER  WILL COLLECTED";
pub const COLLECTION_TIME_SINGLE_SPACED: &str = "TIME OF ORDER WILL COLLECTED";
pub const ORDER_CONFIRMED: &str = "ORDER LIST CONNFIMED WITH CLIENT";

/// Display label for the collection point column
pub const COLLECTION_POINT_LABEL: &str = "Order will be collected at take away point";
/// Display label for the collection time column
pub const COLLECTION_TIME_LABEL: &str = "TIME AT WHICH ORDER WILL COLLECTED";

/// Header names the pipeline looks up by exact match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnownHeaders {
    pub contact_by: String,
    pub payment: String,
    pub collection_point: String,
    /// Any of these spellings is relabelled as the collection time
    pub collection_time: Vec<String>,
    /// Never shown on a card
    pub order_confirmed: String,
}

impl Default for KnownHeaders {
    fn default() -> Self {
        Self {
            contact_by: CONTACT_BY.to_string(),
            payment: PAYMENT.to_string(),
            collection_point: COLLECTION_POINT.to_string(),
            collection_time: vec![
                COLLECTION_TIME.to_string(),
                COLLECTION_TIME_SINGLE_SPACED.to_string(),
            ],
            order_confirmed: ORDER_CONFIRMED.to_string(),
        }
    }
}

impl KnownHeaders {
    /// Report known headers that are missing but have a near-identical header in the table.
    ///
    /// A near match is equal after lower-casing and collapsing whitespace runs.
    pub fn validate(&self, headers: &[String]) -> Vec<HeaderWarning> {
        let mut warnings = Vec::new();

        for (role, spellings) in self.roles() {
            if spellings.iter().any(|name| column_index(headers, name).is_some()) {
                continue;
            }

            let folded: Vec<String> = spellings.iter().map(|name| fold(name)).collect();
            if let Some(found) = headers.iter().find(|h| folded.contains(&fold(h))) {
                warnings.push(HeaderWarning {
                    role,
                    expected: spellings[0].to_string(),
                    found: found.clone(),
                });
            }
        }

        warnings
    }

    fn roles(&self) -> Vec<(&'static str, Vec<&str>)> {
        vec![
            ("contact by", vec![self.contact_by.as_str()]),
            ("payment", vec![self.payment.as_str()]),
            ("collection point", vec![self.collection_point.as_str()]),
            (
                "collection time",
                self.collection_time.iter().map(String::as_str).collect(),
            ),
            ("order confirmed", vec![self.order_confirmed.as_str()]),
        ]
        .into_iter()
        .filter(|(_, spellings)| !spellings.is_empty())
        .collect()
    }
}

/// A known header that only matched loosely
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderWarning {
    pub role: &'static str,
    pub expected: String,
    pub found: String,
}

impl fmt::Display for HeaderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Column '{}' looks like the {} column '{}' but does not match exactly; it will be treated as absent",
            self.found, self.role, self.expected
        )
    }
}

/// Position of the column whose trimmed header equals `name` exactly
pub fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn fold(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
