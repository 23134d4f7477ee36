//! Parameter bag decoding helpers shared by all resources.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{
    error::{BridgeError, Result},
    operation::OperationKind,
};

/// Per-item parameter values keyed by host parameter name.
pub type ParameterBag = Map<String, Value>;

/// Decodes a parameter bag into the typed parameters of `kind`.
pub(crate) fn decode<T: DeserializeOwned>(kind: OperationKind, bag: &ParameterBag) -> Result<T> {
    serde_json::from_value(Value::Object(bag.clone())).map_err(|e| {
        BridgeError::InvalidParameters { operation: kind.to_string(), reason: e.to_string() }
    })
}

/// Treats `null` and `""` as an absent value.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(serde::de::Error::custom),
    }
}

/// Treats an explicit `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) const fn default_true() -> bool {
    true
}

/// A value that can be rendered into a query string.
pub trait QueryValue {
    /// Returns the wire representation.
    fn as_query(&self) -> &'static str;
}

/// Sort direction for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl QueryValue for SortOrder {
    fn as_query(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Activity filter for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Active and inactive entries.
    All,
    /// Active entries only.
    Active,
    /// Inactive entries only.
    Inactive,
}

impl QueryValue for StatusFilter {
    fn as_query(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Filtering and paging options of list operations.
///
/// `S` is the resource-specific sort field. Query parameters are emitted in the fixed
/// order `page, per_page, search, sort_by, sort_order, status`; absent and empty
/// values are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(bound(deserialize = "S: DeserializeOwned"))]
pub struct ListOptions<S> {
    /// Page number.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub per_page: Option<u32>,
    /// Free-text search.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    /// Sort field.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub sort_by: Option<S>,
    /// Sort direction.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub sort_order: Option<SortOrder>,
    /// Activity filter.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<StatusFilter>,
}

impl<S> Default for ListOptions<S> {
    fn default() -> Self {
        Self { page: None, per_page: None, search: None, sort_by: None, sort_order: None, status: None }
    }
}

impl<S: QueryValue> ListOptions<S> {
    /// Returns the query parameters to send.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value
                && !value.is_empty()
            {
                query.push((key.to_owned(), value));
            }
        };
        push("page", self.page.map(|p| p.to_string()));
        push("per_page", self.per_page.map(|p| p.to_string()));
        push("search", self.search.clone());
        push("sort_by", self.sort_by.as_ref().map(|s| s.as_query().to_owned()));
        push("sort_order", self.sort_order.map(|s| s.as_query().to_owned()));
        push("status", self.status.map(|s| s.as_query().to_owned()));
        query
    }
}
