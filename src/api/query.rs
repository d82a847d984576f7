//! Query parameters for list and fetch operations.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Default page size of list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A single query parameter value.
///
/// Booleans are sent as `true`/`false`. JSON values, such as `search`
/// filters, are sent compact-encoded.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
    /// A string value, sent verbatim.
    String(String),
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A structured value, sent as compact JSON.
    Json(Value),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Json(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for QueryValue {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::String(value.to_string()), Self::Int)
    }
}

impl From<Value> for QueryValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::String(s),
            Value::Bool(b) => Self::Bool(b),
            other => Self::Json(other),
        }
    }
}

/// Extra query parameters, appended verbatim to outgoing requests.
pub type QueryParameters = BTreeMap<String, QueryValue>;

/// Renders query parameters as ordered string pairs.
#[must_use]
pub fn render_query(query: &QueryParameters) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(key, value)| (key.clone(), value.to_string()))
        .collect()
}

/// Parameters of a single-page list request.
///
/// `limit` and `with_count` are independent: `None` omits the parameter
/// so the server default applies.
///
/// # Example
///
/// ```rust
/// use pim_api::ListParams;
///
/// let params = ListParams::default();
/// assert_eq!(params.limit, Some(10));
/// assert_eq!(params.with_count, Some(false));
///
/// let params = ListParams::server_defaults().query_param("search", r#"{"group":[{"operator":"IN","value":["marketing"]}]}"#);
/// assert_eq!(params.limit, None);
/// assert_eq!(params.with_count, None);
/// assert_eq!(params.query.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ListParams {
    /// Page size, or `None` for the server default.
    pub limit: Option<u32>,
    /// Whether the server computes the total count (more expensive).
    pub with_count: Option<bool>,
    /// Additional query parameters.
    pub query: QueryParameters,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_PAGE_SIZE),
            with_count: Some(false),
            query: QueryParameters::new(),
        }
    }
}

impl ListParams {
    /// Creates parameters that leave both `limit` and `with_count` to the server.
    #[must_use]
    pub fn server_defaults() -> Self {
        Self {
            limit: None,
            with_count: None,
            query: QueryParameters::new(),
        }
    }

    /// Sets the page size (`None` omits it).
    #[must_use]
    pub fn limit(mut self, limit: impl Into<Option<u32>>) -> Self {
        self.limit = limit.into();
        self
    }

    /// Sets whether the total count is requested (`None` omits it).
    #[must_use]
    pub fn with_count(mut self, with_count: impl Into<Option<bool>>) -> Self {
        self.with_count = with_count.into();
        self
    }

    /// Replaces all additional query parameters.
    #[must_use]
    pub fn query(mut self, query: QueryParameters) -> Self {
        self.query = query;
        self
    }

    /// Adds a single additional query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_values_render_as_strings() {
        assert_eq!(QueryValue::from("bar").to_string(), "bar");
        assert_eq!(QueryValue::from(true).to_string(), "true");
        assert_eq!(QueryValue::from(false).to_string(), "false");
        assert_eq!(QueryValue::from(42_i64).to_string(), "42");
        assert_eq!(
            QueryValue::from(json!({"code": [{"operator": "IN", "value": ["a"]}]})).to_string(),
            r#"{"code":[{"operator":"IN","value":["a"]}]}"#
        );
    }

    #[test]
    fn test_integer_literals_convert_without_annotation() {
        let params = ListParams::default()
            .query_param("page", 2)
            .query_param("scope", "ecommerce");
        assert_eq!(params.query["page"], QueryValue::Int(2));

        assert_eq!(QueryValue::from(7_usize), QueryValue::Int(7));
        assert_eq!(QueryValue::from(-1_i32).to_string(), "-1");
    }

    #[test]
    fn test_json_scalars_collapse_to_plain_values() {
        assert_eq!(QueryValue::from(json!("x")), QueryValue::String("x".to_string()));
        assert_eq!(QueryValue::from(json!(true)), QueryValue::Bool(true));
    }

    #[test]
    fn test_render_query_is_sorted_by_key() {
        let mut query = QueryParameters::new();
        query.insert("with_table_select_options".to_string(), true.into());
        query.insert("locales".to_string(), "en_US".into());

        assert_eq!(
            render_query(&query),
            vec![
                ("locales".to_string(), "en_US".to_string()),
                ("with_table_select_options".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_params_builders_treat_each_option_independently() {
        let params = ListParams::default().limit(None).with_count(true);
        assert_eq!(params.limit, None);
        assert_eq!(params.with_count, Some(true));

        let params = ListParams::server_defaults().limit(25);
        assert_eq!(params.limit, Some(25));
        assert_eq!(params.with_count, None);
    }
}
