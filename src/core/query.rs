//! Request-context parameters for list and filter endpoints
//!
//! Every parameter the original controller read from ambient request state
//! is carried explicitly here and extracted from the URL query string.
//!
//! # Example
//! ```rust,ignore
//! // In handler:
//! pub async fn index<T: Entity>(
//!     Query(params): Query<ListQuery>,
//! ) -> ApiResult<Json<Document>> {
//!     // params.page() defaults to 1
//!     // params.rows(config.default_rows, config.max_rows) falls back to the config
//! }
//!
//! // Usage:
//! GET /products?rows=10&page=2&order_by=price&direction=desc
//! GET /products?includes=category,supplier&excludes=supplier
//! GET /products/filter?filter={"category": "tools", "price>": 10}&search=drill
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Sort direction for the `direction` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Query parameters for the list and filter endpoints
///
/// All parameters have the defaults the original API shipped with:
/// 15 rows per page, ascending order, all columns, page parameter "page".
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Number of rows per page (falls back to the configured default)
    pub rows: Option<usize>,

    /// Field to order the page by
    pub order_by: Option<String>,

    /// Sort direction (`asc` or `desc`)
    pub direction: Direction,

    /// Comma-separated column selection (empty means all columns)
    pub columns: Option<String>,

    /// Name of the page parameter used in pagination links
    pub page_name: Option<String>,

    /// Page number (starts at 1)
    #[serde(default = "default_page")]
    pub page: usize,

    /// Comma-separated relation names to eager-load into the output
    pub includes: Option<String>,

    /// Comma-separated relation names to omit from the output
    pub excludes: Option<String>,

    /// Free-text search over the entity's searchable fields
    pub search: Option<String>,

    /// Filters as a JSON object
    ///
    /// # Format
    /// - Exact match: `{"field": "value"}`
    /// - Comparison: `{"field>": value, "field<": value, "field>=": value, "field<=": value}`
    pub filter: Option<String>,
}

// Keep Default in sync with the serde field defaults so a ListQuery built
// in code behaves like one deserialized from an empty query string.
impl Default for ListQuery {
    fn default() -> Self {
        Self {
            rows: None,
            order_by: None,
            direction: Direction::Asc,
            columns: None,
            page_name: None,
            page: default_page(),
            includes: None,
            excludes: None,
            search: None,
            filter: None,
        }
    }
}

fn default_page() -> usize {
    1
}

impl ListQuery {
    /// Get the page number, ensuring a minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get the rows per page, falling back to `default` and clamped to `max`
    pub fn rows(&self, default: usize, max: usize) -> usize {
        self.rows.unwrap_or(default).clamp(1, max.max(1))
    }

    /// Get the page parameter name used in pagination links
    pub fn page_name<'a>(&'a self, default: &'a str) -> &'a str {
        self.page_name.as_deref().unwrap_or(default)
    }

    /// Columns requested by the client, empty when all columns are wanted
    pub fn columns(&self) -> Vec<String> {
        split_csv(self.columns.as_deref())
    }

    /// Relation names requested for eager loading
    pub fn includes(&self) -> IncludeSpec {
        IncludeSpec::parse(self.includes.as_deref().unwrap_or(""))
    }

    /// Relation names to strip from the output
    pub fn excludes(&self) -> IncludeSpec {
        IncludeSpec::parse(self.excludes.as_deref().unwrap_or(""))
    }

    /// Parse the filter JSON string into a Value
    pub fn filter_value(&self) -> Option<Value> {
        self.filter
            .as_ref()
            .and_then(|s| serde_json::from_str(s).ok())
    }
}

fn split_csv(input: Option<&str>) -> Vec<String> {
    input
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "*")
        .map(str::to_string)
        .collect()
}

/// Set of relation names parsed from a comma-separated input string
///
/// May be empty. Unknown names are tolerated here; whether a name is
/// honored is decided against the relation registry at build time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeSpec {
    names: BTreeSet<String>,
}

impl IncludeSpec {
    /// Parse a comma-separated list of relation names
    pub fn parse(input: &str) -> Self {
        Self {
            names: input
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Build a spec from explicit names (mostly for tests and demos)
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Iterate names in deterministic (sorted) order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
