//! Query parameters for the table endpoints.
//!
//! Unset optional fields are sent as `null` in the payload and stripped by
//! the client before transmission, so the node never sees them.

use serde_json::Value;

/// Default page size for `get_table_rows`.
pub const DEFAULT_TABLE_LIMIT: u32 = 1000;

/// Parameters for `/v1/chain/get_table_rows`.
///
/// # Example
///
/// ```
/// use antelope_kit::TableRowsQuery;
///
/// let query = TableRowsQuery::new("eosio.token", "accounts", "alice")
///     .lower_bound("EOS")
///     .limit(10);
/// assert_eq!(query.limit, Some(10));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRowsQuery {
    pub code: String,
    pub table: String,
    pub scope: String,
    /// Ask the node to decode rows with the contract ABI.
    pub json: bool,
    pub index_position: Option<String>,
    pub key_type: Option<String>,
    pub encode_type: Option<String>,
    pub lower_bound: Option<String>,
    pub upper_bound: Option<String>,
    pub limit: Option<u32>,
    pub reverse: Option<bool>,
    pub show_payer: Option<bool>,
}

impl TableRowsQuery {
    pub fn new(code: impl Into<String>, table: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            table: table.into(),
            scope: scope.into(),
            json: true,
            index_position: None,
            key_type: None,
            encode_type: None,
            lower_bound: None,
            upper_bound: None,
            limit: Some(DEFAULT_TABLE_LIMIT),
            reverse: None,
            show_payer: None,
        }
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn index_position(mut self, index_position: impl Into<String>) -> Self {
        self.index_position = Some(index_position.into());
        self
    }

    pub fn key_type(mut self, key_type: impl Into<String>) -> Self {
        self.key_type = Some(key_type.into());
        self
    }

    pub fn encode_type(mut self, encode_type: impl Into<String>) -> Self {
        self.encode_type = Some(encode_type.into());
        self
    }

    pub fn lower_bound(mut self, lower_bound: impl Into<String>) -> Self {
        self.lower_bound = Some(lower_bound.into());
        self
    }

    pub fn upper_bound(mut self, upper_bound: impl Into<String>) -> Self {
        self.upper_bound = Some(upper_bound.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Let the node pick its own page size.
    pub fn no_limit(mut self) -> Self {
        self.limit = None;
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }

    pub fn show_payer(mut self, show_payer: bool) -> Self {
        self.show_payer = Some(show_payer);
        self
    }

    pub(crate) fn to_payload(&self) -> Value {
        serde_json::json!({
            "code": self.code,
            "table": self.table,
            "scope": self.scope,
            "json": self.json,
            "index_position": self.index_position,
            "key_type": self.key_type,
            "encode_type": self.encode_type,
            "lower_bound": self.lower_bound,
            "upper_bound": self.upper_bound,
            "limit": self.limit,
            "reverse": self.reverse,
            "show_payer": self.show_payer,
        })
    }
}

/// Parameters for `/v1/chain/get_table_by_scope`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableByScopeQuery {
    pub code: String,
    pub table: Option<String>,
    pub lower_bound: Option<String>,
    pub upper_bound: Option<String>,
    pub limit: Option<u32>,
    pub reverse: Option<bool>,
    pub show_payer: Option<bool>,
}

impl TableByScopeQuery {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            table: None,
            lower_bound: None,
            upper_bound: None,
            limit: None,
            reverse: None,
            show_payer: None,
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn lower_bound(mut self, lower_bound: impl Into<String>) -> Self {
        self.lower_bound = Some(lower_bound.into());
        self
    }

    pub fn upper_bound(mut self, upper_bound: impl Into<String>) -> Self {
        self.upper_bound = Some(upper_bound.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }

    pub fn show_payer(mut self, show_payer: bool) -> Self {
        self.show_payer = Some(show_payer);
        self
    }

    pub(crate) fn to_payload(&self) -> Value {
        serde_json::json!({
            "code": self.code,
            "table": self.table,
            "lower_bound": self.lower_bound,
            "upper_bound": self.upper_bound,
            "limit": self.limit,
            "reverse": self.reverse,
            "show_payer": self.show_payer,
        })
    }
}
