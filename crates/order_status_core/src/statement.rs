//! The order lookup statement and the warehouse-facing value types that
//! describe a submitted job.

pub const DEFAULT_ORDER_TABLE: &str = "temp_workspace.order_tracking_test";
pub const ORDER_LOOKUP_BIND_NAME: &str = "order_id";

/// Cluster coordinates a statement runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseTarget {
    pub cluster_identifier: String,
    pub database: String,
    pub db_user: String,
}

/// A named value bound to a `:name` placeholder in the SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundParameter {
    pub name: String,
    pub value: String,
}

/// Everything the warehouse needs to accept one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRequest {
    pub target: WarehouseTarget,
    pub sql: String,
    pub parameters: Vec<BoundParameter>,
}

impl StatementRequest {
    /// Single-row lookup of an order's status and tracking id. The order id
    /// only travels as a bound parameter.
    pub fn order_lookup(target: &WarehouseTarget, table: &str, order_id: &str) -> Self {
        Self {
            target: target.clone(),
            sql: order_lookup_sql(table),
            parameters: vec![BoundParameter {
                name: ORDER_LOOKUP_BIND_NAME.to_string(),
                value: order_id.to_string(),
            }],
        }
    }
}

pub fn order_lookup_sql(table: &str) -> String {
    format!(
        "SELECT order_status, order_tracking_id FROM {table} WHERE order_id = :{ORDER_LOOKUP_BIND_NAME} LIMIT 1;"
    )
}

/// Accepts `schema.table` style identifiers made of ASCII alphanumerics and
/// underscores.
pub fn is_valid_table_name(table: &str) -> bool {
    !table.is_empty()
        && table.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        })
}

/// Lifecycle status of a submitted statement.
///
/// Parsing is case-insensitive; `as_str` yields the upper-case label the
/// warehouse reported, and unknown labels are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementStatus {
    Submitted,
    Picked,
    Started,
    Running,
    Finished,
    Failed,
    Aborted,
    Other(String),
}

impl StatementStatus {
    pub fn from_api_str(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "SUBMITTED" => Self::Submitted,
            "PICKED" => Self::Picked,
            "STARTED" => Self::Started,
            "RUNNING" => Self::Running,
            "FINISHED" => Self::Finished,
            "FAILED" => Self::Failed,
            "ABORTED" => Self::Aborted,
            _ => Self::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Picked => "PICKED",
            Self::Started => "STARTED",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
            Self::Failed => "FAILED",
            Self::Aborted => "ABORTED",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Failed | Self::Aborted)
    }
}

impl std::fmt::Display for StatementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status snapshot returned by a status poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementDescription {
    pub status: StatementStatus,
    pub error: Option<String>,
}

/// A typed result cell as reported by the warehouse.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultCell {
    String(String),
    Long(i64),
    Double(f64),
    Boolean(bool),
    Blob(Vec<u8>),
    Null,
}

impl ResultCell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Long(_) => "long",
            Self::Double(_) => "double",
            Self::Boolean(_) => "boolean",
            Self::Blob(_) => "blob",
            Self::Null => "null",
        }
    }
}

pub type ResultRow = Vec<ResultCell>;
