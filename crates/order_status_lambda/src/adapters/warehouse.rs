use async_trait::async_trait;
use order_status_core::statement::{ResultRow, StatementDescription, StatementRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WarehouseError {
    #[error("failed to submit statement: {0}")]
    Submit(String),
    #[error("failed to describe statement {statement_id}: {message}")]
    Describe {
        statement_id: String,
        message: String,
    },
    #[error("failed to fetch results for statement {statement_id}: {message}")]
    Fetch {
        statement_id: String,
        message: String,
    },
    #[error("failed to cancel statement {statement_id}: {message}")]
    Cancel {
        statement_id: String,
        message: String,
    },
}

/// Asynchronous statement API of the data warehouse.
#[async_trait]
pub trait StatementWarehouse: Send + Sync {
    /// Submit a statement and return the job id the warehouse assigned.
    async fn submit_statement(&self, request: &StatementRequest) -> Result<String, WarehouseError>;

    async fn describe_statement(
        &self,
        statement_id: &str,
    ) -> Result<StatementDescription, WarehouseError>;

    /// Rows of a FINISHED statement.
    async fn fetch_rows(&self, statement_id: &str) -> Result<Vec<ResultRow>, WarehouseError>;

    async fn cancel_statement(&self, statement_id: &str) -> Result<(), WarehouseError>;
}
