//! Submit/poll/fetch driver for the order lookup statement.
//!
//! A submitted statement is polled on a fixed interval until it reaches
//! FINISHED, FAILED or ABORTED. Polling stops once the configured maximum
//! wait has elapsed; the statement is then cancelled on a best-effort basis
//! and the lookup fails like an aborted job.

use order_status_core::outcome::{OrderLookupOutcome, OrderRecord};
use order_status_core::statement::{ResultCell, StatementRequest, StatementStatus};
use tokio::time::{sleep, Instant};

use crate::adapters::warehouse::{StatementWarehouse, WarehouseError};
use crate::config::WarehouseConfig;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
    #[error("Query failed with status: {status}{}", detail_suffix(.detail))]
    Terminal {
        status: StatementStatus,
        detail: Option<String>,
    },
    #[error("Query did not finish within {waited_ms} ms (last status: {last_status})")]
    TimedOut {
        waited_ms: u128,
        last_status: StatementStatus,
    },
    #[error("Unexpected result row: {0}")]
    MalformedRecord(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail.as_deref().map(str::trim) {
        Some(message) if !message.is_empty() => format!(": {message}"),
        _ => String::new(),
    }
}

/// Runs order lookups against one warehouse with fixed deployment settings.
pub struct OrderQueryExecutor<W> {
    warehouse: W,
    config: WarehouseConfig,
}

impl<W: StatementWarehouse> OrderQueryExecutor<W> {
    pub fn new(warehouse: W, config: WarehouseConfig) -> Self {
        Self { warehouse, config }
    }

    pub fn warehouse(&self) -> &W {
        &self.warehouse
    }

    /// Run the lookup and fold every failure into the error outcome.
    pub async fn lookup_outcome(&self, order_id: &str) -> OrderLookupOutcome {
        match self.lookup_order(order_id).await {
            Ok(Some(record)) => OrderLookupOutcome::Found(record),
            Ok(None) => OrderLookupOutcome::NotFound {
                order_id: order_id.to_string(),
            },
            Err(error) => {
                tracing::error!(
                    component = "query_executor",
                    order_id,
                    error = %error,
                    "order lookup failed"
                );
                OrderLookupOutcome::Error {
                    description: error.to_string(),
                }
            }
        }
    }

    /// `Ok(None)` when no row matches the order id.
    pub async fn lookup_order(&self, order_id: &str) -> Result<Option<OrderRecord>, ExecutionError> {
        let request =
            StatementRequest::order_lookup(&self.config.target, &self.config.table, order_id);
        let statement_id = self.warehouse.submit_statement(&request).await?;
        tracing::info!(
            component = "query_executor",
            order_id,
            statement_id = %statement_id,
            "lookup statement submitted"
        );

        self.wait_until_finished(&statement_id).await?;

        let rows = self.warehouse.fetch_rows(&statement_id).await?;
        tracing::info!(
            component = "query_executor",
            statement_id = %statement_id,
            rows = rows.len(),
            "lookup results fetched"
        );

        rows.first()
            .map(|row| record_from_row(row))
            .transpose()
    }

    async fn wait_until_finished(&self, statement_id: &str) -> Result<(), ExecutionError> {
        let poll = self.config.poll;
        let started_at = Instant::now();
        let deadline = started_at + poll.max_wait;

        loop {
            let description = self.warehouse.describe_statement(statement_id).await?;
            match description.status {
                StatementStatus::Finished => {
                    tracing::info!(
                        component = "query_executor",
                        statement_id,
                        status = %StatementStatus::Finished,
                        elapsed_ms = started_at.elapsed().as_millis() as u64,
                        "statement finished"
                    );
                    return Ok(());
                }
                status @ (StatementStatus::Failed | StatementStatus::Aborted) => {
                    tracing::warn!(
                        component = "query_executor",
                        statement_id,
                        status = %status,
                        detail = description.error.as_deref().unwrap_or(""),
                        "statement ended without results"
                    );
                    return Err(ExecutionError::Terminal {
                        status,
                        detail: description.error,
                    });
                }
                status => {
                    if Instant::now() >= deadline {
                        self.cancel_quietly(statement_id).await;
                        return Err(ExecutionError::TimedOut {
                            waited_ms: started_at.elapsed().as_millis(),
                            last_status: status,
                        });
                    }
                    tracing::debug!(
                        component = "query_executor",
                        statement_id,
                        status = %status,
                        "statement still running"
                    );
                }
            }

            sleep(poll.interval).await;
        }
    }

    async fn cancel_quietly(&self, statement_id: &str) {
        if let Err(error) = self.warehouse.cancel_statement(statement_id).await {
            tracing::warn!(
                component = "query_executor",
                statement_id,
                error = %error,
                "failed to cancel timed-out statement"
            );
        }
    }
}

fn record_from_row(row: &[ResultCell]) -> Result<OrderRecord, ExecutionError> {
    let [status_cell, tracking_cell, ..] = row else {
        return Err(ExecutionError::MalformedRecord(format!(
            "expected 2 columns, got {}",
            row.len()
        )));
    };

    let text = |cell: &ResultCell, column: &str| {
        cell.as_text().map(str::to_string).ok_or_else(|| {
            ExecutionError::MalformedRecord(format!(
                "column {column} is {}, expected string",
                cell.kind()
            ))
        })
    };

    Ok(OrderRecord {
        order_status: text(status_cell, "order_status")?,
        order_tracking_id: text(tracking_cell, "order_tracking_id")?,
    })
}
