#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use order_status_core::statement::{
    ResultCell, ResultRow, StatementDescription, StatementRequest, StatementStatus, WarehouseTarget,
};
use order_status_lambda::adapters::warehouse::{StatementWarehouse, WarehouseError};
use order_status_lambda::config::WarehouseConfig;

pub const STATEMENT_ID: &str = "stmt-0001";

/// Every call the handler made, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum WarehouseCall {
    Submit(StatementRequest),
    Describe(String),
    Fetch(String),
    Cancel(String),
}

/// In-memory warehouse that replays a fixed status sequence.
///
/// Statuses are handed out in order; the last one repeats once the script
/// runs out.
pub struct ScriptedWarehouse {
    statuses: Mutex<VecDeque<StatementDescription>>,
    rows: Vec<ResultRow>,
    submit_error: Option<String>,
    fetch_error: Option<String>,
    cancel_error: Option<String>,
    calls: Mutex<Vec<WarehouseCall>>,
}

impl ScriptedWarehouse {
    pub fn new(statuses: &[StatementStatus]) -> Self {
        Self {
            statuses: Mutex::new(
                statuses
                    .iter()
                    .cloned()
                    .map(|status| StatementDescription {
                        status,
                        error: None,
                    })
                    .collect(),
            ),
            rows: Vec::new(),
            submit_error: None,
            fetch_error: None,
            cancel_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn finished_with_rows(rows: Vec<ResultRow>) -> Self {
        Self::new(&[StatementStatus::Finished]).with_rows(rows)
    }

    pub fn with_rows(mut self, rows: Vec<ResultRow>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_terminal_error(self, status: StatementStatus, message: &str) -> Self {
        self.statuses
            .lock()
            .expect("poisoned mutex")
            .push_back(StatementDescription {
                status,
                error: Some(message.to_string()),
            });
        self
    }

    pub fn failing_submit(message: &str) -> Self {
        let mut warehouse = Self::new(&[StatementStatus::Finished]);
        warehouse.submit_error = Some(message.to_string());
        warehouse
    }

    pub fn failing_fetch(message: &str) -> Self {
        let mut warehouse = Self::new(&[StatementStatus::Finished]);
        warehouse.fetch_error = Some(message.to_string());
        warehouse
    }

    pub fn with_cancel_error(mut self, message: &str) -> Self {
        self.cancel_error = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<WarehouseCall> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    pub fn describe_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, WarehouseCall::Describe(_)))
            .count()
    }

    pub fn submitted(&self) -> Vec<StatementRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WarehouseCall::Submit(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: WarehouseCall) {
        self.calls.lock().expect("poisoned mutex").push(call);
    }
}

#[async_trait]
impl StatementWarehouse for ScriptedWarehouse {
    async fn submit_statement(&self, request: &StatementRequest) -> Result<String, WarehouseError> {
        self.record(WarehouseCall::Submit(request.clone()));
        match &self.submit_error {
            Some(message) => Err(WarehouseError::Submit(message.clone())),
            None => Ok(STATEMENT_ID.to_string()),
        }
    }

    async fn describe_statement(
        &self,
        statement_id: &str,
    ) -> Result<StatementDescription, WarehouseError> {
        self.record(WarehouseCall::Describe(statement_id.to_string()));
        let mut statuses = self.statuses.lock().expect("poisoned mutex");
        let description = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        description.ok_or_else(|| WarehouseError::Describe {
            statement_id: statement_id.to_string(),
            message: "no scripted status".to_string(),
        })
    }

    async fn fetch_rows(&self, statement_id: &str) -> Result<Vec<ResultRow>, WarehouseError> {
        self.record(WarehouseCall::Fetch(statement_id.to_string()));
        match &self.fetch_error {
            Some(message) => Err(WarehouseError::Fetch {
                statement_id: statement_id.to_string(),
                message: message.clone(),
            }),
            None => Ok(self.rows.clone()),
        }
    }

    async fn cancel_statement(&self, statement_id: &str) -> Result<(), WarehouseError> {
        self.record(WarehouseCall::Cancel(statement_id.to_string()));
        match &self.cancel_error {
            Some(message) => Err(WarehouseError::Cancel {
                statement_id: statement_id.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub fn text_row(cells: &[&str]) -> ResultRow {
    cells
        .iter()
        .map(|cell| ResultCell::String(cell.to_string()))
        .collect()
}

pub fn test_config() -> WarehouseConfig {
    WarehouseConfig::new(WarehouseTarget {
        cluster_identifier: "orders-cluster".to_string(),
        database: "dev".to_string(),
        db_user: "agent".to_string(),
    })
}
