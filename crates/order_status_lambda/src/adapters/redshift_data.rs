use async_trait::async_trait;
use aws_sdk_redshiftdata::error::DisplayErrorContext;
use aws_sdk_redshiftdata::types::{Field, SqlParameter, StatusString};
use order_status_core::statement::{
    ResultCell, ResultRow, StatementDescription, StatementRequest, StatementStatus,
};

use crate::adapters::warehouse::{StatementWarehouse, WarehouseError};

/// Redshift Data API client. Cheap to clone; one instance is shared by every
/// invocation of a warm Lambda container.
#[derive(Debug, Clone)]
pub struct RedshiftDataWarehouse {
    client: aws_sdk_redshiftdata::Client,
}

impl RedshiftDataWarehouse {
    pub fn new(client: aws_sdk_redshiftdata::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatementWarehouse for RedshiftDataWarehouse {
    async fn submit_statement(&self, request: &StatementRequest) -> Result<String, WarehouseError> {
        let parameters = request
            .parameters
            .iter()
            .map(|parameter| {
                SqlParameter::builder()
                    .name(&parameter.name)
                    .value(&parameter.value)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| WarehouseError::Submit(format!("invalid bound parameter: {error}")))?;

        let output = self
            .client
            .execute_statement()
            .cluster_identifier(&request.target.cluster_identifier)
            .database(&request.target.database)
            .db_user(&request.target.db_user)
            .sql(&request.sql)
            .set_parameters(Some(parameters))
            .send()
            .await
            .map_err(|error| WarehouseError::Submit(DisplayErrorContext(&error).to_string()))?;

        output
            .id()
            .map(str::to_string)
            .ok_or_else(|| WarehouseError::Submit("response did not include a statement id".to_string()))
    }

    async fn describe_statement(
        &self,
        statement_id: &str,
    ) -> Result<StatementDescription, WarehouseError> {
        let output = self
            .client
            .describe_statement()
            .id(statement_id)
            .send()
            .await
            .map_err(|error| WarehouseError::Describe {
                statement_id: statement_id.to_string(),
                message: DisplayErrorContext(&error).to_string(),
            })?;

        Ok(StatementDescription {
            status: status_from_sdk(output.status()),
            error: output.error().map(str::to_string),
        })
    }

    async fn fetch_rows(&self, statement_id: &str) -> Result<Vec<ResultRow>, WarehouseError> {
        let output = self
            .client
            .get_statement_result()
            .id(statement_id)
            .send()
            .await
            .map_err(|error| WarehouseError::Fetch {
                statement_id: statement_id.to_string(),
                message: DisplayErrorContext(&error).to_string(),
            })?;

        Ok(output
            .records()
            .iter()
            .map(|record| record.iter().map(cell_from_field).collect())
            .collect())
    }

    async fn cancel_statement(&self, statement_id: &str) -> Result<(), WarehouseError> {
        self.client
            .cancel_statement()
            .id(statement_id)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| WarehouseError::Cancel {
                statement_id: statement_id.to_string(),
                message: DisplayErrorContext(&error).to_string(),
            })
    }
}

fn status_from_sdk(status: Option<&StatusString>) -> StatementStatus {
    match status {
        Some(status) => StatementStatus::from_api_str(status.as_str()),
        None => StatementStatus::Other("UNKNOWN".to_string()),
    }
}

fn cell_from_field(field: &Field) -> ResultCell {
    match field {
        Field::StringValue(value) => ResultCell::String(value.clone()),
        Field::LongValue(value) => ResultCell::Long(*value),
        Field::DoubleValue(value) => ResultCell::Double(*value),
        Field::BooleanValue(value) => ResultCell::Boolean(*value),
        Field::BlobValue(blob) => ResultCell::Blob(blob.as_ref().to_vec()),
        _ => ResultCell::Null,
    }
}
