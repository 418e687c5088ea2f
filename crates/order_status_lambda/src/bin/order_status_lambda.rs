use lambda_runtime::{service_fn, Error, LambdaEvent};
use order_status_core::contract::ResponseEnvelope;
use order_status_lambda::adapters::redshift_data::RedshiftDataWarehouse;
use order_status_lambda::config::WarehouseConfig;
use order_status_lambda::executor::OrderQueryExecutor;
use order_status_lambda::handlers::order_status::handle_order_status_event;
use order_status_lambda::logging::init_logging;
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    executor: &OrderQueryExecutor<RedshiftDataWarehouse>,
) -> Result<ResponseEnvelope, Error> {
    handle_order_status_event(event.payload, executor)
        .await
        .map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let config = WarehouseConfig::from_env()?;
    tracing::info!(
        cluster_identifier = %config.target.cluster_identifier,
        database = %config.target.database,
        table = %config.table,
        poll_interval_ms = config.poll.interval.as_millis() as u64,
        max_wait_ms = config.poll.max_wait.as_millis() as u64,
        "order status handler configured"
    );

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let warehouse = RedshiftDataWarehouse::new(aws_sdk_redshiftdata::Client::new(&aws_config));
    let executor = OrderQueryExecutor::new(warehouse, config);
    let executor = &executor;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, executor).await
    }))
    .await
}
