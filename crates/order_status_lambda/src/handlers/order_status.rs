use order_status_core::contract::{
    build_response_envelope, InvocationEvent, ResponseEnvelope, ValidationError,
};
use order_status_core::parameters::require_order_id;
use serde_json::Value;

use crate::adapters::warehouse::StatementWarehouse;
use crate::executor::OrderQueryExecutor;

/// Request-level failures. Warehouse failures never surface here; they are
/// rendered into the response body instead.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("invalid agent event: {0}")]
    MalformedEvent(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub async fn handle_order_status_event<W: StatementWarehouse>(
    event: Value,
    executor: &OrderQueryExecutor<W>,
) -> Result<ResponseEnvelope, HandlerError> {
    let event: InvocationEvent = serde_json::from_value(event)?;
    handle_invocation(&event, executor).await
}

pub async fn handle_invocation<W: StatementWarehouse>(
    event: &InvocationEvent,
    executor: &OrderQueryExecutor<W>,
) -> Result<ResponseEnvelope, HandlerError> {
    let order_id = require_order_id(&event.parameters).inspect_err(|error| {
        tracing::warn!(
            component = "order_status_handler",
            action_group = event.action_group.as_deref().unwrap_or(""),
            function = event.function.as_deref().unwrap_or(""),
            error = %error,
            "rejected invocation"
        );
    })?;

    tracing::info!(
        component = "order_status_handler",
        order_id = %order_id,
        "looking up order status"
    );
    let outcome = executor.lookup_outcome(&order_id).await;
    let envelope = build_response_envelope(event, outcome.render_body());

    tracing::info!(
        component = "order_status_handler",
        order_id = %order_id,
        outcome = outcome.kind(),
        response = %serde_json::to_string(&envelope).unwrap_or_default(),
        "order status response ready"
    );
    Ok(envelope)
}
