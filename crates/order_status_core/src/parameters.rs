use crate::contract::{FunctionParameter, ValidationError, ORDER_ID_PARAMETER};

/// Value of the first parameter named `name`, or `""` when none matches.
///
/// Duplicate names resolve to the first occurrence in invocation order.
pub fn get_param_value<'a>(parameters: &'a [FunctionParameter], name: &str) -> &'a str {
    parameters
        .iter()
        .find(|parameter| parameter.name == name)
        .map(|parameter| parameter.value.as_str())
        .unwrap_or("")
}

/// Extract the order identifier, rejecting a missing or empty value.
pub fn require_order_id(parameters: &[FunctionParameter]) -> Result<String, ValidationError> {
    let order_id = get_param_value(parameters, ORDER_ID_PARAMETER);
    if order_id.is_empty() {
        return Err(ValidationError::new(format!(
            "The {ORDER_ID_PARAMETER} parameter must not be empty."
        )));
    }

    Ok(order_id.to_string())
}
