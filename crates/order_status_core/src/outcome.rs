/// The two text columns of a matching order row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_status: String,
    pub order_tracking_id: String,
}

/// Result of one order lookup, as consumed by the response formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderLookupOutcome {
    Found(OrderRecord),
    NotFound { order_id: String },
    Error { description: String },
}

impl OrderLookupOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::NotFound { .. } => "not_found",
            Self::Error { .. } => "error",
        }
    }

    pub fn render_body(&self) -> String {
        match self {
            Self::Found(record) => format!(
                "Your order status is '{}' and you can track your order here: {}.",
                record.order_status, record.order_tracking_id
            ),
            Self::NotFound { order_id } => {
                format!("No order information found for order ID {order_id}.")
            }
            Self::Error { description } => {
                format!("Error retrieving order information: {description}.")
            }
        }
    }
}
