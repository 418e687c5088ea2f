use serde::{Deserialize, Serialize};

pub const DEFAULT_MESSAGE_VERSION: &str = "1.0";
pub const ORDER_ID_PARAMETER: &str = "order_id";

/// One `{name, type, value}` entry of an agent function invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionParameter {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub parameter_type: Option<String>,
    #[serde(default)]
    pub value: String,
}

impl FunctionParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_type: None,
            value: value.into(),
        }
    }
}

/// Inbound agent action-group event. Fields the handler does not read
/// (`agent`, `sessionId`, `inputText`, session attributes) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEvent {
    #[serde(default)]
    pub parameters: Vec<FunctionParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextBody {
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseBody {
    #[serde(rename = "TEXT")]
    pub text: TextBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub response_body: ResponseBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub action_group: String,
    pub function: String,
    pub function_response: FunctionResponse,
}

/// Outbound envelope in the shape the agent framework requires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub response: ActionResponse,
    pub message_version: String,
}

impl ResponseEnvelope {
    pub fn body(&self) -> &str {
        &self.response.function_response.response_body.text.body
    }
}

/// Wrap a text body in the response envelope, echoing the identifiers of
/// the invocation it answers.
pub fn build_response_envelope(event: &InvocationEvent, body: impl Into<String>) -> ResponseEnvelope {
    ResponseEnvelope {
        response: ActionResponse {
            action_group: event.action_group.clone().unwrap_or_default(),
            function: event.function.clone().unwrap_or_default(),
            function_response: FunctionResponse {
                response_body: ResponseBody {
                    text: TextBody { body: body.into() },
                },
            },
        },
        message_version: event
            .message_version
            .clone()
            .unwrap_or_else(|| DEFAULT_MESSAGE_VERSION.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}
