use serde::Serialize;
use utoipa::ToSchema;

/// `{ "error": "..." }`, the body of every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Acknowledgement used by the cart routes, e.g. `{ "status": "sucesso" }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            msg: None,
        }
    }

    pub fn with_msg(status: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            msg: Some(msg.into()),
        }
    }
}

/// `{ "message": "..." }`, used by the account and catalog routes.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ "mensagem": "..." }`, used by the order routes.
#[derive(Debug, Serialize, ToSchema)]
pub struct MensagemResponse {
    pub mensagem: String,
}

impl MensagemResponse {
    pub fn new(mensagem: impl Into<String>) -> Self {
        Self {
            mensagem: mensagem.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_response_omits_missing_msg() {
        let body = serde_json::to_value(StatusResponse::new("ok")).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "ok" }));

        let body =
            serde_json::to_value(StatusResponse::with_msg("sucesso", "added")).unwrap();
        assert_eq!(body["msg"], "added");
    }
}
