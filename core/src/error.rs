//! Error types for the clinic API client.
//!
//! # Design
//! Failures split along the lines the console reports them: the server could
//! not be reached (`Connection`), the server answered with a non-2xx status
//! (`Application`), or the body did not fit what the caller expected. The
//! `Display` of each variant is the text shown to the operator.

use thiserror::Error;

/// Errors returned by `ApiClient`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The transport failed before any response arrived.
    #[error("Erro de conexao: Verifique se o servidor esta rodando em {base_url}")]
    Connection { base_url: String, cause: String },

    /// The server answered with a non-2xx status. `message` comes from the
    /// body's `erro` or `mensagem` field, or is synthesized from the status.
    #[error("{message}")]
    Application { status: u16, message: String },

    /// The payload did not use the `{"data": ...}` envelope while strict
    /// envelope checking was enabled.
    #[error("resposta fora do contrato: {0}")]
    Contract(String),

    /// The response body could not be deserialized into the expected type.
    #[error("falha ao ler resposta: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("falha ao montar requisicao: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Application { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A failure of the underlying transport. Any received status, including
/// 4xx and 5xx, is a response rather than a `TransportError`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Raised when form input cannot become a request payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Preencha o campo {0}")]
    Missing(&'static str),

    #[error("Valor invalido para {field}: {value}")]
    Invalid { field: &'static str, value: String },

    #[error("Campo desconhecido: {0}")]
    UnknownField(String),

    #[error("Nenhum formulario aberto")]
    NoOpenForm,
}
