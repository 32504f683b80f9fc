//! Request builder, response parser, and one-shot request executor for the
//! clinic REST API.
//!
//! # Design
//! `ApiClient` holds only its configuration and a shared `Transport`. Each
//! call is split into `build_request` and `parse_response`, with `request`
//! gluing them together around a single transport round-trip. There are no
//! retries and no caching: every call goes to the server.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::config::ClientConfig;
use crate::entity::{Employee, Entity, Pet};
use crate::envelope::{self, coerce_list};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Client for the clinic API. Cloning shares the transport.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("config", &self.config).finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Client that talks to the network through `ureq`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Describe a call to `endpoint` (a path such as `/api/pets/3`).
    ///
    /// The body is attached as JSON only when the method carries one.
    pub fn build_request(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&Value>,
    ) -> Result<HttpRequest, ApiError> {
        let body = match body {
            Some(value) if method.has_body() => {
                Some(serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))?)
            }
            _ => None,
        };
        let headers = if method.has_body() {
            vec![("content-type".to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };
        Ok(HttpRequest {
            method,
            url: format!("{}{endpoint}", self.config.base_url),
            headers,
            body,
        })
    }

    /// Read, check, and unwrap a response.
    pub fn parse_response(&self, response: &HttpResponse) -> Result<Value, ApiError> {
        let payload = envelope::read_payload(response);
        if !response.is_success() {
            return Err(ApiError::Application {
                status: response.status,
                message: envelope::error_message(&payload, response.status, &response.reason),
            });
        }
        envelope::normalize(payload, self.config.envelope)
    }

    /// Perform one request and return its normalized payload.
    ///
    /// Failures are logged with the endpoint, method, and body that caused
    /// them. A transport failure becomes `ApiError::Connection`.
    pub fn request(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let result = self.build_request(endpoint, method, body).and_then(|request| {
            let response = self.transport.execute(&request).map_err(|e| ApiError::Connection {
                base_url: self.config.base_url.clone(),
                cause: e.0,
            })?;
            self.parse_response(&response)
        });

        if let Err(err) = &result {
            let cause = match err {
                ApiError::Connection { cause, .. } => cause.as_str(),
                _ => "",
            };
            let body = body.map(Value::to_string).unwrap_or_default();
            error!(endpoint, %method, %body, cause, error = %err, "request failed");
        }
        result
    }

    // ---------------------------------------------------------------------
    // Typed helpers
    // ---------------------------------------------------------------------

    /// Load an entity's collection, coercing odd shapes into a list.
    pub fn list<E: Entity>(&self) -> Result<Vec<E>, ApiError> {
        let payload = self.request(&E::SCHEMA.collection_path(), HttpMethod::Get, None)?;
        decode_list(payload)
    }

    pub fn get<E: Entity>(&self, id: i64) -> Result<E, ApiError> {
        let payload = self.request(&E::SCHEMA.item_path(id), HttpMethod::Get, None)?;
        decode(payload)
    }

    /// POST a new record. Returns the raw payload the server answered with.
    pub fn create<E: Entity>(&self, payload: &E::Payload) -> Result<Value, ApiError> {
        let body = to_value(payload)?;
        self.request(&E::SCHEMA.collection_path(), HttpMethod::Post, Some(&body))
    }

    pub fn update<E: Entity>(&self, id: i64, payload: &E::Payload) -> Result<Value, ApiError> {
        let body = to_value(payload)?;
        self.request(&E::SCHEMA.item_path(id), HttpMethod::Put, Some(&body))
    }

    pub fn delete<E: Entity>(&self, id: i64) -> Result<Value, ApiError> {
        self.request(&E::SCHEMA.item_path(id), HttpMethod::Delete, None)
    }

    /// Pets owned by one client.
    pub fn pets_by_client(&self, client_id: i64) -> Result<Vec<Pet>, ApiError> {
        let endpoint = format!("{}/cliente/{client_id}", Pet::SCHEMA.collection_path());
        decode_list(self.request(&endpoint, HttpMethod::Get, None)?)
    }

    /// Employees holding `role` (`VETERINARIO`, `TOSADOR`, `ATENDENTE`).
    pub fn employees_by_role(&self, role: &str) -> Result<Vec<Employee>, ApiError> {
        let endpoint = format!("{}/cargo/{role}", Employee::SCHEMA.collection_path());
        decode_list(self.request(&endpoint, HttpMethod::Get, None)?)
    }
}

fn to_value<T: Serialize>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(payload).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn decode_list<T: DeserializeOwned>(payload: Value) -> Result<Vec<T>, ApiError> {
    coerce_list(payload).into_iter().map(decode).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::entity::{Client, ClientPayload};
    use crate::envelope::EnvelopePolicy;
    use crate::error::TransportError;

    /// Replays one canned outcome and remembers the last request.
    struct Canned {
        outcome: Result<HttpResponse, TransportError>,
        seen: Mutex<Option<HttpRequest>>,
    }

    impl Transport for Canned {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            self.outcome.clone()
        }
    }

    fn json_response(status: u16, reason: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            reason: reason.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    fn client_with(outcome: Result<HttpResponse, TransportError>) -> (ApiClient, Arc<Canned>) {
        let canned = Arc::new(Canned {
            outcome,
            seen: Mutex::new(None),
        });
        let client = ApiClient::with_transport(ClientConfig::new("http://localhost:8080/"), canned.clone());
        (client, canned)
    }

    #[test]
    fn get_request_carries_no_body() {
        let (client, _) = client_with(Ok(json_response(200, "OK", "[]")));
        let req = client
            .build_request("/api/clientes", HttpMethod::Get, Some(&json!({ "nome": "x" })))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/api/clientes");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn delete_request_declares_json_without_body() {
        let (client, _) = client_with(Ok(json_response(200, "OK", "")));
        let req = client.build_request("/api/pets/3", HttpMethod::Delete, None).unwrap();
        assert!(req.body.is_none());
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn post_request_serializes_body() {
        let (client, _) = client_with(Ok(json_response(200, "OK", "[]")));
        let req = client
            .build_request("/api/clientes", HttpMethod::Post, Some(&json!({ "nome": "Ana" })))
            .unwrap();
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "nome": "Ana" }));
    }

    #[test]
    fn list_response_is_returned_unchanged() {
        let (client, _) = client_with(Ok(json_response(200, "OK", r#"[{"idCliente":1},{"idCliente":2}]"#)));
        let data = client.request("/api/clientes", HttpMethod::Get, None).unwrap();
        assert_eq!(data, json!([{ "idCliente": 1 }, { "idCliente": 2 }]));
    }

    #[test]
    fn data_envelope_is_unwrapped() {
        let (client, _) = client_with(Ok(json_response(201, "Created", r#"{"data":{"idCliente":7},"total":1}"#)));
        let data = client.request("/api/clientes", HttpMethod::Post, None).unwrap();
        assert_eq!(data, json!({ "idCliente": 7 }));
    }

    #[test]
    fn not_found_uses_erro_field() {
        let (client, _) = client_with(Ok(json_response(404, "Not Found", r#"{"erro":"Pet nao encontrado"}"#)));
        let err = client.request("/api/pets/3", HttpMethod::Delete, None).unwrap_err();
        assert_eq!(
            err,
            ApiError::Application {
                status: 404,
                message: "Pet nao encontrado".to_string()
            }
        );
    }

    #[test]
    fn error_without_message_is_synthesized_from_status() {
        let response = HttpResponse {
            status: 500,
            reason: "Internal Server Error".to_string(),
            headers: Vec::new(),
            body: String::new(),
        };
        let (client, _) = client_with(Ok(response));
        let err = client.request("/api/produtos", HttpMethod::Get, None).unwrap_err();
        assert_eq!(err.to_string(), "Erro 500: Internal Server Error");

        let (client, _) = client_with(Ok(json_response(502, "Bad Gateway", "{}")));
        let err = client.request("/api/produtos", HttpMethod::Get, None).unwrap_err();
        assert_eq!(err.to_string(), "Erro 502: Bad Gateway");
    }

    #[test]
    fn json_typed_error_page_is_synthesized_from_status() {
        let (client, _) = client_with(Ok(json_response(500, "Internal Server Error", "<html>boom</html>")));
        let err = client.request("/api/produtos", HttpMethod::Get, None).unwrap_err();
        assert_eq!(
            err,
            ApiError::Application {
                status: 500,
                message: "Erro 500: Internal Server Error".to_string()
            }
        );

        let (client, _) = client_with(Ok(json_response(502, "Bad Gateway", "")));
        let err = client.request("/api/produtos", HttpMethod::Get, None).unwrap_err();
        assert_eq!(err.to_string(), "Erro 502: Bad Gateway");
    }

    #[test]
    fn json_typed_empty_success_is_generic_message() {
        let (client, _) = client_with(Ok(json_response(200, "OK", "")));
        let data = client.request("/api/pets/3", HttpMethod::Delete, None).unwrap();
        assert_eq!(data, json!({ "mensagem": "Operacao realizada com sucesso" }));

        let (client, _) = client_with(Ok(json_response(200, "OK", "removido")));
        let data = client.request("/api/pets/3", HttpMethod::Delete, None).unwrap();
        assert_eq!(data, json!({ "mensagem": "removido" }));
    }

    #[test]
    fn transport_failure_becomes_connection_error() {
        let (client, _) = client_with(Err(TransportError("connection refused".to_string())));
        let err = client.request("/api/clientes", HttpMethod::Get, None).unwrap_err();
        assert!(matches!(err, ApiError::Connection { ref cause, .. } if cause == "connection refused"));
        assert_eq!(
            err.to_string(),
            "Erro de conexao: Verifique se o servidor esta rodando em http://localhost:8080"
        );
    }

    #[test]
    fn strict_envelope_rejects_bare_list() {
        let canned = Arc::new(Canned {
            outcome: Ok(json_response(200, "OK", "[]")),
            seen: Mutex::new(None),
        });
        let config = ClientConfig {
            envelope: EnvelopePolicy::Strict,
            ..ClientConfig::new("http://localhost:8080")
        };
        let client = ApiClient::with_transport(config, canned);
        let err = client.list::<Client>().unwrap_err();
        assert!(matches!(err, ApiError::Contract(_)));
    }

    #[test]
    fn create_posts_nulls_for_empty_optionals() {
        let (client, canned) = client_with(Ok(json_response(201, "Created", r#"{"idCliente":7,"nome":"Ana"}"#)));
        let payload = ClientPayload {
            name: "Ana".to_string(),
            cpf: "123".to_string(),
            phone: None,
            email: None,
            address: None,
        };
        client.create::<Client>(&payload).unwrap();

        let seen = canned.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.method, HttpMethod::Post);
        assert_eq!(seen.url, "http://localhost:8080/api/clientes");
        let body: Value = serde_json::from_str(seen.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({ "nome": "Ana", "cpf": "123", "telefone": null, "email": null, "endereco": null })
        );
    }

    #[test]
    fn filtered_lists_hit_nested_routes() {
        let (client, canned) = client_with(Ok(json_response(200, "OK", r#"[{"idPet":1,"idCliente":4}]"#)));
        let pets = client.pets_by_client(4).unwrap();
        assert_eq!(pets.len(), 1);
        let seen = canned.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.url, "http://localhost:8080/api/pets/cliente/4");

        let (client, canned) = client_with(Ok(json_response(200, "OK", "[]")));
        assert!(client.employees_by_role("TOSADOR").unwrap().is_empty());
        let seen = canned.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.url, "http://localhost:8080/api/funcionarios/cargo/TOSADOR");
    }
}
