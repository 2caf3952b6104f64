use crate::models::{CreateNoteParams, Envelope, ErrorDescriptor, LoginParams, Note, NoteId, Token};
use crate::session::SessionStore;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Failures that do not conform to the response envelope.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("response carries neither data nor errors")]
    EmptyEnvelope,
}

/// Result of a single backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiOutcome<T> {
    Data(T),
    Domain(Vec<ErrorDescriptor>),
    Transport(ApiError),
}

impl<T> From<Envelope<T>> for ApiOutcome<T> {
    fn from(envelope: Envelope<T>) -> Self {
        match envelope {
            Envelope { data: Some(data), .. } => ApiOutcome::Data(data),
            Envelope {
                errors: Some(errors),
                ..
            } if !errors.is_empty() => ApiOutcome::Domain(errors),
            _ => ApiOutcome::Transport(ApiError::EmptyEnvelope),
        }
    }
}

pub type LocalFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// The backend operations the client depends on.
///
/// Futures are not `Send`: the browser runtime is single threaded.
pub trait Backend: Send + Sync {
    fn login<'a>(&'a self, params: &'a LoginParams) -> LocalFuture<'a, ApiOutcome<Token>>;

    fn notes(&self) -> LocalFuture<'_, ApiOutcome<Vec<Note>>>;

    fn note<'a>(&'a self, id: &'a NoteId) -> LocalFuture<'a, ApiOutcome<Note>>;

    fn create_note<'a>(&'a self, params: &'a CreateNoteParams)
        -> LocalFuture<'a, ApiOutcome<Note>>;
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> Option<String> {
        self.session.token().map(|t| format!("Bearer {}", t))
    }

    fn with_auth_header(&self, mut req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(header) = self.auth_header() {
            req = req.header("Authorization", header);
        }
        req
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiOutcome<T> {
        let client = reqwest::Client::new();
        let req = self.with_auth_header(client.get(format!("{}{}", self.base_url, path)));
        Self::send(req).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> ApiOutcome<T> {
        let client = reqwest::Client::new();
        let req = self
            .with_auth_header(client.post(format!("{}{}", self.base_url, path)))
            .json(body);
        Self::send(req).await
    }

    async fn send<T: DeserializeOwned>(req: reqwest::RequestBuilder) -> ApiOutcome<T> {
        let res = match req.send().await {
            Ok(res) => res,
            Err(e) => return ApiOutcome::Transport(ApiError::Network(e.to_string())),
        };

        let status = res.status();
        let body = match res.text().await {
            Ok(body) => body,
            Err(e) => return ApiOutcome::Transport(ApiError::Network(e.to_string())),
        };

        decode_envelope(status.as_u16(), &body)
    }
}

/// Decodes a response body into an outcome.
///
/// The backend reports domain errors inside the envelope even on non-2xx
/// statuses, so the status only matters when the body is not an envelope.
pub(crate) fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> ApiOutcome<T> {
    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(envelope) => envelope.into(),
        Err(_) if !(200..300).contains(&status) => ApiOutcome::Transport(ApiError::Status {
            status,
            body: body.to_string(),
        }),
        Err(e) => ApiOutcome::Transport(ApiError::Decode(e.to_string())),
    }
}

impl Backend for ApiClient {
    fn login<'a>(&'a self, params: &'a LoginParams) -> LocalFuture<'a, ApiOutcome<Token>> {
        Box::pin(self.post("/login", params))
    }

    fn notes(&self) -> LocalFuture<'_, ApiOutcome<Vec<Note>>> {
        Box::pin(self.get("/notes"))
    }

    fn note<'a>(&'a self, id: &'a NoteId) -> LocalFuture<'a, ApiOutcome<Note>> {
        Box::pin(async move {
            let path = format!("/notes/{}", urlencoding::encode(id.as_str()));
            self.get(&path).await
        })
    }

    fn create_note<'a>(
        &'a self,
        params: &'a CreateNoteParams,
    ) -> LocalFuture<'a, ApiOutcome<Note>> {
        Box::pin(self.post("/notes", params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;

    const NOTE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[test]
    fn test_decode_data_envelope() {
        let body = format!(r#"{{"data": {{"noteId": "{NOTE_ID}", "title": "t", "content": "c"}}}}"#);
        match decode_envelope::<Note>(200, &body) {
            ApiOutcome::Data(note) => {
                assert_eq!(note.note_id.as_str(), NOTE_ID);
                assert_eq!(note.content, "c");
            }
            other => panic!("expected data, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_errors_envelope_on_error_status() {
        let body = r#"{"errors": [{"details": "Not found"}]}"#;
        assert_eq!(
            decode_envelope::<Note>(404, body),
            ApiOutcome::Domain(vec![ErrorDescriptor::new("Not found")])
        );
    }

    #[test]
    fn test_decode_empty_envelope_is_transport_failure() {
        assert_eq!(
            decode_envelope::<Note>(200, "{}"),
            ApiOutcome::Transport(ApiError::EmptyEnvelope)
        );
        assert_eq!(
            decode_envelope::<Note>(200, r#"{"errors": []}"#),
            ApiOutcome::Transport(ApiError::EmptyEnvelope)
        );
    }

    #[test]
    fn test_decode_non_envelope_body() {
        assert!(matches!(
            decode_envelope::<Note>(502, "<html>bad gateway</html>"),
            ApiOutcome::Transport(ApiError::Status { status: 502, .. })
        ));
        assert!(matches!(
            decode_envelope::<Note>(200, "not json"),
            ApiOutcome::Transport(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_api_client_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8871/api/v1/", Arc::new(MemorySession::default()));
        assert_eq!(client.base_url(), "http://localhost:8871/api/v1");
    }

    #[test]
    fn test_api_client_auth_header_follows_session() {
        let session = Arc::new(MemorySession::default());
        let client = ApiClient::new("http://localhost:8871/api/v1", session.clone());
        assert!(client.auth_header().is_none());

        session.set_authorized("my-jwt-token");
        assert_eq!(client.auth_header().as_deref(), Some("Bearer my-jwt-token"));

        session.clear();
        assert!(client.auth_header().is_none());
    }
}
