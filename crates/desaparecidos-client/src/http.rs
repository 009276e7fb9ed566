//! reqwest implementation of [`CaseApi`].

use async_trait::async_trait;
use desaparecidos_core::{
    ApiError, CaseApi, Filter, InfoSubmission, Person, PersonPage, Statistics, SupplementaryInfo,
};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

/// Public endpoint of the PJC-MT missing-persons API.
pub const DEFAULT_BASE_URL: &str = "https://abitus-api.geia.vip/v1";

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const INFO_PATH: &str = "/ocorrencias/informacoes-desaparecido";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_decode() => ApiError::Decode(e.to_string()),
            ClientError::Http(e) => ApiError::Transport(e.to_string()),
            ClientError::Server { status, body } => ApiError::Server { status, body },
            ClientError::Json(e) => ApiError::Decode(e.to_string()),
        }
    }
}

/// Client for the case API.
pub struct PortalClient {
    client: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    /// Create a client for the given base URL.
    ///
    /// `base_url` should be like `https://abitus-api.geia.vip/v1`; a trailing
    /// slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn person_request(&self, id: u64) -> Result<reqwest::Request, ClientError> {
        Ok(self.client.get(self.url(&format!("/pessoas/{id}"))).build()?)
    }

    fn search_request(&self, filter: &Filter, page: u32) -> Result<reqwest::Request, ClientError> {
        Ok(self
            .client
            .get(self.url("/pessoas/aberto/filtro"))
            .query(&filter.query(page))
            .build()?)
    }

    fn statistics_request(&self) -> Result<reqwest::Request, ClientError> {
        Ok(self
            .client
            .get(self.url("/pessoas/aberto/estatistico"))
            .build()?)
    }

    fn feed_request(&self, occurrence_id: u64) -> Result<reqwest::Request, ClientError> {
        Ok(self
            .client
            .get(self.url(INFO_PATH))
            .query(&[("ocorrenciaId", occurrence_id)])
            .build()?)
    }

    /// Text, date and occurrence id travel in the query string; the files
    /// go in the multipart body, one `files` part each.
    fn submit_request(
        &self,
        submission: &InfoSubmission,
    ) -> Result<reqwest::Request, ClientError> {
        let mut form = Form::new();
        for attachment in &submission.attachments {
            let part = Part::bytes(attachment.bytes.clone())
                .file_name(attachment.file_name.clone())
                .mime_str(&attachment.mime)?;
            form = form.part("files", part);
        }
        Ok(self
            .client
            .post(self.url(INFO_PATH))
            .query(&submission.query())
            .multipart(form)
            .build()?)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<T, ClientError> {
        info!(method = %request.method(), url = %request.url(), "calling case API");
        let resp = self.client.execute(request).await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                body,
            });
        }
        debug!(bytes = body.len(), "response received");
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CaseApi for PortalClient {
    async fn person(&self, id: u64) -> Result<Person, ApiError> {
        let request = self.person_request(id)?;
        Ok(self.execute(request).await?)
    }

    async fn search(&self, filter: &Filter, page: u32) -> Result<PersonPage, ApiError> {
        let request = self.search_request(filter, page)?;
        let result: PersonPage = self.execute(request).await?;
        info!(
            page = result.number,
            count = result.content.len(),
            total = result.total_elements,
            "roster page fetched"
        );
        Ok(result)
    }

    async fn statistics(&self) -> Result<Statistics, ApiError> {
        let request = self.statistics_request()?;
        Ok(self.execute(request).await?)
    }

    async fn occurrence_info(
        &self,
        occurrence_id: u64,
    ) -> Result<Vec<SupplementaryInfo>, ApiError> {
        let request = self.feed_request(occurrence_id)?;
        let entries: Vec<SupplementaryInfo> = self.execute(request).await?;
        info!(occurrence_id, count = entries.len(), "information feed fetched");
        Ok(entries)
    }

    async fn submit_info(
        &self,
        submission: &InfoSubmission,
    ) -> Result<SupplementaryInfo, ApiError> {
        let request = self.submit_request(submission)?;
        let created: SupplementaryInfo = self.execute(request).await?;
        info!(id = created.id, "information created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use desaparecidos_core::{Attachment, CaseStatus, Sex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client() -> PortalClient {
        PortalClient::new("http://api.test/v1").unwrap()
    }

    fn query_pairs(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Serve one canned HTTP response on a local port and return the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut read = 0;
            while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf[read..]).await.unwrap();
                if n == 0 {
                    break;
                }
                read += n;
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{addr}")
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = PortalClient::new("http://localhost:8080/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn person_request_path() {
        let req = client().person_request(42).unwrap();
        assert_eq!(req.method(), reqwest::Method::GET);
        assert_eq!(req.url().as_str(), "http://api.test/v1/pessoas/42");
    }

    #[test]
    fn search_request_carries_filter() {
        let filter = Filter {
            name: Some("Ana Maria".into()),
            sex: Some(Sex::Female),
            status: Some(CaseStatus::Missing),
            ..Default::default()
        };
        let req = client().search_request(&filter, 3).unwrap();
        assert_eq!(req.url().path(), "/v1/pessoas/aberto/filtro");
        let q = query_pairs(&req);
        assert!(q.contains(&("pagina".into(), "3".into())));
        assert!(q.contains(&("porPagina".into(), "10".into())));
        assert!(q.contains(&("nome".into(), "Ana Maria".into())));
        assert!(q.contains(&("sexo".into(), "FEMININO".into())));
        assert!(q.contains(&("status".into(), "DESAPARECIDO".into())));
    }

    #[test]
    fn statistics_and_feed_requests() {
        let c = client();
        assert_eq!(
            c.statistics_request().unwrap().url().path(),
            "/v1/pessoas/aberto/estatistico"
        );
        let req = c.feed_request(7).unwrap();
        assert_eq!(req.url().path(), "/v1/ocorrencias/informacoes-desaparecido");
        assert_eq!(query_pairs(&req), vec![("ocorrenciaId".into(), "7".into())]);
    }

    #[test]
    fn submit_request_is_multipart_post() {
        let submission = InfoSubmission {
            text: "Vista perto do mercado".into(),
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            occurrence_id: 1,
            attachments: vec![Attachment::new("foto.jpg", vec![1, 2, 3])],
        };
        let req = client().submit_request(&submission).unwrap();
        assert_eq!(req.method(), reqwest::Method::POST);
        assert!(req.url().as_str().contains("/ocorrencias/informacoes-desaparecido"));
        let q = query_pairs(&req);
        assert_eq!(
            q,
            vec![
                ("informacao".into(), "Vista perto do mercado".into()),
                ("data".into(), "2025-09-01".into()),
                ("ocoId".into(), "1".into()),
            ]
        );
        let content_type = req
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
    }

    #[test]
    fn invalid_attachment_mime_is_an_error() {
        let submission = InfoSubmission {
            text: "texto válido".into(),
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            occurrence_id: 1,
            attachments: vec![Attachment {
                file_name: "x".into(),
                mime: "not a mime".into(),
                bytes: vec![],
            }],
        };
        assert!(matches!(
            client().submit_request(&submission),
            Err(ClientError::Http(_))
        ));
    }

    #[test]
    fn client_error_maps_to_api_error() {
        let err: ApiError = ClientError::Server {
            status: 404,
            body: "nope".into(),
        }
        .into();
        assert!(matches!(err, ApiError::Server { status: 404, .. }));

        let json_err = serde_json::from_str::<Person>("{").unwrap_err();
        let err: ApiError = ClientError::Json(json_err).into();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn person_roundtrip_over_http() {
        let base = serve_once("200 OK", r#"{"id": 1, "nome": "João Silva", "ultimaOcorrencia": {"ocoId": 1}}"#).await;
        let client = PortalClient::new(base).unwrap();
        let person = client.person(1).await.unwrap();
        assert_eq!(person.name, "João Silva");
        assert_eq!(person.latest_occurrence.unwrap().id, 1);
    }

    #[tokio::test]
    async fn server_error_status_surfaces() {
        let base = serve_once(
            "500 Internal Server Error",
            r#"{"message": "falha interna"}"#,
        )
        .await;
        let client = PortalClient::new(base).unwrap();
        let err = client.statistics().await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert_eq!(err.detail(), "falha interna");
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let base = serve_once("200 OK", "not json").await;
        let client = PortalClient::new(base).unwrap();
        let err = client.occurrence_info(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = PortalClient::new(format!("http://{addr}")).unwrap();
        let err = client.statistics().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
