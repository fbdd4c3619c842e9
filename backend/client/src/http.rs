//! Live HTTP backend for the aB-Agenta REST API.
//!
//! Marshals each operation into its exact request shape (path segments,
//! query parameters only for options actually present, `ab-*` headers,
//! body) and reads pagination metadata back out of response headers.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use abagenta_config::Config;
use abagenta_core::{
    AgentaError, ApiFailure, DocumentContent, DocumentUpload, Record, RecordPage, RecordQuery,
};

use crate::backend::AgentaBackend;

const API_PREFIX: &str = "/api2_1";

/// Filename inside a `content-disposition` header, quoted or bare.
static FILENAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"filename="?([^"]+)"?$"#).unwrap());

/// Live backend issuing HTTP calls against a configured aB-Agenta endpoint.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    /// Snapshot of the headers applied to every request, kept for failure
    /// diagnostics.
    sent_headers: Vec<(String, String)>,
}

impl HttpBackend {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(value) = &config.service_password {
            headers.insert("ab-servicepassword", HeaderValue::from_str(value)?);
        }
        if let Some(value) = &config.data_directory {
            headers.insert("ab-datadirectory", HeaderValue::from_str(value)?);
        }
        if let Some(value) = &config.client_secret {
            headers.insert("ab-client-secret", HeaderValue::from_str(value)?);
        }

        let mut sent_headers: Vec<(String, String)> = headers
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    value.to_str().unwrap_or("<binary>").to_string(),
                )
            })
            .collect();
        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            let token = BASE64.encode(format!("{user}:{pass}"));
            sent_headers.push(("authorization".to_string(), format!("Basic {token}")));
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            sent_headers,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => request.basic_auth(user, Some(pass)),
            _ => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AgentaError> {
        let response = self.with_auth(request).send().await.map_err(transport)?;
        self.check(response).await
    }

    /// Turn a non-2xx response into an `ApiFailure` carrying everything the
    /// diagnostics layer needs.
    async fn check(&self, response: Response) -> Result<Response, AgentaError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(AgentaError::Api(ApiFailure {
            status,
            body,
            url,
            headers: self.sent_headers.clone(),
        }))
    }

    async fn record_page(&self, response: Response) -> Result<RecordPage, AgentaError> {
        let total_count = header_value(&response, "ab-totalcount").and_then(|v| v.parse().ok());
        let content_range = header_value(&response, "content-range");
        let records: Vec<Record> = response.json().await.map_err(transport)?;
        Ok(RecordPage {
            records,
            total_count,
            content_range,
        })
    }

    async fn created_id(&self, response: Response) -> Result<String, AgentaError> {
        let body = response.text().await.map_err(transport)?;
        Ok(id_from_body(&body))
    }
}

#[async_trait]
impl AgentaBackend for HttpBackend {
    async fn get_record(
        &self,
        objecttype: &str,
        id: &str,
        fields: Option<&str>,
        resolvetexts: Option<bool>,
    ) -> Result<Record, AgentaError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(fields) = fields {
            params.push(("fields", fields.to_string()));
        }
        if let Some(resolvetexts) = resolvetexts {
            params.push(("resolvetexts", resolvetexts.to_string()));
        }

        debug!(objecttype, id, "GET record");
        let response = self
            .send(
                self.client
                    .get(self.url(&format!("/records/{objecttype}/{id}")))
                    .query(&params),
            )
            .await?;
        response.json().await.map_err(transport)
    }

    async fn get_records(
        &self,
        objecttype: &str,
        query: &RecordQuery,
    ) -> Result<RecordPage, AgentaError> {
        debug!(objecttype, "GET records");
        let response = self
            .send(
                self.client
                    .get(self.url(&format!("/records/{objecttype}")))
                    .query(&list_query(query)),
            )
            .await?;
        self.record_page(response).await
    }

    async fn filter_records(
        &self,
        objecttype: &str,
        filter: &Value,
        query: &RecordQuery,
    ) -> Result<RecordPage, AgentaError> {
        debug!(objecttype, "FILTER records");
        let response = self
            .send(
                self.client
                    .post(self.url(&format!("/records/{objecttype}")))
                    .query(&list_query(query))
                    .json(filter),
            )
            .await?;
        self.record_page(response).await
    }

    async fn create_record(
        &self,
        objecttype: &str,
        data: &Value,
        idempotency_key: Option<&str>,
    ) -> Result<String, AgentaError> {
        let mut request = self
            .client
            .post(self.url(&format!("/records/{objecttype}/new")))
            .json(data);
        if let Some(key) = idempotency_key {
            request = request.header("ab-idempotency-key", key);
        }

        debug!(objecttype, "CREATE record");
        let response = self.send(request).await?;
        self.created_id(response).await
    }

    async fn download_document(&self, id: &str) -> Result<DocumentContent, AgentaError> {
        debug!(id, "DOWNLOAD document");
        let response = self
            .send(self.client.get(self.url(&format!("/documents/{id}"))))
            .await?;

        let content_type = header_value(&response, CONTENT_TYPE.as_str());
        let filename = header_value(&response, CONTENT_DISPOSITION.as_str())
            .as_deref()
            .and_then(filename_from_disposition);
        let data = response.bytes().await.map_err(transport)?.to_vec();

        Ok(DocumentContent {
            data,
            content_type,
            filename,
        })
    }

    async fn upload_document(&self, upload: DocumentUpload) -> Result<String, AgentaError> {
        let mut params: Vec<(&str, String)> = vec![("addressid", upload.addressid.clone())];
        if let Some(value) = &upload.referenceid {
            params.push(("referenceid", value.clone()));
        }
        if let Some(value) = &upload.referenceobjecttype {
            params.push(("referenceobjecttype", value.clone()));
        }
        if let Some(value) = &upload.filename {
            params.push(("filename", value.clone()));
        }
        if let Some(value) = &upload.info {
            params.push(("info", value.clone()));
        }
        if let Some(value) = &upload.doc_type {
            params.push(("type", value.clone()));
        }
        if let Some(value) = &upload.changedate {
            params.push(("changedate", value.clone()));
        }

        // Raw bytes as the request body, not multipart.
        let mut request = self
            .client
            .post(self.url("/documents/new"))
            .query(&params)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(upload.content);
        if let Some(key) = &upload.idempotency_key {
            request = request.header("ab-idempotency-key", key);
        }

        debug!(addressid = %upload.addressid, "UPLOAD document");
        let response = self.send(request).await?;
        self.created_id(response).await
    }

    async fn get_objecttypes(&self) -> Result<Vec<Value>, AgentaError> {
        let response = self.send(self.client.get(self.url("/objecttypes"))).await?;
        response.json().await.map_err(transport)
    }

    async fn filter_objecttypes(&self, filter: &Value) -> Result<Vec<Value>, AgentaError> {
        let response = self
            .send(self.client.post(self.url("/objecttypes")).json(filter))
            .await?;
        response.json().await.map_err(transport)
    }

    async fn get_objecttype(&self, objecttype: &str) -> Result<Value, AgentaError> {
        let response = self
            .send(self.client.get(self.url(&format!("/objecttype/{objecttype}"))))
            .await?;
        response.json().await.map_err(transport)
    }

    async fn get_properties(&self, objecttype: &str) -> Result<Vec<Value>, AgentaError> {
        let response = self
            .send(self.client.get(self.url(&format!("/properties/{objecttype}"))))
            .await?;
        response.json().await.map_err(transport)
    }
}

fn transport(err: reqwest::Error) -> AgentaError {
    AgentaError::Transport(err.to_string())
}

/// Query pairs for the list operations; options left unset stay off the wire.
fn list_query(query: &RecordQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(value) = &query.fields {
        params.push(("fields", value.clone()));
    }
    if let Some(value) = &query.order {
        params.push(("order", value.clone()));
    }
    if let Some(value) = query.limit {
        params.push(("limit", value.to_string()));
    }
    if let Some(value) = query.offset {
        params.push(("offset", value.to_string()));
    }
    if let Some(value) = query.resolvetexts {
        params.push(("resolvetexts", value.to_string()));
    }
    if let Some(value) = query.deletedrecords {
        params.push(("deletedrecords", value.to_string()));
    }
    if let Some(value) = query.archivedrecords {
        params.push(("archivedrecords", value.to_string()));
    }
    params
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn filename_from_disposition(disposition: &str) -> Option<String> {
    FILENAME_PATTERN
        .captures(disposition)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// The create endpoints answer with the new identifier, sometimes wrapped
/// as a JSON string.
fn id_from_body(body: &str) -> String {
    match serde_json::from_str::<String>(body.trim()) {
        Ok(id) => id,
        Err(_) => body.trim().to_string(),
    }
}
