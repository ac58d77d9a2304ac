//! Delivery of submit payloads.

use std::future::Future;
use std::time::Duration;

use reqwest::{multipart, Client, Request};

use crate::config::ManagerConfig;
use crate::submit::{PayloadPart, SubmitPayload};
use crate::Result;

/// Status and raw body of a submit response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends a submit payload and hands back whatever the server answered.
///
/// Any HTTP status counts as a response; only failures to reach the server
/// or read the body are errors.
pub trait Transport {
    fn send(
        &self,
        url: &str,
        payload: SubmitPayload,
    ) -> impl Future<Output = Result<TransportResponse>>;
}

/// `POST` as `multipart/form-data` over reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport; `timeout` bounds the whole request when set.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn from_config(config: &ManagerConfig) -> Result<Self> {
        Self::new(config.request_timeout())
    }

    fn build_request(&self, url: &str, payload: &SubmitPayload) -> Result<Request> {
        let mut form = multipart::Form::new();
        for part in payload.parts()? {
            form = match part {
                PayloadPart::Text { name, value } => form.text(name.to_string(), value),
                PayloadPart::File { name, file } => {
                    let part = multipart::Part::bytes(file.bytes.clone())
                        .file_name(file.file_name.clone())
                        .mime_str(&file.content_type)?;
                    form.part(name.to_string(), part)
                }
            };
        }

        Ok(self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .build()?)
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        url: &str,
        payload: SubmitPayload,
    ) -> impl Future<Output = Result<TransportResponse>> {
        let request = self.build_request(url, &payload);
        async move {
            let response = self.client.execute(request?).await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            tracing::debug!("Submit response HTTP {} ({} bytes)", status, body.len());
            Ok(TransportResponse {
                status,
                body: body.to_vec(),
            })
        }
    }
}
