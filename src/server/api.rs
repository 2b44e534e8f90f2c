use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode, Url,
};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    config::ApiConfig,
    report::{Report, WireReport},
    submission::Submission,
    Result,
};

use super::ReportsBackend;

/// HTTP client for the reports API.
pub struct ReportsApiClient {
    client: Client,
    config: ApiConfig,
}

impl ReportsApiClient {
    const REPORTS: &str = "reports";

    /// Build a client for the API described by `config`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn multipart(submission: &Submission) -> reqwest::Result<Form> {
        let mut form = Form::new();
        for (name, value) in submission.payload.fields() {
            form = form.text(name, value);
        }

        if let Some(image) = &submission.image {
            let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
            if let Some(content_type) = image.content_type {
                part = part.mime_str(content_type)?;
            }
            form = form.part("image", part);
        }

        Ok(form)
    }

    async fn post_report(&self, url: Url, submission: &Submission) -> reqwest::Result<WireReport> {
        let form = Self::multipart(submission)?;

        self.client
            .post(url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn fetch_reports(&self, url: Url) -> reqwest::Result<Vec<Value>> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn fetch_report(&self, url: Url) -> reqwest::Result<Option<WireReport>> {
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        response.error_for_status()?.json().await.map(Some)
    }
}

/// Log a transport failure and hand it back unchanged.
fn logged<T>(what: &str, url: &Url, result: reqwest::Result<T>) -> Result<T> {
    result.map_err(|e| {
        error!(%url, status = ?e.status(), "error {what}: {e}");
        e.into()
    })
}

/// Field-level oddities are absorbed by [`WireReport`]. Only a record that is
/// not an object at all ends up here, and it is skipped.
fn decode_record((index, record): (usize, Value)) -> Option<Report> {
    match serde_json::from_value::<WireReport>(record) {
        Ok(wire) => Some(wire.into()),
        Err(e) => {
            warn!(index, "skipping undecodable report: {e}");
            None
        }
    }
}

impl ReportsBackend for ReportsApiClient {
    async fn submit(&self, submission: &Submission) -> Result<Report> {
        let url = self.config.endpoint(&[Self::REPORTS]);
        debug!(%url, has_image = submission.image.is_some(), "POST report");

        let created = logged(
            "adding report",
            &url,
            self.post_report(url.clone(), submission).await,
        )?;

        Ok(created.into())
    }

    async fn list_all(&self) -> Result<Vec<Report>> {
        let url = self.config.endpoint(&[Self::REPORTS]);
        debug!(%url, "GET reports");

        let records = logged("fetching reports", &url, self.fetch_reports(url.clone()).await)?;
        debug!(count = records.len(), "fetched reports");

        Ok(records.into_iter().enumerate().filter_map(decode_record).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Report>> {
        // `reports/` with no id is the listing, not a report
        if id.trim().is_empty() {
            debug!("empty report id, nothing to fetch");
            return Ok(None);
        }

        let url = self.config.endpoint(&[Self::REPORTS, id]);
        debug!(%url, "GET report");

        let report = logged("fetching report", &url, self.fetch_report(url.clone()).await)?;
        if report.is_none() {
            debug!(id, "report not found");
        }

        Ok(report.map(Report::from))
    }
}
