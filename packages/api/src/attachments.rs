//! Report attachments.
//!
//! Files are validated against an [`UploadPolicy`] before anything is sent, then
//! posted one per request as multipart field `file`. The server stores the bytes in
//! object storage and answers with the new attachment id only, so the
//! [`ReportAttachment`] returned here is assembled from what the client already knows.

use chrono::Utc;
use serde::Deserialize;
use store::ReportAttachment;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{HttpRequest, Transport};
use crate::upload::{UploadFile, UploadPolicy};

#[derive(Debug, Deserialize)]
struct UploadReceipt {
    attachment_id: i64,
    #[serde(default)]
    file_key: Option<String>,
}

/// Bytes of a downloaded attachment.
#[derive(Clone, Debug, PartialEq)]
pub struct Download {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Storage key the server uses for an upload when it does not report one.
pub fn default_file_key(report_id: i64, file_name: &str) -> String {
    format!("reports/{report_id}/{file_name}")
}

impl<T: Transport> ApiClient<T> {
    /// Upload one file. Oversized or disallowed files fail with
    /// [`ApiError::Upload`] without touching the network.
    pub async fn upload_attachment(
        &self,
        report_id: i64,
        file: UploadFile,
        policy: &UploadPolicy,
    ) -> Result<ReportAttachment, ApiError> {
        policy.check(&file)?;

        let file_name = file.name.clone();
        let content_type = if file.content_type.is_empty() {
            "application/octet-stream".to_string()
        } else {
            file.content_type.clone()
        };
        let file_size = file.size();
        debug!(report_id, %file_name, file_size, "uploading attachment");

        let request = HttpRequest::post(format!("/reports/{report_id}/attachments")).file(file);
        let receipt: UploadReceipt = self.fetch(request).await?;

        let now = Utc::now().naive_utc();
        Ok(ReportAttachment {
            id: receipt.attachment_id,
            report_id: Some(report_id),
            file_key: receipt
                .file_key
                .unwrap_or_else(|| default_file_key(report_id, &file_name)),
            file_name,
            file_size,
            content_type,
            created_at: now,
            updated_at: now,
        })
    }

    /// Upload several files one after the other. Results keep the input order and
    /// a failed file does not stop the rest.
    pub async fn upload_attachments(
        &self,
        report_id: i64,
        files: Vec<UploadFile>,
        policy: &UploadPolicy,
    ) -> Vec<Result<ReportAttachment, ApiError>> {
        let mut results = Vec::with_capacity(files.len());
        for file in files {
            let name = file.name.clone();
            let result = self.upload_attachment(report_id, file, policy).await;
            if let Err(e) = &result {
                warn!("Upload of {name} to report {report_id} failed: {e}");
            }
            results.push(result);
        }
        results
    }

    /// Attachments come embedded in the report.
    pub async fn list_attachments(&self, report_id: i64) -> Result<Vec<ReportAttachment>, ApiError> {
        Ok(self.get_report(report_id).await?.attachments)
    }

    pub async fn delete_attachment(&self, report_id: i64, attachment_id: i64) -> Result<(), ApiError> {
        self.execute(HttpRequest::delete(format!(
            "/reports/{report_id}/attachments/{attachment_id}"
        )))
        .await?;
        Ok(())
    }

    /// Fetch the file with the bearer token attached. The server redirects to a
    /// short-lived storage URL, which the transport follows.
    pub async fn download_attachment(
        &self,
        report_id: i64,
        attachment_id: i64,
    ) -> Result<Download, ApiError> {
        let response = self
            .execute(HttpRequest::get(format!(
                "/reports/{report_id}/attachments/{attachment_id}/download"
            )))
            .await?;
        Ok(Download {
            content_type: response.content_type,
            bytes: response.body,
        })
    }
}
