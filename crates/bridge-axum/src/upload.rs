//! Multipart upload extraction shared by the publish and interpret handlers.

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartRejection};
use bytes::Bytes;

use crate::error::HttpError;

/// Text field carrying the previous interpretation, in either spelling.
const PRIOR_FIELDS: [&str; 2] = ["priorHypothesis", "prior_hypothesis"];

/// The binary payload of a multipart request plus the optional prior text.
#[derive(Debug, Default)]
pub(crate) struct Upload {
    pub data: Bytes,
    /// Content type the client declared for the payload part.
    pub content_type: Option<String>,
    pub prior_hypothesis: String,
}

/// Read every part of the body.
///
/// The first file part becomes the payload whatever its field name. A part
/// counts as a file when it carries a filename or a content type; plain text
/// fields other than the prior hypothesis are skipped.
pub(crate) async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Upload, HttpError> {
    let mut multipart = multipart?;
    let mut payload: Option<(Bytes, Option<String>)> = None;
    let mut prior_hypothesis = String::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name().is_some_and(|name| PRIOR_FIELDS.contains(&name)) {
            prior_hypothesis = field.text().await?;
            continue;
        }
        if payload.is_none() && is_file(&field) {
            let content_type = field.content_type().map(str::to_owned);
            payload = Some((field.bytes().await?, content_type));
        }
    }

    let (data, content_type) =
        payload.ok_or_else(|| HttpError::BadRequest("missing file part".to_string()))?;

    Ok(Upload {
        data,
        content_type,
        prior_hypothesis,
    })
}

fn is_file(field: &Field<'_>) -> bool {
    field.file_name().is_some() || field.content_type().is_some()
}
