//! Amazon S3 backend

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;

use pdfdesk_core::config::object_url;
use pdfdesk_core::ObjectStoreSettings;

use super::{ObjectStore, ObjectStoreError};

/// S3 error codes that mean the caller's credentials are missing or wrong.
const CREDENTIAL_ERROR_CODES: &[&str] = &[
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "AccessDenied",
    "ExpiredToken",
    "InvalidToken",
];

/// S3-backed object store
///
/// Credentials come from the standard AWS provider chain.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client from resolved settings and the ambient AWS environment.
    pub async fn from_settings(settings: &ObjectStoreSettings) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &settings.endpoint {
            // S3-compatible servers rarely support virtual-hosted buckets
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        tracing::info!(
            bucket = %settings.bucket,
            region = ?shared.region(),
            endpoint = ?settings.endpoint,
            "S3 object store configured"
        );

        Self {
            client: Client::from_conf(builder.build()),
            bucket: settings.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, body: Bytes) -> Result<String, ObjectStoreError> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/pdf")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(map_put_object_error)?;

        tracing::debug!(bucket = %self.bucket, key, size, "Uploaded object");
        Ok(object_url(&self.bucket, key))
    }
}

/// Map a PutObject SDK error to ObjectStoreError.
///
/// Requests S3 answered are judged by error code. Requests that never left
/// the process failed while being built and signed, which is where a missing
/// or unusable credential provider surfaces. Transport failures are
/// availability problems.
fn map_put_object_error<R>(err: SdkError<PutObjectError, R>) -> ObjectStoreError
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let detail = DisplayErrorContext(&err).to_string();
    let rejected_credentials = match &err {
        SdkError::ServiceError(_) | SdkError::ResponseError(_) => err
            .code()
            .is_some_and(|code| CREDENTIAL_ERROR_CODES.contains(&code)),
        SdkError::ConstructionFailure(_) => is_identity_failure(&detail),
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => false,
        _ => false,
    };

    if rejected_credentials {
        ObjectStoreError::Credentials(detail)
    } else {
        ObjectStoreError::Unavailable(detail)
    }
}

/// Signing failures name the identity they could not resolve.
fn is_identity_failure(detail: &str) -> bool {
    let detail = detail.to_ascii_lowercase();
    detail.contains("credential") || detail.contains("identity")
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;

    fn service_error(code: &str) -> SdkError<PutObjectError, ()> {
        let meta = ErrorMetadata::builder().code(code).message("rejected").build();
        SdkError::service_error(PutObjectError::generic(meta), ())
    }

    #[test]
    fn rejected_access_key_is_credentials() {
        let err = map_put_object_error(service_error("InvalidAccessKeyId"));
        assert!(matches!(err, ObjectStoreError::Credentials(_)));
    }

    #[test]
    fn signature_mismatch_is_credentials() {
        let err = map_put_object_error(service_error("SignatureDoesNotMatch"));
        assert!(err.is_credentials());
    }

    #[test]
    fn missing_bucket_is_unavailable() {
        let err = map_put_object_error(service_error("NoSuchBucket"));
        assert!(matches!(err, ObjectStoreError::Unavailable(_)));
    }

    #[test]
    fn unresolved_identity_is_credentials() {
        let err: SdkError<PutObjectError, ()> =
            SdkError::construction_failure("no credentials in the property bag");
        assert!(matches!(
            map_put_object_error(err),
            ObjectStoreError::Credentials(_)
        ));
    }

    #[test]
    fn other_construction_failure_is_unavailable() {
        let err: SdkError<PutObjectError, ()> =
            SdkError::construction_failure("invalid endpoint: relative URL without a base");
        assert!(matches!(
            map_put_object_error(err),
            ObjectStoreError::Unavailable(_)
        ));
    }

    #[test]
    fn timeout_is_unavailable_even_if_message_mentions_credentials() {
        let err: SdkError<PutObjectError, ()> =
            SdkError::timeout_error("timed out loading credentials from IMDS");
        assert!(matches!(
            map_put_object_error(err),
            ObjectStoreError::Unavailable(_)
        ));
    }
}
