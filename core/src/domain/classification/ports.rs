use std::future::Future;

use crate::domain::{
    classification::entities::ImageMime, common::entities::app_errors::CoreError,
};

/// Client trait for the external classification oracle.
///
/// Implementations are pure request/response: they return the raw completion
/// text and leave parsing and persistence to the caller. Transport failures
/// surface as [`CoreError::ClassificationUnavailable`].
#[cfg_attr(test, mockall::automock)]
pub trait ClassifierClient: Send + Sync {
    fn complete_text(
        &self,
        prompt: String,
        max_tokens: u32,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn complete_with_image(
        &self,
        prompt: String,
        image: Vec<u8>,
        mime: ImageMime,
        max_tokens: u32,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
