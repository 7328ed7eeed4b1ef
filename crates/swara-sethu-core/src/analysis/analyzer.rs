use crate::{AnalysisResult, CoreResult, EncodedPayload};

use std::future::Future;

/// Something that turns an encoded payload into an [`AnalysisResult`]
/// with a single best-effort request.
pub trait Analyzer {
    /// Confirm a credential is available before any submission.
    fn ensure_authorized(&self) -> impl Future<Output = CoreResult<()>> + Send;

    /// Issue exactly one request. No retry, no partial results.
    fn analyze(
        &self,
        payload: &EncodedPayload,
    ) -> impl Future<Output = CoreResult<AnalysisResult>> + Send;
}
