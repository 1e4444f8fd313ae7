//! Gateway capability set

use crate::{types::*, Result};
use async_trait::async_trait;

/// The contract every processor adapter implements.
///
/// Implementations hold only immutable credentials and a transport handle,
/// so one instance can serve any number of concurrent calls. Each call is a
/// single round trip; no retries happen at this layer.
///
/// A processor decline is `Ok` with `success == false`. `Err` means the
/// request was malformed (nothing was sent) or the transport failed.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Processor behind this adapter
    fn processor(&self) -> Processor;

    /// Authorize funds on a card
    async fn authorize(&self, request: &AuthorizationRequest) -> Result<AuthorizationResponse>;

    /// Capture a prior authorization
    async fn capture(&self, request: &CaptureRequest) -> Result<CaptureResponse>;

    /// Void an uncaptured authorization
    async fn void(&self, request: &VoidRequest) -> Result<VoidResponse>;

    /// Refund a captured transaction
    async fn refund(&self, request: &RefundRequest) -> Result<RefundResponse>;
}
