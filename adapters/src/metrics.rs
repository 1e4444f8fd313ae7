//! Gateway metrics

use gateway_core::{
    AuthorizationResponse, CaptureResponse, Error, Operation, Processor, RefundResponse,
    Result, VoidResponse,
};
use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, HistogramVec};
use std::future::Future;
use std::time::Instant;
use tracing::{info, warn};

lazy_static::lazy_static! {
    pub static ref GATEWAY_REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "gateway_requests_total",
        "Total gateway operations",
        &["processor", "operation", "outcome"]
    )
    .unwrap();

    pub static ref GATEWAY_REQUEST_DURATION: HistogramVec = register_histogram_vec!(
        "gateway_request_duration_seconds",
        "Gateway operation duration, build through translate",
        &["processor", "operation"]
    )
    .unwrap();
}

/// Canonical responses that carry a processor verdict
pub trait Outcome {
    /// Processor approved the operation
    fn approved(&self) -> bool;

    /// Canonical error code, if any
    fn error_code(&self) -> Option<&str>;
}

macro_rules! impl_outcome {
    ($($ty:ty),+) => {
        $(
            impl Outcome for $ty {
                fn approved(&self) -> bool {
                    self.success
                }

                fn error_code(&self) -> Option<&str> {
                    self.error_code.as_deref()
                }
            }
        )+
    };
}

impl_outcome!(AuthorizationResponse, CaptureResponse, VoidResponse, RefundResponse);

/// Outcome label for a finished operation
pub fn outcome_label<R: Outcome>(result: &Result<R>) -> &'static str {
    match result {
        Ok(response) if response.approved() => "approved",
        Ok(_) => "declined",
        Err(Error::MalformedRequest { .. }) => "malformed",
        Err(Error::Transport(_)) => "transport_error",
        Err(Error::Config(_)) => "config_error",
    }
}

/// Run one gateway operation, recording its duration and outcome
pub async fn observe<R, F>(processor: Processor, operation: Operation, op: F) -> Result<R>
where
    R: Outcome,
    F: Future<Output = Result<R>>,
{
    let start = Instant::now();
    let result = op.await;
    let elapsed = start.elapsed();

    GATEWAY_REQUEST_DURATION
        .with_label_values(&[processor.as_str(), operation.as_str()])
        .observe(elapsed.as_secs_f64());

    let outcome = outcome_label(&result);
    GATEWAY_REQUESTS_TOTAL
        .with_label_values(&[processor.as_str(), operation.as_str(), outcome])
        .inc();

    match &result {
        Ok(response) if response.approved() => {
            info!("{} {} approved in {:?}", processor, operation, elapsed);
        }
        Ok(response) => {
            info!(
                "{} {} declined ({}) in {:?}",
                processor,
                operation,
                response.error_code().unwrap_or("unknown"),
                elapsed
            );
        }
        Err(e) => {
            warn!("{} {} failed: {}", processor, operation, e);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::TransportError;

    #[test]
    fn test_outcome_labels() {
        let approved: Result<VoidResponse> = Ok(VoidResponse {
            success: true,
            ..Default::default()
        });
        let declined: Result<VoidResponse> = Ok(VoidResponse::default());
        let malformed: Result<VoidResponse> =
            Err(Error::malformed(Processor::Orbital, Operation::Void, "missing order id"));
        let transport: Result<VoidResponse> =
            Err(TransportError::Connection("refused".to_string()).into());

        assert_eq!(outcome_label(&approved), "approved");
        assert_eq!(outcome_label(&declined), "declined");
        assert_eq!(outcome_label(&malformed), "malformed");
        assert_eq!(outcome_label(&transport), "transport_error");
    }

    #[tokio::test]
    async fn test_observe_counts_outcome() {
        let counter = GATEWAY_REQUESTS_TOTAL.with_label_values(&[
            Processor::Cybersource.as_str(),
            Operation::Refund.as_str(),
            "declined",
        ]);
        let before = counter.get();

        let result = observe(Processor::Cybersource, Operation::Refund, async {
            Ok(RefundResponse {
                success: false,
                transaction_reference: "1".to_string(),
                error_code: Some("refund_exceeds_captured".to_string()),
            })
        })
        .await
        .unwrap();

        assert!(!result.success);
        assert!(counter.get() >= before + 1.0);
    }
}
