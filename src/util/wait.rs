//! Simulated request latency.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_RESOLVE_MESSAGE: &str = "요청 결과 성공입니다.";
pub const DEFAULT_REJECT_MESSAGE: &str = "요청 결과 실패했습니다.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaitError {
    #[error("{0}")]
    Rejected(String),

    #[error("delay of {0} seconds is not representable")]
    InvalidDelay(f64),
}

#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Fail with `reject_message` instead of succeeding.
    pub force_rejected: bool,
    pub resolve_message: String,
    pub reject_message: String,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            force_rejected: false,
            resolve_message: DEFAULT_RESOLVE_MESSAGE.to_string(),
            reject_message: DEFAULT_REJECT_MESSAGE.to_string(),
        }
    }
}

/// Sleep `delay_secs`, then succeed or fail with the configured message.
///
/// Negative delays do not sleep. NaN, infinite and overflowing delays fail
/// before sleeping.
pub async fn wait(delay_secs: f64, options: WaitOptions) -> Result<String, WaitError> {
    let delay = if delay_secs <= 0.0 {
        Duration::ZERO
    } else {
        Duration::try_from_secs_f64(delay_secs).map_err(|_| WaitError::InvalidDelay(delay_secs))?
    };

    tokio::time::sleep(delay).await;
    if options.force_rejected {
        Err(WaitError::Rejected(options.reject_message))
    } else {
        Ok(options.resolve_message)
    }
}
