//! Elapsed-time logging.

use std::future::Future;
use std::time::{Duration, Instant};

/// Await `fut`, log `label : Nms`, and return its output with the elapsed time.
pub async fn measure_time<F, T>(label: &str, fut: F) -> (T, Duration)
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    let elapsed = start.elapsed();
    tracing::info!(
        label = %label,
        elapsed_ms = elapsed.as_millis() as u64,
        "{} : {}ms",
        label,
        elapsed.as_millis()
    );
    (out, elapsed)
}
