use std::future::Future;

use tracing::warn;

use crate::utils::error::AppError;

/// Run a post-commit side effect that is allowed to fail. The primary
/// write has already committed by the time this runs, so a failure is
/// logged and swallowed, never propagated to the client.
pub async fn best_effort<F, T>(label: &str, effect: F)
where
    F: Future<Output = Result<T, AppError>>,
{
    if let Err(e) = effect.await {
        warn!(side_effect = label, error = %e, "Best-effort side effect failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_best_effort_swallows_errors() {
        // Must not panic or propagate
        best_effort("failing", async {
            Err::<(), _>(AppError::InternalServerError("boom".to_string()))
        })
        .await;

        best_effort("succeeding", async { Ok::<_, AppError>(42) }).await;
    }
}
