use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cancels the token on Ctrl-C. Returns early when something else cancels the token first, so
/// it can be joined with the rest of the session.
pub async fn detect_shutdown(cancelation: CancellationToken) {
    select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down");
            cancelation.cancel();
        },
        _ = cancelation.cancelled() => (),
    };
}
