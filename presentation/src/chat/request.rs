//! Running one request with Ctrl-C cancellation

use ganesha_application::{
    RespondError, RespondInput, RespondOutput, RespondUseCase, StageNotifier,
};
use std::future::Future;
use std::io;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Run `input` through the use case, cancelling in-flight calls on Ctrl-C.
///
/// A cancelled request still finishes with the fallback reply, so the
/// session history stays consistent.
pub async fn respond_interruptibly(
    use_case: &RespondUseCase,
    input: RespondInput,
    progress: &dyn StageNotifier,
) -> Result<RespondOutput, RespondError> {
    respond_until(
        use_case,
        input,
        progress,
        signal_or_pending(tokio::signal::ctrl_c()),
    )
    .await
}

/// Resolve when `signal` fires. If the handler cannot be installed, never
/// resolve, so the request runs to completion instead of being cancelled.
async fn signal_or_pending<S>(signal: S)
where
    S: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Same as [`respond_interruptibly`], cancelling when `interrupt` resolves
pub(crate) async fn respond_until<I>(
    use_case: &RespondUseCase,
    input: RespondInput,
    progress: &dyn StageNotifier,
    interrupt: I,
) -> Result<RespondOutput, RespondError>
where
    I: Future<Output = ()>,
{
    let token = CancellationToken::new();
    let request = use_case.execute(input.with_cancellation(token.clone()), progress);
    tokio::pin!(request);
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            result = &mut request => return result,
            _ = &mut interrupt, if !token.is_cancelled() => {
                info!("Interrupted, cancelling in-flight request");
                token.cancel();
            }
        }
    }
}
