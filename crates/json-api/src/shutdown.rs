//! Graceful shutdown signal handling

use std::{fmt, io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// The signal that asked the server to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StopSignal {
    CtrlC,
    Terminate,
}

impl fmt::Display for StopSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CtrlC => f.write_str("ctrl_c"),
            Self::Terminate => f.write_str("terminate"),
        }
    }
}

async fn wait_for_signal() -> Result<StopSignal, ShutdownSignalError> {
    let ctrl_c = async {
        signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC)?;

        Ok::<_, ShutdownSignalError>(StopSignal::CtrlC)
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;

        Ok::<_, ShutdownSignalError>(StopSignal::Terminate)
    };

    // Only Ctrl+C is observable off Unix.
    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<StopSignal, ShutdownSignalError>>();

    tokio::select! {
        received = ctrl_c => received,
        received = terminate => received,
    }
}

fn describe_grace(grace: Option<Duration>) -> String {
    match grace {
        Some(grace) => format!("draining connections for up to {}s", grace.as_secs()),
        None => "stopping without draining".to_string(),
    }
}

/// Waits for Ctrl+C or SIGTERM, then stops accepting connections and gives
/// in-flight order writes at most `grace` to finish.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace: Option<Duration>,
) -> Result<(), ShutdownSignalError> {
    let received = wait_for_signal().await?;

    info!("{received} signal received, {}", describe_grace(grace));

    match grace {
        Some(_) => handle.stop_graceful(grace),
        None => handle.stop_forcible(),
    }

    Ok(())
}
