use std::future::Future;

use anyhow::Result;
use tokio::signal::unix;

pub const TERMINATION_SIGNALS: [libc::c_int; 4] =
    [libc::SIGINT, libc::SIGTERM, libc::SIGQUIT, libc::SIGTSTP];

/// Runs `f` until it completes or until any of [`TERMINATION_SIGNALS`] arrives.
pub async fn run_or_terminate<F>(f: F) -> Result<()>
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    let task = tokio::spawn(f);
    tokio::select! {
        res = task => res?,
        signal = any_signal(TERMINATION_SIGNALS) => {
            let signal = signal?;
            tracing::info!(?signal, "received termination signal");
            Ok(())
        }
    }
}

pub async fn any_signal<I, T>(signals: I) -> std::io::Result<unix::SignalKind>
where
    I: IntoIterator<Item = T>,
    T: Into<unix::SignalKind>,
{
    let mut streams = Vec::new();
    for signal in signals {
        let kind = signal.into();
        streams.push((kind, unix::signal(kind)?));
    }

    if streams.is_empty() {
        return std::future::pending().await;
    }

    let waiters = streams.iter_mut().map(|(kind, stream)| {
        let kind = *kind;
        Box::pin(async move {
            stream.recv().await;
            kind
        })
    });

    let (kind, _, _) = futures_util::future::select_all(waiters).await;
    Ok(kind)
}
