//! Loading spinner driven by catalog state changes

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::catalog::SnapshotReceiver;

const FINISH_GRACE: Duration = Duration::from_millis(250);

/// Shows a spinner on stderr while the catalog reports `is_loading`.
///
/// The spinner runs for one loading cycle; call [`LoadingIndicator::finish`]
/// before printing results so the line is cleared first.
pub struct LoadingIndicator {
    task: Option<JoinHandle<()>>,
}

impl LoadingIndicator {
    /// Follow `updates`; when `enabled` is false nothing is drawn
    pub fn attach(mut updates: SnapshotReceiver, message: &str, enabled: bool) -> Self {
        if !enabled {
            return Self { task: None };
        }

        let message = message.to_string();
        let task = tokio::spawn(async move {
            let mut spinner: Option<ProgressBar> = None;
            loop {
                match updates.recv().await {
                    Ok(snapshot) if snapshot.is_loading => {
                        if spinner.is_none() {
                            spinner = Some(start_spinner(&message));
                        }
                    }
                    Ok(_) => {
                        if let Some(bar) = spinner.take() {
                            bar.finish_and_clear();
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        log::trace!("Spinner skipped {} state updates", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            if let Some(bar) = spinner {
                bar.finish_and_clear();
            }
        });

        Self { task: Some(task) }
    }

    /// Wait briefly for the spinner to clear, then stop it
    pub async fn finish(mut self) {
        if let Some(mut task) = self.task.take()
            && tokio::time::timeout(FINISH_GRACE, &mut task).await.is_err()
        {
            task.abort();
        }
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn start_spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
