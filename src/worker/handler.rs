//! Background fetch execution.
//!
//! Each page request runs on its own short-lived named thread so that a slow
//! request for a superseded query never delays the request that replaced it.
//! The blocking socket of a canceled request runs to completion (or timeout)
//! but its result is dropped instead of being reported.

use crate::domain::error::{PixsearchError, Result};
use crate::fetcher::ImageFetcher;
use crate::worker::{FetchCompletion, FetchJob};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

/// Spawns fetch threads that report back on a shared channel.
#[derive(Clone)]
pub struct FetchWorker {
    fetcher: Arc<dyn ImageFetcher>,
    completions: Sender<FetchCompletion>,
}

impl FetchWorker {
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetcher>, completions: Sender<FetchCompletion>) -> Self {
        Self { fetcher, completions }
    }

    /// Runs `job` on a new thread.
    ///
    /// The current tracing span becomes the parent of the worker's span, so a
    /// fetch shows up under the message that issued it.
    ///
    /// # Errors
    ///
    /// Returns [`PixsearchError::Worker`] if the OS refuses to spawn the thread.
    pub fn spawn(&self, job: FetchJob) -> Result<()> {
        let fetcher = Arc::clone(&self.fetcher);
        let completions = self.completions.clone();
        let parent = tracing::Span::current();

        thread::Builder::new()
            .name(format!("pixsearch-fetch-{}", job.generation))
            .spawn(move || {
                let span = tracing::debug_span!(parent: &parent, "fetch_worker",
                    generation = job.generation,
                    query = %job.options.query,
                    page = job.options.page
                );
                let _guard = span.entered();

                let outcome = fetcher.fetch(&job.options, &job.token);

                if job.token.is_cancelled() {
                    tracing::debug!("fetch canceled, dropping result");
                    return;
                }

                match &outcome {
                    Ok(records) => tracing::debug!(records = records.len(), "fetch finished"),
                    Err(e) => tracing::debug!(error = %e, "fetch failed"),
                }

                let completion = FetchCompletion {
                    generation: job.generation,
                    outcome,
                };
                if completions.send(completion).is_err() {
                    tracing::debug!("session closed before fetch completed");
                }
            })
            .map_err(|e| PixsearchError::Worker(format!("failed to spawn fetch thread: {e}")))?;

        Ok(())
    }
}

impl std::fmt::Debug for FetchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchWorker").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawRecord, SearchOptions};
    use crate::fetcher::CancelToken;
    use std::sync::mpsc;
    use std::time::Duration;

    struct FixedFetcher;

    impl ImageFetcher for FixedFetcher {
        fn fetch(&self, options: &SearchOptions, token: &CancelToken) -> Result<Vec<RawRecord>> {
            token.check()?;
            Ok(vec![RawRecord::default(); options.page as usize])
        }
    }

    #[test]
    fn reports_completion_with_generation() {
        let (tx, rx) = mpsc::channel();
        let worker = FetchWorker::new(Arc::new(FixedFetcher), tx);
        let options = SearchOptions {
            query: "cats".to_string(),
            page: 2,
            ..SearchOptions::default()
        };

        worker
            .spawn(FetchJob { generation: 7, options, token: CancelToken::new() })
            .unwrap();

        let completion = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(completion.generation, 7);
        assert_eq!(completion.outcome.unwrap().len(), 2);
    }

    #[test]
    fn canceled_jobs_never_report() {
        let (tx, rx) = mpsc::channel();
        let worker = FetchWorker::new(Arc::new(FixedFetcher), tx);
        let token = CancelToken::new();
        token.cancel();

        worker
            .spawn(FetchJob { generation: 1, options: SearchOptions::default(), token })
            .unwrap();
        drop(worker);

        // The only sender lived in the worker thread; once it exits the
        // channel disconnects without delivering anything.
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
    }
}
