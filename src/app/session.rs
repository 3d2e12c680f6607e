//! Search session driver.
//!
//! [`SearchSession`] owns the [`SessionState`], feeds messages through
//! [`handle_message`] and executes the returned actions: it spawns fetch
//! workers, cancels superseded ones and forwards notices to the toast sink.
//! Worker completions arrive on an mpsc channel and are applied as ordinary
//! messages when the caller polls.
//!
//! # Example
//!
//! ```rust,no_run
//! use pixsearch::app::{Message, NewQuery, SearchSession};
//! use pixsearch::domain::SearchOptions;
//! use pixsearch::fetcher::PixabayFetcher;
//! use pixsearch::ui::ConsoleToast;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let fetcher = PixabayFetcher::new("https://pixabay.com/api/", "KEY", Duration::from_secs(15));
//! let mut session = SearchSession::new(
//!     Arc::new(fetcher),
//!     Box::new(ConsoleToast::stdout()),
//!     SearchOptions::default(),
//! );
//! session.dispatch(Message::StartNewQuery(NewQuery::text("cats")));
//! session.wait_for_completion(Duration::from_secs(20));
//! println!("{} results", session.state().results.len());
//! ```

use super::handler::{handle_message, Message};
use super::{Action, SessionState};
use crate::domain::SearchOptions;
use crate::fetcher::{CancelToken, ImageFetcher};
use crate::ui::toast::Notifier;
use crate::ui::viewmodel::GalleryView;
use crate::worker::{FetchCompletion, FetchJob, FetchWorker};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A search session with at most one fetch in flight.
pub struct SearchSession {
    state: SessionState,
    worker: FetchWorker,
    completions: Receiver<FetchCompletion>,
    active: Option<(u64, CancelToken)>,
    notifier: Box<dyn Notifier>,
}

impl SearchSession {
    /// Mounts an idle session. No fetch happens until a query is submitted.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        notifier: Box<dyn Notifier>,
        defaults: SearchOptions,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state: SessionState::new(defaults),
            worker: FetchWorker::new(fetcher, tx),
            completions: rx,
            active: None,
            notifier,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn view(&self) -> GalleryView<'_> {
        self.state.view()
    }

    /// Whether a fetch is currently in flight.
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.active.is_some()
    }

    /// Applies a message and runs its side effects. Returns whether the view
    /// changed.
    pub fn dispatch(&mut self, message: Message) -> bool {
        let (mut should_render, actions) = handle_message(&mut self.state, &message);
        for action in actions {
            should_render |= self.execute_action(action);
        }
        should_render
    }

    /// Applies every completion that has already arrived, without blocking.
    pub fn poll(&mut self) -> bool {
        let mut should_render = false;
        while let Ok(completion) = self.completions.try_recv() {
            should_render |= self.apply_completion(completion);
        }
        should_render
    }

    /// Blocks until the in-flight fetch completes or `timeout` elapses.
    ///
    /// A superseded fetch that slips past its cancellation check is applied
    /// (and discarded) on the way, without ending the wait. Returns
    /// immediately when nothing is in flight.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut should_render = self.poll();

        while self.active.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.completions.recv_timeout(remaining) {
                Ok(completion) => should_render |= self.apply_completion(completion),
                Err(RecvTimeoutError::Timeout) => {
                    tracing::debug!(?timeout, "timed out waiting for fetch");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        should_render
    }

    fn apply_completion(&mut self, completion: FetchCompletion) -> bool {
        let FetchCompletion { generation, outcome } = completion;

        if self.active.as_ref().is_some_and(|(active, _)| *active == generation) {
            self.active = None;
        }

        let message = match outcome {
            Ok(records) => Message::FetchSucceeded { generation, records },
            Err(e) if e.is_cancelled() => {
                tracing::debug!(generation, "ignoring canceled fetch");
                return false;
            }
            Err(e) => Message::FetchFailed {
                generation,
                reason: e.to_string(),
            },
        };
        self.dispatch(message)
    }

    fn execute_action(&mut self, action: Action) -> bool {
        match action {
            Action::StartFetch { generation, options } => {
                let (rendered, _) =
                    handle_message(&mut self.state, &Message::FetchStarted { generation });

                let token = CancelToken::new();
                self.active = Some((generation, token.clone()));

                if let Err(e) = self.worker.spawn(FetchJob { generation, options, token }) {
                    tracing::error!(generation, error = %e, "could not start fetch");
                    self.active = None;
                    return self.dispatch(Message::FetchFailed {
                        generation,
                        reason: e.to_string(),
                    }) || rendered;
                }
                rendered
            }
            Action::CancelFetch { generation } => {
                match self.active.take() {
                    Some((active, token)) if active == generation => token.cancel(),
                    other => self.active = other,
                }
                false
            }
            Action::NotifyOk { count } => {
                self.notifier.notify_ok(count);
                false
            }
            Action::NotifyEnd { count } => {
                self.notifier.notify_end(count);
                false
            }
        }
    }
}

impl Drop for SearchSession {
    /// Teardown cancels the in-flight fetch so its worker drops the result.
    fn drop(&mut self) {
        if let Some((generation, token)) = self.active.take() {
            tracing::debug!(generation, "session closed, canceling fetch");
            token.cancel();
        }
    }
}

impl std::fmt::Debug for SearchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("state", &self.state)
            .field("active", &self.active.as_ref().map(|(generation, _)| generation))
            .finish_non_exhaustive()
    }
}
