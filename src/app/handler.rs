//! Message handling and the fetch-triggering rule.
//!
//! [`handle_message`] applies one [`Message`] to the [`SessionState`] and
//! returns the side effects the driver must run. It is deterministic and
//! performs no I/O, which keeps every transition testable without threads.
//!
//! # Fetch Triggering
//!
//! Messages that change the fetch inputs (options, page count, results epoch)
//! end with a reconcile step:
//!
//! 1. The in-flight generation, if any, is canceled.
//! 2. If the query is non-empty and the current page is unresolved, a new
//!    generation is allocated and a fetch is requested for it.
//!
//! `FetchStarted` and `FetchFailed` leave the inputs untouched, so a rejected
//! session stays halted until the user searches again.
//!
//! # Stale Completions
//!
//! Completion messages carry the generation they were issued for. Anything
//! other than the in-flight generation is dropped without a transition.
//!
//! # Example
//!
//! ```rust
//! use pixsearch::app::{handle_message, Action, Message, NewQuery, SessionState};
//!
//! let mut state = SessionState::default();
//! let (_, actions) = handle_message(&mut state, &Message::StartNewQuery(NewQuery::text("cats")));
//! assert!(matches!(actions[0], Action::StartFetch { generation: 1, .. }));
//! ```

use super::{Action, SessionState};
use crate::domain::{normalize, Category, Orientation, RawRecord};

/// Fields of a full query replacement.
///
/// Filters left as `None` keep their current value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewQuery {
    pub query: String,
    pub category: Option<Category>,
    pub orientation: Option<Orientation>,
}

impl NewQuery {
    /// A query replacement that keeps the current filters.
    #[must_use]
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// A single filter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Category(Category),
    Orientation(Orientation),
}

/// Input to the session state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Search submitted: replaces the query and starts a new epoch.
    StartNewQuery(NewQuery),
    /// Filter selected: merges one field and starts a new epoch.
    AdjustFilter(Filter),
    /// Load-more pressed. Ignored unless the last fetch resolved with data.
    RequestNextPage,
    /// The driver is about to run the fetch of `generation`.
    FetchStarted { generation: u64 },
    /// The fetch of `generation` returned a page.
    FetchSucceeded {
        generation: u64,
        records: Vec<RawRecord>,
    },
    /// The fetch of `generation` failed.
    FetchFailed { generation: u64, reason: String },
}

/// Applies a message and returns `(should_render, actions)`.
///
/// `should_render` is `false` when the message was ignored (stale completion,
/// load-more while not allowed).
#[allow(clippy::cognitive_complexity)]
pub fn handle_message(state: &mut SessionState, message: &Message) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_message", message = message_name(message)).entered();

    match message {
        Message::StartNewQuery(fields) => {
            tracing::debug!(query = %fields.query, "starting new query");
            state.start_new_query(fields);
            (true, reconcile_fetch(state))
        }
        Message::AdjustFilter(filter) => {
            tracing::debug!(filter = ?filter, "adjusting filter");
            state.adjust_filter(*filter);
            (true, reconcile_fetch(state))
        }
        Message::RequestNextPage => {
            if !state.can_load_more() {
                tracing::debug!(
                    status = %state.status,
                    is_last_page = state.is_last_page,
                    "load more ignored"
                );
                return (false, vec![]);
            }
            state.request_next_page();
            tracing::debug!(page = state.options.page, "requesting next page");
            (true, reconcile_fetch(state))
        }
        Message::FetchStarted { generation } => {
            if !state.is_current(*generation) {
                tracing::debug!(generation, "ignoring start of superseded fetch");
                return (false, vec![]);
            }
            state.mark_pending();
            (true, vec![])
        }
        Message::FetchSucceeded { generation, records } => {
            if !state.is_current(*generation) {
                tracing::debug!(generation, records = records.len(), "discarding stale page");
                return (false, vec![]);
            }
            state.take_in_flight();
            state.resolve(normalize(records));

            let count = state.results.len();
            tracing::debug!(
                generation,
                page_records = records.len(),
                total = count,
                is_last_page = state.is_last_page,
                "page resolved"
            );

            let mut actions = vec![if state.is_last_page {
                Action::NotifyEnd { count }
            } else {
                Action::NotifyOk { count }
            }];
            actions.extend(reconcile_fetch(state));
            (true, actions)
        }
        Message::FetchFailed { generation, reason } => {
            if !state.is_current(*generation) {
                tracing::debug!(generation, "discarding stale failure");
                return (false, vec![]);
            }
            state.take_in_flight();
            state.reject(reason.clone());

            let count = state.results.len();
            tracing::debug!(generation, error = %reason, accumulated = count, "page rejected");

            // With content on screen a failure reads as the end of the results.
            let actions = if count > 0 {
                vec![Action::NotifyEnd { count }]
            } else {
                vec![]
            };
            (true, actions)
        }
    }
}

/// Cancels the in-flight fetch and issues a new one when the current page is
/// still unresolved.
fn reconcile_fetch(state: &mut SessionState) -> Vec<Action> {
    let mut actions = vec![];

    if let Some(generation) = state.take_in_flight() {
        tracing::debug!(generation, "canceling superseded fetch");
        actions.push(Action::CancelFetch { generation });
    }

    if state.needs_fetch() {
        let generation = state.begin_fetch();
        tracing::debug!(
            generation,
            query = %state.options.query,
            page = state.options.page,
            "issuing fetch"
        );
        actions.push(Action::StartFetch {
            generation,
            options: state.options.clone(),
        });
    }

    actions
}

const fn message_name(message: &Message) -> &'static str {
    match message {
        Message::StartNewQuery(_) => "start_new_query",
        Message::AdjustFilter(_) => "adjust_filter",
        Message::RequestNextPage => "request_next_page",
        Message::FetchStarted { .. } => "fetch_started",
        Message::FetchSucceeded { .. } => "fetch_succeeded",
        Message::FetchFailed { .. } => "fetch_failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FetchStatus;
    use serde_json::json;

    fn records(range: std::ops::RangeInclusive<u32>) -> Vec<RawRecord> {
        range
            .map(|n| RawRecord {
                id: Some(json!(n)),
                webformat_url: Some(json!(format!("https://cdn.example/{n}.jpg"))),
                tags: Some(json!("cat")),
            })
            .collect()
    }

    fn started_fetch(actions: &[Action]) -> u64 {
        actions
            .iter()
            .find_map(|a| match a {
                Action::StartFetch { generation, .. } => Some(*generation),
                _ => None,
            })
            .expect("expected a StartFetch action")
    }

    /// Drives `cats` through its first page of 24 records.
    fn resolved_cats() -> SessionState {
        let mut state = SessionState::default();
        let (_, actions) = handle_message(&mut state, &Message::StartNewQuery(NewQuery::text("cats")));
        let generation = started_fetch(&actions);
        handle_message(&mut state, &Message::FetchStarted { generation });
        handle_message(
            &mut state,
            &Message::FetchSucceeded { generation, records: records(1..=24) },
        );
        state
    }

    #[test]
    fn empty_query_never_fetches() {
        let mut state = SessionState::default();
        let (render, actions) = handle_message(&mut state, &Message::StartNewQuery(NewQuery::text("   ")));
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn first_page_resolves_into_results() {
        let state = resolved_cats();
        assert_eq!(state.results.len(), 24);
        assert_eq!(state.page_count, 2);
        assert!(!state.is_last_page);
        assert_eq!(state.status, FetchStatus::Resolved);
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn success_notifies_running_total() {
        let mut state = SessionState::default();
        let (_, actions) = handle_message(&mut state, &Message::StartNewQuery(NewQuery::text("cats")));
        let generation = started_fetch(&actions);
        let (_, actions) = handle_message(
            &mut state,
            &Message::FetchSucceeded { generation, records: records(1..=24) },
        );
        assert_eq!(actions, vec![Action::NotifyOk { count: 24 }]);
    }

    #[test]
    fn empty_next_page_ends_the_query() {
        let mut state = resolved_cats();

        let (_, actions) = handle_message(&mut state, &Message::RequestNextPage);
        assert_eq!(state.options.page, 2);
        assert_eq!(state.results.len(), 24);
        let generation = started_fetch(&actions);

        let (_, actions) = handle_message(
            &mut state,
            &Message::FetchSucceeded { generation, records: vec![] },
        );
        assert_eq!(actions, vec![Action::NotifyEnd { count: 24 }]);
        assert!(state.is_last_page);
        assert_eq!(state.results.len(), 24);
        assert_eq!(state.status, FetchStatus::Resolved);
        assert!(!state.needs_fetch());

        let (render, actions) = handle_message(&mut state, &Message::RequestNextPage);
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.options.page, 2);
    }

    #[test]
    fn next_page_is_ignored_while_pending() {
        let mut state = SessionState::default();
        let (_, actions) = handle_message(&mut state, &Message::StartNewQuery(NewQuery::text("cats")));
        let generation = started_fetch(&actions);
        handle_message(&mut state, &Message::FetchStarted { generation });

        let (render, actions) = handle_message(&mut state, &Message::RequestNextPage);
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.options.page, 1);
    }

    #[test]
    fn filter_change_supersedes_in_flight_fetch() {
        let mut state = SessionState::default();
        let (_, actions) = handle_message(&mut state, &Message::StartNewQuery(NewQuery::text("cats")));
        let first = started_fetch(&actions);
        handle_message(&mut state, &Message::FetchStarted { generation: first });

        let (_, actions) = handle_message(
            &mut state,
            &Message::AdjustFilter(Filter::Orientation(Orientation::Vertical)),
        );
        assert_eq!(actions[0], Action::CancelFetch { generation: first });
        let second = started_fetch(&actions);
        assert!(state.results.is_empty());

        // The first fetch lands late and is dropped.
        let (render, actions) = handle_message(
            &mut state,
            &Message::FetchSucceeded { generation: first, records: records(1..=24) },
        );
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.results.is_empty());

        handle_message(
            &mut state,
            &Message::FetchSucceeded { generation: second, records: records(100..=104) },
        );
        let ids: Vec<&str> = state.results.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["100", "101", "102", "103", "104"]);
        assert_eq!(state.options.orientation, Orientation::Vertical);
    }

    #[test]
    fn failure_after_content_notifies_end() {
        let mut state = resolved_cats();
        let (_, actions) = handle_message(&mut state, &Message::RequestNextPage);
        let generation = started_fetch(&actions);

        let (_, actions) = handle_message(
            &mut state,
            &Message::FetchFailed { generation, reason: "HTTP error: status 500".to_string() },
        );
        assert_eq!(actions, vec![Action::NotifyEnd { count: 24 }]);
        assert_eq!(state.status, FetchStatus::Rejected);
        assert!(state.is_last_page);
        assert_eq!(state.results.len(), 24);
        assert_eq!(state.error.as_deref(), Some("HTTP error: status 500"));
    }

    #[test]
    fn failure_without_content_is_silent_and_halts() {
        let mut state = SessionState::default();
        let (_, actions) = handle_message(&mut state, &Message::StartNewQuery(NewQuery::text("cats")));
        let generation = started_fetch(&actions);

        let (_, actions) = handle_message(
            &mut state,
            &Message::FetchFailed { generation, reason: "Network error: dns".to_string() },
        );
        assert!(actions.is_empty());
        assert_eq!(state.status, FetchStatus::Rejected);
        // Still unresolved, but a rejected session does not retry on its own.
        assert!(state.needs_fetch());
        assert_eq!(state.in_flight(), None);

        // A new search recovers.
        let (_, actions) = handle_message(&mut state, &Message::StartNewQuery(NewQuery::text("cats")));
        assert!(started_fetch(&actions) > generation);
        assert_eq!(state.status, FetchStatus::Idle);
        assert_eq!(state.error, None);
    }

    #[test]
    fn stale_start_does_not_mark_pending() {
        let mut state = SessionState::default();
        let (_, actions) = handle_message(&mut state, &Message::StartNewQuery(NewQuery::text("cats")));
        let first = started_fetch(&actions);
        handle_message(&mut state, &Message::StartNewQuery(NewQuery::text("dogs")));

        let (render, _) = handle_message(&mut state, &Message::FetchStarted { generation: first });
        assert!(!render);
        assert_eq!(state.status, FetchStatus::Idle);
    }

    #[test]
    fn at_most_one_fetch_is_active_across_rapid_changes() {
        let mut state = SessionState::default();
        let messages = vec![
            Message::StartNewQuery(NewQuery::text("cats")),
            Message::AdjustFilter(Filter::Category(Category::Photo)),
            Message::StartNewQuery(NewQuery::text("")),
            Message::StartNewQuery(NewQuery::text("dogs")),
            Message::AdjustFilter(Filter::Orientation(Orientation::All)),
        ];

        let mut active: Option<u64> = None;
        for message in &messages {
            let (_, actions) = handle_message(&mut state, message);
            assert!(state.results.is_empty());
            for action in actions {
                match action {
                    Action::CancelFetch { generation } => {
                        assert_eq!(active, Some(generation));
                        active = None;
                    }
                    Action::StartFetch { generation, .. } => {
                        assert_eq!(active, None, "fetch started while another was active");
                        active = Some(generation);
                    }
                    Action::NotifyOk { .. } | Action::NotifyEnd { .. } => {}
                }
            }
            assert_eq!(active, state.in_flight());
        }
        assert_eq!(state.options.query, "dogs");
    }
}
