//! Submission controller.
//!
//! Two ways to drive a submission:
//!
//! - [`submit`] runs validate -> request -> settle in one call (CLI, tests)
//! - [`prepare`] + [`settle`] split the same flow around a request made
//!   elsewhere, so the TUI can run it on a worker thread

use crate::domain::{ClassificationRequest, ClassificationResult};
use crate::error::SubmitError;
use crate::form::session::{Session, Ticket};

/// Something that can classify a request (the HTTP backend, or a mock).
pub trait Classifier: Send + Sync {
    fn classify(&self, request: &ClassificationRequest) -> Result<ClassificationResult, SubmitError>;
}

/// A validated submission waiting for its response.
#[derive(Debug, Clone, Copy)]
pub struct Pending {
    pub ticket: Ticket,
    pub request: ClassificationRequest,
}

#[derive(Debug, Clone, Copy)]
pub enum Dispatch {
    /// Validation passed; the session is `Loading`.
    Started(Pending),
    /// Validation failed; the error is in the session, no request is made.
    Rejected,
    /// A submission is already in flight; nothing changed.
    Busy,
}

/// Validate the session's input and, if it passes, enter `Loading`.
pub fn prepare(session: &mut Session) -> Dispatch {
    if session.is_loading() {
        tracing::debug!("submission ignored: request already in flight");
        return Dispatch::Busy;
    }

    match session.to_request() {
        Ok(request) => {
            let ticket = session.begin();
            tracing::info!(?ticket, ?request, "submission started");
            Dispatch::Started(Pending { ticket, request })
        }
        Err(err) => {
            tracing::info!(error = %err, "submission rejected");
            session.reject(&err);
            Dispatch::Rejected
        }
    }
}

/// Store the outcome of a prepared submission. `Loading` always ends here.
///
/// Returns `false` when the outcome belongs to a submission the session no
/// longer waits for (it was reset or superseded); the outcome is dropped.
pub fn settle(
    session: &mut Session,
    ticket: Ticket,
    outcome: Result<ClassificationResult, SubmitError>,
) -> bool {
    match &outcome {
        Ok(result) => tracing::info!(?ticket, prediction = %result.prediction, "submission settled"),
        Err(err) => tracing::warn!(?ticket, error = %err, "submission failed"),
    }
    let applied = session.complete(ticket, outcome);
    if !applied {
        tracing::debug!(?ticket, "stale submission outcome dropped");
    }
    applied
}

/// Validate, classify and settle in one blocking call.
pub fn submit(session: &mut Session, classifier: &dyn Classifier) -> Dispatch {
    let dispatch = prepare(session);
    if let Dispatch::Started(pending) = dispatch {
        let outcome = classifier.classify(&pending.request);
        settle(session, pending.ticket, outcome);
    }
    dispatch
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Records requests and replays queued outcomes in order.
    #[derive(Default)]
    pub struct MockClassifier {
        pub requests: Mutex<Vec<ClassificationRequest>>,
        responses: Mutex<VecDeque<Result<ClassificationResult, SubmitError>>>,
    }

    impl MockClassifier {
        pub fn push(&self, outcome: Result<ClassificationResult, SubmitError>) {
            self.responses.lock().unwrap().push_back(outcome);
        }

        pub fn calls(&self) -> Vec<ClassificationRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Classifier for MockClassifier {
        fn classify(&self, request: &ClassificationRequest) -> Result<ClassificationResult, SubmitError> {
            self.requests.lock().unwrap().push(*request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(SubmitError::Request("no mock response queued".into())))
        }
    }
}
