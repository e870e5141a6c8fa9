//! View State
//!
//! Every analysis page renders exactly one of four states:
//!
//! ```text
//!   Loading ──► Ready(payload)
//!      │   └──► Empty
//!      └──────► Error(message, retryable) ──retry──► Loading
//! ```
//!
//! [`drive`] runs one fetch cycle through these states; pages only supply
//! the loader.

mod fetch;

pub use fetch::{drive, FetchTracker, Ticket};

use crate::api::ClientError;

/// What a loader produced when every required call succeeded
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Ready(T),
    /// Calls succeeded but the payload has nothing to show yet
    Empty,
}

impl<T> Loaded<T> {
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Loaded::Ready(v),
            None => Loaded::Empty,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        match self {
            Loaded::Ready(v) => Loaded::Ready(f(v)),
            Loaded::Empty => Loaded::Empty,
        }
    }
}

/// Error banner contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub message: String,
    pub retryable: bool,
}

impl From<&ClientError> for ErrorView {
    fn from(e: &ClientError) -> Self {
        Self {
            message: e.user_message(),
            retryable: e.is_retryable(),
        }
    }
}

/// The state a page renders from
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(ErrorView),
    Empty,
    Ready(T),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Error, Empty and Ready are terminal until the next cycle
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorView> {
        match self {
            ViewState::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Short tag for logs
    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Error(_) => "error",
            ViewState::Empty => "empty",
            ViewState::Ready(_) => "ready",
        }
    }
}

impl<T> From<Result<Loaded<T>, ClientError>> for ViewState<T> {
    fn from(outcome: Result<Loaded<T>, ClientError>) -> Self {
        match outcome {
            Ok(Loaded::Ready(v)) => ViewState::Ready(v),
            Ok(Loaded::Empty) => ViewState::Empty,
            Err(e) => ViewState::Error(ErrorView::from(&e)),
        }
    }
}
