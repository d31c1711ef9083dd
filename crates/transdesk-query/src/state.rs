//! Read and mutation states as seen by views.

use serde::Serialize;
use transdesk_common_core::Error;

/// Status of a cached read.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// No data yet and no failure recorded.
    Pending,
    /// The last fetch failed.
    Error(Error),
    /// Data is available.
    Success(T),
}

impl<T> QueryState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        match self {
            Self::Pending => QueryState::Pending,
            Self::Error(err) => QueryState::Error(err),
            Self::Success(data) => QueryState::Success(f(data)),
        }
    }
}

/// Status of a mutation owned by a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Error(Error),
    Success,
}

impl MutationStatus {
    /// Controls are disabled while a mutation is pending.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Record the outcome of a finished mutation.
    pub fn settle<T>(&mut self, result: &Result<T, Error>) {
        *self = match result {
            Ok(_) => Self::Success,
            Err(err) => Self::Error(err.clone()),
        };
    }
}

/// Cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Reads that joined a request already in flight.
    pub coalesced: u64,
    pub invalidations: u64,
    pub size: u64,
}

impl CacheStats {
    /// Calculate hit rate.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
