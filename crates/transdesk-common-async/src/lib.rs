//! Async utilities for Transdesk.
//!
//! Every asynchronous call made on behalf of a view runs under a
//! [`CancellationToken`]. When the view scope ends the token is cancelled and
//! late completions are discarded instead of being applied to state that no
//! longer exists.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;
use transdesk_common_core::{Error, Result};

/// Cancellation token shared between a scope and the calls it started.
///
/// Clones share one state. A [child](Self::child_token) is cancelled with its
/// parent but can be cancelled on its own without touching the parent.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    notify: watch::Sender<bool>,
    children: Mutex<Vec<Weak<Inner>>>,
}

impl Inner {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            cancelled: AtomicBool::new(false),
            notify: tx,
            children: Mutex::new(Vec::new()),
        }
    }

    fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        self.notify.send_replace(true);
        let children = std::mem::take(&mut *self.children.lock());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }
}

impl CancellationToken {
    /// Create a new, live token.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner::new()),
        }
    }

    /// A token for a nested scope, cancelled whenever this one is.
    pub fn child_token(&self) -> CancellationToken {
        let child = CancellationToken::new();
        {
            let mut children = self.inner.children.lock();
            children.retain(|weak| weak.strong_count() > 0);
            children.push(Arc::downgrade(&child.inner));
        }
        // cancel() may have drained the list before the push
        if self.is_cancelled() {
            child.cancel();
        }
        child
    }

    /// Cancel every call holding a clone of this token, and its children.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Check if cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Wait until the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.inner.notify.subscribe();
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                // Sender lives as long as self; unreachable in practice.
                std::future::pending::<()>().await;
            }
        }
    }

    /// Return a guard that cancels this token when dropped.
    pub fn drop_guard(&self) -> DropGuard {
        DropGuard {
            token: Some(self.clone()),
        }
    }

    /// Fail with [`Error::Cancelled`] if the token has fired.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancels its token on drop, unless disarmed.
#[derive(Debug)]
pub struct DropGuard {
    token: Option<CancellationToken>,
}

impl DropGuard {
    /// The guarded token.
    pub fn token(&self) -> Option<&CancellationToken> {
        self.token.as_ref()
    }

    /// Give the token back without cancelling it.
    pub fn disarm(mut self) -> CancellationToken {
        self.token.take().unwrap_or_default()
    }
}

impl Drop for DropGuard {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

/// Run a future under a token.
///
/// Resolves to `Err(Error::Cancelled)` when the token fires first, and also
/// when it fired while the future was finishing, so a completion observed
/// after cancellation is never handed to the caller.
pub async fn run_cancellable<F, T>(token: &CancellationToken, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    token.check()?;

    let result = tokio::select! {
        biased;
        _ = token.cancelled() => return Err(Error::Cancelled),
        result = future => result,
    };

    if token.is_cancelled() {
        tracing::warn!("discarding completion of a cancelled call");
        return Err(Error::Cancelled);
    }
    result
}
