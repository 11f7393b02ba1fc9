//! Cancellable fetch-on-mount for view state.
//!
//! A [`View`] owns its state behind a [`tokio::sync::watch`] channel so
//! renderers can observe changes. [`View::mount`] starts a fetch under a
//! fresh child [`CancellationToken`]; mounting again (the identifier
//! changed) or dropping the view cancels the previous fetch, and a
//! completion whose token was cancelled is discarded instead of applied.

use std::future::Future;

use shelflife_client::CallContext;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Generic async-loaded value as seen by a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// The fetch currently attached to a view.
struct Mounted {
    cancel: CancellationToken,
    /// Taken once awaited by [`View::settled`].
    handle: Option<JoinHandle<()>>,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Observable view state plus at most one in-flight fetch.
pub struct View<S> {
    tx: watch::Sender<S>,
    parent: CallContext,
    mounted: Option<Mounted>,
}

impl<S> View<S>
where
    S: Send + Sync + 'static,
{
    /// `parent` supplies credentials; each mount runs under a child of its
    /// cancellation token.
    pub fn new(initial: S, parent: CallContext) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
            parent,
            mounted: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// Apply a synchronous state change.
    pub fn update(&self, modify: impl FnOnce(&mut S)) {
        self.tx.send_modify(modify);
    }

    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.tx.borrow().clone()
    }

    /// Cancel the current fetch, reset the state, then start a new fetch.
    ///
    /// The previous fetch is cancelled before `reset` runs, so its result
    /// can never overwrite the reset state.
    pub fn reload<T, Fut>(
        &mut self,
        reset: impl FnOnce(&mut S),
        fetch: impl FnOnce(CallContext) -> Fut,
        apply: impl FnOnce(&mut S, T) + Send + 'static,
    ) where
        T: Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        self.unmount();
        self.tx.send_modify(reset);
        self.mount(fetch, apply);
    }

    /// Cancel the current fetch (if any) and start a new one.
    ///
    /// `fetch` receives the call context for this mount. `apply` runs with
    /// the outcome only if this mount has not been cancelled by then; the
    /// check happens while the state is locked.
    pub fn mount<T, Fut>(
        &mut self,
        fetch: impl FnOnce(CallContext) -> Fut,
        apply: impl FnOnce(&mut S, T) + Send + 'static,
    ) where
        T: Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        self.unmount();

        let cx = self.parent.child();
        let cancel = cx.cancel.clone();
        let token = cx.cancel.clone();
        let tx = self.tx.clone();
        let pending = fetch(cx);

        let handle = tokio::spawn(async move {
            let outcome = pending.await;
            let applied = tx.send_if_modified(|state| {
                if token.is_cancelled() {
                    return false;
                }
                apply(state, outcome);
                true
            });
            if !applied {
                tracing::debug!("Discarded result of a cancelled fetch");
            }
        });

        self.mounted = Some(Mounted {
            cancel,
            handle: Some(handle),
        });
    }

    /// Cancel the in-flight fetch, if any. Its result will be discarded.
    pub fn unmount(&mut self) {
        self.mounted = None;
    }

    /// Wait until the current fetch has finished (applied or discarded).
    pub async fn settled(&mut self) {
        let handle = self.mounted.as_mut().and_then(|m| m.handle.take());
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Fetch task failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn applies_result_of_live_mount() {
        let mut view = View::new(0u32, CallContext::default());
        view.mount(|_cx| async { 7u32 }, |state, n| *state = n);
        view.settled().await;
        assert_eq!(view.snapshot(), 7);
    }

    #[tokio::test]
    async fn remount_discards_stale_result() {
        let mut view = View::new(String::new(), CallContext::default());

        view.mount(
            |_cx| async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                "first"
            },
            |state, s| *state = s.to_string(),
        );
        view.mount(|_cx| async { "second" }, |state, s| *state = s.to_string());

        view.settled().await;
        // Give the first task time to complete and be discarded.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(view.snapshot(), "second");
    }

    #[tokio::test]
    async fn reload_cancels_previous_fetch_before_reset() {
        let mut view = View::new(String::new(), CallContext::default());
        let (token_tx, token_rx) = tokio::sync::oneshot::channel();

        view.mount(
            move |cx| {
                let _ = token_tx.send(cx.cancel.clone());
                async move {
                    cx.cancel.cancelled().await;
                    "stale"
                }
            },
            |state, s| *state = s.to_string(),
        );
        let first = token_rx.await.unwrap();

        let mut cancelled_at_reset = false;
        view.reload(
            |state| {
                cancelled_at_reset = first.is_cancelled();
                *state = "loading".to_string();
            },
            |_cx| async { "fresh" },
            |state, s| *state = s.to_string(),
        );

        assert!(cancelled_at_reset);
        view.settled().await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(view.snapshot(), "fresh");
    }

    #[tokio::test]
    async fn unmount_cancels_the_call_context() {
        let mut view = View::new(false, CallContext::default());
        let (seen_tx, seen_rx) = tokio::sync::oneshot::channel();

        view.mount(
            move |cx| async move {
                cx.cancel.cancelled().await;
                let _ = seen_tx.send(());
                true
            },
            |state, v| *state = v,
        );
        view.unmount();

        tokio::time::timeout(Duration::from_secs(1), seen_rx)
            .await
            .expect("fetch observed cancellation")
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!view.snapshot());
    }

    #[tokio::test]
    async fn parent_cancellation_reaches_mounts() {
        let parent = CallContext::default();
        let mut view = View::new(0u8, parent.clone());
        view.mount(
            |cx| async move {
                cx.cancel.cancelled().await;
                1u8
            },
            |state, v| *state = v,
        );
        parent.cancel.cancel();
        view.settled().await;
        assert_eq!(view.snapshot(), 0);
    }
}
