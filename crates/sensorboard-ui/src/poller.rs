//! Cancellable periodic refresh
//!
//! One task per open view. Every tick starts a fresh fetch; if the previous
//! fetch has not finished by then it is dropped, so a slow response can never
//! overwrite a newer one. Results are published on a `watch` channel and the
//! task ends as soon as the handle (or every receiver) is dropped.

use futures::{Stream, stream};
use std::{future::Future, pin::Pin, time::Duration};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::debug;

/// Handle to a running poller; dropping it stops the task
#[derive(Debug)]
pub struct PollerHandle<T> {
    rx: watch::Receiver<Option<T>>,
    task: JoinHandle<()>,
}

impl<T> Drop for PollerHandle<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<T: Clone + Send + Sync + 'static> PollerHandle<T> {
    /// Wait for the next published value
    ///
    /// Returns `None` once the task has stopped.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(value) = self.rx.borrow_and_update().clone() {
                return Some(value);
            }
        }
    }

    /// Stream of published values; the task lives as long as the stream
    pub fn into_stream(self) -> impl Stream<Item = T> + Send {
        stream::unfold(self, |mut handle| async move {
            let value = handle.next().await?;
            Some((value, handle))
        })
    }
}

/// Start polling `fetch` every `period`, beginning immediately
pub fn spawn<T, F, Fut>(period: Duration, fetch: F) -> PollerHandle<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let (tx, rx) = watch::channel(None);
    let task = tokio::spawn(run(period, fetch, tx));
    PollerHandle { rx, task }
}

async fn run<T, F, Fut>(period: Duration, fetch: F, tx: watch::Sender<Option<T>>)
where
    F: Fn() -> Fut,
    Fut: Future<Output = T>,
{
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight: Option<Pin<Box<Fut>>> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if in_flight.is_some() {
                    debug!("Refresh still running on tick, replacing it");
                }
                in_flight = Some(Box::pin(fetch()));
            }
            Some(value) = poll_in_flight(&mut in_flight), if in_flight.is_some() => {
                in_flight = None;
                if tx.send(Some(value)).is_err() {
                    break;
                }
            }
            _ = tx.closed() => break,
        }
    }

    debug!("Poller stopped");
}

async fn poll_in_flight<Fut: Future>(in_flight: &mut Option<Pin<Box<Fut>>>) -> Option<Fut::Output> {
    match in_flight.as_mut() {
        Some(fut) => Some(fut.await),
        None => None,
    }
}
