use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

/// Multi-consumer work queue shared by the crawl workers.
///
/// Every pushed item counts as in flight until a worker calls `complete`
/// for it. `next` hands out items and returns `None` once the queue is empty
/// and nothing is in flight anymore, i.e. no worker can produce new work.
pub(crate) struct WorkQueue<T> {
    items: Mutex<VecDeque<T>>,
    in_flight: AtomicUsize,
    notify: Notify,
}

impl<T> WorkQueue<T> {
    pub(crate) fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            in_flight: AtomicUsize::new(0),
            notify: Notify::new(),
        }
    }

    pub(crate) fn push(&self, item: T) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.items().push_back(item);
        self.notify.notify_waiters();
    }

    pub(crate) async fn next(&self) -> Option<T> {
        loop {
            // Register before looking so a push or the final complete()
            // between the checks below and the await still wakes us
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(item) = self.items().pop_front() {
                return Some(item);
            }
            if self.in_flight.load(Ordering::SeqCst) == 0 {
                return None;
            }

            notified.await;
        }
    }

    /// Marks one item handed out by `next` as finished. Any follow-up items
    /// must be pushed before this is called.
    pub(crate) fn complete(&self) {
        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notify.notify_waiters();
        }
    }

    /// Guard that calls `complete` when dropped, including during a panic
    /// unwind, so a failed item never keeps the other workers waiting.
    pub(crate) fn completion(&self) -> Completion<'_, T> {
        Completion { queue: self }
    }

    fn items(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) struct Completion<'a, T> {
    queue: &'a WorkQueue<T>,
}

impl<T> Drop for Completion<'_, T> {
    fn drop(&mut self) {
        self.queue.complete();
    }
}
