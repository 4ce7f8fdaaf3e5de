//! Lazy page streams backed by a background producer

use crate::{Request, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, trace};

/// Stream of decoded pages, fetched one ahead of the consumer
///
/// A background thread sends the current page, hands its output over a
/// rendezvous channel and then moves on to the next page. The producer never
/// holds more than one finished page the consumer has not taken yet.
///
/// Dropping the stream stops the producer: a producer blocked handing over
/// a page wakes up and exits. [`Pages::cancel`] only ends iteration and
/// prevents further fetches; a producer already blocked on a finished page
/// stays blocked until the stream is dropped. A failed fetch is yielded as
/// `Err` and ends the stream.
#[derive(Debug)]
pub struct Pages<T> {
    receiver: Receiver<Result<T>>,
    cancelled: Arc<AtomicBool>,
}

impl<T> Pages<T>
where
    T: DeserializeOwned + Default + Send + 'static,
{
    /// Start streaming from the first page's request
    pub fn new<I>(first: Request<I, T>) -> Self
    where
        I: Serialize + DeserializeOwned + Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(0);
        let cancelled = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&cancelled);
        thread::spawn(move || produce(first, sender, flag));

        Self {
            receiver,
            cancelled,
        }
    }
}

impl<T> Pages<T> {
    /// End iteration and stop the producer before its next fetch
    ///
    /// Pages not yet taken are discarded. A producer currently waiting to
    /// hand over a page is only released when the stream is dropped.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl<T> Iterator for Pages<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_cancelled() {
            return None;
        }
        self.receiver.recv().ok()
    }
}

impl<T> Drop for Pages<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn produce<I, T>(first: Request<I, T>, sender: SyncSender<Result<T>>, cancelled: Arc<AtomicBool>)
where
    I: Serialize + DeserializeOwned,
    T: DeserializeOwned + Default,
{
    let operation = first.operation().name;
    let mut page = first;
    let mut fetched = 0usize;

    loop {
        if cancelled.load(Ordering::Acquire) {
            debug!(operation, fetched, "page stream cancelled");
            return;
        }

        let item = page.send().map(|()| page.take_data());
        let failed = item.is_err();
        fetched += 1;
        trace!(operation, page = fetched, failed, "page fetched");

        if sender.send(item).is_err() {
            debug!(operation, fetched, "page consumer went away");
            return;
        }
        if failed {
            return;
        }

        match page.next_page() {
            Ok(Some(next)) => page = next,
            Ok(None) => {
                debug!(operation, fetched, "no more pages");
                return;
            }
            Err(err) => {
                let _ = sender.send(Err(err));
                return;
            }
        }
    }
}
