//! Debounce and throttle wrappers
//!
//! [`Debouncer`] needs a running tokio runtime when called: the delayed call
//! is a spawned task that the next call aborts. [`Throttle`] only compares
//! instants and runs the wrapped function inline.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Runs the wrapped function once, `wait` after the last call of a burst,
/// with that last call's argument.
pub struct Debouncer<A> {
    func: Callback<A>,
    wait: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

pub fn debounce<A, F>(func: F, wait: Duration) -> Debouncer<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debouncer {
        func: Arc::new(func),
        wait,
        pending: Mutex::new(None),
    }
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn call(&self, args: A) {
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        let func = self.func.clone();
        let wait = self.wait;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            func(args);
        }));
    }

    /// Drops a scheduled call, if any.
    pub fn cancel(&self) {
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}

/// Leading-edge throttle: the first call runs immediately, later calls are
/// dropped until `limit` has passed since the call that ran.
pub struct Throttle<A> {
    func: Callback<A>,
    limit: Duration,
    last_run: Mutex<Option<Instant>>,
}

pub fn throttle<A, F>(func: F, limit: Duration) -> Throttle<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Throttle {
        func: Arc::new(func),
        limit,
        last_run: Mutex::new(None),
    }
}

impl<A> Throttle<A> {
    /// Returns whether the wrapped function ran.
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();
        {
            let mut last_run = match self.last_run.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if matches!(*last_run, Some(at) if now.duration_since(at) < self.limit) {
                return false;
            }
            *last_run = Some(now);
        }
        (self.func)(args);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_debounce_runs_once_with_last_args() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let search = debounce(move |term: String| sink.lock().unwrap().push(term), Duration::from_millis(300));

        for term in ["a", "ar", "arr", "arro", "arroz"] {
            search.call(term.to_string());
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*calls.lock().unwrap(), vec!["arroz".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_separate_bursts_each_fire() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let save = debounce(move |_: ()| { counter.fetch_add(1, Ordering::SeqCst); }, Duration::from_millis(100));

        save.call(());
        tokio::time::sleep(Duration::from_millis(150)).await;
        save.call(());
        save.call(());
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_cancel() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let save = debounce(move |_: ()| { counter.fetch_add(1, Ordering::SeqCst); }, Duration::from_millis(100));

        save.call(());
        save.cancel();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_leading_edge() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let scroll = throttle(move |n: u32| sink.lock().unwrap().push(n), Duration::from_millis(200));

        assert!(scroll.call(1));
        for n in 2..6 {
            tokio::time::advance(Duration::from_millis(30)).await;
            assert!(!scroll.call(n));
        }
        assert_eq!(*calls.lock().unwrap(), vec![1]);

        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(scroll.call(6));
        assert_eq!(*calls.lock().unwrap(), vec![1, 6]);
    }
}
