//! A fixed-size `std::thread` worker pool draining a shared queue
//! (§4.11/§5), replacing the teacher's async task-spawning model: the
//! concurrency unit here is one blocking connection per thread, not a
//! future, so a classic thread-pool-over-a-queue shape fits better than
//! an async executor.
//!
//! Jobs can enqueue further jobs of the same type from inside the
//! handler (the recursion scheduler's whole point), so plain
//! "close the channel, then join" shutdown doesn't work: the queue
//! would never observe zero senders while a worker is mid-handler.
//! Instead an `outstanding` counter (queued + currently running) drives
//! shutdown — the pool is done exactly when that counter hits zero.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;

struct Shared<T> {
    queue: Mutex<VecDeque<T>>,
    condvar: Condvar,
    outstanding: Mutex<usize>,
    shutting_down: Mutex<bool>,
}

/// A handle a running job can use to enqueue further jobs of the same
/// type, e.g. the URLs a recursion scheduler discovered in the page it
/// just fetched.
pub struct Handle<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Handle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + 'static> Handle<T> {
    pub fn submit(&self, job: T) {
        *self.shared.outstanding.lock().unwrap() += 1;
        self.shared.queue.lock().unwrap().push_back(job);
        self.shared.condvar.notify_one();
    }
}

pub struct WorkerPool<T> {
    shared: Arc<Shared<T>>,
    handles: Vec<JoinHandle<()>>,
}

impl<T: Send + 'static> WorkerPool<T> {
    pub fn new<F>(size: usize, handler: F) -> Self
    where
        F: Fn(T, &Handle<T>) + Send + Sync + 'static,
    {
        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            outstanding: Mutex::new(0),
            shutting_down: Mutex::new(false),
        });
        let handler = Arc::new(handler);

        let handles = (0..size.max(1))
            .map(|_| {
                let shared = Arc::clone(&shared);
                let handler = Arc::clone(&handler);
                std::thread::spawn(move || run_worker(shared, handler))
            })
            .collect();

        WorkerPool { shared, handles }
    }

    pub fn submit(&self, job: T) {
        self.handle().submit(job);
    }

    pub fn handle(&self) -> Handle<T> {
        Handle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Blocks until every submitted job (including jobs enqueued by
    /// other jobs) has completed, then signals every worker to exit and
    /// joins them.
    pub fn shutdown(self) {
        {
            let mut outstanding = self.shared.outstanding.lock().unwrap();
            while *outstanding > 0 {
                outstanding = self.shared.condvar.wait(outstanding).unwrap();
            }
        }
        *self.shared.shutting_down.lock().unwrap() = true;
        self.shared.condvar.notify_all();
        for handle in self.handles {
            let _ = handle.join();
        }
    }
}

fn run_worker<T, F>(shared: Arc<Shared<T>>, handler: Arc<F>)
where
    T: Send + 'static,
    F: Fn(T, &Handle<T>) + Send + Sync,
{
    loop {
        let job = {
            let mut queue = shared.queue.lock().unwrap();
            loop {
                if let Some(job) = queue.pop_front() {
                    break Some(job);
                }
                if *shared.shutting_down.lock().unwrap() {
                    break None;
                }
                queue = shared.condvar.wait(queue).unwrap();
            }
        };

        let Some(job) = job else { return };
        let handle = Handle {
            shared: Arc::clone(&shared),
        };
        handler(job, &handle);
        let mut outstanding = shared.outstanding.lock().unwrap();
        *outstanding -= 1;
        if *outstanding == 0 {
            shared.condvar.notify_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn drains_all_submitted_work_then_exits() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);
        let pool = WorkerPool::new(4, move |n: usize, _handle: &Handle<usize>| {
            counter_clone.fetch_add(n, Ordering::SeqCst);
        });

        for i in 1..=10 {
            pool.submit(i);
        }
        pool.shutdown();

        assert_eq!(counter.load(Ordering::SeqCst), 55);
    }

    #[test]
    fn a_pool_of_size_zero_still_gets_one_worker() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);
        let pool = WorkerPool::new(0, move |_: (), _handle: &Handle<()>| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        pool.submit(());
        pool.shutdown();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn a_job_can_enqueue_further_jobs() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);
        let pool = WorkerPool::new(2, move |depth: u32, handle: &Handle<u32>| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
            if depth < 3 {
                handle.submit(depth + 1);
            }
        });
        pool.submit(0);
        pool.shutdown();
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }
}
