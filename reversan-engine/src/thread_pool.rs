//! A fixed-size pool of worker threads running boxed closures.

use log::{error, trace};
use std::any::Any;
use std::collections::VecDeque;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

/// A unit of work for the pool.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Lock `mutex`, recovering the data if a panicking thread poisoned it.
/// Tasks catch their own panics, so the data behind the lock is still usable.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn wait<'a, T>(condvar: &Condvar, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
    condvar.wait(guard).unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct Queue {
    tasks: VecDeque<Task>,
    stopping: bool,
}

#[derive(Default)]
struct Shared {
    queue: Mutex<Queue>,
    task_added: Condvar,
    /// Tasks added but not yet finished.
    in_flight: Mutex<usize>,
    all_done: Condvar,
}

/// Runs tasks on a fixed number of threads.
///
/// Dropping the pool waits for every outstanding task, then stops the workers.
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Spawn `size` workers. Fails if the OS refuses to create a thread.
    pub fn new(size: usize) -> io::Result<Self> {
        let shared = Arc::new(Shared::default());
        let mut pool = Self {
            shared,
            workers: Vec::with_capacity(size),
        };

        for id in 0..size {
            let shared = Arc::clone(&pool.shared);
            let worker = thread::Builder::new()
                .name(format!("reversan-worker-{}", id))
                .spawn(move || work(&shared))?;
            pool.workers.push(worker);
        }

        Ok(pool)
    }

    /// The number of worker threads.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queue `task` and wake one idle worker.
    pub fn add_task<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        *lock(&self.shared.in_flight) += 1;
        lock(&self.shared.queue).tasks.push_back(Box::new(task));
        self.shared.task_added.notify_one();
    }

    /// Block until every task added so far has finished.
    pub fn join(&self) {
        let mut in_flight = lock(&self.shared.in_flight);
        while *in_flight > 0 {
            in_flight = wait(&self.shared.all_done, in_flight);
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.join();

        lock(&self.shared.queue).stopping = true;
        self.shared.task_added.notify_all();

        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("A worker thread panicked outside of a task");
            }
        }
    }
}

fn work(shared: &Shared) {
    while let Some(task) = next_task(shared) {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
            error!("A search task panicked: {}", panic_message(&*payload));
        }

        let mut in_flight = lock(&shared.in_flight);
        *in_flight -= 1;
        if *in_flight == 0 {
            shared.all_done.notify_all();
        }
    }

    trace!("Worker {:?} stopped", thread::current().name());
}

/// Wait for the next task, or `None` once the pool is stopping and the queue is drained.
fn next_task(shared: &Shared) -> Option<Task> {
    let mut queue = lock(&shared.queue);
    loop {
        if let Some(task) = queue.tasks.pop_front() {
            return Some(task);
        }
        if queue.stopping {
            return None;
        }
        queue = wait(&shared.task_added, queue);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
