use std::{
    sync::{
        mpsc::{self, RecvTimeoutError, SyncSender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// Represents a timer inside of the chip
/// infrastructure, it will count down to
/// zero from whatever number it was given.
///
/// The timer does not keep time itself, the host calls [`tick`](Timer::tick)
/// at 60Hz.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timer {
    /// Will create a new timer with the given value.
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    /// Will set the value from which the timer shall count down from.
    pub fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Will get the value that the counter is currently at.
    pub fn get_value(&self) -> u8 {
        self.value
    }

    /// Is the timer still counting down.
    pub fn is_active(&self) -> bool {
        self.value > 0
    }

    /// Decrements by one, stops at zero.
    pub fn tick(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

/// A worker that calls a callback periodically.
pub trait TimedWorker {
    fn new() -> Self;
    fn start<T>(&mut self, callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static;
    fn stop(&mut self);
    fn is_alive(&self) -> bool;
}

/// Is the internal worker, that exists on a
/// second thread.
pub struct Worker {
    /// Contains the actual thread, that is running.
    thread: Option<JoinHandle<()>>,
    /// Contains the sync sender used to gracefully shutdown the thread.
    shutdown: Option<SyncSender<()>>,
    /// Counts the threads holding on to it, the worker is alive while
    /// the thread keeps its clone.
    alive: Arc<()>,
}

impl TimedWorker for Worker {
    /// Will initialize the new worker.
    fn new() -> Self {
        Self {
            thread: None,
            shutdown: None,
            alive: Arc::new(()),
        }
    }

    /// Will start the worker that will run the callback function
    /// every interval.
    /// Attention the timer assumes the callback will finish
    /// calculation faster than the interval.
    fn start<T>(&mut self, mut callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static,
    {
        // only a single thread per worker
        self.stop();

        let (send, recv) = mpsc::sync_channel::<()>(1);
        let alive = self.alive.clone();
        let thread = thread::spawn(move || {
            let _alive = alive;
            let mut timeout = interval;
            loop {
                match recv.recv_timeout(timeout) {
                    Err(RecvTimeoutError::Timeout) => {
                        let start = Instant::now();

                        callback();

                        // make sure the system will at most wait the interval
                        timeout = interval.saturating_sub(start.elapsed());
                    }
                    Ok(_) | Err(_) => break, // shutdown
                }
            }
        });

        self.thread = Some(thread);
        self.shutdown = Some(send);
    }

    /// Will stop the worker.
    fn stop(&mut self) {
        // the thread may already be gone, in which case the send fails
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("The worker thread panicked.");
            }
        }
    }

    /// Checks if the thread is alive.
    fn is_alive(&self) -> bool {
        Arc::strong_count(&self.alive) > 1
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_timer_floors_at_zero() {
        let mut timer = Timer::new(2);
        assert!(timer.is_active());
        timer.tick();
        assert_eq!(timer.get_value(), 1);
        timer.tick();
        timer.tick();
        assert_eq!(timer.get_value(), 0);
        assert!(!timer.is_active());
    }

    #[test]
    fn test_timer_set_value() {
        let mut timer = Timer::default();
        assert_eq!(timer.get_value(), 0);
        timer.set_value(0xFF);
        assert_eq!(timer.get_value(), 0xFF);
    }

    #[test]
    fn test_worker() {
        let counter = Arc::new(AtomicUsize::new(0));
        let ccounter = counter.clone();

        let mut worker = Worker::new();
        assert!(!worker.is_alive());

        worker.start(
            move || {
                ccounter.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_millis(5),
        );
        assert!(worker.is_alive());

        thread::sleep(Duration::from_millis(200));
        worker.stop();
        assert!(!worker.is_alive());

        let ran = counter.load(Ordering::SeqCst);
        assert!(ran > 0);

        // no more calls after the stop
        thread::sleep(Duration::from_millis(50));
        assert_eq!(ran, counter.load(Ordering::SeqCst));
    }
}
