use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// Returned by [`Pacer::pause`] when the wait was interrupted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Waits between presses. Implementations may be cancelled from another
/// thread; a cancelled pacer stays cancelled.
pub trait Pacer {
    fn pause(&mut self, gap: Duration) -> Result<(), Cancelled>;
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, gap: Duration) -> Result<(), Cancelled> {
        (**self).pause(gap)
    }
}

/// Never waits. Records the requested gaps.
#[derive(Debug, Default)]
pub struct NoopPacer {
    pauses: Vec<Duration>,
}

impl NoopPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> &[Duration] {
        &self.pauses
    }
}

impl Pacer for NoopPacer {
    fn pause(&mut self, gap: Duration) -> Result<(), Cancelled> {
        self.pauses.push(gap);
        Ok(())
    }
}

/// Sleeps on the calling thread until the gap elapses or the paired
/// [`CancelHandle`] fires.
#[derive(Debug)]
pub struct ThreadPacer {
    wake: Receiver<()>,
    cancelled: bool,
    // Keeps the channel connected even if every handle is dropped
    _keepalive: Sender<()>,
}

/// Cancels a [`ThreadPacer`] from any thread
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Sender<()>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // Receiver gone means the pacer is already dropped
        let _ = self.tx.send(());
    }
}

impl ThreadPacer {
    pub fn new() -> (Self, CancelHandle) {
        let (tx, rx) = mpsc::channel();
        let pacer = Self {
            wake: rx,
            cancelled: false,
            _keepalive: tx.clone(),
        };
        let handle = CancelHandle { tx };
        (pacer, handle)
    }

    pub fn is_cancelled(&mut self) -> bool {
        if !self.cancelled && self.wake.try_recv().is_ok() {
            self.cancelled = true;
        }
        self.cancelled
    }
}

impl Pacer for ThreadPacer {
    fn pause(&mut self, gap: Duration) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        match self.wake.recv_timeout(gap) {
            Ok(()) => {
                self.cancelled = true;
                Err(Cancelled)
            }
            Err(RecvTimeoutError::Timeout) => Ok(()),
            // Unreachable while `_keepalive` is held
            Err(RecvTimeoutError::Disconnected) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_noop_records_gaps() {
        let mut pacer = NoopPacer::new();
        pacer.pause(Duration::from_millis(300)).unwrap();
        pacer.pause(Duration::from_millis(5)).unwrap();
        assert_eq!(
            pacer.pauses(),
            &[Duration::from_millis(300), Duration::from_millis(5)]
        );
    }

    #[test]
    fn test_thread_pacer_waits() {
        let (mut pacer, _handle) = ThreadPacer::new();
        let start = Instant::now();
        pacer.pause(Duration::from_millis(20)).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_cancel_before_pause() {
        let (mut pacer, handle) = ThreadPacer::new();
        handle.cancel();
        assert_eq!(pacer.pause(Duration::from_secs(10)), Err(Cancelled));
        // Stays cancelled
        assert_eq!(pacer.pause(Duration::from_millis(1)), Err(Cancelled));
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let (mut pacer, handle) = ThreadPacer::new();
        let waker = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            handle.cancel();
        });

        let start = Instant::now();
        assert_eq!(pacer.pause(Duration::from_secs(30)), Err(Cancelled));
        assert!(start.elapsed() < Duration::from_secs(30));
        waker.join().unwrap();
    }

    #[test]
    fn test_dropped_handle_does_not_cut_pause_short() {
        let (mut pacer, handle) = ThreadPacer::new();
        drop(handle);
        let start = Instant::now();
        pacer.pause(Duration::from_millis(20)).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
