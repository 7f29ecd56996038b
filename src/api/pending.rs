//! Pending operations
//!
//! Runs one blocking API call on a background thread. The owning screen polls
//! it once per frame, so the frame loop keeps drawing while the request is in
//! flight.

use super::ApiError;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// Result type for pending operations
pub type OpResult<T> = Result<T, ApiError>;

/// A handle to an in-flight API call that can be polled
pub struct PendingOp<T> {
    receiver: Receiver<OpResult<T>>,
    result: Option<OpResult<T>>,
}

impl<T: Send + 'static> PendingOp<T> {
    /// Run `call` on a new thread
    pub fn spawn<F>(call: F) -> Self
    where
        F: FnOnce() -> OpResult<T> + Send + 'static,
    {
        let (sender, receiver) = channel();
        thread::spawn(move || {
            let _ = sender.send(call());
        });
        Self {
            receiver,
            result: None,
        }
    }
}

impl<T> PendingOp<T> {
    /// Check if the call has completed (polls the channel)
    pub fn is_complete(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }

        match self.receiver.try_recv() {
            Ok(result) => {
                self.result = Some(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                // Worker panicked before sending
                self.result = Some(Err(ApiError::Transport(
                    "request ended without a response".into(),
                )));
                true
            }
        }
    }

    /// Take the result if complete
    pub fn take(mut self) -> Option<OpResult<T>> {
        if self.result.is_none() {
            if let Ok(result) = self.receiver.try_recv() {
                self.result = Some(result);
            }
        }
        self.result
    }
}

/// Take the result out of `slot` once its operation has completed.
///
/// Leaves the slot untouched (and returns `None`) while the call is still running.
pub fn poll_slot<T>(slot: &mut Option<PendingOp<T>>) -> Option<OpResult<T>> {
    let done = slot.as_mut().map_or(false, PendingOp::is_complete);
    if !done {
        return None;
    }
    slot.take().and_then(PendingOp::take)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::sync_channel;

    #[test]
    fn test_spawn_completes() {
        let mut op = PendingOp::spawn(|| Ok(42));
        let mut slot = None;
        test_util::wait_until_idle(&mut op, |op| !op.is_complete());
        assert_eq!(op.take(), Some(Ok(42)));

        slot.replace(PendingOp::spawn(|| Err::<i32, _>(ApiError::Decode("bad".into()))));
        test_util::wait_until_idle(&mut slot, |s| s.as_mut().map_or(false, |op| !op.is_complete()));
        assert_eq!(poll_slot(&mut slot), Some(Err(ApiError::Decode("bad".into()))));
        assert!(slot.is_none());
    }

    #[test]
    fn test_poll_slot_leaves_running_op() {
        let (release, gate) = sync_channel::<()>(0);
        let mut slot = Some(PendingOp::spawn(move || {
            let _ = gate.recv();
            Ok("done")
        }));

        assert_eq!(poll_slot(&mut slot), None);
        assert!(slot.is_some());

        release.send(()).unwrap();
        test_util::wait_until_idle(&mut slot, |s| poll_slot(s).is_none() && s.is_some());
        assert!(slot.is_none());
    }

    #[test]
    fn test_poll_empty_slot() {
        let mut slot: Option<PendingOp<()>> = None;
        assert_eq!(poll_slot(&mut slot), None);
    }

    #[test]
    fn test_panicking_worker_reports_error() {
        let mut op: PendingOp<()> = PendingOp::spawn(|| panic!("worker died"));
        test_util::wait_until_idle(&mut op, |op| !op.is_complete());
        assert!(matches!(op.take(), Some(Err(ApiError::Transport(_)))));
    }
}
