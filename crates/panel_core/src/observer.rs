//! One-shot change observer.
//!
//! The host calls [`OneShotObserver::notify`] after every change it sees. The
//! callback runs the first time the predicate holds and the observer then
//! disconnects itself, so later notifications are ignored.

use std::fmt;

type Predicate<T> = Box<dyn Fn(&T) -> bool>;
type Callback<T> = Box<dyn FnOnce(&T)>;

pub struct OneShotObserver<T> {
    predicate: Predicate<T>,
    callback: Option<Callback<T>>,
}

impl<T> OneShotObserver<T> {
    pub fn new(
        predicate: impl Fn(&T) -> bool + 'static,
        callback: impl FnOnce(&T) + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            callback: Some(Box::new(callback)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.callback.is_some()
    }

    /// Returns `true` if this notification fired the callback.
    pub fn notify(&mut self, subject: &T) -> bool {
        if !self.is_connected() || !(self.predicate)(subject) {
            return false;
        }
        if let Some(callback) = self.callback.take() {
            callback(subject);
        }
        true
    }

    /// Drops the callback without running it.
    pub fn disconnect(&mut self) {
        self.callback = None;
    }
}

impl<T> fmt::Debug for OneShotObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneShotObserver")
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}
