use crossbeam_channel::{Receiver, Sender};

use crate::types::Button;

/// Signals emitted by an [`EventChannel`](crate::EventChannel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The channel was constructed. Carries the kernel device name, or
    /// `"Device: <path>"` when the name could not be queried.
    Connected(String),
    /// The channel was torn down.
    Disconnected,
    /// A logical button was pressed or released.
    ButtonChanged { button: Button, pressed: bool },
    /// A non-fatal fault was logged.
    Error(String),
}

/// Receiving end of a subscription.
pub type EventReceiver = Receiver<ControllerEvent>;

/// Sending end handed to [`EventChannel::open_with_sender`](crate::EventChannel::open_with_sender).
pub type EventSender = Sender<ControllerEvent>;

/// Fan-out to every live subscriber.
#[derive(Default)]
pub(crate) struct Subscribers(Vec<EventSender>);

impl Subscribers {
    pub(crate) fn new(first: EventSender) -> Self {
        Self(vec![first])
    }

    pub(crate) fn push(&mut self, tx: EventSender) {
        self.0.push(tx);
    }

    /// Sends the event once to each subscriber and forgets the ones whose
    /// receiver was dropped.
    pub(crate) fn broadcast(&mut self, event: ControllerEvent) {
        self.0.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::unbounded;

    use super::*;

    #[test]
    fn broadcast_reaches_every_subscriber_once() {
        let (tx1, rx1) = unbounded();
        let (tx2, rx2) = unbounded();
        let mut subs = Subscribers::new(tx1);
        subs.push(tx2);

        subs.broadcast(ControllerEvent::Disconnected);

        assert_eq!(rx1.try_iter().collect::<Vec<_>>(), [ControllerEvent::Disconnected]);
        assert_eq!(rx2.try_iter().collect::<Vec<_>>(), [ControllerEvent::Disconnected]);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let (tx1, rx1) = unbounded();
        let (tx2, rx2) = unbounded();
        let mut subs = Subscribers::new(tx1);
        subs.push(tx2);
        drop(rx1);

        subs.broadcast(ControllerEvent::Connected("pad".into()));
        assert_eq!(subs.0.len(), 1);
        assert_eq!(rx2.len(), 1);
    }
}
