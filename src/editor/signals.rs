//! Module implementing the keyboard & lifecycle signal bus.

use std::fmt;


/// A signal emitted by the host shell while the editor is on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Signal {
    /// The on-screen keyboard is about to appear.
    KeyboardWillShow{
        /// Height of the keyboard, in pixels.
        height: f32,
    },
    /// The on-screen keyboard is about to disappear.
    KeyboardWillHide,
    /// The application is moving to the background.
    AppEnteredBackground,
}


/// Handle to an active subscription on a `SignalBus`.
///
/// Dropping the handle does NOT unsubscribe; pass it back to
/// `SignalBus::unsubscribe` when the screen goes away.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "unused subscription which cannot be unsubscribed"]
pub struct Subscription(usize);


/// Bus carrying `Signal`s from the host shell to interested handlers.
///
/// Registration is explicit on both ends, so handler lifetime can be
/// tied exactly to the editor screen's visibility -- there is no global
/// observer registry to leak handlers into.
pub struct SignalBus {
    handlers: Vec<(usize, Box<FnMut(&Signal) + 'static>)>,
    next_token: usize,
}

impl SignalBus {
    #[inline]
    pub fn new() -> Self {
        SignalBus{handlers: vec![], next_token: 0}
    }
}

impl SignalBus {
    /// Register a handler for all signals on the bus.
    pub fn subscribe<F>(&mut self, handler: F) -> Subscription
        where F: FnMut(&Signal) + 'static
    {
        let token = self.next_token;
        self.next_token += 1;
        self.handlers.push((token, Box::new(handler)));
        trace!("Signal handler #{} subscribed", token);
        Subscription(token)
    }

    /// Remove a previously registered handler.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        let Subscription(token) = subscription;
        let count_before = self.handlers.len();
        self.handlers.retain(|&(t, _)| t != token);
        if self.handlers.len() == count_before {
            warn!("Unsubscribe of unknown signal handler #{}", token);
        } else {
            trace!("Signal handler #{} unsubscribed", token);
        }
    }

    /// Deliver a signal to every subscribed handler, in subscription order.
    pub fn emit(&mut self, signal: Signal) {
        trace!("Emitting {:?} to {} handler(s)", signal, self.handlers.len());
        for &mut (_, ref mut handler) in &mut self.handlers {
            handler(&signal);
        }
    }

    /// Number of currently subscribed handlers.
    #[inline]
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SignalBus {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("SignalBus")
            .field("handlers", &self.handlers.len())
            .field("next_token", &self.next_token)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use super::{Signal, SignalBus};

    #[test]
    fn signals_reach_subscribers() {
        let mut bus = SignalBus::new();
        let seen = Rc::new(Cell::new(0));

        let subscription = bus.subscribe({
            let seen = seen.clone();
            move |_: &Signal| seen.set(seen.get() + 1)
        });
        bus.emit(Signal::KeyboardWillHide);
        bus.emit(Signal::AppEnteredBackground);
        assert_eq!(2, seen.get());

        bus.unsubscribe(subscription);
    }

    #[test]
    fn unsubscribed_handlers_are_not_called() {
        let mut bus = SignalBus::new();
        let seen = Rc::new(Cell::new(0));

        let subscription = bus.subscribe({
            let seen = seen.clone();
            move |_: &Signal| seen.set(seen.get() + 1)
        });
        bus.unsubscribe(subscription);
        assert_eq!(0, bus.subscriber_count());

        bus.emit(Signal::KeyboardWillHide);
        assert_eq!(0, seen.get());
    }

    #[test]
    fn handlers_receive_the_payload() {
        let mut bus = SignalBus::new();
        let height = Rc::new(Cell::new(0.0));

        let subscription = bus.subscribe({
            let height = height.clone();
            move |signal: &Signal| {
                if let Signal::KeyboardWillShow{height: h} = *signal {
                    height.set(h);
                }
            }
        });
        bus.emit(Signal::KeyboardWillShow{height: 216.0});
        assert_eq!(216.0, height.get());

        bus.unsubscribe(subscription);
    }
}
