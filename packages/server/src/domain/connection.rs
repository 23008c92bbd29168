//! Live connections and the events the core pushes through them.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::{
    entity::Message,
    error::{DeliveryError, StateTransitionError},
    factory::ConnectionIdFactory,
    value_object::{ConnectionId, UserId},
};

/// Events emitted by the core towards a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// Current online set, sorted.
    PresenceUpdate(Vec<UserId>),
    /// A message addressed to the connection's owner.
    NewMessage(Message),
    /// A newer connection for the same user replaced this one; the writer should close.
    Superseded,
    /// The owner logged out; the writer should close.
    SessionEnded,
}

/// Handle to one live bidirectional channel.
///
/// Cloning the handle does not create a new connection: clones share the same
/// [`ConnectionId`] and outbound queue. Equality is identity equality.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    sender: UnboundedSender<OutboundEvent>,
}

impl Connection {
    /// Create a connection with a fresh identity and return its outbound receiver.
    ///
    /// The receiver belongs to the transport's writer task.
    pub fn open() -> (Self, UnboundedReceiver<OutboundEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let connection = Self {
            id: ConnectionIdFactory::generate(),
            sender,
        };
        (connection, receiver)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue an event for the writer task.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::ConnectionClosed` once the writer has gone away.
    pub fn send(&self, event: OutboundEvent) -> Result<(), DeliveryError> {
        self.sender
            .send(event)
            .map_err(|_| DeliveryError::ConnectionClosed(self.id))
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Connection {}

/// Per-connection lifecycle state.
///
/// `Connecting -> Bound -> Open -> Closed`. A connection may also be closed straight
/// from `Connecting` or `Bound` when the transport drops early. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Bound,
    Open,
    Closed,
}

impl ConnectionState {
    pub fn can_transition_to(self, next: ConnectionState) -> bool {
        use ConnectionState::{Bound, Closed, Connecting, Open};
        matches!(
            (self, next),
            (Connecting, Bound) | (Bound, Open) | (Connecting | Bound | Open, Closed)
        )
    }

    /// Move to `next`, rejecting anything the state machine does not allow.
    pub fn transition(&mut self, next: ConnectionState) -> Result<(), StateTransitionError> {
        if !self.can_transition_to(next) {
            return Err(StateTransitionError { from: *self, to: next });
        }
        *self = next;
        Ok(())
    }
}
