use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use super::state::DownloadState;

/// Identifies which control sent a notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ButtonId(pub u32);

/// Application-side receiver of control notifications.
///
/// Called synchronously from inside the triggering call, after the control's
/// own state has been updated.
pub trait DownloadObserver {
    fn state_changed(&mut self, state: DownloadState, sender: ButtonId);

    /// The user tapped a finished control.
    fn open_requested(&mut self, sender: ButtonId);

    /// The user tapped a busy control. Respond with
    /// [`DownloadButton::request_cancel`](super::DownloadButton::request_cancel)
    /// to actually unwind it.
    fn cancel_requested(&mut self, sender: ButtonId);
}

/// Notification recorded by [`EventQueue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    StateChanged {
        state: DownloadState,
        sender: ButtonId,
    },
    OpenRequested {
        sender: ButtonId,
    },
    CancelRequested {
        sender: ButtonId,
    },
}

/// Observer that queues notifications for the host to drain later.
///
/// Clones share the same queue, so one clone can be handed to the control
/// while the host keeps another to react outside the control's call stack.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Rc<RefCell<VecDeque<ButtonEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every queued notification, oldest first.
    pub fn drain(&self) -> Vec<ButtonEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn push(&self, event: ButtonEvent) {
        self.events.borrow_mut().push_back(event);
    }
}

impl DownloadObserver for EventQueue {
    fn state_changed(&mut self, state: DownloadState, sender: ButtonId) {
        self.push(ButtonEvent::StateChanged { state, sender });
    }

    fn open_requested(&mut self, sender: ButtonId) {
        self.push(ButtonEvent::OpenRequested { sender });
    }

    fn cancel_requested(&mut self, sender: ButtonId) {
        self.push(ButtonEvent::CancelRequested { sender });
    }
}
