//! The editor session: one context object owning the document, highlights,
//! canvas and gesture state, driven by pointer events, edit events and
//! commands.

pub mod editor;
pub mod events;
pub mod observer;

pub use editor::{EditorSession, SessionError};
pub use events::{Command, EditEvent, GesturePhase, PointerEvent};
pub use observer::{SessionChange, SubscriptionId};
