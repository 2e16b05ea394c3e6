//! Terminal input: raw event collection and the key-binding state machine.

pub mod raw;
pub mod service;

pub use raw::{RawInputEvent, ScrollDirection};
pub use service::{
    spawn_input_thread, Focus, InputAction, InputService, InputState, InputStateMachine,
};
