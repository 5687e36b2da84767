//! Engine shared between execution contexts.
//!
//! Wraps an [`Engine`] in a critical section so several tasks (or an
//! interrupt handler and the main loop) can use the same lookup-table
//! cache. Every call runs with the critical section held, so keep the
//! buffers passed through it small or use one engine per context.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::engine::Engine;

/// A thread/interrupt safe engine
pub struct SharedEngine {
    inner: Mutex<RefCell<Engine>>,
}

impl Default for SharedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedEngine {
    /// Create a new shared engine with an empty cache.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Engine::new())),
        }
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        critical_section::with(|cs| {
            let mut engine = self.inner.borrow(cs).borrow_mut();
            f(&mut engine)
        })
    }
}
