/*!
General callbacks associated with a context, and interruption.

Both the terminate callback and the interrupt flag are polled at each restart decision point of a solve, and either ends the solve with an unknown result.
Neither is polled during propagation.

The interrupt flag is shared through an [Arc], so a solve may be interrupted from another thread:

```rust
# use otter_smt::context::Context;
# use otter_smt::config::Config;
# use std::sync::atomic::Ordering;
let mut the_context = Context::from_config(Config::default());
let handle = the_context.interrupt_handle();

handle.store(true, Ordering::Relaxed);
assert!(the_context.is_interrupted());

the_context.clear_interrupt();
assert!(!the_context.is_interrupted());
```

# Callback types

Callbacks may be mutable functions.
Still, information passed from the solver is non-mutable.
*/

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use super::GenericContext;

pub type CallbackTerminate = dyn FnMut() -> bool;

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    pub fn set_callback_terminate(&mut self, callback: Box<CallbackTerminate>) {
        self.callback_terminate = Some(callback);
    }

    pub fn check_callback_terminate(&mut self) -> bool {
        if let Some(callback) = &mut self.callback_terminate {
            callback()
        } else {
            false
        }
    }

    /// Requests the end of a solve at the next restart decision point.
    ///
    /// The request stands until cleared with [clear_interrupt](GenericContext::clear_interrupt).
    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    pub fn clear_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// A handle to the interrupt flag of the context.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.interrupt.clone()
    }
}
