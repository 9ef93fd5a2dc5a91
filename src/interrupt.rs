use core::cell::UnsafeCell;

/// Statically allocated slot holding the handler of one interrupt vector.
///
/// The vector-to-handler mapping is fixed at build time by
/// [`interrupt_handler!`](crate::interrupt_handler); only the handler value is
/// filled in at startup.
pub struct Handler<T> {
    slot: UnsafeCell<Option<T>>,
}

/// # Safety
///
/// The slot is written once inside a critical section and afterwards only
/// touched by its own vector, which on AVR cannot preempt itself.
unsafe impl<T> Sync for Handler<T> {}

impl<T> Handler<T> {
    pub const fn new() -> Self {
        Self {
            slot: UnsafeCell::new(None),
        }
    }

    /// Install the handler. You can call it only once.
    ///
    /// Do it before enabling the interrupt source; an interrupt that fires
    /// while the slot is empty is ignored.
    pub fn set(&self, handler: T) {
        let installed = critical_section::with(|_| {
            let slot = unsafe { &mut *self.slot.get() };
            if slot.is_some() {
                return false;
            }
            *slot = Some(handler);
            true
        });
        assert!(installed, "interrupt handler already set");
    }

    /// # Safety
    ///
    /// Only call from the vector this slot belongs to, and never re-entrantly.
    #[inline(always)]
    pub unsafe fn call(&self, f: impl FnOnce(&mut T)) {
        if let Some(h) = unsafe { (*self.slot.get()).as_mut() } {
            f(h)
        }
    }
}

impl<T> Default for Handler<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Declare a handler slot per receive vector together with the vector
/// function that forwards to it.
///
/// Attributes are passed through to the generated function, so the target's
/// interrupt attribute goes there:
///
/// ```ignore
/// interrupt_handler!(
///     #[avr_device::interrupt(atmega328p)]
///     (USART_RX, USART0_RX, UartInterruptRxHandler<'static, Usart<MmioRegister>, 128>),
/// );
/// ```
#[macro_export]
macro_rules! interrupt_handler {
    ($(
        $(#[$attr:meta])*
        ($VECTOR:ident, $SLOT:ident, $T:ty),
    )+) => {$(
        pub static $SLOT: $crate::interrupt::Handler<$T> = $crate::interrupt::Handler::new();

        #[allow(non_snake_case)]
        $(#[$attr])*
        fn $VECTOR() {
            unsafe { $SLOT.call(|h| h.handler()) }
        }
    )+};
}

#[cfg(test)]
mod tests {
    use super::*;

    pub struct Counter(pub u32);

    impl Counter {
        fn handler(&mut self) {
            self.0 += 1;
        }
    }

    crate::interrupt_handler!(
        (TEST_VECTOR, TEST_SLOT, Counter),
    );

    #[test]
    fn vector_forwards_to_installed_handler() {
        // nothing installed yet: ignored
        TEST_VECTOR();
        TEST_SLOT.set(Counter(0));
        TEST_VECTOR();
        TEST_VECTOR();
        let mut seen = 0;
        unsafe { TEST_SLOT.call(|c| seen = c.0) };
        assert_eq!(seen, 2);
    }

    #[test]
    #[should_panic(expected = "already set")]
    fn handler_set_only_once() {
        let h = Handler::new();
        h.set(1u8);
        h.set(2u8);
    }
}
