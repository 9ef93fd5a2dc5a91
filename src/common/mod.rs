#[cfg(test)]
pub(crate) mod mock;
pub mod print;
pub mod reg;
pub mod ringbuf;
pub mod uart;

/// Hand out a `&'static mut RingBuffer<$size>` backed by a static.
///
/// Each expansion owns its own storage and may run only once; a second run
/// panics instead of aliasing the buffer.
#[macro_export]
macro_rules! static_ringbuf {
    ($size:expr) => {{
        static mut RB: $crate::ringbuf::RingBuffer<{ $size }> = $crate::ringbuf::RingBuffer::new();
        static TAKEN: $crate::ringbuf::Taken = $crate::ringbuf::Taken::new();
        TAKEN.take();
        unsafe { &mut *(&raw mut RB) }
    }};
}
