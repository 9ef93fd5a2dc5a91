//! Single-producer / single-consumer byte ring buffer.
//!
//! The receive interrupt owns the [`Producer`] half and the main loop owns the
//! [`Consumer`] half. `head` is written only by the producer and `tail` only by
//! the consumer, so neither side ever takes a lock and the producer never waits.
//!
//! One slot is always left free to tell a full buffer from an empty one, so a
//! `RingBuffer<N>` holds at most `N - 1` bytes.

use core::cell::{Cell, UnsafeCell};
use core::sync::atomic::{AtomicU8, Ordering};
use critical_section::Mutex;

/// Fixed-capacity byte queue. Indices are 8 bits wide so every load and store
/// of `head`/`tail` is a single instruction on an 8-bit core.
pub struct RingBuffer<const N: usize> {
    storage: UnsafeCell<[u8; N]>,
    head: AtomicU8,
    tail: AtomicU8,
}

// Slots are handed between the halves through the release/acquire pairs on
// `head` and `tail`; no slot is ever accessed by both halves at once.
unsafe impl<const N: usize> Sync for RingBuffer<N> {}

impl<const N: usize> RingBuffer<N> {
    const SIZE_CHECK: () = assert!(N >= 2 && N <= 256, "ring buffer size must be in 2..=256");

    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SIZE_CHECK;
        Self {
            storage: UnsafeCell::new([0; N]),
            head: AtomicU8::new(0),
            tail: AtomicU8::new(0),
        }
    }

    /// Number of bytes the buffer can hold before it starts dropping input.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Split into the interrupt-side and main-loop-side halves.
    ///
    /// Any bytes left over from an earlier split are discarded.
    pub fn split(&mut self) -> (Producer<'_, N>, Consumer<'_, N>) {
        *self.head.get_mut() = 0;
        *self.tail.get_mut() = 0;
        let rb: &Self = self;
        (Producer { rb }, Consumer { rb })
    }

    #[inline(always)]
    fn advance(idx: u8) -> u8 {
        ((idx as usize + 1) % N) as u8
    }

    #[inline(always)]
    fn count(head: u8, tail: u8) -> usize {
        (N + head as usize - tail as usize) % N
    }

    #[inline(always)]
    fn slot(&self, idx: u8) -> *mut u8 {
        // `idx` is always < N
        unsafe { self.storage.get().cast::<u8>().add(idx as usize) }
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

// Producer -------------------------------------------------------------------

/// Writing half, owned by the receive interrupt handler.
pub struct Producer<'a, const N: usize> {
    rb: &'a RingBuffer<N>,
}

impl<const N: usize> Producer<'_, N> {
    /// Queue one byte. Returns `false` when the buffer is full and the byte was
    /// dropped: the producer never overwrites unread data and never waits.
    #[inline]
    pub fn push(&mut self, byte: u8) -> bool {
        let head = self.rb.head.load(Ordering::Relaxed);
        let next = RingBuffer::<N>::advance(head);
        if next == self.rb.tail.load(Ordering::Acquire) {
            return false;
        }
        unsafe { self.rb.slot(head).write(byte) };
        self.rb.head.store(next, Ordering::Release);
        true
    }
}

// Consumer -------------------------------------------------------------------

/// Reading half, owned by the serial port on the main loop.
///
/// Every call reloads `head`, so a byte pushed while the call is running may be
/// missed until the next call, but a byte is never reported twice.
pub struct Consumer<'a, const N: usize> {
    rb: &'a RingBuffer<N>,
}

impl<const N: usize> Consumer<'_, N> {
    /// Number of unread bytes.
    #[inline]
    pub fn pending(&self) -> usize {
        let head = self.rb.head.load(Ordering::Acquire);
        let tail = self.rb.tail.load(Ordering::Relaxed);
        RingBuffer::<N>::count(head, tail)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rb.head.load(Ordering::Acquire) == self.rb.tail.load(Ordering::Relaxed)
    }

    /// Oldest unread byte, left in place.
    pub fn peek(&self) -> Option<u8> {
        let tail = self.rb.tail.load(Ordering::Relaxed);
        if self.rb.head.load(Ordering::Acquire) == tail {
            None
        } else {
            Some(unsafe { self.rb.slot(tail).read() })
        }
    }

    /// Take the oldest unread byte.
    pub fn pop(&mut self) -> Option<u8> {
        let tail = self.rb.tail.load(Ordering::Relaxed);
        if self.rb.head.load(Ordering::Acquire) == tail {
            return None;
        }
        let byte = unsafe { self.rb.slot(tail).read() };
        self.rb
            .tail
            .store(RingBuffer::<N>::advance(tail), Ordering::Release);
        Some(byte)
    }

    /// Copy up to `buf.len()` unread bytes into `buf`, returning how many were copied.
    pub fn pop_slice(&mut self, buf: &mut [u8]) -> usize {
        let mut n = 0;
        while n < buf.len() {
            match self.pop() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }

    /// Discard everything queued so far.
    ///
    /// Only `tail` is written: it is moved up to a fresh snapshot of `head`.
    /// A byte the interrupt pushes after the snapshot survives the clear.
    pub fn clear(&mut self) {
        let head = self.rb.head.load(Ordering::Acquire);
        self.rb.tail.store(head, Ordering::Release);
    }
}

// Static allocation ----------------------------------------------------------

/// One-shot guard used by [`static_ringbuf!`](crate::static_ringbuf).
#[doc(hidden)]
pub struct Taken(Mutex<Cell<bool>>);

impl Taken {
    pub const fn new() -> Self {
        Self(Mutex::new(Cell::new(false)))
    }

    pub fn take(&self) {
        let taken = critical_section::with(|cs| self.0.borrow(cs).replace(true));
        assert!(!taken, "static ring buffer already taken");
    }
}

impl Default for Taken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut rb = RingBuffer::<8>::new();
        let (mut w, mut r) = rb.split();

        for b in b"hello" {
            w.push(*b);
        }
        assert_eq!(r.pending(), 5);
        assert_eq!(r.peek(), Some(b'h'));
        assert_eq!(r.pending(), 5);

        let mut out = [0u8; 8];
        assert_eq!(r.pop_slice(&mut out), 5);
        assert_eq!(&out[..5], b"hello");
        assert_eq!(r.pop(), None);
        assert_eq!(r.peek(), None);
    }

    #[test]
    fn fifo_order_across_wraparound() {
        let mut rb = RingBuffer::<4>::new();
        let (mut w, mut r) = rb.split();

        let mut expected = 0u8;
        for round in 0..10u8 {
            w.push(round * 2);
            w.push(round * 2 + 1);
            assert_eq!(r.pending(), 2);
            assert_eq!(r.pop(), Some(expected));
            assert_eq!(r.pop(), Some(expected + 1));
            expected += 2;
        }
        assert!(r.is_empty());
    }

    #[test]
    fn full_buffer_drops_newest() {
        let mut rb = RingBuffer::<128>::new();
        assert_eq!(rb.capacity(), 127);
        let (mut w, mut r) = rb.split();

        for i in 0..127u8 {
            assert!(w.push(i));
        }
        assert_eq!(r.pending(), 127);

        assert!(!w.push(0xAA));
        assert!(!w.push(0xBB));
        assert_eq!(r.pending(), 127);

        for i in 0..127u8 {
            assert_eq!(r.pop(), Some(i));
        }
        assert_eq!(r.pop(), None);
    }

    #[test]
    fn clear_discards_pending() {
        let mut rb = RingBuffer::<8>::new();
        let (mut w, mut r) = rb.split();

        r.clear();
        assert_eq!(r.pending(), 0);

        for b in 0..7 {
            w.push(b);
        }
        r.pop();
        r.clear();
        assert_eq!(r.pending(), 0);
        assert_eq!(r.pop(), None);

        // still usable afterwards
        w.push(42);
        assert_eq!(r.pending(), 1);
        assert_eq!(r.pop(), Some(42));
    }

    #[test]
    fn split_resets_indices() {
        let mut rb = RingBuffer::<4>::new();
        {
            let (mut w, _r) = rb.split();
            w.push(1);
            w.push(2);
        }
        let (_w, r) = rb.split();
        assert_eq!(r.pending(), 0);
    }

    #[test]
    fn concurrent_producer_keeps_order() {
        static RB: RingBuffer<16> = RingBuffer::new();
        // Build the halves by hand so they can cross threads with 'static lifetimes.
        let mut w = Producer { rb: &RB };
        let mut r = Consumer { rb: &RB };

        let producer = std::thread::spawn(move || {
            for i in 0..=255u8 {
                while !w.push(i) {
                    std::thread::yield_now();
                }
            }
        });

        let mut next = 0u16;
        while next <= 255 {
            let n = r.pending();
            assert!(n <= 15);
            if let Some(b) = r.pop() {
                assert_eq!(b as u16, next);
                next += 1;
            }
        }
        producer.join().unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn static_ringbuf_is_handed_out_once() {
        let rb: &'static mut RingBuffer<32> = crate::static_ringbuf!(32);
        assert_eq!(rb.capacity(), 31);

        let taken = Taken::new();
        taken.take();
        let again = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| taken.take()));
        assert!(again.is_err());
    }
}
