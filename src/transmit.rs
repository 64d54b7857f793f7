//! Handing packed frames to the serializer.
//!
//! [`Transmit`] is the seam between the pure playback code and the hardware.
//! On the device it is implemented by
//! [`ParallelWs2812`](parallel_ws2812::ParallelWs2812), which clocks the words
//! out of a PIO state machine on three pins at once.
//!
//! The refresh loop packs every frame into one buffer. A transfer borrows that
//! buffer until its future resolves, so the next frame can only be packed
//! once the engine has consumed the previous one.

#[cfg(not(feature = "host"))]
pub mod parallel_ws2812;

/// An engine that serializes interleaved words onto the strips.
pub trait Transmit {
    /// Send `words` (three per LED position: green, red, blue) followed by
    /// the latch gap. Resolves once every word has been consumed.
    async fn transmit(&mut self, words: &[u32]);
}

impl<T: Transmit + ?Sized> Transmit for &mut T {
    async fn transmit(&mut self, words: &[u32]) {
        (**self).transmit(words).await;
    }
}
