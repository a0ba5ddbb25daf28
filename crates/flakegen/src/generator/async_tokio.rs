use core::time::Duration;

use crate::{Poll, SnowflakeGenerator, SnowflakeId, TimeSource};

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Returns a future that resolves to the next ID.
    ///
    /// Unlike [`Self::next_id`], the lock is only held for each individual
    /// [`Self::poll_id`] attempt; while the generator is pending the task
    /// sleeps on the tokio timer instead of blocking a worker thread.
    /// Uniqueness and ordering are unchanged, since a pending attempt never
    /// touches the state.
    ///
    /// # Example
    ///
    /// ```
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> Result<(), flakegen::Error> {
    /// use flakegen::{GeneratorConfig, SnowflakeGenerator, SystemClock};
    ///
    /// let generator = SnowflakeGenerator::new(&GeneratorConfig::new(3), SystemClock)?;
    /// let id = generator.next_id_async().await;
    /// assert_eq!(id.machine_id(), 3);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn next_id_async(&self) -> SnowflakeId {
        loop {
            let dur = match self.poll_id() {
                Poll::Ready { id } => return id,
                Poll::Pending { yield_for } => Duration::from_millis(yield_for.unsigned_abs()),
            };
            tokio::time::sleep(dur).await;
        }
    }
}
