use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

pub use embedded_time::Clock;
use embedded_time::{clock, duration::*, fraction::Fraction, Instant};

/// A free running 32 bit microsecond timer, as found on most MCUs
///
/// Wraps after a little more than 71 minutes.
#[derive(Clone, Debug)]
pub struct MicrosClock {
	ticks: Arc<AtomicU32>,
}

impl Clock for MicrosClock {
	type T = u32;
	const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000);

	fn try_now(&self) -> Result<Instant<Self>, clock::Error> {
		Ok(Instant::<Self>::new(self.ticks.load(Ordering::Relaxed)))
	}
}

impl MicrosClock {
	pub fn new() -> Self {
		MicrosClock {
			ticks: Arc::new(AtomicU32::new(0)),
		}
	}

	pub fn tick(&mut self, us: Microseconds<u32>) {
		self.ticks.fetch_add(us.0, Ordering::Relaxed);
	}

	pub fn set(&mut self, us: Microseconds<u32>) {
		self.ticks.store(us.0, Ordering::Relaxed);
	}
}
