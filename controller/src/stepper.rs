//! Full step drive of a bipolar stepper on two H-bridges
//!
//! Steps at a constant rate without any ramp. The coils cycle through the
//! four full step phases, forwards for positive and backwards for negative
//! speeds.

use crate::hbridge::Winding;
use crate::scheduler::StepGenerator;
use crate::Error;
use embedded_hal::digital::OutputPin;
use embedded_time::duration::{Generic, Microseconds};
use embedded_time::{Clock, Instant};
use log::trace;
use motorbus_core::drive::Direction::{self, Forward, Reverse};

// pin levels 1010, 0110, 0101, 1001 on (coil 1, coil 2)
const PHASES: [[Direction; 2]; 4] = [
	[Reverse, Reverse],
	[Forward, Reverse],
	[Forward, Forward],
	[Reverse, Forward],
];

pub struct FullStepDriver<C: Clock> {
	max_speed: i16,
	speed: i16,
	interval_us: u64,
	phase: usize,
	last_step: Option<Instant<C>>,
}

impl<C: Clock> FullStepDriver<C> {
	pub fn new(max_speed: u16) -> Self {
		Self {
			max_speed: max_speed.min(i16::MAX as u16) as i16,
			speed: 0,
			interval_us: 0,
			phase: 0,
			last_step: None,
		}
	}

	/// Current step rate after clamping
	pub fn speed(&self) -> i16 {
		self.speed
	}

	/// Time between two steps, zero while standing still
	pub fn interval(&self) -> Microseconds<u64> {
		Microseconds(self.interval_us)
	}

	/// Index into the full step sequence
	pub fn phase(&self) -> usize {
		self.phase
	}
}

impl<C, P> StepGenerator<C, P> for FullStepDriver<C>
where
	C: Clock,
	P: OutputPin,
	Microseconds<u64>: TryFrom<Generic<C::T>>,
{
	fn set_speed(&mut self, steps_per_second: i16) {
		let speed = steps_per_second.clamp(-self.max_speed, self.max_speed);
		if speed == self.speed {
			return;
		}
		self.speed = speed;
		self.interval_us = if speed == 0 {
			// a stale timestamp can't be compared once the clock wrapped
			self.last_step = None;
			0
		} else {
			1_000_000 / speed.unsigned_abs() as u64
		};
		trace!("step rate {} -> interval {}us", speed, self.interval_us);
	}

	fn run_speed(&mut self, now: Instant<C>, windings: [Winding<'_, P>; 2]) -> Result<bool, Error> {
		if self.interval_us == 0 {
			return Ok(false);
		}
		if let Some(last) = &self.last_step {
			let elapsed = now
				.checked_duration_since(last)
				.and_then(|d| Microseconds::<u64>::try_from(d).ok())
				.map(|us| us.0)
				.unwrap_or(u64::MAX);
			if elapsed < self.interval_us {
				return Ok(false);
			}
		}
		self.phase = if self.speed > 0 {
			(self.phase + 1) % 4
		} else {
			(self.phase + 3) % 4
		};
		let [mut first, mut second] = windings;
		let [one, two] = PHASES[self.phase];
		first.drive(one)?;
		second.drive(two)?;
		self.last_step = Some(now);
		Ok(true)
	}
}
