//! Main loop side of the stepper channels
//!
//! The scheduler runs once per loop iteration. For every stepper that owns
//! its pins it hands the current target speed to a step generator and lets
//! the generator take at most one step. Nothing in here waits.

use crate::hbridge::Winding;
use crate::registry::ChannelRegistry;
use crate::Error;
use embedded_hal::digital::OutputPin;
use embedded_time::{Clock, Instant};
use motorbus_core::channel::StepperId;

/// A constant rate stepping service for one stepper
pub trait StepGenerator<C: Clock, P: OutputPin> {
	/// Request a step rate in steps per second, the sign is the direction
	fn set_speed(&mut self, steps_per_second: i16);

	/// Take a step on the given coils if one is due at `now`
	///
	/// Returns whether a step was taken. Must return immediately.
	fn run_speed(&mut self, now: Instant<C>, windings: [Winding<'_, P>; 2]) -> Result<bool, Error>;
}

pub struct Scheduler<C, G> {
	clock: C,
	generators: [G; 2],
}

impl<C, G> Scheduler<C, G>
where
	C: Clock,
{
	pub fn new(clock: C, generators: [G; 2]) -> Self {
		Self { clock, generators }
	}

	pub fn generator(&self, id: StepperId) -> &G {
		&self.generators[id.index()]
	}

	/// Run one iteration for both steppers
	///
	/// Steppers whose channels are currently driven as DC motors are
	/// skipped entirely. A failing stepper does not keep the other one from
	/// running; the first error is returned after both had their turn.
	pub fn tick<P>(&mut self, registry: &mut ChannelRegistry<P>) -> Result<(), Error>
	where
		P: OutputPin,
		G: StepGenerator<C, P>,
	{
		let mut result = Ok(());
		for stepper in StepperId::ALL {
			if !registry.is_using_stepper(stepper) {
				continue;
			}
			let generator = &mut self.generators[stepper.index()];
			generator.set_speed(registry.stepper(stepper).target_speed());
			let stepped = self
				.clock
				.try_now()
				.map_err(|_| Error::TimerError)
				.and_then(|now| generator.run_speed(now, registry.windings_mut(stepper)));
			if let Err(e) = stepped {
				result = result.and(Err(e));
			}
		}
		result
	}
}
