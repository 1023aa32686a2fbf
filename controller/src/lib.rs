#![cfg_attr(not(feature = "std"), no_std)]

//! Firmware core of a motor bus subordinate
//!
//! Four H-bridge motor channels share their pins with two bipolar steppers.
//! Commands from the bus host either drive the motor channels directly or
//! configure the steppers, which are then stepped from the main loop.

#[macro_use]
mod macros;

pub mod config;
pub mod dispatcher;
pub mod hbridge;
pub mod receiver;
pub mod registry;
pub mod scheduler;
pub mod stepper;

#[cfg(test)]
mod tests_mock;

pub use config::Config;
pub use dispatcher::{dispatch, DispatchError};
pub use receiver::Mailbox;
pub use registry::{ChannelRegistry, MotorPins};
pub use scheduler::{Scheduler, StepGenerator};
pub use stepper::FullStepDriver;

use core::convert::Infallible;
use embedded_hal::digital::OutputPin;
use embedded_time::duration::{Generic, Microseconds};
use embedded_time::Clock;
use log::{debug, error, info, warn};
use motorbus_protocol::{decode, Command, RECORD_SIZE};

/// Errors returned while starting up or stepping
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
	IOError,
	TimerError,
}

/// Everything one board needs, owned in one place
///
/// Create it once at start up. Transactions are either handed over
/// directly with [`Bridge::on_receive`] or through a [`Mailbox`] with
/// [`Bridge::poll`]; [`Bridge::run`] has to be called on every main loop
/// iteration to keep the steppers going.
pub struct Bridge<P, C, G> {
	config: Config,
	registry: ChannelRegistry<P>,
	scheduler: Scheduler<C, G>,
}

impl<P, C> Bridge<P, C, FullStepDriver<C>>
where
	P: OutputPin,
	C: Clock,
	Microseconds<u64>: TryFrom<Generic<C::T>>,
{
	/// A bridge stepping both steppers with the full step driver
	pub fn with_full_step(pins: [MotorPins<P>; 4], clock: C, config: Config) -> Result<Self, Error> {
		let generators = [
			FullStepDriver::new(config.max_speed),
			FullStepDriver::new(config.max_speed),
		];
		Self::new(pins, clock, generators, config)
	}
}

impl<P, C, G> Bridge<P, C, G>
where
	P: OutputPin,
	C: Clock,
	G: StepGenerator<C, P>,
{
	pub fn new(pins: [MotorPins<P>; 4], clock: C, generators: [G; 2], config: Config) -> Result<Self, Error> {
		let registry = ChannelRegistry::new(pins)?;
		info!("motor bus subordinate at address {:#04x}", config.address);
		Ok(Self {
			config,
			registry,
			scheduler: Scheduler::new(clock, generators),
		})
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn registry(&self) -> &ChannelRegistry<P> {
		&self.registry
	}

	pub fn scheduler(&self) -> &Scheduler<C, G> {
		&self.scheduler
	}

	/// Handle one bus transaction right away
	///
	/// Never fails: malformed transactions and rejected commands are only
	/// reported on the diagnostic channel.
	pub fn on_receive(&mut self, bytes: &[u8]) {
		match decode(bytes) {
			Ok(command) => self.handle(&command),
			Err(e) => warn!("dropping transaction of {} bytes: {:?}", bytes.len(), e),
		}
		diagnostic!("finished processing");
	}

	/// Handle the record waiting in `mailbox`, if there is one
	pub fn poll(&mut self, mailbox: &Mailbox) -> nb::Result<(), Infallible> {
		let record: [u8; RECORD_SIZE] = mailbox.read()?;
		self.handle(&Command::from_record(&record));
		diagnostic!("finished processing");
		Ok(())
	}

	/// Apply a decoded command
	pub fn handle(&mut self, command: &Command) {
		diagnostic!("received command {}: {:?}", command.raw_type(), command);
		match dispatch(&mut self.registry, command) {
			Ok(()) => {}
			Err(DispatchError::UnknownCommandType(kind)) => {
				warn!("unknown command {}, ignoring", kind);
			}
			Err(DispatchError::OwnershipConflict(stepper)) => {
				debug!("{:?} ignored, pins owned by the other mode of {:?}", command, stepper);
			}
			Err(DispatchError::IOError) => error!("pin write failed for {:?}", command),
		}
	}

	/// One main loop iteration of the step rate scheduler
	pub fn run(&mut self) -> Result<(), Error> {
		self.scheduler.tick(&mut self.registry)
	}
}
