//! Ownership and state of the shared motor pins
//!
//! Four motor channels own the physical pins. Each pair of motor channels
//! can instead be claimed by a stepper channel, selected by a per stepper
//! "used" flag. The flag only decides who may write the pins; flipping it
//! never writes a pin by itself.
//!
//! Every mutation is a single field assignment. The registry gives no
//! guarantee that several fields changed by one command become visible to
//! the scheduler together.

use crate::hbridge::Winding;
use crate::Error;
use embedded_hal::digital::{OutputPin, PinState};
use log::trace;
use motorbus_core::channel::{MotorId, StepperId};
use motorbus_core::drive::Direction;

/// The pins belonging to one motor channel
pub struct MotorPins<P> {
	pub pin1: P,
	pub pin2: P,
	pub enable: P,
}

impl<P> MotorPins<P> {
	pub fn new(pin1: P, pin2: P, enable: P) -> Self {
		Self { pin1, pin2, enable }
	}
}

/// A DC motor driven by one H-bridge
pub struct MotorChannel<P> {
	id: MotorId,
	pin1: P,
	pin2: P,
	enable: P,
	direction: Direction,
	enabled: bool,
}

impl<P> MotorChannel<P>
where
	P: OutputPin,
{
	fn new(id: MotorId, pins: MotorPins<P>) -> Self {
		Self {
			id,
			pin1: pins.pin1,
			pin2: pins.pin2,
			enable: pins.enable,
			direction: Direction::Forward,
			enabled: false,
		}
	}

	pub fn id(&self) -> MotorId {
		self.id
	}

	/// Last direction written by a motor command
	pub fn direction(&self) -> Direction {
		self.direction
	}

	/// Level of the enable pin
	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	/// Drive the direction lines
	///
	/// The mirror only follows once both lines were written. After an IO
	/// error it keeps the last direction that was fully applied, while the
	/// lines may already have been released.
	pub fn set_direction(&mut self, direction: Direction) -> Result<(), Error> {
		self.winding().drive(direction)?;
		self.direction = direction;
		Ok(())
	}

	pub fn set_enabled(&mut self, enabled: bool) -> Result<(), Error> {
		self.enable
			.set_state(PinState::from(enabled))
			.map_err(|_| Error::IOError)?;
		self.enabled = enabled;
		Ok(())
	}

	/// Borrow the direction lines of this channel
	pub fn winding(&mut self) -> Winding<'_, P> {
		Winding::new(&mut self.pin1, &mut self.pin2)
	}

	fn reset(&mut self) -> Result<(), Error> {
		self.set_enabled(false)?;
		self.winding().release()?;
		self.direction = Direction::Forward;
		Ok(())
	}
}

/// Logical state of one stepper
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StepperChannel {
	target_speed: i16,
	enabled: bool,
}

impl StepperChannel {
	/// Requested steps per second, the sign selects the direction
	pub fn target_speed(&self) -> i16 {
		self.target_speed
	}

	pub fn set_target_speed(&mut self, speed: i16) {
		self.target_speed = speed;
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	pub fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	pub fn is_running(&self) -> bool {
		self.target_speed != 0
	}
}

/// All motor and stepper channels of one board
pub struct ChannelRegistry<P> {
	motors: [MotorChannel<P>; 4],
	steppers: [StepperChannel; 2],
	using_stepper: [bool; 2],
}

impl<P> ChannelRegistry<P>
where
	P: OutputPin,
{
	/// Take ownership of the pins and drive them to the safe default
	///
	/// All enable and direction lines go low, both steppers own their
	/// channels and stand still.
	pub fn new(pins: [MotorPins<P>; 4]) -> Result<Self, Error> {
		let [a, b, c, d] = pins;
		let mut registry = Self {
			motors: [
				MotorChannel::new(MotorId::A, a),
				MotorChannel::new(MotorId::B, b),
				MotorChannel::new(MotorId::C, c),
				MotorChannel::new(MotorId::D, d),
			],
			steppers: Default::default(),
			using_stepper: [true; 2],
		};
		for motor in registry.motors.iter_mut() {
			motor.reset()?;
		}
		Ok(registry)
	}

	pub fn motor(&self, id: MotorId) -> &MotorChannel<P> {
		&self.motors[id.index()]
	}

	pub fn motor_mut(&mut self, id: MotorId) -> &mut MotorChannel<P> {
		&mut self.motors[id.index()]
	}

	pub fn stepper(&self, id: StepperId) -> &StepperChannel {
		&self.steppers[id.index()]
	}

	pub fn stepper_mut(&mut self, id: StepperId) -> &mut StepperChannel {
		&mut self.steppers[id.index()]
	}

	pub fn is_using_stepper(&self, id: StepperId) -> bool {
		self.using_stepper[id.index()]
	}

	/// Hand the claimed motor channels to the stepper or back
	pub fn set_using_stepper(&mut self, id: StepperId, used: bool) {
		trace!("stepper {:?} used: {}", id, used);
		self.using_stepper[id.index()] = used;
	}

	/// Whether the motor's pins currently belong to its stepper
	pub fn is_stepper_owned(&self, motor: MotorId) -> bool {
		self.is_using_stepper(motor.owner())
	}

	/// Write the enable pins of both claimed channels
	pub fn set_stepper_enabled(&mut self, id: StepperId, enabled: bool) -> Result<(), Error> {
		for motor in id.claims() {
			self.motor_mut(motor).set_enabled(enabled)?;
		}
		self.stepper_mut(id).set_enabled(enabled);
		Ok(())
	}

	/// Borrow both coils of a stepper
	pub fn windings_mut(&mut self, id: StepperId) -> [Winding<'_, P>; 2] {
		let [a, b, c, d] = &mut self.motors;
		let (first, second) = match id {
			StepperId::One => (a, b),
			StepperId::Two => (c, d),
		};
		[first.winding(), second.winding()]
	}
}
