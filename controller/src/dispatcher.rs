//! Applies decoded commands to the channel registry
//!
//! Commands for channels that are currently owned by the other mode are
//! dropped without touching the registry or any pin. Every accepted
//! command takes effect immediately.

use crate::registry::ChannelRegistry;
use crate::Error;
use embedded_hal::digital::OutputPin;
use motorbus_core::channel::{MotorId, StepperId};
use motorbus_protocol::Command;

/// Reasons a command was not applied
///
/// None of these are reported to the host.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DispatchError {
	/// The type value has no dispatch rule
	UnknownCommandType(u16),
	/// The target pins belong to the other mode of this stepper pair
	OwnershipConflict(StepperId),
	IOError,
}

impl From<Error> for DispatchError {
	fn from(_: Error) -> Self {
		DispatchError::IOError
	}
}

pub fn dispatch<P>(registry: &mut ChannelRegistry<P>, command: &Command) -> Result<(), DispatchError>
where
	P: OutputPin,
{
	match *command {
		Command::MotorForward(motor, forward) => {
			motor_mode(registry, motor)?;
			registry.motor_mut(motor).set_direction(forward.into())?;
		}
		Command::MotorEnabled(motor, enabled) => {
			motor_mode(registry, motor)?;
			registry.motor_mut(motor).set_enabled(enabled)?;
		}
		Command::StepperSpeed(stepper, speed) => {
			// speed may be armed before the stepper owns its pins
			registry.stepper_mut(stepper).set_target_speed(speed);
		}
		Command::StepperEnabled(stepper, enabled) => {
			stepper_mode(registry, stepper)?;
			registry.set_stepper_enabled(stepper, enabled)?;
		}
		Command::StepperUsed(stepper, used) => {
			registry.set_using_stepper(stepper, used);
		}
		Command::StepperStepsPerRevolution(..) | Command::Unknown(_) => {
			return Err(DispatchError::UnknownCommandType(command.raw_type()));
		}
	}
	Ok(())
}

fn motor_mode<P: OutputPin>(registry: &ChannelRegistry<P>, motor: MotorId) -> Result<(), DispatchError> {
	if registry.is_stepper_owned(motor) {
		Err(DispatchError::OwnershipConflict(motor.owner()))
	} else {
		Ok(())
	}
}

fn stepper_mode<P: OutputPin>(
	registry: &ChannelRegistry<P>,
	stepper: StepperId,
) -> Result<(), DispatchError> {
	if registry.is_using_stepper(stepper) {
		Ok(())
	} else {
		Err(DispatchError::OwnershipConflict(stepper))
	}
}
