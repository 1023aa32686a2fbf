use crate::DecodeError;
use motorbus_core::channel::{MotorId, StepperId};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

/// Size of one record in bytes (type + payload)
pub const RECORD_SIZE: usize = 4;

/// Command type values as sent on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u16)]
pub enum CommandType {
	MotorAForward = 0,
	MotorAEnabled,
	MotorBForward,
	MotorBEnabled,
	MotorCForward,
	MotorCEnabled,
	MotorDForward,
	MotorDEnabled,
	Stepper1StepsPerRevolution,
	Stepper1Speed,
	Stepper1Enabled,
	Stepper1Used,
	Stepper2StepsPerRevolution,
	Stepper2Speed,
	Stepper2Enabled,
	Stepper2Used,
}

/// A decoded record
///
/// The payload shape is fixed by the variant, so a speed can never be
/// read as a flag or the other way round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
	MotorForward(MotorId, bool),
	MotorEnabled(MotorId, bool),
	StepperStepsPerRevolution(StepperId, i16),
	StepperSpeed(StepperId, i16),
	StepperEnabled(StepperId, bool),
	StepperUsed(StepperId, bool),
	/// A type value outside of the known range, kept for diagnostics
	Unknown(u16),
}

/// Decode a single bus transaction
///
/// The transaction must carry exactly [`RECORD_SIZE`] bytes.
pub fn decode(bytes: &[u8]) -> Result<Command, DecodeError> {
	Ok(Command::from_record(record(bytes)?))
}

/// Check that a transaction carries exactly one record and borrow it
pub fn record(bytes: &[u8]) -> Result<&[u8; RECORD_SIZE], DecodeError> {
	bytes.try_into().map_err(|_| DecodeError::SizeMismatch {
		expected: RECORD_SIZE,
		actual: bytes.len(),
	})
}

impl CommandType {
	#[inline]
	pub fn from_raw(raw: u16) -> Option<Self> {
		Self::from_u16(raw)
	}

	#[inline]
	pub fn raw(&self) -> u16 {
		*self as u16
	}
}

impl Command {
	pub fn from_record(record: &[u8; RECORD_SIZE]) -> Self {
		use CommandType::*;
		let raw = u16::from_le_bytes([record[0], record[1]]);
		let integer = i16::from_le_bytes([record[2], record[3]]);
		// booleans occupy the first payload byte, any non-zero value is set
		let flag = record[2] != 0;
		let kind = match CommandType::from_raw(raw) {
			Some(kind) => kind,
			None => return Command::Unknown(raw),
		};
		match kind {
			MotorAForward => Command::MotorForward(MotorId::A, flag),
			MotorAEnabled => Command::MotorEnabled(MotorId::A, flag),
			MotorBForward => Command::MotorForward(MotorId::B, flag),
			MotorBEnabled => Command::MotorEnabled(MotorId::B, flag),
			MotorCForward => Command::MotorForward(MotorId::C, flag),
			MotorCEnabled => Command::MotorEnabled(MotorId::C, flag),
			MotorDForward => Command::MotorForward(MotorId::D, flag),
			MotorDEnabled => Command::MotorEnabled(MotorId::D, flag),
			Stepper1StepsPerRevolution => {
				Command::StepperStepsPerRevolution(StepperId::One, integer)
			}
			Stepper1Speed => Command::StepperSpeed(StepperId::One, integer),
			Stepper1Enabled => Command::StepperEnabled(StepperId::One, flag),
			Stepper1Used => Command::StepperUsed(StepperId::One, flag),
			Stepper2StepsPerRevolution => {
				Command::StepperStepsPerRevolution(StepperId::Two, integer)
			}
			Stepper2Speed => Command::StepperSpeed(StepperId::Two, integer),
			Stepper2Enabled => Command::StepperEnabled(StepperId::Two, flag),
			Stepper2Used => Command::StepperUsed(StepperId::Two, flag),
		}
	}

	/// The wire type of this command, `None` for unknown values
	pub fn kind(&self) -> Option<CommandType> {
		use CommandType::*;
		let kind = match self {
			Command::MotorForward(motor, _) => match motor {
				MotorId::A => MotorAForward,
				MotorId::B => MotorBForward,
				MotorId::C => MotorCForward,
				MotorId::D => MotorDForward,
			},
			Command::MotorEnabled(motor, _) => match motor {
				MotorId::A => MotorAEnabled,
				MotorId::B => MotorBEnabled,
				MotorId::C => MotorCEnabled,
				MotorId::D => MotorDEnabled,
			},
			Command::StepperStepsPerRevolution(StepperId::One, _) => Stepper1StepsPerRevolution,
			Command::StepperStepsPerRevolution(StepperId::Two, _) => Stepper2StepsPerRevolution,
			Command::StepperSpeed(StepperId::One, _) => Stepper1Speed,
			Command::StepperSpeed(StepperId::Two, _) => Stepper2Speed,
			Command::StepperEnabled(StepperId::One, _) => Stepper1Enabled,
			Command::StepperEnabled(StepperId::Two, _) => Stepper2Enabled,
			Command::StepperUsed(StepperId::One, _) => Stepper1Used,
			Command::StepperUsed(StepperId::Two, _) => Stepper2Used,
			Command::Unknown(_) => return None,
		};
		Some(kind)
	}

	/// Raw 16 bit type value as seen on the wire
	pub fn raw_type(&self) -> u16 {
		match self {
			Command::Unknown(raw) => *raw,
			_ => self.kind().map(|k| k.raw()).unwrap_or_default(),
		}
	}

	/// Encode this command as a bus record, as a host would send it
	pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
		let payload = match self {
			Command::MotorForward(_, flag)
			| Command::MotorEnabled(_, flag)
			| Command::StepperEnabled(_, flag)
			| Command::StepperUsed(_, flag) => [*flag as u8, 0x00],
			Command::StepperStepsPerRevolution(_, value) | Command::StepperSpeed(_, value) => {
				value.to_le_bytes()
			}
			Command::Unknown(_) => [0x00, 0x00],
		};
		let kind = self.raw_type().to_le_bytes();
		[kind[0], kind[1], payload[0], payload[1]]
	}
}
