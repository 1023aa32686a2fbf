use num_derive::{FromPrimitive, ToPrimitive};

/// One of the four H-bridge driven DC motor channels
#[derive(Clone, Debug, PartialEq, Eq, Copy, FromPrimitive, ToPrimitive)]
pub enum MotorId {
	A = 0,
	B,
	C,
	D,
}

/// One of the two bipolar stepper channels
///
/// A stepper drives the coil and enable pins of two motor channels,
/// stepper one those of A and B, stepper two those of C and D.
#[derive(Clone, Debug, PartialEq, Eq, Copy, FromPrimitive, ToPrimitive)]
pub enum StepperId {
	One = 0,
	Two,
}

impl MotorId {
	pub const ALL: [MotorId; 4] = [MotorId::A, MotorId::B, MotorId::C, MotorId::D];

	#[inline]
	pub fn index(&self) -> usize {
		*self as usize
	}

	/// The stepper sharing this motor's pins
	#[inline]
	pub fn owner(&self) -> StepperId {
		match self {
			MotorId::A | MotorId::B => StepperId::One,
			MotorId::C | MotorId::D => StepperId::Two,
		}
	}
}

impl StepperId {
	pub const ALL: [StepperId; 2] = [StepperId::One, StepperId::Two];

	#[inline]
	pub fn index(&self) -> usize {
		*self as usize
	}

	/// The two motor channels whose pins this stepper claims
	#[inline]
	pub fn claims(&self) -> [MotorId; 2] {
		match self {
			StepperId::One => [MotorId::A, MotorId::B],
			StepperId::Two => [MotorId::C, MotorId::D],
		}
	}
}
