/// Rotation sense of a DC motor, or polarity of one stepper winding
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub enum Direction {
	Forward,
	Reverse,
}

impl Direction {
	#[inline]
	pub fn from_forward(forward: bool) -> Self {
		if forward {
			Direction::Forward
		} else {
			Direction::Reverse
		}
	}

	#[inline]
	pub fn is_forward(&self) -> bool {
		*self == Direction::Forward
	}
}

impl Default for Direction {
	fn default() -> Self {
		Direction::Forward
	}
}

impl From<bool> for Direction {
	fn from(forward: bool) -> Self {
		Self::from_forward(forward)
	}
}
