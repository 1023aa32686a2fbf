use crate::Error;
use embedded_hal::digital::OutputPin;
use motorbus_core::drive::Direction;

/// The two direction lines of one H-bridge winding
///
/// A DC motor uses one winding, a stepper drives two of them. Every write
/// pulls the outgoing line low before the incoming line goes high, so the
/// bridge never sees both lines high.
pub struct Winding<'a, P> {
	pin1: &'a mut P,
	pin2: &'a mut P,
}

impl<'a, P> Winding<'a, P>
where
	P: OutputPin,
{
	pub fn new(pin1: &'a mut P, pin2: &'a mut P) -> Self {
		Self { pin1, pin2 }
	}

	/// Forward drives line 2 high, reverse drives line 1 high
	pub fn drive(&mut self, direction: Direction) -> Result<(), Error> {
		match direction {
			Direction::Forward => {
				self.pin1.set_low().map_err(|_| Error::IOError)?;
				self.pin2.set_high().map_err(|_| Error::IOError)?;
			}
			Direction::Reverse => {
				self.pin2.set_low().map_err(|_| Error::IOError)?;
				self.pin1.set_high().map_err(|_| Error::IOError)?;
			}
		}
		Ok(())
	}

	/// Pull both lines low
	pub fn release(&mut self) -> Result<(), Error> {
		self.pin1.set_low().map_err(|_| Error::IOError)?;
		self.pin2.set_low().map_err(|_| Error::IOError)?;
		Ok(())
	}
}
