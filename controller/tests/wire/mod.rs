use embedded_hal::digital::{ErrorType, OutputPin};
use motorbus_controller::MotorPins;
use motorbus_core::channel::MotorId;
use std::convert::Infallible;
use std::sync::{Arc, RwLock};

#[derive(Clone, Debug, PartialEq)]
pub enum WireState {
	Low,
	High,
}

impl Copy for WireState {}

#[derive(Clone, Debug)]
pub struct Wire {
	state: Arc<RwLock<WireState>>,
}

impl Wire {
	pub fn new() -> Self {
		Self {
			state: Arc::new(RwLock::new(WireState::Low)),
		}
	}

	pub fn set_state(&mut self, state: WireState) {
		*self.state.write().unwrap() = state;
	}

	pub fn get_state(&self) -> WireState {
		*self.state.read().unwrap()
	}

	pub fn is_high(&self) -> bool {
		self.get_state() == WireState::High
	}

	pub fn as_push_pull_pin(&self) -> PushPullPin {
		PushPullPin { wire: self.clone() }
	}
}

pub struct PushPullPin {
	wire: Wire,
}

impl ErrorType for PushPullPin {
	type Error = Infallible;
}

impl OutputPin for PushPullPin {
	fn set_low(&mut self) -> Result<(), Self::Error> {
		self.wire.set_state(WireState::Low);
		Ok(())
	}

	fn set_high(&mut self) -> Result<(), Self::Error> {
		self.wire.set_state(WireState::High);
		Ok(())
	}
}

/// The wires of one motor channel
#[derive(Clone, Debug)]
pub struct MotorWires {
	pub pin1: Wire,
	pub pin2: Wire,
	pub enable: Wire,
}

/// All twelve wires between the firmware and the motor drivers
#[derive(Clone, Debug)]
pub struct Board {
	motors: [MotorWires; 4],
}

impl Board {
	pub fn new() -> Self {
		Self {
			motors: MotorId::ALL.map(|_| MotorWires {
				pin1: Wire::new(),
				pin2: Wire::new(),
				enable: Wire::new(),
			}),
		}
	}

	pub fn motor(&self, id: MotorId) -> &MotorWires {
		&self.motors[id.index()]
	}

	pub fn motor_pins(&self) -> [MotorPins<PushPullPin>; 4] {
		MotorId::ALL.map(|id| {
			let wires = self.motor(id);
			MotorPins::new(
				wires.pin1.as_push_pull_pin(),
				wires.pin2.as_push_pull_pin(),
				wires.enable.as_push_pull_pin(),
			)
		})
	}

	/// Levels of all wires as (pin1, pin2, enable) per motor
	pub fn snapshot(&self) -> [(bool, bool, bool); 4] {
		MotorId::ALL.map(|id| {
			let wires = self.motor(id);
			(
				wires.pin1.is_high(),
				wires.pin2.is_high(),
				wires.enable.is_high(),
			)
		})
	}
}
