/// Bus address the firmware answers to unless configured otherwise
pub const DEFAULT_ADDRESS: u8 = 0x08;

/// Highest step rate in steps per second the full step driver will run
pub const DEFAULT_MAX_SPEED: u16 = 1000;

/// Runtime configuration of a bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// 7 bit address of this subordinate on the host bus
	pub address: u8,
	/// Requested step rates are clamped to +/- this value
	pub max_speed: u16,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			address: DEFAULT_ADDRESS,
			max_speed: DEFAULT_MAX_SPEED,
		}
	}
}

impl Config {
	pub fn with_address(mut self, address: u8) -> Self {
		self.address = address & 0x7f;
		self
	}

	pub fn with_max_speed(mut self, max_speed: u16) -> Self {
		self.max_speed = max_speed;
		self
	}
}
