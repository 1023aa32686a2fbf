use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use embedded_time::{clock, duration::*, fraction::Fraction, Clock, Instant};
use motorbus_core::channel::MotorId;

use crate::hbridge::Winding;
use crate::registry::MotorPins;
use crate::scheduler::StepGenerator;
use crate::Error;

/// A named line of the simulated board
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Line {
	Pin1(MotorId),
	Pin2(MotorId),
	Enable(MotorId),
}

impl Line {
	fn index(&self) -> usize {
		match self {
			Line::Pin1(m) => m.index() * 3,
			Line::Pin2(m) => m.index() * 3 + 1,
			Line::Enable(m) => m.index() * 3 + 2,
		}
	}
}

#[derive(Default)]
struct BenchState {
	levels: [bool; 12],
	journal: Vec<(Line, bool)>,
	fail: bool,
}

/// Twelve simulated lines that remember every write
#[derive(Clone, Default)]
pub struct Bench {
	state: Rc<RefCell<BenchState>>,
}

impl Bench {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn motor_pins(&self) -> [MotorPins<SimPin>; 4] {
		MotorId::ALL.map(|m| {
			MotorPins::new(
				self.pin(Line::Pin1(m)),
				self.pin(Line::Pin2(m)),
				self.pin(Line::Enable(m)),
			)
		})
	}

	pub fn pin(&self, line: Line) -> SimPin {
		SimPin {
			line,
			bench: self.clone(),
		}
	}

	pub fn level(&self, line: Line) -> bool {
		self.state.borrow().levels[line.index()]
	}

	pub fn levels(&self) -> [bool; 12] {
		self.state.borrow().levels
	}

	pub fn journal(&self) -> Vec<(Line, bool)> {
		self.state.borrow().journal.clone()
	}

	pub fn clear_journal(&self) {
		self.state.borrow_mut().journal.clear();
	}

	pub fn fail_writes(&self, fail: bool) {
		self.state.borrow_mut().fail = fail;
	}

	/// Panics if both direction lines of a motor were ever high together
	pub fn assert_exclusive(&self) {
		let state = self.state.borrow();
		let mut levels = [false; 12];
		for (line, level) in &state.journal {
			levels[line.index()] = *level;
			for m in MotorId::ALL {
				assert!(
					!(levels[Line::Pin1(m).index()] && levels[Line::Pin2(m).index()]),
					"both direction lines of {:?} high after writing {:?}",
					m,
					line
				);
			}
		}
	}

	fn write(&self, line: Line, level: bool) -> Result<(), SimError> {
		let mut state = self.state.borrow_mut();
		if state.fail {
			return Err(SimError);
		}
		state.levels[line.index()] = level;
		state.journal.push((line, level));
		Ok(())
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimError;

impl embedded_hal::digital::Error for SimError {
	fn kind(&self) -> ErrorKind {
		ErrorKind::Other
	}
}

pub struct SimPin {
	line: Line,
	bench: Bench,
}

impl ErrorType for SimPin {
	type Error = SimError;
}

impl OutputPin for SimPin {
	fn set_low(&mut self) -> Result<(), Self::Error> {
		self.bench.write(self.line, false)
	}

	fn set_high(&mut self) -> Result<(), Self::Error> {
		self.bench.write(self.line, true)
	}
}

#[derive(Clone, Debug)]
pub struct SimClock {
	ticks: Arc<AtomicU64>,
}

impl Clock for SimClock {
	type T = u64;
	const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000_000);

	fn try_now(&self) -> Result<Instant<Self>, clock::Error> {
		let ticks: u64 = self.ticks.load(Ordering::Relaxed);
		Ok(Instant::<Self>::new(ticks))
	}
}

impl SimClock {
	pub fn new() -> Self {
		SimClock {
			ticks: Arc::new(AtomicU64::new(0)),
		}
	}

	pub fn tick<T>(&self, ticks: T)
	where
		T: Into<Nanoseconds<u64>>,
	{
		self.ticks.fetch_add(ticks.into().0, Ordering::Relaxed);
	}
}

/// A step generator that only records what the scheduler asked for
#[derive(Default)]
pub struct RecordingGenerator {
	pub speeds: Vec<i16>,
	pub runs: usize,
	/// Fail every run as if a coil write went wrong
	pub fail: bool,
}

impl StepGenerator<SimClock, SimPin> for RecordingGenerator {
	fn set_speed(&mut self, steps_per_second: i16) {
		self.speeds.push(steps_per_second);
	}

	fn run_speed(
		&mut self,
		_now: Instant<SimClock>,
		_windings: [Winding<'_, SimPin>; 2],
	) -> Result<bool, Error> {
		self.runs += 1;
		if self.fail {
			Err(Error::IOError)
		} else {
			Ok(false)
		}
	}
}
