//! Hand over of bus transactions from the receive context
//!
//! The bus peripheral delivers transactions from its interrupt. Instead of
//! touching the registry there, the interrupt posts the raw record into a
//! [`Mailbox`] and the main loop picks it up with [`crate::Bridge::poll`].
//! The mailbox holds a single record; a record that arrives before the
//! previous one was taken replaces it.

use core::convert::Infallible;
use core::sync::atomic::{AtomicU32, Ordering};
use log::trace;
use motorbus_protocol::{record, DecodeError, RECORD_SIZE};

// `ff ff ff ff` decodes to an unknown type, so it can't carry a command
const EMPTY: u32 = u32::MAX;

/// Lock free single slot between the receive context and the main loop
pub struct Mailbox {
	slot: AtomicU32,
}

impl Mailbox {
	pub const fn new() -> Self {
		Self {
			slot: AtomicU32::new(EMPTY),
		}
	}

	/// Store a transaction, never blocks
	///
	/// Transactions of the wrong length are rejected and leave the slot
	/// untouched.
	pub fn post(&self, bytes: &[u8]) -> Result<(), DecodeError> {
		let raw = u32::from_le_bytes(*record(bytes)?);
		if raw == EMPTY {
			trace!("record {:#010x} reads as an empty mailbox, dropped", raw);
		}
		let previous = self.slot.swap(raw, Ordering::AcqRel);
		if previous != EMPTY {
			trace!("record {:#010x} replaced before it was read", previous);
		}
		Ok(())
	}

	/// Take the pending record, if any
	pub fn read(&self) -> nb::Result<[u8; RECORD_SIZE], Infallible> {
		match self.slot.swap(EMPTY, Ordering::AcqRel) {
			EMPTY => Err(nb::Error::WouldBlock),
			raw => Ok(raw.to_le_bytes()),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.slot.load(Ordering::Acquire) == EMPTY
	}
}

impl Default for Mailbox {
	fn default() -> Self {
		Self::new()
	}
}
