#![cfg_attr(not(feature = "std"), no_std)]

//! Wire format of the motor bus
//!
//! The host writes one fixed size record per bus transaction: a 16 bit
//! command type followed by a 16 bit payload that is either a signed
//! integer or a boolean, depending on the type. There is no framing,
//! checksum or reply.

pub mod command;

pub use command::{decode, record, Command, CommandType, RECORD_SIZE};

/// Errors returned when decoding a bus transaction
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DecodeError {
	/// The transaction did not carry exactly one record
	SizeMismatch { expected: usize, actual: usize },
}
