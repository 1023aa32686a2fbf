#![no_std]

pub mod channel;
pub mod drive;
