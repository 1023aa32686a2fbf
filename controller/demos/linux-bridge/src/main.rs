//! Runs the bridge on a Linux board
//!
//! Motor lines are GPIOs of a gpiochip, transactions are read from stdin
//! as one record of whitespace separated hex bytes per line, for example
//! `0b 00 00 00` to hand motors A and B back from stepper one.

use embedded_time::{clock, fraction::Fraction, Clock};
use linux_embedded_hal::{
    gpio_cdev::{Chip, LineRequestFlags},
    CdevPin,
};
use log::{info, warn};
use motorbus_controller::{Bridge, Config, Mailbox, MotorPins};
use motorbus_core::channel::MotorId;
use std::error::Error;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};

static MAILBOX: Mailbox = Mailbox::new();
static INPUT_CLOSED: AtomicBool = AtomicBool::new(false);

// (pin1, pin2, enable) line offsets per motor
const LINES: [(u32, u32, u32); 4] = [(3, 4, 2), (5, 6, 7), (9, 13, 8), (12, 11, 10)];

struct StdClock {
    start: std::time::Instant,
}

impl Clock for StdClock {
    type T = u64;
    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000);

    fn try_now(&self) -> Result<embedded_time::Instant<Self>, clock::Error> {
        let us = self.start.elapsed().as_micros() as u64;
        Ok(embedded_time::Instant::new(us))
    }
}

fn output(chip: &mut Chip, offset: u32, label: &str) -> Result<CdevPin, Box<dyn Error>> {
    let handle = chip
        .get_line(offset)?
        .request(LineRequestFlags::OUTPUT, 0, label)?;
    Ok(CdevPin::new(handle)?)
}

fn parse_record(line: &str) -> Result<Vec<u8>, std::num::ParseIntError> {
    line.split_whitespace()
        .map(|b| u8::from_str_radix(b, 16))
        .collect()
}

fn read_transactions() {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(&line) {
            Ok(bytes) => {
                if let Err(e) = MAILBOX.post(&bytes) {
                    warn!("dropping transaction {:02x?}: {:?}", bytes, e);
                }
            }
            Err(e) => warn!("not a hex record {:?}: {}", line, e),
        }
    }
    INPUT_CLOSED.store(true, Ordering::Release);
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/gpiochip0".to_string());
    let mut chip = Chip::new(&path)?;

    let mut pins = Vec::with_capacity(4);
    for (motor, (pin1, pin2, enable)) in MotorId::ALL.iter().zip(LINES) {
        pins.push(MotorPins::new(
            output(&mut chip, pin1, &format!("motor-{:?}-1", motor))?,
            output(&mut chip, pin2, &format!("motor-{:?}-2", motor))?,
            output(&mut chip, enable, &format!("motor-{:?}-en", motor))?,
        ));
    }
    let pins: [MotorPins<CdevPin>; 4] = pins
        .try_into()
        .map_err(|_| "expected four motor channels")?;

    let clock = StdClock {
        start: std::time::Instant::now(),
    };
    let mut bridge = Bridge::with_full_step(pins, clock, Config::default())
        .map_err(|e| format!("pin setup failed: {:?}", e))?;
    info!("reading records for {} from stdin", path);

    let receiver = std::thread::spawn(read_transactions);

    loop {
        match bridge.poll(&MAILBOX) {
            Ok(()) => {}
            Err(nb::Error::WouldBlock) => {
                if INPUT_CLOSED.load(Ordering::Acquire) && MAILBOX.is_empty() {
                    break;
                }
            }
            Err(nb::Error::Other(never)) => match never {},
        }
        if let Err(e) = bridge.run() {
            warn!("step failed: {:?}", e);
        }
    }

    receiver.join().map_err(|_| "receive thread panicked")?;
    Ok(())
}
