//! Helpers shared by the session tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

/// Encodes samples the way the sensor puts them on the wire.
pub fn be_words(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_be_bytes()).collect()
}

/// A delay provider that returns at once and remembers every requested wait
/// in milliseconds.
#[derive(Clone, Default)]
pub struct Delays(Rc<RefCell<Vec<u32>>>);

impl Delays {
    pub fn taken(&self) -> Vec<u32> {
        self.0.borrow().clone()
    }

    fn record_ns(&self, ns: u32) {
        self.0.borrow_mut().push(ns / 1_000_000);
    }

    fn record_ms(&self, ms: u32) {
        self.0.borrow_mut().push(ms);
    }
}

impl embedded_hal::delay::DelayNs for Delays {
    fn delay_ns(&mut self, ns: u32) {
        self.record_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record_ms(ms);
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for Delays {
    async fn delay_ns(&mut self, ns: u32) {
        self.record_ns(ns);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.record_ms(ms);
    }
}
