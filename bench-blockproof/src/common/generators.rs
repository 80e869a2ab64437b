//! Workload generation for the block proof benchmark.
//!
//! Addresses, range starts and payloads are derived from a Galois LFSR
//! (tap positions from the University of Otago ETR2012-1 report), so a
//! given seed always produces the same workload without pulling in an
//! RNG stack.

use imtree::{AddressGroup, Range, StateObject, StateUpdate};

/// A Galois linear feedback shift register over a selectable register
/// width. Produces a maximum-length pseudo-random sequence for each
/// supported width.
#[derive(Debug, Clone, Copy)]
pub struct GaloisLfsr {
    state: u64,
    taps: u64,
}

impl GaloisLfsr {
    /// Creates an LFSR with the given seed and register width.
    ///
    /// # Panics
    /// If the seed is zero, the seed does not fit the width, or the
    /// width is unsupported.
    pub fn new(seed: u64, bit_count: usize) -> Self {
        let mask = (1u64 << bit_count) - 1;
        if seed == 0 {
            panic!("Seed cannot be zero");
        }
        if seed >= mask {
            panic!("Seed is too large");
        }

        let pos = match bit_count {
            16 => (16, 14, 13, 11),
            24 => (24, 23, 21, 20),
            32 => (32, 30, 26, 25),
            40 => (40, 37, 36, 35),
            48 => (48, 44, 41, 39),
            56 => (56, 54, 52, 49),
            63 => (63, 62, 59, 58),
            _ => panic!("invalid bit count"),
        };
        let taps = (1u64 << pos.0) | (1u64 << pos.1) | (1u64 << pos.2) | (1u64 << pos.3);

        Self { state: seed, taps }
    }

    /// Advances the register by one step and returns the new state.
    pub fn next(&mut self) -> u64 {
        let taps = if self.state % 2 == 0 { 0 } else { self.taps };
        self.state = (self.state ^ taps) >> 1;
        self.state
    }

    /// Advances the register by n steps and returns the lowest n bits.
    pub fn rand_n(&mut self, n: usize) -> u64 {
        for _ in 0..n {
            self.next();
        }
        self.state & ((1u64 << n) - 1)
    }
}

/// Generates `address_count` address groups of `updates_per_address`
/// updates each, already sorted the way `Block::build` sorts them:
/// addresses ascending, range starts strictly increasing within each
/// group.
pub fn generate_groups(
    address_count: usize,
    updates_per_address: usize,
    seed: u64,
) -> Vec<AddressGroup> {
    let mut lfsr = GaloisLfsr::new(seed, 48);
    (0..address_count)
        .map(|i| {
            // counter prefix keeps addresses distinct and pre-sorted,
            // LFSR noise fills the rest
            let mut address = [0u8; 20];
            address[..4].copy_from_slice(&(i as u32).to_be_bytes());
            address[4..12].copy_from_slice(&lfsr.next().to_be_bytes());

            let mut predicate = [0u8; 20];
            predicate[12..].copy_from_slice(&lfsr.next().to_be_bytes());

            let mut start = 0u128;
            let updates = (0..updates_per_address)
                .map(|_| {
                    start += 1 + lfsr.rand_n(16) as u128;
                    let length = 1 + lfsr.rand_n(16) as u128;
                    StateUpdate::new(
                        Range::new(start, start + length),
                        1,
                        address,
                        StateObject::new(predicate, lfsr.next().to_be_bytes().to_vec()),
                    )
                })
                .collect();
            AddressGroup { address, updates }
        })
        .collect()
}
