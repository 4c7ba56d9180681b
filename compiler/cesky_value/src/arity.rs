//! Argument-count masks for primitives.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Which argument counts a primitive accepts.
    ///
    /// Bit `i` for `i` in `0..=9` admits exactly `i` arguments. Bit 10 admits
    /// every count of ten or more; counts above ten are not distinguished.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct ArityMask: u16 {
        const ARGS_0 = 1 << 0;
        const ARGS_1 = 1 << 1;
        const ARGS_2 = 1 << 2;
        const ARGS_3 = 1 << 3;
        const ARGS_4 = 1 << 4;
        const ARGS_5 = 1 << 5;
        const ARGS_6 = 1 << 6;
        const ARGS_7 = 1 << 7;
        const ARGS_8 = 1 << 8;
        const ARGS_9 = 1 << 9;
        const ARGS_10_PLUS = 1 << 10;
    }
}

impl ArityMask {
    /// Highest bit index; shared by every count `>= 10`.
    pub const MANY_BIT: u32 = 10;

    /// Any number of arguments.
    pub const ANY: ArityMask = ArityMask::all();

    /// Exactly `n` arguments (`n >= 10` maps onto the shared bucket).
    pub const fn exactly(n: u32) -> Self {
        Self::from_bits_retain(1 << min_bit(n))
    }

    /// `n` or more arguments.
    pub const fn at_least(n: u32) -> Self {
        let low = (1u16 << min_bit(n)) - 1;
        Self::from_bits_retain(Self::ANY.bits() & !low)
    }

    /// Between `lo` and `hi` arguments, inclusive.
    pub const fn between(lo: u32, hi: u32) -> Self {
        let upto_hi = (1u16 << (min_bit(hi) + 1)) - 1;
        Self::from_bits_retain(Self::at_least(lo).bits() & upto_hi)
    }

    /// Test an argument count against the mask.
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        let bit = count.min(Self::MANY_BIT as usize);
        self.bits() & (1 << bit) != 0
    }
}

const fn min_bit(n: u32) -> u32 {
    if n > ArityMask::MANY_BIT {
        ArityMask::MANY_BIT
    } else {
        n
    }
}

impl fmt::Display for ArityMask {
    /// Human-readable description used in arity error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<u32> = (0..=Self::MANY_BIT)
            .filter(|bit| self.bits() & (1 << bit) != 0)
            .collect();
        let contiguous = counts.windows(2).all(|w| w[1] == w[0] + 1);
        match (counts.first(), counts.last()) {
            (None, _) | (_, None) => f.write_str("no arguments"),
            (Some(first), Some(last)) if contiguous && *last == Self::MANY_BIT => {
                write!(f, "at least {first}")
            }
            (Some(first), Some(last)) if first == last => write!(f, "{first}"),
            (Some(first), Some(last)) if contiguous => write!(f, "{first} to {last}"),
            _ => {
                let listed: Vec<String> = counts.iter().map(u32::to_string).collect();
                write!(f, "one of {}", listed.join(", "))
            }
        }
    }
}
