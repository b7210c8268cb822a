use crate::bit::Bit;

// Seven segment patterns for 0-9, bit order g,f,e,d,c,b,a.
// Outputs are active-low: a set bit turns the segment off.
pub const SEGMENTS: [u8; 10] = [
    0b100_0000, // 0
    0b111_1001, // 1
    0b010_0100, // 2
    0b011_0000, // 3
    0b001_1001, // 4
    0b001_0010, // 5
    0b000_0010, // 6
    0b111_1000, // 7
    0b000_0000, // 8
    0b001_0000, // 9
];

// Pattern driven when a nibble is not a decimal digit. All segments off.
const BLANK: u8 = 0b111_1111;

// Digit position carrying the seconds/milliseconds decimal point.
pub const DECIMAL_POINT_DIGIT: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Segment {
    pub const ALL: [Segment; 7] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
    ];
}

// Output lines for a single refresh tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFrame {
    // Index of the driven digit, 0 = least significant.
    pub select: u8,
    // 7-bit active-low pattern.
    pub segments: u8,
    pub decimal_point: bool,
}

impl Default for DisplayFrame {
    fn default() -> Self {
        Self {
            select: 0,
            segments: SEGMENTS[0],
            decimal_point: false,
        }
    }
}

impl DisplayFrame {
    // Decoded digit enables, active-low: exactly one of the low four bits is clear.
    pub fn anodes(&self) -> u8 {
        let mut an: u8 = 0b1111;
        an.reset(self.select as usize);
        an
    }

    // Segment lines with the decimal point in bit 7, all active-low.
    pub fn cathodes(&self) -> u8 {
        let mut c = self.segments;
        if !self.decimal_point {
            c.set(7);
        }
        c
    }

    pub fn is_lit(&self, segment: Segment) -> bool {
        !self.segments.bit(segment as usize)
    }

    // Reverse table lookup, None for a pattern that is not a digit.
    pub fn decode_digit(&self) -> Option<u8> {
        SEGMENTS
            .iter()
            .position(|&p| p == self.segments)
            .map(|d| d as u8)
    }
}

pub fn encode_digit(digit: u8) -> u8 {
    SEGMENTS.get(digit as usize).copied().unwrap_or(BLANK)
}

// Time-multiplexes four BCD digits onto a single set of segment lines.
// A free-running counter advances every fast tick; its two most significant
// bits choose the digit that is driven.
pub struct DisplayMux {
    bits: u8,
    refresh: u32,
}

impl DisplayMux {
    // The counter needs at least the two select bits and fits in a u32.
    pub fn new(bits: u8) -> Self {
        assert!(
            (2..=32).contains(&bits),
            "refresh counter width {} outside 2..=32",
            bits
        );
        Self { bits, refresh: 0 }
    }

    pub fn reset(&mut self) {
        self.refresh = 0;
    }

    pub fn refresh_counter(&self) -> u32 {
        self.refresh
    }

    // Fast ticks each digit stays selected.
    pub fn dwell(&self) -> u64 {
        1 << (self.bits - 2)
    }

    fn mask(&self) -> u32 {
        if self.bits >= 32 {
            u32::MAX
        } else {
            (1 << self.bits) - 1
        }
    }

    pub fn select(&self) -> u8 {
        ((self.refresh >> (self.bits - 2)) & 0b11) as u8
    }

    // Frame for the current counter value, without advancing.
    pub fn frame(&self, packed: u16) -> DisplayFrame {
        let select = self.select();
        let nibble = ((packed >> (4 * select)) & 0xF) as u8;
        DisplayFrame {
            select,
            segments: encode_digit(nibble),
            decimal_point: select == DECIMAL_POINT_DIGIT,
        }
    }

    // Drives the frame for this tick, then advances the refresh counter.
    pub fn tick(&mut self, packed: u16) -> DisplayFrame {
        let frame = self.frame(packed);
        self.refresh = self.refresh.wrapping_add(1) & self.mask();
        frame
    }
}
