use stopwatch_core::{DisplayFrame, Segment};

const DIGIT_W: usize = 32;
const DIGIT_H: usize = 60;
const THICK: usize = 6;
const GAP: usize = 16;

pub const WIDTH: usize = 4 * (DIGIT_W + GAP) + GAP;
pub const HEIGHT: usize = DIGIT_H + 2 * GAP;

const BACKGROUND: u32 = 0x00_10_10_10;
const LIT: u32 = 0x00_FF_30_20;
const UNLIT: u32 = 0x00_30_12_10;

// The display is multiplexed, so only one digit is driven per tick. Keeping the
// last frame seen on each select line stands in for the persistence of the eye.
#[derive(Default)]
pub struct Persistence {
    frames: [DisplayFrame; 4],
}

impl Persistence {
    pub fn latch(&mut self, frame: DisplayFrame) {
        self.frames[frame.select as usize & 0b11] = frame;
    }

    pub fn frame(&self, select: usize) -> DisplayFrame {
        self.frames[select]
    }
}

// (x, y, w, h) relative to the top left corner of a digit.
fn segment_rect(segment: Segment) -> (usize, usize, usize, usize) {
    let half = DIGIT_H / 2;
    match segment {
        Segment::A => (THICK, 0, DIGIT_W - 2 * THICK, THICK),
        Segment::B => (DIGIT_W - THICK, THICK, THICK, half - THICK),
        Segment::C => (DIGIT_W - THICK, half, THICK, half - THICK),
        Segment::D => (THICK, DIGIT_H - THICK, DIGIT_W - 2 * THICK, THICK),
        Segment::E => (0, half, THICK, half - THICK),
        Segment::F => (0, THICK, THICK, half - THICK),
        Segment::G => (THICK, half - THICK / 2, DIGIT_W - 2 * THICK, THICK),
    }
}

fn fill(buffer: &mut [u32], (x, y, w, h): (usize, usize, usize, usize), colour: u32) {
    for row in y..y + h {
        let start = row * WIDTH + x;
        buffer[start..start + w].fill(colour);
    }
}

// Digit 3 is the leftmost position.
fn origin(select: usize) -> (usize, usize) {
    (GAP + (3 - select) * (DIGIT_W + GAP), GAP)
}

pub fn draw(buffer: &mut [u32], persistence: &Persistence) {
    buffer.fill(BACKGROUND);

    for select in 0..4 {
        let frame = persistence.frame(select);
        let (ox, oy) = origin(select);

        for segment in Segment::ALL {
            let (x, y, w, h) = segment_rect(segment);
            let colour = if frame.is_lit(segment) { LIT } else { UNLIT };
            fill(buffer, (ox + x, oy + y, w, h), colour);
        }

        let dp = (ox + DIGIT_W + 2, oy + DIGIT_H - THICK, THICK, THICK);
        let colour = if frame.decimal_point { LIT } else { UNLIT };
        fill(buffer, dp, colour);
    }
}
