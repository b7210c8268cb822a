// functions for working with active-low output lines.

pub trait Bit {
    fn bit(&self, n: usize) -> bool;
    fn set(&mut self, n: usize);
    fn reset(&mut self, n: usize);
}

impl Bit for u8 {
    fn bit(&self, n: usize) -> bool {
        self & (1 << n) == (1 << n)
    }

    fn set(&mut self, n: usize) {
        *self |= 1 << n;
    }

    fn reset(&mut self, n: usize) {
        *self &= !(1 << n);
    }
}
