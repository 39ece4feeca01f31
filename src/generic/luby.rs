/*!
An iterator to generate the luby sequence, and the restart intervals derived from it.

See <https://oeis.org/A182105> for details on the luby sequence.

Each element of the sequence is a power of two, 2<sup>k</sup>.
A restart schedule with growth factor *y* uses *y*<sup>k</sup> in place of the element, so with *y* = 2 the schedule is the sequence itself.
*/

/// Representation used for numbers in a luby sequence.
pub type LubyRepresentation = u32;

/// Foundation of the iterator.
pub struct Luby {
    curr: LubyRepresentation,
    next: LubyRepresentation,
}

impl Default for Luby {
    fn default() -> Self {
        Luby { curr: 0, next: 0 }
    }
}

impl Iterator for Luby {
    type Item = LubyRepresentation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.curr & self.curr.wrapping_neg() == self.next {
            self.curr = self.curr.checked_add(1)?;
            self.next = 1;
        } else {
            self.next = self.next.checked_add(self.next)?;
        }

        Some(self.next)
    }
}

impl Luby {
    /// The next element of the sequence with the base of two replaced by `y`.
    ///
    /// ```rust
    /// # use otter_smt::generic::luby::Luby;
    /// let mut luby = Luby::default();
    /// let scaled = (0..7).filter_map(|_| luby.next_scaled(3.0)).collect::<Vec<_>>();
    /// assert_eq!(scaled, vec![1.0, 1.0, 3.0, 1.0, 1.0, 3.0, 9.0]);
    /// ```
    pub fn next_scaled(&mut self, y: f64) -> Option<f64> {
        self.next()
            .map(|element| y.powi(element.trailing_zeros() as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://oeis.org/A182105
    const LUBY_SLICE: &[LubyRepresentation] = &[
        1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
        16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4,
        8, 16, 32, 1, 1, 2,
    ];

    #[test]
    fn luby() {
        let mut l = Luby::default();
        for known_value in LUBY_SLICE {
            assert_eq!(l.next(), Some(*known_value))
        }
    }

    #[test]
    fn scaled_by_two_is_the_sequence() {
        let mut plain = Luby::default();
        let mut scaled = Luby::default();
        for _ in 0..LUBY_SLICE.len() {
            let p = plain.next().map(|v| v as f64);
            assert_eq!(p, scaled.next_scaled(2.0));
        }
    }
}
