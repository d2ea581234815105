/// Cursor over a non-empty log.
///
/// The cursor counts the leading records that are visible and always stays
/// within `[1, len]`, so at least one record is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Browser {
    cursor: usize,
    len: usize,
}

impl Browser {
    /// Creates a browser showing the whole log, or `None` for an empty log.
    #[must_use]
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { cursor: len, len })
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Shows one more record. Returns whether the cursor moved.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.len {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Shows one record fewer. Returns whether the cursor moved.
    pub fn backward(&mut self) -> bool {
        if self.cursor > 1 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Points the browser at a new log of `len` records, showing all of them.
    ///
    /// An empty length is treated as one.
    pub fn reset_to_end(&mut self, len: usize) {
        self.len = len.max(1);
        self.cursor = self.len;
    }

    /// The visible prefix of `log`.
    #[must_use]
    pub fn visible<'a, T>(&self, log: &'a [T]) -> &'a [T] {
        &log[..self.cursor.min(log.len())]
    }

    /// The last visible record, drawn as the current point.
    #[must_use]
    pub fn highlighted<'a, T>(&self, log: &'a [T]) -> Option<&'a T> {
        self.visible(log).last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_log_has_no_browser() {
        assert_eq!(Browser::new(0), None);
    }

    #[test]
    fn starts_at_the_end() {
        let browser = Browser::new(4).unwrap();
        assert_eq!(browser.cursor(), 4);
        assert_eq!(browser.visible(&[1, 2, 3, 4]), [1, 2, 3, 4]);
        assert_eq!(browser.highlighted(&[1, 2, 3, 4]), Some(&4));
    }

    #[test]
    fn moves_are_clamped() {
        let log: Vec<usize> = (1..=12).collect();
        let mut browser = Browser::new(log.len()).unwrap();

        for _ in 0..20 {
            browser.advance();
        }
        assert_eq!(browser.cursor(), 12);

        for _ in 0..20 {
            browser.backward();
        }
        assert_eq!(browser.cursor(), 1);
        assert_eq!(browser.visible(&log), [1]);
        assert!(!browser.backward());
        assert!(browser.advance());
        assert_eq!(browser.highlighted(&log), Some(&2));
    }

    #[test]
    fn reset_shows_the_new_log() {
        let mut browser = Browser::new(3).unwrap();
        browser.backward();
        browser.reset_to_end(7);
        assert_eq!(browser.cursor(), 7);
        assert_eq!(browser.len(), 7);
        assert!(!browser.advance());
    }

    proptest! {
        #[test]
        fn cursor_stays_in_range(len in 1..50_usize, moves in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut browser = Browser::new(len).unwrap();
            for forward in moves {
                if forward {
                    browser.advance();
                } else {
                    browser.backward();
                }
                prop_assert!((1..=len).contains(&browser.cursor()));
            }
        }

        #[test]
        fn advance_undoes_backward(len in 2..50_usize, steps in 0..50_usize) {
            let mut browser = Browser::new(len).unwrap();
            for _ in 0..steps {
                browser.backward();
            }
            let cursor = browser.cursor();
            prop_assume!(cursor > 1);
            prop_assert!(browser.backward());
            prop_assert!(browser.advance());
            prop_assert_eq!(browser.cursor(), cursor);
        }

        #[test]
        fn backward_undoes_advance(len in 3..50_usize, steps in 1..50_usize) {
            let mut browser = Browser::new(len).unwrap();
            for _ in 0..steps.min(len - 2) {
                browser.backward();
            }
            let cursor = browser.cursor();
            prop_assert!(cursor > 1 && cursor < len);
            prop_assert!(browser.advance());
            prop_assert!(browser.backward());
            prop_assert_eq!(browser.cursor(), cursor);
        }
    }
}
