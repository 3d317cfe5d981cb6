/// A byte cursor over markup with position tracking.
///
/// All slicing happens at ASCII delimiters (`<`, `>`, quotes, whitespace, `=`),
/// so positions handed out by the tokenizer are always valid `str` boundaries.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The markup being scanned.
    pub s: &'a str,
    /// Current index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Peeks `n` bytes ahead of the current position.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + n).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes().get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes, stopping at the end of input.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Advances while `pred` holds and returns the consumed slice.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let s = self.s;
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        &s[start..self.i]
    }

    /// Advances past the next occurrence of `pat`, or to the end if absent.
    pub fn skip_past(&mut self, pat: &[u8]) {
        while !self.eof() {
            if self.starts_with(pat) {
                self.bump_n(pat.len());
                return;
            }
            self.i += 1;
        }
    }
}
