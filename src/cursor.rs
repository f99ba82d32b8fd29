use {
    crate::error::ScanError,
    std::io::BufRead,
    utf8_chars::BufReadCharsExt,
};

/// Character reader over a buffered input with one character of pushback.
///
/// Once the input reports its end, the cursor stays at the end: later reads
/// keep returning `None` without touching the reader again.
pub struct Cursor<R> {
    reader: R,
    pushed_back: Option<char>,
    exhausted: bool,
}

impl<R: BufRead> Cursor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pushed_back: None,
            exhausted: false,
        }
    }

    /// Next character, or `None` at end of input.
    pub fn read(&mut self) -> Result<Option<char>, ScanError> {
        if let Some(c) = self.pushed_back.take() {
            return Ok(Some(c));
        }
        if self.exhausted {
            return Ok(None);
        }
        match self.reader.chars().next().transpose()? {
            Some(c) => Ok(Some(c)),
            None => {
                self.exhausted = true;
                Ok(None)
            }
        }
    }

    /// Make `c` the next character returned by `read`. The slot holds a single character.
    pub fn unread(&mut self, c: char) {
        debug_assert!(self.pushed_back.is_none(), "pushback slot already full");
        self.pushed_back = Some(c);
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::io::{self, BufReader, Read},
    };

    #[test]
    fn reads_then_reports_end_repeatedly() {
        let mut cursor = Cursor::new("ab".as_bytes());
        assert_eq!(cursor.read().unwrap(), Some('a'));
        assert_eq!(cursor.read().unwrap(), Some('b'));
        assert_eq!(cursor.read().unwrap(), None);
        assert_eq!(cursor.read().unwrap(), None);
    }

    #[test]
    fn pushback_is_returned_first() {
        let mut cursor = Cursor::new("xy".as_bytes());
        let c = cursor.read().unwrap().unwrap();
        cursor.unread(c);
        assert_eq!(cursor.read().unwrap(), Some('x'));
        assert_eq!(cursor.read().unwrap(), Some('y'));
    }

    #[test]
    fn pushback_survives_end_of_input() {
        let mut cursor = Cursor::new("z".as_bytes());
        assert_eq!(cursor.read().unwrap(), Some('z'));
        assert_eq!(cursor.read().unwrap(), None);
        cursor.unread('z');
        assert_eq!(cursor.read().unwrap(), Some('z'));
        assert_eq!(cursor.read().unwrap(), None);
    }

    #[test]
    fn decodes_multibyte_characters() {
        let mut cursor = Cursor::new("ñλ".as_bytes());
        assert_eq!(cursor.read().unwrap(), Some('ñ'));
        assert_eq!(cursor.read().unwrap(), Some('λ'));
        assert_eq!(cursor.read().unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_a_read_fault() {
        let bytes: &[u8] = &[b'a', 0xff, b'b'];
        let mut cursor = Cursor::new(bytes);
        assert_eq!(cursor.read().unwrap(), Some('a'));
        assert!(matches!(cursor.read(), Err(ScanError::Read(_))));
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn reader_failure_is_propagated() {
        let mut cursor = Cursor::new(BufReader::new(Broken));
        assert!(matches!(cursor.read(), Err(ScanError::Read(_))));
    }
}
