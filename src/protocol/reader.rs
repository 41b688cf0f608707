//! Zero-filling little-endian cursor over a server frame
//!
//! Server framing is validated upstream, so running off the end of a buffer is
//! not an error here: every read past the end yields zero and still advances
//! the cursor by the width of the requested type.

/// Sequential reader over an immutable byte buffer
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read offset (may exceed the buffer length)
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before the end of the buffer
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// True once the cursor is at or past the end of the buffer
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Advance the cursor without reading
    #[inline]
    pub fn skip(&mut self, len: usize) {
        self.pos = self.pos.saturating_add(len);
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        if let Some(bytes) = self
            .pos
            .checked_add(N)
            .and_then(|end| self.buf.get(self.pos..end))
        {
            out.copy_from_slice(bytes);
        }
        self.skip(N);
        out
    }

    pub fn read_u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    pub fn read_u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    pub fn read_i16(&mut self) -> i16 {
        i16::from_le_bytes(self.take())
    }

    pub fn read_u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    pub fn read_i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }

    pub fn read_f32(&mut self) -> f32 {
        f32::from_le_bytes(self.take())
    }

    pub fn read_f64(&mut self) -> f64 {
        f64::from_le_bytes(self.take())
    }

    /// Null-terminated string of 16-bit code units (player names)
    pub fn read_utf16_string(&mut self) -> String {
        let mut units = Vec::new();
        loop {
            match self.read_u16() {
                0 => break,
                unit => units.push(unit),
            }
        }
        String::from_utf16_lossy(&units)
    }

    /// Null-terminated string of 8-bit code units, one char per byte
    pub fn read_latin1_string(&mut self) -> String {
        let mut out = String::new();
        loop {
            match self.read_u8() {
                0 => break,
                byte => out.push(char::from(byte)),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reads_little_endian() {
        let buf = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xff];
        let mut r = ByteReader::new(&buf);
        assert_eq!(r.read_u16(), 0x1234);
        assert_eq!(r.read_u32(), 0x1234_5678);
        assert_eq!(r.read_u8(), 0xff);
        assert!(r.is_exhausted());
    }

    #[test]
    fn test_signed_reads() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(-2i16).to_le_bytes());
        buf.extend_from_slice(&(-70_000i32).to_le_bytes());
        let mut r = ByteReader::new(&buf);
        assert_eq!(r.read_i16(), -2);
        assert_eq!(r.read_i32(), -70_000);
    }

    #[test]
    fn test_truncated_float_is_zero_and_advances() {
        // Only two of the four bytes of an f32 are present
        let buf = [0x00, 0x00, 0x80];
        let mut r = ByteReader::new(&buf);
        r.skip(1);
        assert_eq!(r.read_f32(), 0.0);
        assert_eq!(r.position(), 5);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_past_end_reads_are_zero() {
        let mut r = ByteReader::new(&[]);
        assert_eq!(r.read_u8(), 0);
        assert_eq!(r.read_u16(), 0);
        assert_eq!(r.read_i32(), 0);
        assert_eq!(r.read_f64(), 0.0);
        assert_eq!(r.position(), 1 + 2 + 4 + 8);
    }

    #[test]
    fn test_utf16_string() {
        let mut buf = Vec::new();
        for unit in "Bob✓".encode_utf16() {
            buf.extend_from_slice(&unit.to_le_bytes());
        }
        buf.extend_from_slice(&[0, 0, 7]);
        let mut r = ByteReader::new(&buf);
        assert_eq!(r.read_utf16_string(), "Bob✓");
        assert_eq!(r.read_u8(), 7);
    }

    #[test]
    fn test_unterminated_strings_stop_at_end() {
        let mut r = ByteReader::new(b"ab");
        assert_eq!(r.read_latin1_string(), "ab");

        let mut r = ByteReader::new(&[b'x', 0]);
        assert_eq!(r.read_utf16_string(), "x");
    }

    #[test]
    fn test_latin1_string() {
        let mut r = ByteReader::new(&[b'h', 0xe9, 0, b'z']);
        assert_eq!(r.read_latin1_string(), "hé");
        assert_eq!(r.read_u8(), b'z');
    }

    #[test]
    fn test_skip_saturates() {
        let mut r = ByteReader::new(&[1, 2, 3]);
        r.skip(usize::MAX);
        r.skip(10);
        assert_eq!(r.position(), usize::MAX);
        assert_eq!(r.read_u32(), 0);
    }

    proptest! {
        #[test]
        fn prop_reads_never_panic(buf in proptest::collection::vec(any::<u8>(), 0..64), start in 0usize..80) {
            let mut r = ByteReader::new(&buf);
            r.skip(start);
            let before = r.position();
            let _ = r.read_f64();
            prop_assert_eq!(r.position(), before + 8);
            let _ = r.read_utf16_string();
            let _ = r.read_latin1_string();
        }
    }
}
