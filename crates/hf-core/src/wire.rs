//! Positional binary encoding used for runtime sync.
//!
//! ## Primitives
//! ```text
//! i32 / f32   4 bytes, big-endian
//! varint      i32 in 7-bit groups, low group first, at most 5 bytes
//! bool        1 byte, 0 or 1
//! string      varint byte length, then UTF-8
//! ```
//!
//! Every field is always present. Repeated groups are preceded by their count.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::config::WireLimits;
use crate::error::{DecodeError, DecodeResult};
use crate::id::ResourceId;

/// Maximum encoded size of a varint.
const MAX_VARINT_BYTES: usize = 5;

/// Append-only writer for the wire form.
#[derive(Debug, Default)]
pub struct PacketWriter {
    buf: BytesMut,
}

impl PacketWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Write a boolean as one byte.
    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    /// Write a big-endian `i32`.
    pub fn write_i32(&mut self, value: i32) {
        self.buf.put_i32(value);
    }

    /// Write a big-endian `f32`.
    pub fn write_f32(&mut self, value: f32) {
        self.buf.put_f32(value);
    }

    /// Write an `i32` as a varint. Negative values always take five bytes.
    pub fn write_var_i32(&mut self, value: i32) {
        let mut rest = value as u32;
        loop {
            if rest & !0x7F == 0 {
                self.buf.put_u8(rest as u8);
                return;
            }
            self.buf.put_u8(((rest & 0x7F) | 0x80) as u8);
            rest >>= 7;
        }
    }

    /// Write a collection length as a varint.
    pub fn write_var_len(&mut self, len: usize) {
        self.write_var_i32(len as i32);
    }

    /// Write an enum ordinal as a big-endian `i32`.
    pub fn write_enum(&mut self, ordinal: usize) {
        self.write_i32(ordinal as i32);
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) {
        self.write_var_len(value.len());
        self.buf.put_slice(value.as_bytes());
    }

    /// Write an identifier in its `namespace:path` form.
    pub fn write_id(&mut self, id: &ResourceId) {
        self.write_string(&id.to_string());
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Finish writing and return the frozen buffer.
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Cursor over a received buffer.
///
/// Every read checks the remaining length first, so a truncated buffer
/// yields [`DecodeError::Truncated`] instead of a panic.
#[derive(Debug, Clone)]
pub struct PacketReader<'a> {
    buf: &'a [u8],
    limits: WireLimits,
}

impl<'a> PacketReader<'a> {
    /// Read from `buf` with the default [`WireLimits`].
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_limits(buf, WireLimits::default())
    }

    /// Read from `buf` with explicit limits.
    pub fn with_limits(buf: &'a [u8], limits: WireLimits) -> Self {
        Self { buf, limits }
    }

    /// The limits this reader enforces.
    pub fn limits(&self) -> WireLimits {
        self.limits
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn ensure(&self, needed: usize) -> DecodeResult<()> {
        let remaining = self.buf.remaining();
        if remaining < needed {
            return Err(DecodeError::Truncated { needed, remaining });
        }
        Ok(())
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    /// Read a boolean byte; anything other than 0 or 1 is rejected.
    pub fn read_bool(&mut self) -> DecodeResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::InvalidBool(other)),
        }
    }

    /// Read a big-endian `i32`.
    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        self.ensure(4)?;
        Ok(self.buf.get_i32())
    }

    /// Read a big-endian `f32`.
    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        self.ensure(4)?;
        Ok(self.buf.get_f32())
    }

    /// Read a big-endian `f32`, rejecting NaN and infinities.
    pub fn read_finite_f32(&mut self, what: &'static str) -> DecodeResult<f32> {
        let value = self.read_f32()?;
        if !value.is_finite() {
            return Err(DecodeError::NonFiniteFloat { what });
        }
        Ok(value)
    }

    /// Read a varint-encoded `i32`.
    pub fn read_var_i32(&mut self) -> DecodeResult<i32> {
        let mut value: u32 = 0;
        for i in 0..MAX_VARINT_BYTES {
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value as i32);
            }
        }
        Err(DecodeError::VarIntTooLong)
    }

    /// Read an enum ordinal written by [`PacketWriter::write_enum`].
    pub fn read_enum(&mut self) -> DecodeResult<i32> {
        self.read_i32()
    }

    /// Read a varint count prefix and check it against the collection limit.
    pub fn read_var_len(&mut self, what: &'static str) -> DecodeResult<usize> {
        let count = self.read_var_i32()?;
        self.check_count(what, count)
    }

    /// Read a big-endian `i32` count prefix and check it against the collection limit.
    pub fn read_i32_len(&mut self, what: &'static str) -> DecodeResult<usize> {
        let count = self.read_i32()?;
        self.check_count(what, count)
    }

    fn check_count(&self, what: &'static str, count: i32) -> DecodeResult<usize> {
        match usize::try_from(count) {
            Ok(n) if n <= self.limits.max_collection_len => Ok(n),
            _ => Err(DecodeError::InvalidCount {
                what,
                count: i64::from(count),
            }),
        }
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> DecodeResult<String> {
        let len = self.read_var_i32()?;
        let len = usize::try_from(len).map_err(|_| DecodeError::InvalidCount {
            what: "string length",
            count: i64::from(len),
        })?;
        if len > self.limits.max_string_len {
            return Err(DecodeError::StringTooLong {
                len,
                max: self.limits.max_string_len,
            });
        }
        self.ensure(len)?;
        let (head, tail) = self.buf.split_at(len);
        let value = std::str::from_utf8(head).map_err(|_| DecodeError::InvalidUtf8)?;
        self.buf = tail;
        Ok(value.to_string())
    }

    /// Read an identifier string and parse it.
    pub fn read_id(&mut self) -> DecodeResult<ResourceId> {
        let raw = self.read_string()?;
        Ok(ResourceId::parse(&raw)?)
    }

    /// Succeed only if the whole buffer was consumed.
    pub fn finish(self) -> DecodeResult<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(DecodeError::TrailingBytes(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn varint_known_encodings() {
        let cases: [(i32, &[u8]); 5] = [
            (0, &[0x00]),
            (1, &[0x01]),
            (127, &[0x7F]),
            (128, &[0x80, 0x01]),
            (-1, &[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]),
        ];
        for (value, bytes) in cases {
            let mut w = PacketWriter::new();
            w.write_var_i32(value);
            assert_eq!(w.as_slice(), bytes, "encoding {value}");
            let mut r = PacketReader::new(bytes);
            assert_eq!(r.read_var_i32().unwrap(), value);
            r.finish().unwrap();
        }
    }

    #[test]
    fn i32_is_big_endian() {
        let mut w = PacketWriter::new();
        w.write_i32(2);
        assert_eq!(w.as_slice(), &[0, 0, 0, 2]);
    }

    #[test]
    fn varint_too_long() {
        let bytes = [0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        let mut r = PacketReader::new(&bytes);
        assert_eq!(r.read_var_i32(), Err(DecodeError::VarIntTooLong));
    }

    #[test]
    fn truncated_i32() {
        let mut r = PacketReader::new(&[0, 1]);
        assert_eq!(
            r.read_i32(),
            Err(DecodeError::Truncated {
                needed: 4,
                remaining: 2
            })
        );
    }

    #[test]
    fn invalid_bool_rejected() {
        let mut r = PacketReader::new(&[2]);
        assert_eq!(r.read_bool(), Err(DecodeError::InvalidBool(2)));
    }

    #[test]
    fn non_finite_floats_rejected() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let mut w = PacketWriter::new();
            w.write_f32(bad);
            let bytes = w.freeze();
            let mut r = PacketReader::new(&bytes);
            assert_eq!(
                r.read_finite_f32("bonus"),
                Err(DecodeError::NonFiniteFloat { what: "bonus" })
            );
        }
        let mut r = PacketReader::new(&[0x3F, 0x80, 0, 0]);
        assert_eq!(r.read_finite_f32("bonus"), Ok(1.0));
    }

    #[test]
    fn strings_round_trip() {
        let mut w = PacketWriter::new();
        w.write_string("hookforge:wood");
        w.write_string("");
        let bytes = w.freeze();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(r.read_string().unwrap(), "hookforge:wood");
        assert_eq!(r.read_string().unwrap(), "");
        r.finish().unwrap();
    }

    #[test]
    fn string_limit_enforced() {
        let mut w = PacketWriter::new();
        w.write_string("abcdef");
        let bytes = w.freeze();
        let limits = WireLimits::default().with_max_string_len(3);
        let mut r = PacketReader::with_limits(&bytes, limits);
        assert_eq!(
            r.read_string(),
            Err(DecodeError::StringTooLong { len: 6, max: 3 })
        );
    }

    #[test]
    fn string_truncated() {
        let mut r = PacketReader::new(&[5, b'a', b'b']);
        assert!(matches!(r.read_string(), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn invalid_utf8_rejected() {
        let mut r = PacketReader::new(&[2, 0xC3, 0x28]);
        assert_eq!(r.read_string(), Err(DecodeError::InvalidUtf8));
    }

    #[test]
    fn negative_count_rejected() {
        let mut w = PacketWriter::new();
        w.write_i32(-3);
        let bytes = w.freeze();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(
            r.read_i32_len("material"),
            Err(DecodeError::InvalidCount {
                what: "material",
                count: -3
            })
        );
    }

    #[test]
    fn count_over_limit_rejected() {
        let mut w = PacketWriter::new();
        w.write_var_len(10);
        let bytes = w.freeze();
        let limits = WireLimits::default().with_max_collection_len(4);
        let mut r = PacketReader::with_limits(&bytes, limits);
        assert!(matches!(
            r.read_var_len("module"),
            Err(DecodeError::InvalidCount { count: 10, .. })
        ));
    }

    #[test]
    fn trailing_bytes_reported() {
        let r = PacketReader::new(&[1, 2, 3]);
        assert_eq!(r.finish(), Err(DecodeError::TrailingBytes(3)));
    }

    #[test]
    fn ids_parse_on_read() {
        let mut w = PacketWriter::new();
        w.write_string("NOT VALID");
        let bytes = w.freeze();
        let mut r = PacketReader::new(&bytes);
        assert!(matches!(r.read_id(), Err(DecodeError::Id(_))));
    }

    proptest! {
        #[test]
        fn varint_round_trips(value in any::<i32>()) {
            let mut w = PacketWriter::new();
            w.write_var_i32(value);
            prop_assert!(w.len() <= MAX_VARINT_BYTES);
            let bytes = w.freeze();
            let mut r = PacketReader::new(&bytes);
            prop_assert_eq!(r.read_var_i32().unwrap(), value);
            prop_assert_eq!(r.remaining(), 0);
        }

        #[test]
        fn f32_round_trips(value in -1.0e6f32..1.0e6f32) {
            let mut w = PacketWriter::new();
            w.write_f32(value);
            let bytes = w.freeze();
            let mut r = PacketReader::new(&bytes);
            prop_assert_eq!(r.read_f32().unwrap(), value);
        }
    }
}
