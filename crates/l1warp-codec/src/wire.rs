//! Fixed-width big-endian integers, u32-length-prefixed byte strings, and
//! unsigned base-128 varints.
//!
//! Encoding is infallible for any input that fits the format: lengths and
//! counts are u32 on the wire, and [`put_len`] panics rather than truncate
//! one that does not. Decoding goes through [`Reader`], which tracks an
//! offset and fails with [`CodecError::Bounds`] rather than reading past the
//! end of its buffer.

use l1warp_types::CodecError;

pub fn put_u8(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

pub fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub fn put_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Writes a length or element count as a big-endian u32.
///
/// # Panics
///
/// If `len` exceeds `u32::MAX`.
pub fn put_len(out: &mut Vec<u8>, len: usize) {
    match u32::try_from(len) {
        Ok(len) => put_u32(out, len),
        Err(_) => panic!("length {len} does not fit a u32 prefix"),
    }
}

/// `u32(len(value)) || value`. Panics like [`put_len`].
pub fn put_bytes(out: &mut Vec<u8>, value: &[u8]) {
    put_len(out, value.len());
    out.extend_from_slice(value);
}

/// 7 payload bits per byte, least-significant group first, high bit set on
/// every byte but the last.
pub fn put_uvarint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

pub fn uvarint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(10);
    put_uvarint(&mut out, value);
    out
}

pub fn read_u16_at(buf: &[u8], offset: usize) -> Result<u16, CodecError> {
    Ok(u16::from_be_bytes(read_array_at(buf, offset)?))
}

pub fn read_u32_at(buf: &[u8], offset: usize) -> Result<u32, CodecError> {
    Ok(u32::from_be_bytes(read_array_at(buf, offset)?))
}

pub fn read_u64_at(buf: &[u8], offset: usize) -> Result<u64, CodecError> {
    Ok(u64::from_be_bytes(read_array_at(buf, offset)?))
}

fn read_array_at<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N], CodecError> {
    let slice = slice_at(buf, offset, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    Ok(out)
}

fn slice_at(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], CodecError> {
    offset
        .checked_add(len)
        .and_then(|end| buf.get(offset..end))
        .ok_or(CodecError::Bounds {
            offset,
            needed: len,
            len: buf.len(),
        })
}

/// Cursor over an encoded payload.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.offset)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        let value = read_u16_at(self.buf, self.offset)?;
        self.offset += 2;
        Ok(value)
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        let value = read_u32_at(self.buf, self.offset)?;
        self.offset += 4;
        Ok(value)
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        let value = read_u64_at(self.buf, self.offset)?;
        self.offset += 8;
        Ok(value)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let value = read_array_at(self.buf, self.offset)?;
        self.offset += N;
        Ok(value)
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let value = slice_at(self.buf, self.offset, len)?;
        self.offset += len;
        Ok(value)
    }

    /// Reads a u32 length prefix and that many bytes.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.read_u32()? as usize;
        self.read_slice(len)
    }

    /// Fails with `InvalidLength` unless every byte has been consumed.
    pub fn finish(self, kind: &'static str) -> Result<(), CodecError> {
        if self.offset != self.buf.len() {
            return Err(CodecError::InvalidLength {
                kind,
                expected: self.offset,
                actual: self.buf.len(),
            });
        }
        Ok(())
    }
}
