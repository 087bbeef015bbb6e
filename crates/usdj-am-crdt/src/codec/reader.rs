//! Fallible byte reader mirroring [`Writer`](super::writer::Writer).

use ciborium::value::Value as CborValue;
use std::io::Cursor;

use crate::model::ModelError;

#[derive(Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn is_eof(&self) -> bool {
        self.pos == self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Consumes the next `n` bytes.
    fn take(&mut self, n: usize) -> Result<&'a [u8], ModelError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(ModelError::InvalidModelBinary)?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn peek(&self) -> Result<u8, ModelError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(ModelError::InvalidModelBinary)
    }

    pub fn u8(&mut self) -> Result<u8, ModelError> {
        Ok(self.take(1)?[0])
    }

    /// The clock table offset; a short header is a broken clock table.
    pub fn u32_be(&mut self) -> Result<u32, ModelError> {
        let bytes: [u8; 4] = self
            .take(4)
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(ModelError::InvalidClockTable)?;
        Ok(u32::from_be_bytes(bytes))
    }

    /// Reads 7-bit groups starting at bit `shift` while the continuation
    /// bit is set; the group that would start at bit `last` is a full byte.
    fn septets(&mut self, mut shift: u32, last: u32) -> Result<u64, ModelError> {
        let mut value = 0;
        while shift < last {
            let byte = self.u8()?;
            value |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
        Ok(value | u64::from(self.u8()?) << last)
    }

    pub fn vu57(&mut self) -> Result<u64, ModelError> {
        self.septets(0, 49)
    }

    /// A flag bit followed by a 56-bit varint whose first byte holds 6 bits.
    pub fn b1vu56(&mut self) -> Result<(u8, u64), ModelError> {
        let first = self.u8()?;
        let flag = first >> 7;
        let low = u64::from(first & 0x3F);
        if first & 0x40 == 0 {
            return Ok((flag, low));
        }
        Ok((flag, low | self.septets(6, 48)?))
    }

    /// Decodes a compact `(session_index, time)` ID.
    pub fn id(&mut self) -> Result<(u64, u64), ModelError> {
        let byte = self.peek()?;
        if byte & 0x80 == 0 {
            self.pos += 1;
            return Ok((u64::from(byte >> 4), u64::from(byte & 0x0F)));
        }
        let (_, x) = self.b1vu56()?;
        let y = self.vu57()?;
        Ok((x, y))
    }

    pub fn read_one_cbor(&mut self) -> Result<CborValue, ModelError> {
        let slice = &self.data[self.pos..];
        let mut cursor = Cursor::new(slice);
        let val = ciborium::de::from_reader::<CborValue, _>(&mut cursor)
            .map_err(|_| ModelError::InvalidModelBinary)?;
        self.take(cursor.position() as usize)?;
        Ok(val)
    }

    /// Splits off a reader over `[pos + offset, end)` and truncates `self`
    /// to `[pos, pos + offset)`.
    pub fn split_at(&mut self, offset: usize) -> Result<Reader<'a>, ModelError> {
        let split = self
            .pos
            .checked_add(offset)
            .filter(|&split| split <= self.data.len())
            .ok_or(ModelError::InvalidClockTable)?;
        let tail = Reader::new(&self.data[split..]);
        self.data = &self.data[..split];
        Ok(tail)
    }
}
