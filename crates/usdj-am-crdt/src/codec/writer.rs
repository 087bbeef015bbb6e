//! Growable byte writer with the variable-length integer encodings used by
//! the structural binary codec.

#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn flush(self) -> Vec<u8> {
        self.buf
    }

    #[inline]
    pub fn u8(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    #[inline]
    pub fn buf(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Reserves four bytes for a big-endian `u32` written later with
    /// [`Writer::patch_u32_be`]; returns their offset.
    pub fn reserve_u32(&mut self) -> usize {
        let offset = self.buf.len();
        self.buf.extend_from_slice(&[0; 4]);
        offset
    }

    pub fn patch_u32_be(&mut self, offset: usize, value: u32) {
        self.buf[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
    }

    /// Encodes a 57-bit variable-length unsigned integer.
    ///
    /// Uses 1–8 bytes. The first seven bytes carry 7 payload bits each with
    /// the MSB as continuation flag; the eighth byte carries 8 payload bits.
    pub fn vu57(&mut self, mut num: u64) {
        for _ in 0..7 {
            if num <= 0x7F {
                self.u8(num as u8);
                return;
            }
            self.u8(0x80 | (num & 0x7F) as u8);
            num >>= 7;
        }
        self.u8(num as u8);
    }

    /// Encodes a 1-bit flag followed by a 56-bit variable-length unsigned
    /// integer.
    ///
    /// The first byte is `|f|c|zzzzzz|` (flag, continuation, 6 payload bits);
    /// following bytes are laid out like [`Writer::vu57`], with the seventh
    /// carrying 8 payload bits.
    pub fn b1vu56(&mut self, flag: u8, num: u64) {
        let flag_bit = (flag & 1) << 7;
        if num <= 0x3F {
            self.u8(flag_bit | num as u8);
            return;
        }
        self.u8(flag_bit | 0x40 | (num & 0x3F) as u8);
        let mut rest = num >> 6;
        for _ in 0..6 {
            if rest <= 0x7F {
                self.u8(rest as u8);
                return;
            }
            self.u8(0x80 | (rest & 0x7F) as u8);
            rest >>= 7;
        }
        self.u8(rest as u8);
    }

    /// Encodes a compact `(session_index, time)` ID.
    ///
    /// Small pairs fit in one byte `|0xxxyyyy|`; anything else is a flagged
    /// `b1vu56` index followed by a `vu57` time.
    pub fn id(&mut self, x: u64, y: u64) {
        if x <= 0b111 && y <= 0b1111 {
            self.u8((x as u8) << 4 | y as u8);
        } else {
            self.b1vu56(1, x);
            self.vu57(y);
        }
    }
}
