//! Tuple dictionary codec
//!
//! Every message on the companion link is a dictionary: an ordered list
//! of keyed, typed values.
//!
//! ```text
//! ┌───────┬─────────────────────────────────────────────┐
//! │ COUNT │ TUPLE × COUNT                               │
//! │ 1B    │ KEY (4B LE) TYPE (1B) LEN (2B LE) VALUE     │
//! └───────┴─────────────────────────────────────────────┘
//! ```
//!
//! Integers are 1, 2 or 4 bytes wide. C strings include their NUL
//! terminator in `LEN`.

use heapless::Vec;

/// Bytes in a tuple header (key + type + length)
pub const TUPLE_HEADER_LEN: usize = 7;

/// Maximum tuples in one dictionary
pub const MAX_TUPLES: usize = 16;

const TYPE_BYTE_ARRAY: u8 = 0;
const TYPE_CSTRING: u8 = 1;
const TYPE_UINT: u8 = 2;
const TYPE_INT: u8 = 3;

/// Errors from dictionary encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DictError {
    /// Input ended inside a header or value
    Truncated,
    /// Output buffer cannot hold another tuple
    BufferFull,
    /// More than [`MAX_TUPLES`] tuples
    TooManyTuples,
    /// Value length not valid for its type
    InvalidLength,
}

/// A decoded tuple value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TupleValue<'a> {
    /// Raw bytes
    Bytes(&'a [u8]),
    /// C string contents, without the terminator
    CString(&'a [u8]),
    /// Unsigned integer
    Uint(u32),
    /// Signed integer
    Int(i32),
    /// Value of a type this codec does not know
    Unknown(u8),
}

impl<'a> TupleValue<'a> {
    /// Interpret as a signed integer
    ///
    /// Unsigned values that do not fit are rejected.
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            TupleValue::Int(v) => Some(v),
            TupleValue::Uint(v) => i32::try_from(v).ok(),
            _ => None,
        }
    }

    /// Interpret as a boolean flag (any non-zero integer is true)
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            TupleValue::Int(v) => Some(v != 0),
            TupleValue::Uint(v) => Some(v != 0),
            _ => None,
        }
    }

    /// Interpret as UTF-8 text
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            TupleValue::CString(bytes) | TupleValue::Bytes(bytes) => {
                core::str::from_utf8(bytes).ok()
            }
            _ => None,
        }
    }

    /// Interpret as text, keeping the valid UTF-8 prefix of bad input
    pub fn as_str_prefix(&self) -> Option<&'a str> {
        match *self {
            TupleValue::CString(bytes) | TupleValue::Bytes(bytes) => {
                Some(match core::str::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
                })
            }
            _ => None,
        }
    }
}

/// One key/value pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tuple<'a> {
    /// Message key
    pub key: u32,
    /// Decoded value
    pub value: TupleValue<'a>,
}

fn decode_int(bytes: &[u8], signed: bool) -> Result<TupleValue<'_>, DictError> {
    let value = match (bytes.len(), signed) {
        (1, false) => TupleValue::Uint(u32::from(bytes[0])),
        (1, true) => TupleValue::Int(i32::from(bytes[0] as i8)),
        (2, false) => TupleValue::Uint(u32::from(u16::from_le_bytes([bytes[0], bytes[1]]))),
        (2, true) => TupleValue::Int(i32::from(i16::from_le_bytes([bytes[0], bytes[1]]))),
        (4, false) => {
            TupleValue::Uint(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        }
        (4, true) => TupleValue::Int(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
        _ => return Err(DictError::InvalidLength),
    };
    Ok(value)
}

fn decode_value(type_byte: u8, bytes: &[u8]) -> Result<TupleValue<'_>, DictError> {
    match type_byte {
        TYPE_BYTE_ARRAY => Ok(TupleValue::Bytes(bytes)),
        TYPE_CSTRING => {
            // Stop at the first NUL; tolerate a missing terminator
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            Ok(TupleValue::CString(&bytes[..end]))
        }
        TYPE_UINT => decode_int(bytes, false),
        TYPE_INT => decode_int(bytes, true),
        other => Ok(TupleValue::Unknown(other)),
    }
}

/// Read-only view over an encoded dictionary
#[derive(Debug, Clone, Copy)]
pub struct DictReader<'a> {
    count: u8,
    body: &'a [u8],
}

impl<'a> DictReader<'a> {
    /// Wrap encoded bytes
    ///
    /// Only the count byte is checked here; tuples are validated as they
    /// are iterated so a damaged tail does not hide the tuples before it.
    pub fn new(bytes: &'a [u8]) -> Result<Self, DictError> {
        let (&count, body) = bytes.split_first().ok_or(DictError::Truncated)?;
        if count as usize > MAX_TUPLES {
            return Err(DictError::TooManyTuples);
        }
        Ok(Self { count, body })
    }

    /// Declared tuple count
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Iterate over tuples
    ///
    /// Yields `Err` once and then stops if the dictionary is damaged.
    /// Integer tuples with an unsupported width are yielded as errors
    /// without stopping iteration.
    pub fn iter(&self) -> Tuples<'a> {
        Tuples {
            remaining: self.count,
            rest: self.body,
            failed: false,
        }
    }

    /// Find the first well-formed tuple with the given key
    pub fn find(&self, key: u32) -> Option<Tuple<'a>> {
        self.iter().filter_map(Result::ok).find(|t| t.key == key)
    }
}

/// Iterator over dictionary tuples
#[derive(Debug, Clone)]
pub struct Tuples<'a> {
    remaining: u8,
    rest: &'a [u8],
    failed: bool,
}

impl<'a> Iterator for Tuples<'a> {
    type Item = Result<Tuple<'a>, DictError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.failed {
            return None;
        }

        if self.rest.len() < TUPLE_HEADER_LEN {
            self.failed = true;
            return Some(Err(DictError::Truncated));
        }

        let header = &self.rest[..TUPLE_HEADER_LEN];
        let key = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let type_byte = header[4];
        let len = u16::from_le_bytes([header[5], header[6]]) as usize;

        let value_end = TUPLE_HEADER_LEN + len;
        if self.rest.len() < value_end {
            self.failed = true;
            return Some(Err(DictError::Truncated));
        }

        let value_bytes = &self.rest[TUPLE_HEADER_LEN..value_end];
        self.rest = &self.rest[value_end..];
        self.remaining -= 1;

        Some(decode_value(type_byte, value_bytes).map(|value| Tuple { key, value }))
    }
}

/// Dictionary encoder into a fixed-capacity buffer
#[derive(Debug, Clone)]
pub struct DictWriter<const N: usize> {
    buffer: Vec<u8, N>,
    count: u8,
}

impl<const N: usize> Default for DictWriter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DictWriter<N> {
    /// Create an empty dictionary
    pub fn new() -> Self {
        let mut buffer = Vec::new();
        // Count placeholder, patched on every write
        let _ = buffer.push(0);
        Self { buffer, count: 0 }
    }

    fn write_tuple(&mut self, key: u32, type_byte: u8, parts: &[&[u8]]) -> Result<(), DictError> {
        if self.count as usize >= MAX_TUPLES {
            return Err(DictError::TooManyTuples);
        }

        let len: usize = parts.iter().map(|p| p.len()).sum();
        let len_u16 = u16::try_from(len).map_err(|_| DictError::InvalidLength)?;
        if self.buffer.len() + TUPLE_HEADER_LEN + len > N {
            return Err(DictError::BufferFull);
        }

        // Capacity checked above
        let _ = self.buffer.extend_from_slice(&key.to_le_bytes());
        let _ = self.buffer.push(type_byte);
        let _ = self.buffer.extend_from_slice(&len_u16.to_le_bytes());
        for part in parts {
            let _ = self.buffer.extend_from_slice(part);
        }

        self.count += 1;
        if let Some(first) = self.buffer.first_mut() {
            *first = self.count;
        }
        Ok(())
    }

    /// Append a one-byte unsigned integer
    pub fn write_u8(&mut self, key: u32, value: u8) -> Result<(), DictError> {
        self.write_tuple(key, TYPE_UINT, &[&[value]])
    }

    /// Append a four-byte unsigned integer
    pub fn write_u32(&mut self, key: u32, value: u32) -> Result<(), DictError> {
        self.write_tuple(key, TYPE_UINT, &[&value.to_le_bytes()])
    }

    /// Append a four-byte signed integer
    pub fn write_i32(&mut self, key: u32, value: i32) -> Result<(), DictError> {
        self.write_tuple(key, TYPE_INT, &[&value.to_le_bytes()])
    }

    /// Append a NUL-terminated string
    pub fn write_cstring(&mut self, key: u32, value: &str) -> Result<(), DictError> {
        self.write_tuple(key, TYPE_CSTRING, &[value.as_bytes(), &[0]])
    }

    /// Number of tuples written
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Encoded bytes so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Finish and take the encoded bytes
    pub fn finish(self) -> Vec<u8, N> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dictionary() {
        let writer = DictWriter::<16>::new();
        assert_eq!(writer.as_bytes(), &[0]);

        let reader = DictReader::new(writer.as_bytes()).unwrap();
        assert_eq!(reader.count(), 0);
        assert!(reader.iter().next().is_none());
    }

    #[test]
    fn test_u8_layout() {
        let mut writer = DictWriter::<16>::new();
        writer.write_u8(0, 0).unwrap();
        assert_eq!(writer.as_bytes(), &[1, 0, 0, 0, 0, TYPE_UINT, 1, 0, 0]);
    }

    #[test]
    fn test_mixed_values() {
        let mut writer = DictWriter::<64>::new();
        writer.write_i32(1, -7).unwrap();
        writer.write_cstring(2, "Rain").unwrap();
        writer.write_u32(5, 1).unwrap();
        let bytes = writer.finish();

        let reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.count(), 3);
        assert_eq!(reader.find(1).unwrap().value, TupleValue::Int(-7));
        assert_eq!(reader.find(2).unwrap().value.as_str(), Some("Rain"));
        assert_eq!(reader.find(5).unwrap().value.as_bool(), Some(true));
        assert!(reader.find(9).is_none());
    }

    #[test]
    fn test_narrow_integers() {
        // key 1, signed, 2 bytes: -300
        let mut bytes = [0u8; 1 + TUPLE_HEADER_LEN + 2];
        bytes[0] = 1;
        bytes[1] = 1;
        bytes[5] = TYPE_INT;
        bytes[6] = 2;
        bytes[8..10].copy_from_slice(&(-300i16).to_le_bytes());

        let reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.find(1).unwrap().value.as_i32(), Some(-300));
    }

    #[test]
    fn test_signed_byte() {
        let bytes = [1, 1, 0, 0, 0, TYPE_INT, 1, 0, 0xFB];
        let reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.find(1).unwrap().value, TupleValue::Int(-5));
    }

    #[test]
    fn test_bad_integer_width_skips_only_that_tuple() {
        let mut bytes = heapless::Vec::<u8, 32>::new();
        bytes.extend_from_slice(&[2]).unwrap();
        // key 1, uint, 3 bytes (invalid width)
        bytes.extend_from_slice(&[1, 0, 0, 0, TYPE_UINT, 3, 0, 1, 2, 3]).unwrap();
        // key 4, uint8 = 1
        bytes.extend_from_slice(&[4, 0, 0, 0, TYPE_UINT, 1, 0, 1]).unwrap();

        let reader = DictReader::new(&bytes).unwrap();
        let mut iter = reader.iter();
        assert_eq!(iter.next(), Some(Err(DictError::InvalidLength)));
        assert_eq!(
            iter.next(),
            Some(Ok(Tuple {
                key: 4,
                value: TupleValue::Uint(1)
            }))
        );
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_truncated_tail_keeps_leading_tuples() {
        let mut writer = DictWriter::<64>::new();
        writer.write_i32(1, 21).unwrap();
        writer.write_cstring(2, "Cloudy").unwrap();
        let bytes = writer.finish();

        // Chop the string value in half
        let cut = &bytes[..bytes.len() - 4];
        let reader = DictReader::new(cut).unwrap();
        assert_eq!(reader.find(1).unwrap().value.as_i32(), Some(21));
        assert!(reader.find(2).is_none());

        let errors = reader.iter().filter(|t| t.is_err()).count();
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_unterminated_cstring() {
        let bytes = [1, 2, 0, 0, 0, TYPE_CSTRING, 3, 0, b'S', b'u', b'n'];
        let reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.find(2).unwrap().value.as_str(), Some("Sun"));
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let bytes = [1, 9, 0, 0, 0, 0x7F, 1, 0, 0];
        let reader = DictReader::new(&bytes).unwrap();
        assert_eq!(reader.find(9).unwrap().value, TupleValue::Unknown(0x7F));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(DictReader::new(&[]).unwrap_err(), DictError::Truncated);
    }

    #[test]
    fn test_too_many_tuples_declared() {
        let bytes = [MAX_TUPLES as u8 + 1];
        assert_eq!(DictReader::new(&bytes).unwrap_err(), DictError::TooManyTuples);
    }

    #[test]
    fn test_writer_buffer_full() {
        let mut writer = DictWriter::<12>::new();
        assert!(writer.write_u8(1, 1).is_ok());
        assert_eq!(writer.write_u8(2, 1), Err(DictError::BufferFull));
        assert_eq!(writer.count(), 1);
    }

    #[test]
    fn test_uint_out_of_i32_range() {
        let value = TupleValue::Uint(u32::MAX);
        assert_eq!(value.as_i32(), None);
        assert_eq!(value.as_bool(), Some(true));
    }
}
