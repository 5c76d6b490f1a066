use mintx_core::error::RlpError;
use num_bigint::BigUint;

/// Header base for byte strings.
const STRING_OFFSET: u8 = 0x80;
/// Header base for lists.
const LIST_OFFSET: u8 = 0xc0;
/// Longest payload that fits a single-byte header.
const SHORT_MAX: usize = 55;
/// Deepest list nesting accepted by the decoder.
pub const MAX_DEPTH: usize = 32;

/// A codec item: a byte string or an ordered list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        RlpItem::Bytes(b.into())
    }

    /// Minimal big-endian encoding; zero becomes the empty string.
    pub fn uint(v: u64) -> Self {
        RlpItem::Bytes(minimal_be(v))
    }

    pub fn biguint(v: &BigUint) -> Self {
        let bytes = v.to_bytes_be();
        // BigUint renders zero as [0]
        if bytes == [0] {
            RlpItem::Bytes(Vec::new())
        } else {
            RlpItem::Bytes(bytes)
        }
    }

    /// Integer given as fixed-width big-endian bytes (e.g. a signature scalar).
    pub fn uint_be(be: &[u8]) -> Self {
        let first = be.iter().position(|&b| b != 0).unwrap_or(be.len());
        RlpItem::Bytes(be[first..].to_vec())
    }

    pub fn list(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    pub fn as_bytes(&self) -> Result<&[u8], RlpError> {
        match self {
            RlpItem::Bytes(b) => Ok(b),
            RlpItem::List(_) => Err(RlpError::ExpectedBytes),
        }
    }

    pub fn as_list(&self) -> Result<&[RlpItem], RlpError> {
        match self {
            RlpItem::List(items) => Ok(items),
            RlpItem::Bytes(_) => Err(RlpError::ExpectedList),
        }
    }

    pub fn as_u64(&self) -> Result<u64, RlpError> {
        let b = self.canonical_uint()?;
        if b.len() > 8 {
            return Err(RlpError::IntegerOverflow(64));
        }
        Ok(b.iter().fold(0u64, |acc, &x| (acc << 8) | x as u64))
    }

    pub fn as_u32(&self) -> Result<u32, RlpError> {
        u32::try_from(self.as_u64()?).map_err(|_| RlpError::IntegerOverflow(32))
    }

    pub fn as_u8(&self) -> Result<u8, RlpError> {
        u8::try_from(self.as_u64()?).map_err(|_| RlpError::IntegerOverflow(8))
    }

    pub fn as_biguint(&self) -> Result<BigUint, RlpError> {
        Ok(BigUint::from_bytes_be(self.canonical_uint()?))
    }

    /// Integer left-padded into an `N`-byte big-endian array.
    pub fn as_be_array<const N: usize>(&self) -> Result<[u8; N], RlpError> {
        let b = self.canonical_uint()?;
        if b.len() > N {
            return Err(RlpError::IntegerOverflow((N * 8) as u32));
        }
        let mut out = [0u8; N];
        out[N - b.len()..].copy_from_slice(b);
        Ok(out)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        encode_into(self, &mut out);
        out
    }

    fn canonical_uint(&self) -> Result<&[u8], RlpError> {
        let b = self.as_bytes()?;
        if b.first() == Some(&0) {
            return Err(RlpError::NonCanonicalInteger);
        }
        Ok(b)
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}

/// Minimal big-endian bytes of `v`, empty for zero.
pub fn minimal_be(v: u64) -> Vec<u8> {
    let bytes = v.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[first..].to_vec()
}

pub fn encode(item: &RlpItem) -> Vec<u8> {
    item.encode()
}

pub fn encode_list(items: &[RlpItem]) -> Vec<u8> {
    let mut body = Vec::new();
    for item in items {
        encode_into(item, &mut body);
    }
    let mut out = Vec::with_capacity(body.len() + 9);
    write_header(&mut out, body.len(), LIST_OFFSET);
    out.extend_from_slice(&body);
    out
}

fn encode_into(item: &RlpItem, out: &mut Vec<u8>) {
    match item {
        RlpItem::Bytes(b) if b.len() == 1 && b[0] < STRING_OFFSET => out.push(b[0]),
        RlpItem::Bytes(b) => {
            write_header(out, b.len(), STRING_OFFSET);
            out.extend_from_slice(b);
        }
        RlpItem::List(items) => out.extend_from_slice(&encode_list(items)),
    }
}

fn write_header(out: &mut Vec<u8>, len: usize, offset: u8) {
    if len <= SHORT_MAX {
        out.push(offset + len as u8);
    } else {
        let be = minimal_be(len as u64);
        out.push(offset + SHORT_MAX as u8 + be.len() as u8);
        out.extend_from_slice(&be);
    }
}

/// Decode one item starting at `offset`.
///
/// Returns the item and the number of input bytes it occupied, so a caller
/// can walk consecutive items.
pub fn decode(input: &[u8], offset: usize) -> Result<(RlpItem, usize), RlpError> {
    let mut cursor = input.get(offset..).ok_or(RlpError::TruncatedInput)?;
    let available = cursor.len();
    let item = read_item(&mut cursor, 0)?;
    Ok((item, available - cursor.len()))
}

/// Decode a buffer that must hold exactly one item.
pub fn decode_exact(input: &[u8]) -> Result<RlpItem, RlpError> {
    let (item, used) = decode(input, 0)?;
    if used != input.len() {
        return Err(RlpError::TrailingBytes(input.len() - used));
    }
    Ok(item)
}

fn take<'a>(input: &mut &'a [u8], n: usize) -> Result<&'a [u8], RlpError> {
    if input.len() < n {
        return Err(RlpError::TruncatedInput);
    }
    let (a, b) = input.split_at(n);
    *input = b;
    Ok(a)
}

fn read_u8(input: &mut &[u8]) -> Result<u8, RlpError> {
    Ok(take(input, 1)?[0])
}

fn read_item(input: &mut &[u8], depth: usize) -> Result<RlpItem, RlpError> {
    let prefix = read_u8(input)?;
    match prefix {
        0x00..=0x7f => Ok(RlpItem::Bytes(vec![prefix])),
        0x80..=0xbf => {
            let len = read_length(input, prefix - STRING_OFFSET)?;
            let body = take(input, len)?;
            if len == 1 && body[0] < STRING_OFFSET {
                return Err(RlpError::NonCanonicalLength);
            }
            Ok(RlpItem::Bytes(body.to_vec()))
        }
        0xc0..=0xff => {
            if depth >= MAX_DEPTH {
                return Err(RlpError::DepthLimitExceeded(MAX_DEPTH));
            }
            let len = read_length(input, prefix - LIST_OFFSET)?;
            let mut body = take(input, len)?;
            let mut items = Vec::new();
            while !body.is_empty() {
                items.push(read_item(&mut body, depth + 1)?);
            }
            Ok(RlpItem::List(items))
        }
    }
}

/// Payload length from the header byte (already reduced by its base) and,
/// for long forms, the length-of-length bytes that follow.
fn read_length(input: &mut &[u8], short: u8) -> Result<usize, RlpError> {
    let short = short as usize;
    if short <= SHORT_MAX {
        return Ok(short);
    }
    let raw = take(input, short - SHORT_MAX)?;
    if raw[0] == 0 {
        return Err(RlpError::NonCanonicalLength);
    }
    let len = raw.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
    if len <= SHORT_MAX as u64 {
        return Err(RlpError::NonCanonicalLength);
    }
    usize::try_from(len).map_err(|_| RlpError::TruncatedInput)
}
