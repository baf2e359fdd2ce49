//! Minimal Solidity ABI word codec
//!
//! Only the shapes the bridge messages need are supported: unsigned integers,
//! booleans, dynamic byte strings, and one-dimensional arrays of either.
//!
//! # Layout
//! `encode` produces the same bytes as Solidity's `abi.encode` for a tuple:
//! - a head of one 32-byte word per element (the value for static types, a
//!   byte offset from the start of the tuple for dynamic ones)
//! - followed by the tails of the dynamic elements, in order
//!
//! A `bytes` tail is its length word followed by the data right-padded to a
//! multiple of 32 bytes. A `uint[]` tail is its length word followed by one
//! word per element. A `bytes[]` tail is its length word, one offset word per
//! element (relative to the first offset word), then each element's `bytes`
//! tail.

use cosmwasm_std::Uint256;
use thiserror::Error;

/// Size of one ABI word in bytes
pub const WORD: usize = 32;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AbiError {
    #[error("Read out of bounds at offset {offset} (data length {len})")]
    OutOfBounds { offset: usize, len: usize },

    #[error("Offset or length word does not fit in usize")]
    InvalidLength,

    #[error("Integer does not fit in {bits} bits")]
    IntegerOverflow { bits: usize },

    #[error("Boolean word is neither 0 nor 1")]
    InvalidBool,

    #[error("Missing token at position {position}")]
    MissingToken { position: usize },

    #[error("Unexpected token at position {position}: expected {expected}")]
    UnexpectedToken {
        position: usize,
        expected: &'static str,
    },
}

/// A decoded (or to-be-encoded) ABI value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Uint(Uint256),
    Bool(bool),
    Bytes(Vec<u8>),
    UintArray(Vec<Uint256>),
    BytesArray(Vec<Vec<u8>>),
}

/// Expected shape of a value when decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// `uintN`, N in bits (multiple of 8, at most 256)
    Uint(usize),
    Bool,
    Bytes,
    /// `uintN[]`
    UintArray(usize),
    BytesArray,
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode a tuple of tokens (`abi.encode(t0, t1, ...)`).
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            Token::Uint(value) => head.extend_from_slice(&value.to_be_bytes()),
            Token::Bool(value) => head.extend_from_slice(&usize_word(usize::from(*value))),
            dynamic => {
                head.extend_from_slice(&usize_word(head_len + tail.len()));
                encode_tail(&mut tail, dynamic);
            }
        }
    }

    head.extend(tail);
    head
}

fn encode_tail(out: &mut Vec<u8>, token: &Token) {
    match token {
        Token::Bytes(bytes) => encode_bytes(out, bytes),
        Token::UintArray(values) => {
            out.extend_from_slice(&usize_word(values.len()));
            for value in values {
                out.extend_from_slice(&value.to_be_bytes());
            }
        }
        Token::BytesArray(items) => {
            out.extend_from_slice(&usize_word(items.len()));
            let tails: Vec<Vec<u8>> = items
                .iter()
                .map(|item| {
                    let mut tail = Vec::new();
                    encode_bytes(&mut tail, item);
                    tail
                })
                .collect();

            let mut offset = items.len() * WORD;
            for tail in &tails {
                out.extend_from_slice(&usize_word(offset));
                offset += tail.len();
            }
            for tail in tails {
                out.extend(tail);
            }
        }
        Token::Uint(_) | Token::Bool(_) => {}
    }
}

fn encode_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&usize_word(bytes.len()));
    out.extend_from_slice(bytes);
    let padding = padded_len(bytes.len()) - bytes.len();
    out.resize(out.len() + padding, 0);
}

fn usize_word(value: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[24..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

fn padded_len(len: usize) -> usize {
    (len + WORD - 1) / WORD * WORD
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a tuple of the given shape.
///
/// Fails closed on any offset or length that points outside `data`, integers
/// wider than their declared width, and non-canonical booleans. Bytes after
/// the encoded tuple are ignored.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    types
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let head = i * WORD;
            match *param {
                ParamType::Uint(bits) => read_uint(data, head, bits).map(Token::Uint),
                ParamType::Bool => read_bool(data, head).map(Token::Bool),
                ParamType::Bytes => {
                    let offset = read_usize(data, head)?;
                    read_bytes(data, offset).map(Token::Bytes)
                }
                ParamType::UintArray(bits) => {
                    let offset = read_usize(data, head)?;
                    read_uint_array(data, offset, bits).map(Token::UintArray)
                }
                ParamType::BytesArray => {
                    let offset = read_usize(data, head)?;
                    read_bytes_array(data, offset).map(Token::BytesArray)
                }
            }
        })
        .collect()
}

fn read_word(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    let end = offset.checked_add(WORD).ok_or(AbiError::InvalidLength)?;
    data.get(offset..end).ok_or(AbiError::OutOfBounds {
        offset,
        len: data.len(),
    })
}

fn read_usize(data: &[u8], offset: usize) -> Result<usize, AbiError> {
    let word = read_word(data, offset)?;
    if word[..24].iter().any(|b| *b != 0) {
        return Err(AbiError::InvalidLength);
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[24..]);
    usize::try_from(u64::from_be_bytes(buf)).map_err(|_| AbiError::InvalidLength)
}

fn read_uint(data: &[u8], offset: usize, bits: usize) -> Result<Uint256, AbiError> {
    let word = read_word(data, offset)?;
    let leading = WORD.saturating_sub(bits / 8);
    if word[..leading].iter().any(|b| *b != 0) {
        return Err(AbiError::IntegerOverflow { bits });
    }
    let mut buf = [0u8; WORD];
    buf.copy_from_slice(word);
    Ok(Uint256::from_be_bytes(buf))
}

fn read_bool(data: &[u8], offset: usize) -> Result<bool, AbiError> {
    let word = read_word(data, offset)?;
    if word[..31].iter().any(|b| *b != 0) {
        return Err(AbiError::InvalidBool);
    }
    match word[31] {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(AbiError::InvalidBool),
    }
}

fn read_bytes(data: &[u8], offset: usize) -> Result<Vec<u8>, AbiError> {
    let len = read_usize(data, offset)?;
    let start = offset + WORD;
    let end = start.checked_add(len).ok_or(AbiError::InvalidLength)?;
    data.get(start..end)
        .map(<[u8]>::to_vec)
        .ok_or(AbiError::OutOfBounds {
            offset: start,
            len: data.len(),
        })
}

/// Element count of an array tail, bounded by what `data` could possibly hold.
fn read_count(data: &[u8], offset: usize) -> Result<usize, AbiError> {
    let count = read_usize(data, offset)?;
    if count > data.len() / WORD {
        return Err(AbiError::OutOfBounds {
            offset,
            len: data.len(),
        });
    }
    Ok(count)
}

fn read_uint_array(data: &[u8], offset: usize, bits: usize) -> Result<Vec<Uint256>, AbiError> {
    let count = read_count(data, offset)?;
    let base = offset + WORD;
    (0..count)
        .map(|i| read_uint(data, base + i * WORD, bits))
        .collect()
}

fn read_bytes_array(data: &[u8], offset: usize) -> Result<Vec<Vec<u8>>, AbiError> {
    let count = read_count(data, offset)?;
    let base = offset + WORD;
    (0..count)
        .map(|i| {
            let relative = read_usize(data, base + i * WORD)?;
            let item = base.checked_add(relative).ok_or(AbiError::InvalidLength)?;
            read_bytes(data, item)
        })
        .collect()
}

// ============================================================================
// Typed token access
// ============================================================================

/// Sequential, typed access to decoded tokens.
pub struct TokenReader {
    tokens: std::vec::IntoIter<Token>,
    position: usize,
}

impl TokenReader {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            position: 0,
        }
    }

    fn next(&mut self) -> Result<(usize, Token), AbiError> {
        let position = self.position;
        self.position += 1;
        self.tokens
            .next()
            .map(|token| (position, token))
            .ok_or(AbiError::MissingToken { position })
    }

    pub fn uint(&mut self) -> Result<Uint256, AbiError> {
        match self.next()? {
            (_, Token::Uint(value)) => Ok(value),
            (position, _) => Err(AbiError::UnexpectedToken {
                position,
                expected: "uint",
            }),
        }
    }

    pub fn u64(&mut self) -> Result<u64, AbiError> {
        uint_to_u64(self.uint()?)
    }

    pub fn u8(&mut self) -> Result<u8, AbiError> {
        let value = self.u64()?;
        u8::try_from(value).map_err(|_| AbiError::IntegerOverflow { bits: 8 })
    }

    pub fn bool(&mut self) -> Result<bool, AbiError> {
        match self.next()? {
            (_, Token::Bool(value)) => Ok(value),
            (position, _) => Err(AbiError::UnexpectedToken {
                position,
                expected: "bool",
            }),
        }
    }

    pub fn bytes(&mut self) -> Result<Vec<u8>, AbiError> {
        match self.next()? {
            (_, Token::Bytes(value)) => Ok(value),
            (position, _) => Err(AbiError::UnexpectedToken {
                position,
                expected: "bytes",
            }),
        }
    }

    pub fn u64_array(&mut self) -> Result<Vec<u64>, AbiError> {
        match self.next()? {
            (_, Token::UintArray(values)) => values.into_iter().map(uint_to_u64).collect(),
            (position, _) => Err(AbiError::UnexpectedToken {
                position,
                expected: "uint[]",
            }),
        }
    }

    pub fn bytes_array(&mut self) -> Result<Vec<Vec<u8>>, AbiError> {
        match self.next()? {
            (_, Token::BytesArray(values)) => Ok(values),
            (position, _) => Err(AbiError::UnexpectedToken {
                position,
                expected: "bytes[]",
            }),
        }
    }
}

/// Narrow a word to `u64`, failing if any higher-order byte is set.
pub fn uint_to_u64(value: Uint256) -> Result<u64, AbiError> {
    let bytes = value.to_be_bytes();
    if bytes[..24].iter().any(|b| *b != 0) {
        return Err(AbiError::IntegerOverflow { bits: 64 });
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[24..]);
    Ok(u64::from_be_bytes(buf))
}
