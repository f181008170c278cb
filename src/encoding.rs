//! Named text encodings
//!
//! Labels are resolved with the WHATWG label table, so `"UTF-8"`, `"utf8"`,
//! `"latin1"` and `"windows-1252"` are all accepted. Decoding never sniffs a
//! byte order mark and replaces malformed sequences with U+FFFD. Encoding
//! replaces characters the target cannot represent with `?`.

use crate::error::{CsvError, Result};
use encoding_rs::{CoderResult, Decoder, Encoder, EncoderResult, Encoding, UTF_16BE, UTF_16LE};

/// Resolve an encoding label
///
/// # Examples
///
/// ```
/// use minicsv::encoding::resolve;
///
/// assert_eq!(resolve("latin1").unwrap().name(), "windows-1252");
/// assert!(resolve("klingon").is_err());
/// ```
pub fn resolve(label: &str) -> Result<&'static Encoding> {
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| CsvError::UnsupportedEncoding(label.to_string()))?;
    tracing::trace!(label, encoding = encoding.name(), "resolved encoding");
    Ok(encoding)
}

/// Incremental bytes-to-text decoder
pub struct TextDecoder {
    decoder: Decoder,
}

impl TextDecoder {
    /// Create a decoder for `encoding`
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            decoder: encoding.new_decoder_without_bom_handling(),
        }
    }

    /// Decode `src` and append the text to `out`
    ///
    /// Set `last` on the final chunk so incomplete trailing sequences are
    /// flushed as replacement characters.
    pub fn decode(&mut self, mut src: &[u8], last: bool, out: &mut String) {
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(src.len())
                .unwrap_or(src.len() * 3);
            out.reserve(needed.max(16));

            let (result, read, _) = self.decoder.decode_to_string(src, out, last);
            src = &src[read..];
            match result {
                CoderResult::InputEmpty => return,
                CoderResult::OutputFull => continue,
            }
        }
    }
}

/// Incremental text-to-bytes encoder
pub struct TextEncoder {
    target: Target,
}

enum Target {
    // encoding_rs only encodes UTF-16 labels as UTF-8
    Utf16 { big_endian: bool },
    Other(Encoder),
}

impl TextEncoder {
    /// Create an encoder for `encoding`
    pub fn new(encoding: &'static Encoding) -> Self {
        let target = if encoding == UTF_16LE {
            Target::Utf16 { big_endian: false }
        } else if encoding == UTF_16BE {
            Target::Utf16 { big_endian: true }
        } else {
            Target::Other(encoding.new_encoder())
        };
        Self { target }
    }

    /// Encode `text` and append the bytes to `out`
    pub fn encode(&mut self, text: &str, last: bool, out: &mut Vec<u8>) {
        match &mut self.target {
            Target::Utf16 { big_endian } => {
                out.reserve(text.len() * 2);
                for unit in text.encode_utf16() {
                    let bytes = if *big_endian {
                        unit.to_be_bytes()
                    } else {
                        unit.to_le_bytes()
                    };
                    out.extend_from_slice(&bytes);
                }
            }
            Target::Other(encoder) => encode_with(encoder, text, last, out),
        }
    }
}

fn encode_with(encoder: &mut Encoder, mut text: &str, last: bool, out: &mut Vec<u8>) {
    loop {
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(text.len())
            .unwrap_or(text.len() * 4);
        out.reserve(needed.max(16));

        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(text, out, last);
        text = &text[read..];
        match result {
            EncoderResult::InputEmpty => return,
            EncoderResult::OutputFull => continue,
            EncoderResult::Unmappable(_) => out.push(b'?'),
        }
    }
}

/// Decode a complete byte buffer
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let mut out = String::new();
    TextDecoder::new(encoding).decode(bytes, true, &mut out);
    out
}

/// Encode a complete string
pub fn encode(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let mut out = Vec::new();
    TextEncoder::new(encoding).encode(text, true, &mut out);
    out
}
