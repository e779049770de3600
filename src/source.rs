//! Adapters turning a byte or string source into the `Iterator<Item =
//! char>` the scanner consumes.

use std::io::Read;

use encoding_rs::{Decoder, Encoding, UTF_16BE, UTF_16LE, UTF_8};

/// Wrap a `&str` as a character source. Zero-copy: no decoding happens,
/// this is just `str::chars`.
pub fn from_str(input: &str) -> impl Iterator<Item = char> + '_ {
    input.chars()
}

/// A character source that decodes a `std::io::Read` byte stream.
///
/// The encoding is sniffed from a leading byte-order mark (UTF-8,
/// UTF-16LE or UTF-16BE); absent a BOM, the stream is decoded as UTF-8.
/// Malformed sequences are replaced with U+FFFD rather than rejected —
/// full encoding *detection* (as opposed to this BOM-based default) is
/// explicitly out of scope for the scanner (spec.md §1).
pub struct Utf8StreamSource<R> {
    reader: R,
    decoder: Decoder,
    raw: Vec<u8>,
    raw_pos: usize,
    pending: std::vec::IntoIter<char>,
    source_exhausted: bool,
}

const READ_CHUNK: usize = 4096;

impl<R: Read> Utf8StreamSource<R> {
    /// Build a source over `reader`, sniffing a BOM from the first few
    /// bytes read.
    pub fn new(mut reader: R) -> std::io::Result<Self> {
        let mut probe = [0u8; 3];
        let n = read_fully(&mut reader, &mut probe)?;
        let (encoding, bom_len): (&'static Encoding, usize) = match &probe[..n] {
            [0xEF, 0xBB, 0xBF, ..] => (UTF_8, 3),
            [0xFF, 0xFE, ..] => (UTF_16LE, 2),
            [0xFE, 0xFF, ..] => (UTF_16BE, 2),
            _ => (UTF_8, 0),
        };
        let mut raw = probe[..n].to_vec();
        raw.drain(..bom_len);
        Ok(Utf8StreamSource {
            reader,
            decoder: encoding.new_decoder_without_bom_handling(),
            raw,
            raw_pos: 0,
            pending: Vec::new().into_iter(),
            source_exhausted: false,
        })
    }

    fn refill(&mut self) -> std::io::Result<()> {
        if self.raw_pos >= self.raw.len() && !self.source_exhausted {
            let mut chunk = vec![0u8; READ_CHUNK];
            let n = read_some(&mut self.reader, &mut chunk)?;
            chunk.truncate(n);
            if n == 0 {
                self.source_exhausted = true;
            }
            self.raw = chunk;
            self.raw_pos = 0;
        }
        Ok(())
    }

    fn decode_next_chunk(&mut self) -> Option<String> {
        if self.raw_pos >= self.raw.len() && self.source_exhausted {
            return None;
        }
        let mut out = String::with_capacity(READ_CHUNK);
        let (_, consumed, _) =
            self.decoder
                .decode_to_string(&self.raw[self.raw_pos..], &mut out, self.source_exhausted);
        self.raw_pos += consumed;
        Some(out)
    }
}

impl<R: Read> Iterator for Utf8StreamSource<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(c) = self.pending.next() {
                return Some(c);
            }
            if self.refill().is_err() {
                return None;
            }
            match self.decode_next_chunk() {
                Some(s) if s.is_empty() && self.source_exhausted => return None,
                Some(s) => self.pending = s.chars().collect::<Vec<_>>().into_iter(),
                None => return None,
            }
        }
    }
}

fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

fn read_some<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}
