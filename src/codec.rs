//! Binary serialization of the flat automaton.
//!
//! The stream is little-endian throughout: a 4-byte magic and a u16
//! version, four u64 array lengths (all equal to the state count today),
//! then the `dict_len`, `next` (row-major), `dict_link` and `pattern_id`
//! arrays as u32s. The redundant lengths let a decoder detect corruption
//! before allocating, and leave room to append fields later.

use std::io::{self, Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::trie::{Trie, MAX_STATES};
use crate::MultimatchError;

const MAGIC: [u8; 4] = *b"AC1\0";
const VERSION: u16 = 1;

/// Write `trie` to `sink` in the raw binary layout.
pub fn encode<W: Write>(trie: &Trie, mut sink: W) -> Result<(), MultimatchError> {
    sink.write_all(&MAGIC)?;
    sink.write_all(&VERSION.to_le_bytes())?;

    sink.write_all(&(trie.state_count() as u64).to_le_bytes())?;
    sink.write_all(&(trie.next.len() as u64).to_le_bytes())?;
    sink.write_all(&(trie.dict_link.len() as u64).to_le_bytes())?;
    sink.write_all(&(trie.pattern_id.len() as u64).to_le_bytes())?;

    write_u32s(&mut sink, &trie.dict_len)?;
    for row in &trie.next {
        write_u32s(&mut sink, row)?;
    }
    write_u32s(&mut sink, &trie.dict_link)?;
    write_u32s(&mut sink, &trie.pattern_id)?;
    Ok(())
}

/// Read a [`Trie`] in the raw binary layout from `source`.
pub fn decode<R: Read>(mut source: R) -> Result<Trie, MultimatchError> {
    let mut magic = [0u8; 4];
    fill(&mut source, &mut magic)?;
    if magic != MAGIC {
        return Err(MultimatchError::UnknownFormat);
    }
    let mut version = [0u8; 2];
    fill(&mut source, &mut version)?;
    if u16::from_le_bytes(version) != VERSION {
        return Err(MultimatchError::UnknownFormat);
    }

    let states = read_u64(&mut source)?;
    let next_rows = read_u64(&mut source)?;
    let dict_links = read_u64(&mut source)?;
    let pattern_ids = read_u64(&mut source)?;
    if next_rows != states || dict_links != states || pattern_ids != states {
        return Err(MultimatchError::LengthMismatch);
    }
    // NIL and ROOT always exist; ids at or above 2^31 are never written.
    if states < 2 || states > MAX_STATES as u64 {
        return Err(MultimatchError::LengthMismatch);
    }
    let states = states as usize;

    let dict_len = read_u32s(&mut source, states)?;
    let mut next = Vec::with_capacity(states);
    for _ in 0..states {
        next.push(read_row(&mut source)?);
    }
    let dict_link = read_u32s(&mut source, states)?;
    let pattern_id = read_u32s(&mut source, states)?;

    Ok(Trie {
        next,
        dict_len,
        dict_link,
        pattern_id,
    })
}

/// Write `trie` to `sink` wrapped in gzip framing.
pub fn encode_gzip<W: Write>(trie: &Trie, sink: W) -> Result<(), MultimatchError> {
    let mut encoder = GzEncoder::new(sink, Compression::default());
    encode(trie, &mut encoder)?;
    encoder.finish()?;
    Ok(())
}

/// Read a gzip-framed [`Trie`] from `source`.
pub fn decode_gzip<R: Read>(source: R) -> Result<Trie, MultimatchError> {
    decode(GzDecoder::new(source))
}

fn fill<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<(), MultimatchError> {
    source.read_exact(buf).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            MultimatchError::ShortRead
        } else {
            MultimatchError::IoFailure(err)
        }
    })
}

fn read_u64<R: Read>(source: &mut R) -> Result<u64, MultimatchError> {
    let mut buf = [0u8; 8];
    fill(source, &mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_u32s<R: Read>(source: &mut R, count: usize) -> Result<Vec<u32>, MultimatchError> {
    let mut buf = vec![0u8; count * 4];
    fill(source, &mut buf)?;
    Ok(buf
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes(chunk.try_into().unwrap()))
        .collect())
}

fn read_row<R: Read>(source: &mut R) -> Result<[u32; 256], MultimatchError> {
    let mut buf = [0u8; 1024];
    fill(source, &mut buf)?;
    let mut row = [0u32; 256];
    for (slot, chunk) in row.iter_mut().zip(buf.chunks_exact(4)) {
        *slot = u32::from_le_bytes(chunk.try_into().unwrap());
    }
    Ok(row)
}

fn write_u32s<W: Write>(sink: &mut W, values: &[u32]) -> Result<(), MultimatchError> {
    let mut buf = Vec::with_capacity(values.len() * 4);
    for value in values {
        buf.extend_from_slice(&value.to_le_bytes());
    }
    sink.write_all(&buf)?;
    Ok(())
}
