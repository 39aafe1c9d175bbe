//! One-shot compression entry points and RFC 1950 (zlib) framing.

use crate::engine::Deflater;
use crate::error::Result;

/// Compress `data` into a raw DEFLATE stream (no container framing).
///
/// Drives a [`Deflater`] to completion at the given level (0-9).
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut engine = Deflater::new(level)?;
    engine.set_input(data, 0, data.len())?;

    let mut out = Vec::with_capacity(data.len() / 2 + 64);
    while engine.deflate(true, true) {
        engine.drain_output(&mut out);
    }
    engine.drain_output(&mut out);
    Ok(out)
}

/// Compress `data` into a zlib stream: CMF/FLG header, DEFLATE body,
/// big-endian Adler-32 trailer.
pub fn compress_zlib(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut engine = Deflater::new(level)?;
    engine.set_input(data, 0, data.len())?;

    let mut out = Vec::with_capacity(data.len() / 2 + 64);

    // CM = 8 (deflate), CINFO = 7 (32 KiB window).
    let cmf: u8 = 0x78;
    let level_flags: u8 = match level {
        0 | 1 => 0,
        2..=5 => 1,
        6 => 2,
        _ => 3,
    };
    let mut flg = level_flags << 6;
    // FCHECK makes the 16-bit header a multiple of 31.
    let rem = (u16::from_be_bytes([cmf, flg]) % 31) as u8;
    if rem != 0 {
        flg += 31 - rem;
    }
    out.push(cmf);
    out.push(flg);

    while engine.deflate(true, true) {
        engine.drain_output(&mut out);
    }
    engine.drain_output(&mut out);

    out.extend_from_slice(&engine.adler().to_be_bytes());
    Ok(out)
}
