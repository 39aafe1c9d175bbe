//! Round-trip conformance tests.
//!
//! Every stream the engine produces is decoded with an independent
//! inflater (`flate2`) and compared byte-for-byte with the input.

use std::io::Read;

use flate2::read::{DeflateDecoder, ZlibDecoder};
use flato::{compress, compress_zlib, Deflater, Strategy};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn inflate(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    DeflateDecoder::new(data)
        .read_to_end(&mut out)
        .expect("conforming DEFLATE stream");
    out
}

fn inflate_zlib(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .expect("conforming zlib stream");
    out
}

fn compress_with_strategy(data: &[u8], level: u32, strategy: Strategy) -> Vec<u8> {
    let mut engine = Deflater::new(level).unwrap();
    engine.set_strategy(strategy);
    engine.set_input(data, 0, data.len()).unwrap();
    let mut out = Vec::new();
    while engine.deflate(true, true) {
        engine.drain_output(&mut out);
    }
    engine.drain_output(&mut out);
    out
}

#[test]
fn test_hello_roundtrip_and_shrinks() {
    let data = b"Hello, Hello, Hello.";
    let out = compress(data, 6).unwrap();
    assert_eq!(inflate(&out), data);
    assert!(out.len() < data.len(), "{} bytes out", out.len());
}

#[test]
fn test_one_mebibyte_of_zeros_level9() {
    let data = vec![0u8; 1 << 20];
    let out = compress(&data, 9).unwrap();
    assert!(out.len() < 1024, "{} bytes out", out.len());
    assert_eq!(inflate(&out), data);
}

#[test]
fn test_byte_ramp_huffman_only_level1() {
    let mut data = Vec::with_capacity(256 * 1000);
    for _ in 0..1000 {
        data.extend(0u8..=255);
    }
    let out = compress_with_strategy(&data, 1, Strategy::HuffmanOnly);
    assert_eq!(inflate(&out), data);
    // Uniform bytes and no back-references: the stream cannot shrink.
    assert!(out.len() >= data.len());
}

#[test]
fn test_random_32k_level0_single_stored_block() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut data = vec![0u8; 32768];
    rng.fill(&mut data[..]);

    let out = compress(&data, 0).unwrap();
    // One stored block, marked final, plus the 5-byte frame.
    assert_eq!(out.len(), data.len() + 5);
    assert_eq!(out[0], 0x01);
    assert_eq!(u16::from_le_bytes([out[1], out[2]]) as usize, data.len());
    assert_eq!(inflate(&out), data);
}

#[test]
fn test_large_input_level0_multiple_stored_blocks() {
    // Long enough to split into several stored blocks and slide the window
    // more than once; every byte must come back out.
    let mut rng = StdRng::seed_from_u64(0xB10C5);
    let mut data = vec![0u8; 250_000];
    rng.fill(&mut data[..]);

    let out = compress(&data, 0).unwrap();
    assert_eq!(inflate(&out), data);
    // Framing only: 5 bytes per stored block plus the closing marker.
    assert!(out.len() < data.len() + 64);
}

#[test]
fn test_short_period_text_level9() {
    let data = b"ABABABABABABABABAB";
    let out = compress(data, 9).unwrap();
    assert_eq!(inflate(&out), data);
    // Two literals, one long distance-2 match, end-of-block: a handful of
    // bytes in a fixed-Huffman block.
    assert!(out.len() <= 8, "{} bytes out", out.len());
}

#[test]
fn test_streamed_seven_byte_chunks() {
    let mut rng = StdRng::seed_from_u64(42);
    let data: Vec<u8> = (0..10_000).map(|_| rng.gen_range(b'a'..=b'f')).collect();

    let mut engine = Deflater::new(6).unwrap();
    let mut out = Vec::new();
    for chunk in data.chunks(7) {
        engine.set_input(chunk, 0, chunk.len()).unwrap();
        while !engine.needs_input() {
            engine.deflate(false, false);
            engine.drain_output(&mut out);
        }
    }
    while engine.deflate(true, true) {
        engine.drain_output(&mut out);
    }
    engine.drain_output(&mut out);

    assert_eq!(inflate(&out), data);
}

#[test]
fn test_all_levels_and_strategies_roundtrip() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut corpus: Vec<Vec<u8>> = Vec::new();
    corpus.push(Vec::new());
    corpus.push(vec![b'x']);
    corpus.push(b"The quick brown fox jumps over the lazy dog. ".repeat(40));
    corpus.push((0..5000).map(|_| rng.gen_range(0u8..6)).collect());
    corpus.push((0..5000).map(|_| rng.gen()).collect());

    for data in &corpus {
        for level in 0..=9 {
            for strategy in [Strategy::Default, Strategy::Filtered, Strategy::HuffmanOnly] {
                let out = compress_with_strategy(data, level, strategy);
                assert_eq!(
                    inflate(&out),
                    *data,
                    "level {level}, strategy {strategy:?}, {} bytes in",
                    data.len()
                );
            }
        }
    }
}

#[test]
fn test_window_slides_preserve_matches() {
    // Low-entropy input long enough to slide the window several times.
    let mut rng = StdRng::seed_from_u64(99);
    let data: Vec<u8> = (0..400_000).map(|_| rng.gen_range(0u8..4)).collect();

    for level in [1, 6, 9] {
        let out = compress(&data, level).unwrap();
        assert_eq!(inflate(&out), data, "level {level}");
        assert!(out.len() < data.len() / 2);
    }
}

#[test]
fn test_incompressible_input_survives_stored_fallback() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut data = vec![0u8; 200_000];
    rng.fill(&mut data[..]);

    for level in [1, 9] {
        let out = compress(&data, level).unwrap();
        assert_eq!(inflate(&out), data, "level {level}");
        // Stored fallback keeps the expansion to framing overhead.
        assert!(out.len() < data.len() + data.len() / 100);
    }
}

#[test]
fn test_determinism() {
    let mut rng = StdRng::seed_from_u64(5);
    let data: Vec<u8> = (0..50_000).map(|_| rng.gen_range(0u8..16)).collect();

    for level in [0, 3, 6, 9] {
        let a = compress(&data, level).unwrap();
        let b = compress(&data, level).unwrap();
        assert_eq!(a, b, "level {level}");
    }
}

#[test]
fn test_zlib_stream_decodes_with_checksum() {
    let data = b"zlib framing carries the Adler-32 of the payload".repeat(100);
    for level in [0, 1, 6, 9] {
        let out = compress_zlib(&data, level).unwrap();
        // ZlibDecoder verifies the trailer checksum itself.
        assert_eq!(inflate_zlib(&out), data, "level {level}");
    }
}

#[test]
fn test_adler_matches_admitted_bytes() {
    let mut rng = StdRng::seed_from_u64(31);
    let data: Vec<u8> = (0..100_000).map(|_| rng.gen()).collect();

    let mut engine = Deflater::new(6).unwrap();
    engine.set_input(&data, 0, data.len()).unwrap();
    let mut out = Vec::new();
    while engine.deflate(true, true) {
        engine.drain_output(&mut out);
    }
    engine.drain_output(&mut out);

    let mut reference = flato::adler32::Adler32::new();
    reference.update(&data);
    assert_eq!(engine.adler(), reference.value());
    assert_eq!(engine.total_in(), data.len() as u64);
}
