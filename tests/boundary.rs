//! Literal boundary scenarios (spec §8).

use utf8lut::config::{MaxBytes, Mode, OutputWidth, ProcessorConfig, Streams};
use utf8lut::stream::Converter;
use utf8lut::BlockProcessor;

fn validating_utf16_converter() -> Converter {
    Converter::new(ProcessorConfig::new().with_output(OutputWidth::Utf16).with_mode(Mode::Validate))
}

#[test]
fn ascii_only_hello() {
    let converter = validating_utf16_converter();
    let out = converter.decode_all(b"Hello").unwrap();
    assert_eq!(out, [0x48, 0x00, 0x65, 0x00, 0x6C, 0x00, 0x6C, 0x00, 0x6F, 0x00]);

    let back = converter.encode_all(&out).unwrap();
    assert_eq!(back, b"Hello");
}

#[test]
fn two_byte_codepoint_e_acute() {
    let converter = validating_utf16_converter();
    let out = converter.decode_all(&[0xC3, 0xA9]).unwrap();
    assert_eq!(out, [0xE9, 0x00]);
}

#[test]
fn three_byte_codepoint_han_character() {
    let converter = validating_utf16_converter();
    let out = converter.decode_all(&[0xE6, 0xBC, 0xA2]).unwrap();
    assert_eq!(out, [0x22, 0x6F]);
}

#[test]
fn four_byte_codepoint_becomes_surrogate_pair() {
    let converter = validating_utf16_converter();
    let out = converter.decode_all(&[0xF0, 0x9F, 0x9C, 0x83]).unwrap();
    assert_eq!(out, [0x3D, 0xD8, 0x03, 0xDF]);
}

#[test]
fn overlong_nul_is_rejected() {
    let processor = BlockProcessor::new(ProcessorConfig::new().with_output(OutputWidth::Utf16).with_mode(Mode::Validate));
    let mut out = [0u8; 64];
    let mut outs: [&mut [u8]; 1] = [&mut out];
    let err = processor.decode(&[0xC0, 0x80], &mut outs, true).unwrap_err();
    assert_eq!(err.offset, 0);
}

#[test]
fn overlong_is_rejected_in_a_full_vector_window() {
    // A whole 16-byte window of `C1 81` (overlong-encoded 'A'): the
    // vectorised decode step, not just the scalar tail, must reject this.
    let processor = BlockProcessor::new(
        ProcessorConfig::new().with_output(OutputWidth::Utf16).with_mode(Mode::Validate).with_streams(Streams::One),
    );
    let input = [0xC1u8, 0x81].repeat(8);
    let mut out = [0u8; 64];
    let mut outs: [&mut [u8]; 1] = [&mut out];
    let err = processor.decode(&input, &mut outs, true).unwrap_err();
    assert_eq!(err.offset, 0);
}

#[test]
fn surrogate_codepoint_is_rejected() {
    let processor = BlockProcessor::new(ProcessorConfig::new().with_output(OutputWidth::Utf16).with_mode(Mode::Validate));
    let mut out = [0u8; 64];
    let mut outs: [&mut [u8]; 1] = [&mut out];
    assert!(processor.decode(&[0xED, 0xA0, 0x80], &mut outs, true).is_err());
}

#[test]
fn max_bytes_two_encode_falls_back_for_three_byte_units_in_a_full_window() {
    // Eight UTF-16 units (one 16-byte vector window exactly), all needing 3
    // UTF-8 bytes (U+1000 >= 0x800): `MaxBytes::Two`'s vector step can't lay
    // these out and must fall back to the scalar encoder instead of
    // mis-encoding them as 2-byte sequences.
    let converter = Converter::new(
        ProcessorConfig::new().with_output(OutputWidth::Utf16).with_mode(Mode::Validate).with_max_bytes(MaxBytes::Two),
    );
    let text = "\u{1000}".repeat(8);
    let decoded = converter.decode_all(text.as_bytes()).unwrap();
    let reencoded = converter.encode_all(&decoded).unwrap();
    assert_eq!(reencoded, text.as_bytes());
}

#[test]
fn truncated_tail_is_incorrect_data_on_final_block() {
    let processor = BlockProcessor::new(ProcessorConfig::new().with_output(OutputWidth::Utf16).with_mode(Mode::Validate));
    let mut out = [0u8; 64];
    let mut outs: [&mut [u8]; 1] = [&mut out];
    let err = processor.decode(&[0xE6, 0xBC], &mut outs, true).unwrap_err();
    assert_eq!(err.offset, 0);
}

#[test]
fn truncated_tail_is_held_back_on_non_final_block() {
    let processor = BlockProcessor::new(ProcessorConfig::new().with_output(OutputWidth::Utf16).with_mode(Mode::Validate));
    let mut out = [0u8; 64];
    let mut outs: [&mut [u8]; 1] = [&mut out];
    let result = processor.decode(&[0xE6, 0xBC], &mut outs, false).unwrap();
    assert_eq!(result.input_done, 0);
    assert_eq!(result.output_done[0], 0);
}

#[test]
fn truncated_utf16_code_unit_is_incorrect_data_on_final_block() {
    let processor = BlockProcessor::new(ProcessorConfig::new().with_output(OutputWidth::Utf16).with_mode(Mode::Validate));
    let mut out = [0u8; 64];
    // A single dangling low byte of a UTF-16LE code unit: no way to
    // complete it once this is declared the final block.
    let err = processor.encode(&[0x41], &mut out, true).unwrap_err();
    assert_eq!(err.offset, 0);
}

#[test]
fn max_bytes_one_fast_mode_matches_full_mode_on_ascii_only_input() {
    let ascii = b"plain ascii text, nothing fancy here".repeat(4);
    let fast = BlockProcessor::new(
        ProcessorConfig::new().with_max_bytes(MaxBytes::One).with_mode(Mode::Fast).with_streams(Streams::One),
    );
    let full = BlockProcessor::new(ProcessorConfig::new().with_max_bytes(MaxBytes::One).with_mode(Mode::Full));

    let mut out_fast = vec![0u8; ascii.len() * 2 + 16];
    let mut out_full = vec![0u8; ascii.len() * 2 + 16];
    let mut outs_fast: [&mut [u8]; 1] = [&mut out_fast];
    let mut outs_full: [&mut [u8]; 1] = [&mut out_full];
    let r_fast = fast.decode(&ascii, &mut outs_fast, true).unwrap();
    let r_full = full.decode(&ascii, &mut outs_full, true).unwrap();
    assert_eq!(r_fast.input_done, r_full.input_done);
    assert_eq!(out_fast[..r_fast.output_done[0]], out_full[..r_full.output_done[0]]);
}

#[test]
fn four_stream_decode_matches_one_stream_decode() {
    let text = "Mixed ascii and 日本語 and émoji 🎉 text ".repeat(200);
    let one = BlockProcessor::new(ProcessorConfig::new().with_streams(Streams::One));
    let four = BlockProcessor::new(ProcessorConfig::new().with_streams(Streams::Four));

    let mut out_one = vec![0u8; one.output_buffer_min_size(text.len())];
    let mut outs_one: [&mut [u8]; 1] = [&mut out_one];
    let r_one = one.decode(text.as_bytes(), &mut outs_one, true).unwrap();

    let per_stream_cap = four.output_buffer_min_size(text.len());
    let mut bufs: Vec<Vec<u8>> = (0..4).map(|_| vec![0u8; per_stream_cap]).collect();
    let mut refs: Vec<&mut [u8]> = bufs.iter_mut().map(|b| b.as_mut_slice()).collect();
    let r_four = four.decode(text.as_bytes(), &mut refs, true).unwrap();

    let mut concatenated = Vec::new();
    for (i, &n) in r_four.output_done.iter().enumerate() {
        concatenated.extend_from_slice(&bufs[i][..n]);
    }
    assert_eq!(concatenated, out_one[..r_one.output_done[0]]);
}

#[test]
fn roundtrip_holds_exactly_for_valid_utf8() {
    let converter = validating_utf16_converter();
    for sample in ["", "a", "héllo wörld", "漢字とemoji🎉混在テキスト", "\u{10FFFF}"] {
        let decoded = converter.decode_all(sample.as_bytes()).unwrap();
        let reencoded = converter.encode_all(&decoded).unwrap();
        assert_eq!(reencoded, sample.as_bytes(), "mismatch for {sample:?}");
    }
}
