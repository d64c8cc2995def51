//! Encoder LUT: 256-entry tables keyed by per-symbol length-class bits.
//!
//! Ported from `original_source/Core/EncoderLut.cpp` (`HandleChar`,
//! `TwoBytesPartPosGetter`, `ThreeBytesPartPosGetter`,
//! `EncoderLutTable<false>`/`EncoderLutTable<true>::ComputeEntry`).
//!
//! Both the `MaxBytes=2` and `MaxBytes=3` tables turn out to have 256
//! entries: the `MaxBytes=3` table is looked up *twice* per 16-byte (8-unit)
//! window — once per 4-unit half, each keyed by an independent 8-bit
//! `(len>=2 bits | len>=3 bits << 4)` code (`original_source/encode.cpp`'s
//! `offset0`/`offset1`) — rather than once with a combined 16-bit key. A
//! UTF-32 input window (4 units per 16 bytes) needs exactly one such 8-bit
//! lookup (one length-class bit pair per unit, 4 units), so it reuses
//! [`encoder_lut_3`] directly instead of a dedicated larger table.

use std::sync::OnceLock;

/// One encoder LUT entry: how to lay out the UTF-8 bytes for a window's
/// worth of fixed-width code units, given their length classes.
#[derive(Debug, Clone, Copy)]
pub struct EncoderLutEntry {
    /// Shuffle turning the interleaved input byte levels into the
    /// variable-length UTF-8 layout (`-1` for unused trailing slots).
    pub shuf: [i8; 16],
    /// Per-output-byte mask; `mask + mask` (wrapping) recovers the OR
    /// constant needed to stamp in the lead/continuation framing bits
    /// after `andnot` has cleared them from the shuffled payload.
    pub header_mask: [i8; 16],
    /// Bytes written for this window.
    pub dst_step: u32,
}

impl EncoderLutEntry {
    const fn empty() -> Self {
        Self {
            shuf: [-1; 16],
            header_mask: [0; 16],
            dst_step: 0,
        }
    }
}

/// Index 0 is unused (no zero-length symbol exists); kept so the table can
/// be indexed directly by symbol byte length (1, 2, or 3). Values are the
/// lead-byte framing masks `0xFF, 0x80, 0xE0, 0xF0` as `i8`.
const FIRST_BYTE_HEADER: [i8; 4] = [0xFFu8 as i8, 0x80u8 as i8, 0xE0u8 as i8, 0xF0u8 as i8];
/// Continuation-byte framing mask (`0xC0`) as `i8`.
const CONTINUATION_HEADER: i8 = 0xC0u8 as i8;

fn handle_char(idx: usize, len: usize, pos: &mut usize, shuf: &mut [i8; 16], header: &mut [i8; 16], part_pos: impl Fn(usize, usize) -> usize) {
    for j in 0..len {
        shuf[*pos + j] = part_pos(idx, len - 1 - j) as i8;
        header[*pos + j] = CONTINUATION_HEADER;
    }
    header[*pos] = FIRST_BYTE_HEADER[len];
    *pos += len;
}

fn two_bytes_part_pos(idx: usize, part: usize) -> usize {
    2 * idx + (1 - part)
}

fn compute_entry_2(data: &mut [EncoderLutEntry], lens_mask: u32) {
    let mut shuf = [-1i8; 16];
    let mut header = [0i8; 16];
    let mut pos = 0usize;
    for i in 0..8usize {
        let len = 1 + ((lens_mask >> i) & 1) as usize;
        handle_char(i, len, &mut pos, &mut shuf, &mut header, two_bytes_part_pos);
    }
    data[lens_mask as usize] = EncoderLutEntry {
        shuf,
        header_mask: header,
        dst_step: pos as u32,
    };
}

fn three_bytes_part_pos(idx: usize, part: usize) -> usize {
    if part < 2 {
        2 * idx + part
    } else {
        8 + 2 * idx
    }
}

fn compute_entry_3(data: &mut [EncoderLutEntry], lens_mask: u32) {
    let mut shuf = [-1i8; 16];
    let mut header = [0i8; 16];
    let mut pos = 0usize;
    let mut index: u32 = 0;
    for i in 0..4usize {
        let len = 1 + ((lens_mask >> (2 * i)) & 3) as usize;
        if len > 3 {
            return; // impossible combination, never produced by the vector step
        }
        handle_char(i, len, &mut pos, &mut shuf, &mut header, three_bytes_part_pos);
        if len >= 2 {
            index ^= 1 << i;
        }
        if len >= 3 {
            index ^= 1 << (4 + i);
        }
    }
    data[index as usize] = EncoderLutEntry {
        shuf,
        header_mask: header,
        dst_step: pos as u32,
    };
}

fn compute_all_2() -> Vec<EncoderLutEntry> {
    let mut data = vec![EncoderLutEntry::empty(); 256];
    for lens_mask in 0..256u32 {
        compute_entry_2(&mut data, lens_mask);
    }
    data
}

fn compute_all_3() -> Vec<EncoderLutEntry> {
    let mut data = vec![EncoderLutEntry::empty(); 256];
    for lens_mask in 0..256u32 {
        compute_entry_3(&mut data, lens_mask);
    }
    data
}

static ENCODER_LUT_2: OnceLock<Vec<EncoderLutEntry>> = OnceLock::new();
static ENCODER_LUT_3: OnceLock<Vec<EncoderLutEntry>> = OnceLock::new();

/// The `MaxBytes=2` encoder LUT (256 entries, one bit per symbol: does it
/// need a continuation byte or not).
pub fn encoder_lut_2() -> &'static [EncoderLutEntry] {
    ENCODER_LUT_2.get_or_init(compute_all_2)
}

/// The `MaxBytes=3` encoder LUT (256 entries, two bits per symbol over a
/// 4-unit half-window: `len>=2` and `len>=3`).
pub fn encoder_lut_3() -> &'static [EncoderLutEntry] {
    ENCODER_LUT_3.get_or_init(compute_all_3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_ascii_lens_mask_zero_selects_low_fragment_slots() {
        let lut = encoder_lut_2();
        let entry = &lut[0];
        assert_eq!(entry.dst_step, 8);
        // `two_bytes_part_pos(idx, 0) == 2*idx + 1`: the 1-byte (ascii) case
        // always reads the "low fragment" slot, which sits at the odd
        // position for each unit.
        for i in 0..8 {
            assert_eq!(entry.shuf[i], (2 * i + 1) as i8);
            assert_eq!(entry.header_mask[i], FIRST_BYTE_HEADER[1]);
        }
    }

    #[test]
    fn all_two_byte_lens_mask_all_ones() {
        let lut = encoder_lut_2();
        let entry = &lut[0xFF];
        assert_eq!(entry.dst_step, 16);
    }

    #[test]
    fn three_bytes_table_all_ascii() {
        let lut = encoder_lut_3();
        // lens_mask 0 -> all four symbols length 1 -> index 0
        let entry = &lut[0];
        assert_eq!(entry.dst_step, 4);
    }

    #[test]
    fn three_bytes_table_all_three_byte() {
        // each 2-bit group = 2 (len = 1+2 = 3)
        let lens_mask = 0b10_10_10_10u32;
        let mut data = vec![EncoderLutEntry::empty(); 256];
        compute_entry_3(&mut data, lens_mask);
        // index: len>=2 and len>=3 for all four -> low nibble 0b1111, high nibble 0b1111
        let index = 0xFFusize;
        assert_eq!(data[index].dst_step, 12);
    }
}
