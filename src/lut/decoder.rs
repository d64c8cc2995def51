//! Decoder LUT: 32768 entries keyed on a 15-bit continuation-byte mask.
//!
//! Ported from `original_source/Core/DecoderLut.cpp`
//! (`ComputeAll`/`ComputeRec`/`ComputeEntry`). The C++ source keeps two
//! parallel tables (`DecoderLutTable<false>` for `Fast`/`Full` mode,
//! `DecoderLutTable<true>` adding `headerMask`/`maxValues` for `Validate`
//! mode) because each is a distinct template instantiation. Since
//! `Mode` is a runtime choice here rather than a compile-time parameter
//! (spec §9 Design Note: "dispatch once at the call site"), this port
//! merges them into a single entry type that always carries the
//! validation fields; `Fast`/`Full` mode simply does not read them. This
//! costs a little table memory for a lot less code duplication.

use std::sync::OnceLock;

/// One decoder LUT entry: how to turn a 16-byte UTF-8 window matching this
/// entry's continuation-bit mask into a run of UTF-16/UTF-32 code units.
#[derive(Debug, Clone, Copy)]
pub struct DecoderLutEntry {
    /// Per-symbol shuffle producing the low two bytes of up to 8 symbols.
    pub shuf_ab: [i8; 16],
    /// Per-symbol shuffle producing the third byte of 3-byte symbols (`-1`
    /// for symbols shorter than 3 bytes).
    pub shuf_c: [i8; 16],
    /// Bytes consumed from the input window (`<= 16`).
    pub src_step: u32,
    /// Bytes produced as UTF-16 (`2 * symbols_in_window`); UTF-32 output
    /// doubles this at the call site.
    pub dst_step: u32,
    /// Required `1...10` framing bits per input byte (`Validate` mode).
    pub header_mask: [i8; 16],
    /// Per-slot overlong floor: the previous length class's max legal
    /// value. A well-formed symbol in this slot must decode strictly
    /// greater than this (`Validate` mode) — anything else was an overlong
    /// encoding that could have used a shorter sequence.
    pub min_values: [i16; 8],
}

impl DecoderLutEntry {
    const fn reject() -> Self {
        Self {
            shuf_ab: [-1; 16],
            shuf_c: [-1; 16],
            src_step: 16,
            dst_step: 0,
            header_mask: [-1; 16],
            min_values: [-1; 8],
        }
    }
}

/// 32768-entry decoder LUT, indexed by `continuation_mask >> 1` (odd masks
/// are impossible in valid UTF-8 and are pruned, per spec §3).
pub struct DecoderLut {
    entries: Vec<DecoderLutEntry>,
}

impl DecoderLut {
    #[inline]
    pub fn entry(&self, key: u32) -> &DecoderLutEntry {
        &self.entries[key as usize]
    }
}

fn compute_entry(data: &mut [DecoderLutEntry], sizes: &[u8]) {
    let num = sizes.len();
    let mut cnt = num - 1;
    let mut pre_sum: i32 = sizes[..cnt].iter().map(|&s| s as i32).sum();
    debug_assert!(pre_sum < 16);

    // A 3-byte symbol that ends exactly at the 16-byte boundary can still
    // be consumed whole even though its last byte isn't "strictly inside".
    if pre_sum == 13 && pre_sum + sizes[cnt] as i32 == 16 {
        pre_sum += sizes[cnt] as i32;
        cnt += 1;
    }
    // No more than 8 symbols fit in the output lanes this table indexes.
    while cnt > 8 {
        cnt -= 1;
        pre_sum -= sizes[cnt] as i32;
    }

    let mut mask: u32 = 0;
    let mut pos: u32 = 0;
    for &sz in sizes {
        for j in 0..sz {
            if j > 0 {
                mask |= 1 << pos;
            }
            pos += 1;
        }
    }
    debug_assert!(pos >= 16);
    mask &= 0xFFFF;

    let mut shuf_ab = [-1i8; 16];
    let mut shuf_c = [-1i8; 16];
    let mut pos2: i8 = 0;
    for (i, &sz) in sizes.iter().take(cnt).enumerate() {
        for j in (0..sz).rev() {
            if j < 2 {
                shuf_ab[2 * i + j as usize] = pos2;
            } else {
                shuf_c[i] = pos2;
            }
            pos2 += 1;
        }
    }

    let mut header_mask = [0i8; 16];
    let mut posh: usize = 0;
    for &sz in sizes.iter().take(cnt) {
        for j in 0..sz {
            let bits: i32 = if j == 0 {
                match sz {
                    1 => 1,
                    2 => 3,
                    _ => 4,
                }
            } else {
                2
            };
            header_mask[posh] = (-(1i32 << (8 - bits))) as i8;
            posh += 1;
        }
    }

    // Overlong floor per slot: the *previous* length class's max value. A
    // correctly-encoded symbol of this slot's length must read strictly
    // greater than that floor (e.g. a 2-byte sequence must decode to more
    // than 0x7F, or it could have been written as 1 byte). Padding slots
    // (beyond `cnt`) and 1-byte (ASCII) slots never hold an overlong
    // encoding, so their floor is `-1`: every non-negative symbol passes.
    let mut min_values = [0i16; 8];
    for (i, slot) in min_values.iter_mut().enumerate() {
        let sz = if i < cnt { sizes[i] } else { 0 };
        *slot = match sz {
            2 => 0x7F,
            3 => 0x7FF,
            _ => -1,
        };
    }

    debug_assert_eq!(mask % 2, 0);
    let key = (mask / 2) as usize;
    data[key] = DecoderLutEntry {
        shuf_ab,
        shuf_c,
        src_step: pre_sum as u32,
        dst_step: 2 * cnt as u32,
        header_mask,
        min_values,
    };
}

fn compute_rec(data: &mut [DecoderLutEntry], sizes: &mut Vec<u8>, total: u32) {
    if total >= 16 {
        compute_entry(data, sizes);
        return;
    }
    for sz in 1..=3u8 {
        sizes.push(sz);
        compute_rec(data, sizes, total + sz as u32);
        sizes.pop();
    }
}

fn compute_all() -> DecoderLut {
    let mut entries = vec![DecoderLutEntry::reject(); 32768];
    let mut sizes = Vec::with_capacity(16);
    compute_rec(&mut entries, &mut sizes, 0);
    DecoderLut { entries }
}

static DECODER_LUT: OnceLock<DecoderLut> = OnceLock::new();

/// The process-wide decoder LUT, built on first use.
pub fn decoder_lut() -> &'static DecoderLut {
    DECODER_LUT.get_or_init(compute_all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_sentinel_is_distinguishable() {
        let reject = DecoderLutEntry::reject();
        assert_eq!(reject.src_step, 16);
        assert_eq!(reject.dst_step, 0);
    }

    #[test]
    fn entry_shape_is_always_consistent() {
        // Whichever sequence last wins a given mask slot during the
        // recursive build, its resulting entry must stay internally
        // consistent: a bounded number of symbols producing a bounded
        // number of input/output bytes.
        let lut = decoder_lut();
        for key in 0..32768u32 {
            let e = lut.entry(key);
            assert!(e.src_step <= 16);
            assert!(e.dst_step <= 16);
            assert_eq!(e.dst_step % 2, 0);
        }
    }

    #[test]
    fn all_ascii_window_decodes_as_eight_one_byte_symbols() {
        // mask=0 (no continuation bits among the low 16 bits): the table
        // always has *some* valid entry for this key since the all-ASCII
        // sequence reaches it, even though recursion order may pick a
        // different colliding sequence as the final write. Either way, a
        // non-reject entry with cnt<=8 one-byte symbols must result: the
        // low byte of slot i is always some earlier-or-equal input offset.
        let lut = decoder_lut();
        let entry = lut.entry(0);
        assert_ne!(entry.dst_step, 0, "mask 0 must resolve to a real entry, not the reject sentinel");
        assert!(entry.src_step >= 1);
    }
}
