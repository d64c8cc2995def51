//! Random-bytes stress test (spec §8 boundary scenario 8): the validating
//! block processor's accept/reject decision must match the scalar
//! reference decoder for every input length 0..32 across many seeds.

use proptest::prelude::*;

use utf8lut::config::{Mode, OutputWidth, ProcessorConfig};
use utf8lut::scalar::decode_trivial;
use utf8lut::BlockProcessor;

fn vector_accepts(processor: &BlockProcessor, input: &[u8]) -> bool {
    let mut out = vec![0u8; processor.output_buffer_min_size(input.len()).max(4)];
    let mut outs: [&mut [u8]; 1] = [&mut out];
    processor.decode(input, &mut outs, true).is_ok()
}

fn scalar_accepts(input: &[u8]) -> bool {
    let mut out = vec![0u8; input.len() * 4 + 16];
    let (consumed, _produced, ok) = decode_trivial(input, &mut out, OutputWidth::Utf16);
    ok && consumed == input.len()
}

proptest! {
    #[test]
    fn vector_and_scalar_agree_on_random_bytes(bytes in prop::collection::vec(any::<u8>(), 0..32)) {
        let processor = BlockProcessor::new(ProcessorConfig::new().with_mode(Mode::Validate));
        prop_assert_eq!(vector_accepts(&processor, &bytes), scalar_accepts(&bytes));
    }
}

#[test]
fn fixed_seed_sweep_over_short_random_inputs() {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let processor = BlockProcessor::new(ProcessorConfig::new().with_mode(Mode::Validate));
    for seed in 0u64..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for len in 0..32usize {
            let bytes: Vec<u8> = (0..len).map(|_| rng.gen::<u8>()).collect();
            assert_eq!(
                vector_accepts(&processor, &bytes),
                scalar_accepts(&bytes),
                "disagreement at seed {seed}, len {len}: {bytes:?}"
            );
        }
    }
}
