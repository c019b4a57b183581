#![no_main]

use libfuzzer_sys::fuzz_target;
use certpair::{Form, encode_context_tag, size};

fuzz_target!(|input: (u32, u64, bool)| {
    let (number, len, constructed) = input;
    let form = if constructed { Form::Constructed } else { Form::Primitive };
    match encode_context_tag(number, form, len) {
        Ok(octets) => {
            assert_eq!(
                octets.len(),
                size::tag_len(number).unwrap()
                    + size::length_len(len).unwrap()
            );
            assert_eq!(octets[0] & 0xe0, 0x80 | form.mask());
        }
        Err(_) => {
            assert!(number > 0x3fff || len > u64::from(u32::MAX));
        }
    }
});
