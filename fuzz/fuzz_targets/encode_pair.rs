#![no_main]

use libfuzzer_sys::fuzz_target;
use certpair::CertificatePair;

fuzz_target!(|data: &[u8]| {
    let Some((&split, data)) = data.split_first() else {
        return
    };
    let (forward, reverse) = data.split_at(usize::from(split).min(data.len()));
    let forward = if split & 1 == 0 { Some(forward) } else { None };
    let reverse = if split & 2 == 0 { Some(reverse) } else { None };
    let Ok(pair) = CertificatePair::from_slices(forward, reverse) else {
        assert!(forward.is_none() && reverse.is_none());
        return
    };
    let layout = pair.layout().unwrap();
    let encoded = pair.to_bytes().unwrap();
    assert_eq!(encoded.len() as u64, layout.encoded_len());
});
