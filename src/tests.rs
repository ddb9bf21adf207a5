use voxell_rng::rng::XorShift128;

use crate::codec;

const SHORT_DATA: &str = "Hello, World!";
const LONG_DATA: &str =
    "This is a longer string to test the grouping codec. It should be able to handle various lengths and characters.";
const REPEATING_DATA: &str = "a baba da babble da dabble babble doo bee babble dabble dooble dee boo dooble daddle boo";
const UNICODE_DATA: &str = "héllo wörld, código 🚀🚀 καλημέρα мир\n";
const EMPTY_DATA: &str = "";

const TEST_CASES: &[(&str, &str)] = &[
    (REPEATING_DATA, "repeating data"),
    (SHORT_DATA, "short data"),
    (LONG_DATA, "long data"),
    (UNICODE_DATA, "unicode data"),
    (EMPTY_DATA, "empty data"),
];

/// Reproducible pseudo-random printable ASCII.
pub fn rng_text(len: usize) -> String {
    let mut rng = XorShift128::new(0xdead_cafe);
    let mut s = String::with_capacity(len);
    for _ in 0..len {
        let word = rng.peek_next_u64();
        s.push(char::from(b' ' + (word % 95) as u8));
        rng = XorShift128::new(word);
    }
    s
}

pub fn roundtrip_test(group_size: u32) {
    let rng_data = rng_text(1000);
    let mut cases: Vec<(&str, &str)> = TEST_CASES.to_vec();
    cases.push((rng_data.as_str(), "rng data"));

    for (data, name) in cases {
        let archive = codec::encode_text(data, group_size, "case.txt")
            .unwrap_or_else(|e| panic!("encode of {name} with n={group_size} failed: {e}"));
        let decoded = codec::decode_archive(&archive, group_size)
            .unwrap_or_else(|e| panic!("decode of {name} with n={group_size} failed: {e}"));

        let ratio = compression_ratio(data.len(), archive.len());
        eprintln!("compression ratio for {name} with n={group_size}: {:.2}%", ratio * 100.0);

        assert_eq!(decoded.text, data, "roundtrip for {name} with n={group_size} diverged");
    }
}

pub fn compression_ratio(original: usize, compressed: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    compressed as f64 / original as f64
}
