#![no_main]

use libfuzzer_sys::fuzz_target;
use sniffrs::{MagicDetector, MatchMode, MediaType};

// First bytes drive the signature, the rest is the content.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let pattern_len = 1 + (data[0] as usize % 8).min(data.len() - 4);
    let begin = data[1] as i64 % 16;
    let end = begin + data[2] as i64 % 16;
    let mode = if data[3] & 1 == 0 {
        MatchMode::Exact
    } else {
        MatchMode::Regex
    };
    let rest = &data[4..];
    let (pattern, content) = rest.split_at(pattern_len.min(rest.len()));
    if pattern.is_empty() {
        return;
    }

    let detector = MagicDetector::builder()
        .media_type(MediaType::from_static("application", "x-fuzz"))
        .pattern(pattern.to_vec())
        .offset_range(begin, end)
        .match_mode(mode)
        .build()
        .unwrap();

    // Regex text may legitimately fail to compile
    if let Ok(found) = detector.match_bytes(content) {
        assert!(found.is_unknown() || found == *detector.media_type());

        // Verify: a literal pattern at the first offset always matches
        if mode == MatchMode::Exact {
            let mut planted = vec![0u8; begin as usize];
            planted.extend_from_slice(pattern);
            assert_eq!(detector.match_bytes(&planted).unwrap(), *detector.media_type());
        }
    }
});
