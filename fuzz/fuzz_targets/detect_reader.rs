#![no_main]

use std::io::Read;

use libfuzzer_sys::fuzz_target;
use sniffrs::{MagicDetector, MediaType, RewindReader};

fuzz_target!(|data: Vec<u8>| {
    let detectors = vec![
        // Leading signature
        MagicDetector::new(MediaType::from_static("application", "pdf"), b"%PDF"),
        // Fixed offset
        MagicDetector::with_offset(MediaType::from_static("application", "x-tar"), b"ustar", 257),
        // Masked range
        MagicDetector::builder()
            .media_type(MediaType::from_static("image", "bmp"))
            .pattern(*b"BM")
            .mask(*b"\xff\xdf")
            .offset_range(0, 64)
            .build()
            .unwrap(),
    ];

    for detector in &detectors {
        let mut stream = RewindReader::new(&data[..]);
        let first = detector.match_stream(&mut stream).unwrap();

        // Verify: determinism - the same stream gives the same answer
        let second = detector.match_stream(&mut stream).unwrap();
        assert_eq!(first, second);

        // Verify: agrees with the in-memory path
        assert_eq!(first, detector.match_bytes(&data).unwrap());

        // Verify: the stream was rewound
        let mut replay = Vec::new();
        stream.read_to_end(&mut replay).unwrap();
        assert_eq!(replay, data);
    }
});
