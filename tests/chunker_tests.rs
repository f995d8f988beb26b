// Integration tests for audio chunking
//
// These tests verify that a recording is split into fixed-size frames whose
// concatenation reproduces the original buffer exactly.

use streamscribe::{AudioBuffer, Chunker, StreamError};

fn test_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[test]
fn test_frame_count_and_round_trip_across_sizes() {
    // Property sweep: every buffer/chunk-size pairing must produce
    // ceil(len / chunk_size) frames that reassemble the input
    for len in [0usize, 1, 2, 7, 16, 100, 257] {
        for chunk_size in [1usize, 2, 3, 8, 16, 64, 300] {
            let bytes = test_bytes(len);
            let mut chunker =
                Chunker::new(AudioBuffer::from_bytes(bytes.clone()), chunk_size).unwrap();

            let expected_frames = len.div_ceil(chunk_size);
            assert_eq!(
                chunker.frame_count(),
                expected_frames,
                "frame count for len={} chunk_size={}",
                len,
                chunk_size
            );

            let mut reassembled = Vec::new();
            while chunker.has_next() {
                reassembled.extend_from_slice(&chunker.next_frame().unwrap().bytes);
            }

            assert_eq!(
                reassembled, bytes,
                "round trip for len={} chunk_size={}",
                len, chunk_size
            );
        }
    }
}

#[test]
fn test_all_frames_full_except_last() {
    let len = 10_000;
    let chunk_size = 4_000;
    let mut chunker = Chunker::new(AudioBuffer::from_bytes(test_bytes(len)), chunk_size).unwrap();

    let mut lengths = Vec::new();
    while chunker.has_next() {
        lengths.push(chunker.next_frame().unwrap().len());
    }

    assert_eq!(lengths, vec![4_000, 4_000, 2_000]);

    // Last frame length follows from the remainder; the rest are full
    let n = lengths.len();
    assert_eq!(lengths[n - 1], len - (n - 1) * chunk_size);
}

#[test]
fn test_offsets_are_contiguous() {
    let mut chunker = Chunker::new(AudioBuffer::from_bytes(test_bytes(1000)), 128).unwrap();

    let mut expected_offset = 0;
    while chunker.has_next() {
        let frame = chunker.next_frame().unwrap();
        assert_eq!(frame.offset, expected_offset, "no gaps or overlaps");
        expected_offset += frame.len();
    }

    assert_eq!(expected_offset, 1000);
    assert_eq!(chunker.bytes_sent(), 1000);
}

#[test]
fn test_exhausted_chunker_errors() {
    let mut chunker = Chunker::new(AudioBuffer::from_bytes(test_bytes(8)), 8).unwrap();

    chunker.next_frame().unwrap();
    assert!(!chunker.has_next());

    let result = chunker.next_frame();
    assert!(matches!(result, Err(StreamError::ChunksExhausted)));
}
