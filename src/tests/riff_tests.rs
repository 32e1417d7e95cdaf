//! Property tests for RIFF chunk walking
//!
//! Containers are generated chunk by chunk so the expected `data` offset is
//! known up front.

use crate::error::ParseError;
use crate::riff::*;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Build a container and return it with the payload offset of its `data` chunk
    fn build(before: &[([u8; 4], Vec<u8>)], data: Option<&[u8]>) -> (Vec<u8>, Option<usize>) {
        let mut out = b"RIFF\0\0\0\0WAVE".to_vec();
        for (id, payload) in before {
            out.extend_from_slice(id);
            out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
            out.extend_from_slice(payload);
            if payload.len() % 2 == 1 {
                out.push(0);
            }
        }

        let offset = data.map(|payload| {
            out.extend_from_slice(DATA_ID);
            out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
            let offset = out.len();
            out.extend_from_slice(payload);
            offset
        });

        let declared = (out.len() - 8) as u32;
        out[4..8].copy_from_slice(&declared.to_le_bytes());
        (out, offset)
    }

    prop_compose! {
        fn chunk_id()(id in prop::array::uniform4(b'a'..=b'z')) -> [u8; 4] {
            id
        }
    }

    prop_compose! {
        fn other_chunks()(chunks in prop::collection::vec(
            (chunk_id(), prop::collection::vec(any::<u8>(), 0..40)),
            0..6,
        )) -> Vec<([u8; 4], Vec<u8>)> {
            chunks.into_iter().filter(|(id, _)| id != DATA_ID).collect()
        }
    }

    proptest! {
        #[test]
        fn test_data_chunk_fits_in_container(
            before in other_chunks(),
            payload in prop::collection::vec(any::<u8>(), 0..200),
        ) {
            let (container, expected) = build(&before, Some(&payload[..]));
            let (offset, size) = locate_data_chunk(&container).unwrap();

            prop_assert_eq!(Some(offset), expected);
            prop_assert_eq!(size, payload.len());
            prop_assert!(offset + size <= container.len());
        }

        #[test]
        fn test_no_data_chunk_is_reported(before in other_chunks()) {
            let (container, _) = build(&before, None);
            prop_assert_eq!(locate_data_chunk(&container), Err(ParseError::ChunkNotFound));
        }

        #[test]
        fn test_chunk_walk_visits_every_chunk(before in other_chunks()) {
            let (container, _) = build(&before, Some(&[1u8, 2, 3][..]));
            let ids: Vec<[u8; 4]> = chunks(&container).unwrap().map(|c| c.id).collect();

            prop_assert_eq!(ids.len(), before.len() + 1);
            for (walked, (id, _)) in ids.iter().zip(before.iter()) {
                prop_assert_eq!(walked, id);
            }
        }

        #[test]
        fn test_trailing_extent_is_idempotent(payload in prop::collection::vec(any::<u8>(), 0..300)) {
            let extent = trailing_nonzero_extent(&payload);
            prop_assert!(extent <= payload.len());
            prop_assert_eq!(trailing_nonzero_extent(&payload[..extent]), extent);
        }

        #[test]
        fn test_all_zero_payload_has_no_audio(len in 0usize..512) {
            prop_assert_eq!(trailing_nonzero_extent(&vec![0u8; len]), 0);
        }

        #[test]
        fn test_padding_does_not_change_audio_length(
            audio in prop::collection::vec(1u8..=255, 1..100),
            padding in 0usize..100,
        ) {
            let mut payload = audio.clone();
            payload.resize(audio.len() + padding, 0);
            let (container, _) = build(&[], Some(&payload[..]));
            prop_assert_eq!(audio_payload_length(&container), Ok(audio.len()));
        }

        #[test]
        fn test_non_riff_input_is_rejected(mut bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            if bytes.len() >= 4 && &bytes[0..4] == RIFF_MAGIC {
                bytes[0] = b'X';
            }
            prop_assert_eq!(locate_data_chunk(&bytes), Err(ParseError::InvalidContainer));
        }
    }

    #[test]
    fn test_example_container() {
        let mut container = b"RIFF\x16\x00\x00\x00WAVE".to_vec();
        container.extend_from_slice(b"data");
        container.extend_from_slice(&10u32.to_le_bytes());
        container.extend_from_slice(b"\x01\x02\x03\x00\x00\x00\x00\x00\x00\x00");

        let (offset, size) = locate_data_chunk(&container).unwrap();
        assert_eq!((offset, size), (20, 10));
        assert_eq!(trailing_nonzero_extent(&container[offset..offset + size]), 3);
    }
}
