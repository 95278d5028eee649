//! Streaming decoded segment batches from disk, sync and async.

use std::path::PathBuf;

use futures_util::StreamExt;

use stream_core::{
    spectrogram_transform, MelConfig, PartitionedStream, StreamError, WorkerIdentity,
};

fn write_segment_files(dir: &std::path::Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("utt1__ah_S__{}.wav", i + 1));
            let samples: Vec<f32> = (0..4_000)
                .map(|n| ((n + i * 7) % 100) as f32 / 100.0 - 0.5)
                .collect();
            frame_core::wav::write_mono(&path, &samples, 16_000).unwrap();
            path
        })
        .collect()
}

#[test]
fn segment_files_stream_as_mel_batches() {
    let dir = tempfile::tempdir().unwrap();
    let segments = write_segment_files(dir.path(), 3);
    let config = MelConfig::default();

    let stream =
        PartitionedStream::open(segments, 2, None, spectrogram_transform(config)).unwrap();
    let batches: Vec<_> = stream.map(Result::unwrap).collect();

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 2);
    assert!(batches[0].iter().all(Option::is_some));
    assert_eq!(batches[1].len(), 2);
    assert!(batches[1][0].is_some());
    assert!(batches[1][1].is_none());

    let mel = batches[0][0].as_ref().unwrap();
    assert_eq!(mel.len(), 4_000 / config.hop_size);
    assert!(mel.iter().all(|frame| frame.len() == config.n_mels));
}

#[test]
fn unreadable_segment_fails_its_batch_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut segments = write_segment_files(dir.path(), 2);
    segments.insert(1, dir.path().join("missing.wav"));

    let stream = PartitionedStream::open(
        segments,
        1,
        None,
        spectrogram_transform(MelConfig::default()),
    )
    .unwrap();
    let pulls: Vec<_> = stream.collect();

    assert_eq!(pulls.len(), 3);
    assert!(pulls[0].is_ok());
    assert!(matches!(pulls[1], Err(StreamError::Transform(_))));
    assert!(pulls[2].is_ok());
}

#[tokio::test]
async fn async_adapter_matches_the_pull_iterator() {
    let items: Vec<u32> = (0..10).collect();
    let worker = Some(WorkerIdentity { id: 0, count: 2 });
    let decode = |value: &u32| Ok(value + 100);

    let pulled: Vec<_> = PartitionedStream::open(items.clone(), 3, worker, decode)
        .unwrap()
        .map(Result::unwrap)
        .collect();

    let streamed: Vec<_> = PartitionedStream::open(items, 3, worker, decode)
        .unwrap()
        .into_batch_stream()
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(pulled, streamed);
}
