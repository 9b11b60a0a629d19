//! # Integration Tests
//!
//! End-to-end tests over the library crates: feeds are laid out on disk
//! exactly as a recorder would leave them (time_mapping.json plus a
//! frames/ directory of PNGs), loaded with `feed_loader`, resampled with
//! `sync_engine`, and written with `writer`. Output images are decoded
//! back and checked pixel-for-pixel.

#[cfg(test)]
mod harness {
    use std::fs;
    use std::path::{Path, PathBuf};

    pub const WIDTH: u32 = 8;
    pub const HEIGHT: u32 = 6;

    /// Uniform fill value stamped into every pixel of a frame, so a decoded
    /// output image identifies which source frame it came from. Zero is
    /// never used; it marks the blank placeholder.
    pub fn stamp(frame_id: u64) -> u8 {
        frame_id as u8 * 10 + 10
    }

    /// Write one feed directory: mapping file plus stamped PNG frames.
    pub fn write_feed(root: &Path, feed_id: &str, timestamps: &[f64]) -> PathBuf {
        let dir = root.join(feed_id);
        let frames_dir = dir.join("frames");
        fs::create_dir_all(&frames_dir).unwrap();

        let pairs: Vec<(f64, u64)> = timestamps
            .iter()
            .enumerate()
            .map(|(i, &t)| (t, i as u64))
            .collect();
        fs::write(
            dir.join(feed_loader::TIME_MAPPING_FILE),
            serde_json::to_string(&pairs).unwrap(),
        )
        .unwrap();

        for (_, frame_id) in &pairs {
            let data = vec![stamp(*frame_id); (WIDTH * HEIGHT * 3) as usize];
            image::save_buffer(
                frames_dir.join(format!("{frame_id}.png")),
                &data,
                WIDTH,
                HEIGHT,
                image::ColorType::Rgb8,
            )
            .unwrap();
        }

        dir
    }

    /// Read back an output image and return its first pixel byte.
    pub fn read_stamp(path: &Path) -> u8 {
        let img = image::open(path).unwrap().into_rgb8();
        img.as_raw()[0]
    }
}

#[cfg(test)]
mod e2e_tests {
    use contracts::{AlignmentPolicy, SyncError};
    use feed_loader::FeedLoader;
    use sync_engine::{output_fps, output_interval, resolve_window, FrameResampler};
    use writer::{FeedWriter, WriterKind};

    use crate::harness::{read_stamp, stamp, write_feed};

    /// Full pipeline over two feeds under UNION.
    ///
    /// f1 covers [0.0, 1.0] at min gap 0.3; f2 covers [0.2, 1.2] at min
    /// gap 0.5. The global interval is 0.3, the union window is
    /// [0.0, 1.2), and both feeds emit exactly four frames. f2's first
    /// tick precedes its coverage and comes out blank.
    #[tokio::test]
    async fn test_union_run_writes_aligned_sequences() {
        let tmp = tempfile::tempdir().unwrap();
        let f1_dir = write_feed(tmp.path(), "f1", &[0.0, 0.3, 0.6, 1.0]);
        let f2_dir = write_feed(tmp.path(), "f2", &[0.2, 0.7, 1.2]);

        let feeds = vec![
            FeedLoader::load(&f1_dir).unwrap(),
            FeedLoader::load(&f2_dir).unwrap(),
        ];
        let indexes: Vec<_> = feeds.iter().map(|f| f.index.clone()).collect();

        let interval = output_interval(&indexes).unwrap();
        assert!((interval - 0.3).abs() < 1e-12);
        assert!((output_fps(interval) - 1.0 / 0.3).abs() < 1e-9);

        let window = resolve_window(AlignmentPolicy::Union, &indexes, interval).unwrap();
        assert_eq!(window.start, 0.0);
        assert_eq!(window.end, 1.2);
        assert_eq!(window.tick_count(), 4);

        let out = tmp.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        let resampler = FrameResampler::new(window);
        let fps = output_fps(interval);

        for feed in feeds {
            let mut sink =
                FeedWriter::create(WriterKind::Frames, &out, &feed.index, fps, None)
                    .await
                    .unwrap();
            let report = resampler
                .resample(&feed.index, &feed.frames, &mut sink)
                .await
                .unwrap();
            assert_eq!(report.frames_written, 4);
        }

        // f1: every tick has a source frame; t=0.9 snaps to entry 3 (t=1.0)
        for (tick, frame_id) in [(0u64, 0u64), (1, 1), (2, 2), (3, 3)] {
            let path = out.join("f1").join(format!("{tick}.png"));
            assert_eq!(read_stamp(&path), stamp(frame_id), "f1 tick {tick}");
        }

        // f2: blank before coverage starts, then nearest frames
        assert_eq!(read_stamp(&out.join("f2").join("0.png")), 0);
        assert_eq!(read_stamp(&out.join("f2").join("1.png")), stamp(0));
        assert_eq!(read_stamp(&out.join("f2").join("2.png")), stamp(1));
        assert_eq!(read_stamp(&out.join("f2").join("3.png")), stamp(1));
    }

    /// INTERSECTION over the same feeds starts at the latest start (0.2)
    /// and contains no blank frames for any feed.
    #[tokio::test]
    async fn test_intersection_run_has_no_blanks() {
        let tmp = tempfile::tempdir().unwrap();
        let f1_dir = write_feed(tmp.path(), "f1", &[0.0, 0.3, 0.6, 1.0]);
        let f2_dir = write_feed(tmp.path(), "f2", &[0.2, 0.7, 1.2]);

        let feeds = vec![
            FeedLoader::load(&f1_dir).unwrap(),
            FeedLoader::load(&f2_dir).unwrap(),
        ];
        let indexes: Vec<_> = feeds.iter().map(|f| f.index.clone()).collect();
        let interval = output_interval(&indexes).unwrap();

        let window =
            resolve_window(AlignmentPolicy::Intersection, &indexes, interval).unwrap();
        assert_eq!(window.start, 0.2);
        assert_eq!(window.end, 1.0);
        assert_eq!(window.tick_count(), 3);

        let out = tmp.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        let resampler = FrameResampler::new(window);
        let fps = output_fps(interval);

        for feed in feeds {
            let mut sink =
                FeedWriter::create(WriterKind::Frames, &out, &feed.index, fps, None)
                    .await
                    .unwrap();
            let report = resampler
                .resample(&feed.index, &feed.frames, &mut sink)
                .await
                .unwrap();
            assert_eq!(report.blank_frames, 0);
            assert_eq!(report.frames_written, 3);
        }
    }

    /// Disjoint feeds under INTERSECTION must fail window resolution and
    /// therefore produce nothing.
    #[tokio::test]
    async fn test_disjoint_feeds_fail_intersection() {
        let tmp = tempfile::tempdir().unwrap();
        let f1_dir = write_feed(tmp.path(), "f1", &[0.0, 0.5, 1.0]);
        let f2_dir = write_feed(tmp.path(), "f2", &[5.0, 5.5, 6.0]);

        let indexes = vec![
            FeedLoader::load(&f1_dir).unwrap().index,
            FeedLoader::load(&f2_dir).unwrap().index,
        ];
        let interval = output_interval(&indexes).unwrap();

        let err = resolve_window(AlignmentPolicy::Intersection, &indexes, interval)
            .unwrap_err();
        assert!(matches!(err, SyncError::NoOverlap { .. }));

        // The same feeds are still valid under UNION
        let window = resolve_window(AlignmentPolicy::Union, &indexes, interval).unwrap();
        assert_eq!(window.start, 0.0);
        assert_eq!(window.end, 6.0);
    }

    /// Deleting a referenced image mid-run fails that feed with
    /// `FrameUnreadable`; the sink is not finalized.
    #[tokio::test]
    async fn test_missing_image_fails_feed() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = write_feed(tmp.path(), "cam", &[0.0, 0.5, 1.0]);
        std::fs::remove_file(dir.join("frames").join("1.png")).unwrap();

        let feed = FeedLoader::load(&dir).unwrap();
        let window = resolve_window(
            AlignmentPolicy::Intersection,
            std::slice::from_ref(&feed.index),
            feed.index.min_gap(),
        )
        .unwrap();

        let out = tmp.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        let mut sink = FeedWriter::create(WriterKind::Frames, &out, &feed.index, 2.0, None)
            .await
            .unwrap();

        let err = FrameResampler::new(window)
            .resample(&feed.index, &feed.frames, &mut sink)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::FrameUnreadable { .. }));
    }

    /// Three feeds with different native rates all emit the same number of
    /// output frames in the same tick order.
    #[tokio::test]
    async fn test_equal_frame_counts_across_feeds() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = [
            write_feed(tmp.path(), "fast", &[0.0, 0.25, 0.5, 0.75, 1.0]),
            write_feed(tmp.path(), "slow", &[0.1, 0.4, 0.9]),
            write_feed(tmp.path(), "late", &[0.3, 0.45, 0.6]),
        ];

        let feeds: Vec<_> = dirs.iter().map(|d| FeedLoader::load(d).unwrap()).collect();
        let indexes: Vec<_> = feeds.iter().map(|f| f.index.clone()).collect();
        let interval = output_interval(&indexes).unwrap();
        let window = resolve_window(AlignmentPolicy::Union, &indexes, interval).unwrap();

        let out = tmp.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        let resampler = FrameResampler::new(window);

        let mut counts = Vec::new();
        for feed in feeds {
            let mut sink = FeedWriter::create(
                WriterKind::Frames,
                &out,
                &feed.index,
                output_fps(interval),
                None,
            )
            .await
            .unwrap();
            let report = resampler
                .resample(&feed.index, &feed.frames, &mut sink)
                .await
                .unwrap();
            counts.push(report.frames_written);
        }

        assert_eq!(counts[0], window.tick_count());
        assert!(counts.iter().all(|&c| c == counts[0]));
    }
}

#[cfg(test)]
mod loader_tests {
    use contracts::SyncError;
    use feed_loader::FeedLoader;

    use crate::harness::write_feed;

    /// Out-of-order and duplicate timestamps are corrupt mappings.
    #[test]
    fn test_unordered_mapping_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = write_feed(tmp.path(), "cam", &[0.0, 0.5, 1.0]);
        std::fs::write(
            dir.join(feed_loader::TIME_MAPPING_FILE),
            "[[0.5, 0], [0.0, 1], [1.0, 2]]",
        )
        .unwrap();

        let err = FeedLoader::load(&dir).unwrap_err();
        assert!(matches!(err, SyncError::FeedCorrupt { .. }));
    }

    /// A single-entry feed has no gap to derive a rate from.
    #[test]
    fn test_single_entry_feed_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = write_feed(tmp.path(), "cam", &[0.0]);

        let err = FeedLoader::load(&dir).unwrap_err();
        assert!(matches!(
            err,
            SyncError::InsufficientEntries { count: 1, .. }
        ));
    }

    /// A directory without a mapping file is not a feed.
    #[test]
    fn test_missing_mapping_is_feed_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("empty");
        std::fs::create_dir_all(&dir).unwrap();

        let err = FeedLoader::load(&dir).unwrap_err();
        assert!(matches!(err, SyncError::FeedNotFound { .. }));
    }
}
