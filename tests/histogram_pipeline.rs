//! 直方图统计管线集成测试.
//!
//! 原始 yuv420p10le 字节 → FrameLayout 定位 → 逐平面读取 → 分箱 → 累加

use std::io::{Cursor, Write};

use yuvscope::core::{FrameLayout, PixelFormat, Plane, ScopeError};
use yuvscope::hist::{BinEdges, FrameRange, FrameReader, accumulate_frames, bin_samples};

// ============================================================
// 辅助函数
// ============================================================

fn layout(width: u32, height: u32) -> FrameLayout {
    FrameLayout::new(width, height, 10, PixelFormat::Yuv420p10le).unwrap()
}

fn encode(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// 生成一帧: Y 平面取 `y`, U/V 平面填充常量
fn make_frame(layout: &FrameLayout, y: &[u16], u: u16, v: u16) -> Vec<u8> {
    assert_eq!(y.len() as u64, layout.y_count());
    let chroma = layout.chroma_count() as usize;
    let mut samples = y.to_vec();
    samples.extend(std::iter::repeat_n(u, chroma));
    samples.extend(std::iter::repeat_n(v, chroma));
    encode(&samples)
}

// ============================================================
// 帧布局
// ============================================================

#[test]
fn test_small_layout_sizes() {
    let l = layout(4, 2);
    assert_eq!(l.y_count(), 8);
    assert_eq!(l.chroma_count(), 2);
    assert_eq!(l.frame_byte_size(), 24);
    assert_eq!(l.frame_offset(3).unwrap(), 72);
}

#[test]
fn test_4k_layout_sizes() {
    let l = layout(3840, 2160);
    assert_eq!(l.y_count(), 8_294_400);
    assert_eq!(l.chroma_count(), 2_073_600);
    assert_eq!(l.frame_byte_size(), 24_883_200);
}

#[test]
fn test_invalid_layouts_rejected() {
    assert!(matches!(
        FrameLayout::new(3, 2, 10, PixelFormat::Yuv420p10le),
        Err(ScopeError::InvalidDimension { .. })
    ));
    assert!(matches!(
        FrameLayout::new(4, 2, 10, PixelFormat::Yuv422p10le),
        Err(ScopeError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        "rgb24".parse::<PixelFormat>(),
        Err(ScopeError::UnsupportedFormat(_))
    ));
}

// ============================================================
// 单帧统计
// ============================================================

#[test]
fn test_single_frame_four_bins() {
    let l = layout(4, 2);
    let edges = BinEdges::new(4, 10).unwrap();
    assert_eq!(edges.as_slice(), &[-1.0, 255.0, 511.0, 767.0, 1023.0]);

    let data = make_frame(&l, &[0, 0, 300, 300, 600, 600, 1023, 1023], 512, 512);
    let hist = accumulate_frames(&mut Cursor::new(data), &l, &edges, FrameRange::new(0, 1))
        .unwrap();

    assert_eq!(hist.y.counts(), &[2, 2, 2, 2]);
    assert_eq!(hist.u.counts(), &[0, 0, 2, 0]);
    assert_eq!(hist.v.counts(), &[0, 0, 2, 0]);
}

#[test]
fn test_all_zero_buffer_lands_in_first_bin() {
    let l = layout(4, 2);
    let edges = BinEdges::new(256, 10).unwrap();
    let hist = accumulate_frames(
        &mut Cursor::new(vec![0u8; 24]),
        &l,
        &edges,
        FrameRange::new(0, 1),
    )
    .unwrap();
    for (_, h) in hist.iter() {
        assert_eq!(h.counts()[0], h.samples());
        assert_eq!(h.counted(), h.samples());
    }
}

#[test]
fn test_max_value_counted_in_last_bin() {
    let l = layout(4, 2);
    let edges = BinEdges::new(256, 10).unwrap();
    let data = make_frame(&l, &[1023; 8], 1023, 1023);
    let hist = accumulate_frames(&mut Cursor::new(data), &l, &edges, FrameRange::new(0, 1))
        .unwrap();
    assert_eq!(hist.y.counts()[255], 8);
    assert_eq!(hist.u.counts()[255], 2);
    assert_eq!(hist.y.dropped(), 0);
}

#[test]
fn test_out_of_range_samples_dropped_not_errors() {
    let l = layout(4, 2);
    let edges = BinEdges::new(4, 10).unwrap();
    let data = make_frame(&l, &[0, 1024, 2000, 65535, 5, 6, 7, 8], 0, 0);
    let hist = accumulate_frames(&mut Cursor::new(data), &l, &edges, FrameRange::new(0, 1))
        .unwrap();
    assert_eq!(hist.y.dropped(), 3);
    assert_eq!(hist.y.counts(), &[5, 0, 0, 0]);
    assert_eq!(hist.y.counted() + hist.y.dropped(), 8);
}

// ============================================================
// 多帧与偏移
// ============================================================

#[test]
fn test_frame_offset_and_count_select_frames() {
    let l = layout(4, 2);
    let edges = BinEdges::new(4, 10).unwrap();
    let mut data = Vec::new();
    data.extend(make_frame(&l, &[0; 8], 0, 0));
    data.extend(make_frame(&l, &[300; 8], 300, 300));
    data.extend(make_frame(&l, &[600; 8], 600, 600));
    data.extend(make_frame(&l, &[1000; 8], 1000, 1000));

    let hist = accumulate_frames(
        &mut Cursor::new(data),
        &l,
        &edges,
        FrameRange::new(1, 2),
    )
    .unwrap();
    assert_eq!(hist.y.counts(), &[0, 8, 8, 0]);
    assert_eq!(hist.u.counts(), &[0, 2, 2, 0]);
    assert_eq!(hist.y.samples(), 16);
}

#[test]
fn test_count_sum_plus_dropped_equals_samples() {
    let l = layout(8, 4);
    let edges = BinEdges::new(7, 10).unwrap();
    let frames = 5u64;
    let total = (l.frame_sample_count() * frames) as usize;
    // 约 1/8 的样本超出 10 位
    let samples: Vec<u16> = (0..total).map(|i| ((i * 37) % 1200) as u16).collect();

    let hist = accumulate_frames(
        &mut Cursor::new(encode(&samples)),
        &l,
        &edges,
        FrameRange::new(0, frames),
    )
    .unwrap();
    for (plane, h) in hist.iter() {
        let expected = l.plane_sample_count(plane) * frames;
        assert_eq!(h.samples(), expected, "{plane}");
        assert_eq!(h.counts().iter().sum::<u64>() + h.dropped(), expected, "{plane}");
    }
    assert!(hist.y.dropped() > 0);
}

#[test]
fn test_accumulation_matches_per_frame_binning() {
    let l = layout(4, 2);
    let edges = BinEdges::new(16, 10).unwrap();
    let samples: Vec<u16> = (0..36).map(|i| (i * 29) % 1024).collect();
    let data = encode(&samples);

    let total = accumulate_frames(
        &mut Cursor::new(data.clone()),
        &l,
        &edges,
        FrameRange::new(0, 3),
    )
    .unwrap();

    let mut cursor = Cursor::new(data);
    let mut reader = FrameReader::new(&mut cursor, l);
    let mut expected = vec![0u64; 16];
    while let Some(frame) = reader.next_frame().unwrap() {
        let y = bin_samples(&frame.y, &edges);
        for (e, c) in expected.iter_mut().zip(y.counts()) {
            *e += c;
        }
    }
    assert_eq!(total.y.counts(), expected.as_slice());
}

// ============================================================
// 截断与越界
// ============================================================

#[test]
fn test_truncated_frame_is_error() {
    let l = layout(4, 2);
    let edges = BinEdges::new(4, 10).unwrap();
    let result = accumulate_frames(
        &mut Cursor::new(vec![0u8; 23]),
        &l,
        &edges,
        FrameRange::new(0, 1),
    );
    assert!(matches!(
        result,
        Err(ScopeError::TruncatedRead { plane: Plane::V, .. })
    ));
}

#[test]
fn test_offset_past_end_is_error() {
    let l = layout(4, 2);
    let edges = BinEdges::new(4, 10).unwrap();
    let result = accumulate_frames(
        &mut Cursor::new(vec![0u8; 48]),
        &l,
        &edges,
        FrameRange::new(2, 1),
    );
    assert!(matches!(
        result,
        Err(ScopeError::TruncatedRead { plane: Plane::Y, actual: 0, .. })
    ));
}

#[test]
fn test_range_running_past_end_is_error() {
    let l = layout(4, 2);
    let edges = BinEdges::new(4, 10).unwrap();
    let result = accumulate_frames(
        &mut Cursor::new(vec![0u8; 48]),
        &l,
        &edges,
        FrameRange::new(1, 2),
    );
    assert!(matches!(result, Err(ScopeError::TruncatedRead { .. })));
}

#[test]
fn test_reads_from_real_file() {
    let l = layout(4, 2);
    let edges = BinEdges::new(4, 10).unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&make_frame(&l, &[0, 0, 300, 300, 600, 600, 1023, 1023], 0, 1023))
        .unwrap();
    file.flush().unwrap();

    let mut input = std::io::BufReader::new(std::fs::File::open(file.path()).unwrap());
    let hist = accumulate_frames(&mut input, &l, &edges, FrameRange::new(0, 1)).unwrap();
    assert_eq!(hist.y.counts(), &[2, 2, 2, 2]);
    assert_eq!(hist.u.counts(), &[2, 0, 0, 0]);
    assert_eq!(hist.v.counts(), &[0, 0, 0, 2]);
}
