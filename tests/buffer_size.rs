use hwframe::{Error, FrameGeometry, PixelFormat, optimal_buffer_size, optimal_buffer_size_rgba};

#[test]
fn rgba_is_width_times_height_times_four() {
    // 23171x23171x4 wraps a 32-bit signed product.
    let cases = [(1, 1), (2, 3), (640, 480), (1280, 720), (1920, 1080), (23171, 23171)];
    for (w, h) in cases {
        assert_eq!(
            optimal_buffer_size(w, h, PixelFormat::Rgba8888).unwrap(),
            (w * h * 4) as u64,
            "{w}x{h}"
        );
    }
}

#[test]
fn known_sizes() {
    assert_eq!(optimal_buffer_size_rgba(3840, 2160).unwrap(), 33_177_600);
    assert_eq!(optimal_buffer_size_rgba(7680, 4320).unwrap(), 132_710_400);
    assert_eq!(
        optimal_buffer_size(1920, 1080, PixelFormat::Nv12).unwrap(),
        3_110_400
    );
    assert_eq!(
        optimal_buffer_size(1920, 1080, PixelFormat::Yuv420p).unwrap(),
        3_110_400
    );
    assert_eq!(
        optimal_buffer_size(1920, 1080, PixelFormat::Yuyv).unwrap(),
        4_147_200
    );
}

#[test]
fn largest_frame_does_not_overflow() {
    let max = i64::from(hwframe::MAX_DIMENSION);
    assert_eq!(
        optimal_buffer_size_rgba(max, max).unwrap(),
        65535u64 * 65535 * 4
    );
}

#[test]
fn non_positive_dimensions_are_invalid() {
    for (w, h) in [(0, 1080), (1920, 0), (0, 0), (-1920, 1080), (1920, -1)] {
        for pf in [PixelFormat::Rgba8888, PixelFormat::Nv12] {
            assert_eq!(
                optimal_buffer_size(w, h, pf),
                Err(Error::InvalidGeometry {
                    width: w,
                    height: h
                })
            );
        }
    }
}

#[test]
fn out_of_range_dimensions_are_invalid() {
    assert!(matches!(
        optimal_buffer_size_rgba(65536, 1),
        Err(Error::InvalidGeometry { .. })
    ));
    assert!(matches!(
        optimal_buffer_size_rgba(1, i64::MAX),
        Err(Error::InvalidGeometry { .. })
    ));
}

#[test]
fn compressed_format_is_unsupported() {
    assert_eq!(
        optimal_buffer_size(1920, 1080, PixelFormat::Jpeg),
        Err(Error::UnsupportedFormat)
    );
}

#[test]
fn repeated_calls_agree() {
    let first = optimal_buffer_size(4096, 2160, PixelFormat::Nv21);
    for _ in 0..16 {
        assert_eq!(optimal_buffer_size(4096, 2160, PixelFormat::Nv21), first);
    }
}

#[test]
fn error_messages() {
    let err = FrameGeometry::new(0, 720).unwrap_err();
    assert_eq!(err.to_string(), "invalid frame geometry 0x720");
    assert_eq!(Error::UnsupportedFormat.to_string(), "unsupported pixel format");
}
