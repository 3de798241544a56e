use arrayvec::ArrayVec;

use crate::error::Error;
use crate::types::{FrameGeometry, PixelFormat};

/// Most planes any supported format uses (Y, U, V).
const MAX_PLANES: usize = 3;

/// Byte layout of a single plane of image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneLayout {
    pub bytes_per_row: u64,
    pub rows: u32,
}

impl PlaneLayout {
    pub fn len(&self) -> Result<u64, Error> {
        self.bytes_per_row
            .checked_mul(u64::from(self.rows))
            .ok_or(Error::Overflow)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes_per_row == 0 || self.rows == 0
    }
}

/// Plane-by-plane layout of one uncompressed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    pub format: PixelFormat,
    pub geometry: FrameGeometry,
    planes: ArrayVec<PlaneLayout, MAX_PLANES>,
}

impl FrameLayout {
    /// Tightly packed layout, no row padding.
    pub fn new(geometry: FrameGeometry, format: PixelFormat) -> Result<Self, Error> {
        Self::with_row_alignment(geometry, format, 1)
    }

    /// Layout whose rows are each padded up to a multiple of `row_alignment`
    /// bytes, as hardware surfaces commonly require.
    pub fn with_row_alignment(
        geometry: FrameGeometry,
        format: PixelFormat,
        row_alignment: u32,
    ) -> Result<Self, Error> {
        if !row_alignment.is_power_of_two() {
            return Err(Error::InvalidAlignment(row_alignment));
        }

        let w = u64::from(geometry.width());
        let h = geometry.height();
        // Chroma is subsampled 2:1; odd sizes round up so no pixel is lost.
        let half_w = w.div_ceil(2);
        let half_h = h.div_ceil(2);

        let raw: ArrayVec<(u64, u32), MAX_PLANES> = match format {
            PixelFormat::Rgba8888 | PixelFormat::Bgra8888 => [(w * 4, h)].into_iter().collect(),
            PixelFormat::Yuyv | PixelFormat::Uyvy => [(half_w * 4, h)].into_iter().collect(),
            PixelFormat::Nv12 | PixelFormat::Nv21 => {
                [(w, h), (half_w * 2, half_h)].into_iter().collect()
            }
            PixelFormat::Yuv420p => [(w, h), (half_w, half_h), (half_w, half_h)]
                .into_iter()
                .collect(),
            PixelFormat::Jpeg => return Err(Error::UnsupportedFormat),
        };

        let mut planes = ArrayVec::new();
        for (row_bytes, rows) in raw {
            planes.push(PlaneLayout {
                bytes_per_row: align_up(row_bytes, u64::from(row_alignment))?,
                rows,
            });
        }

        Ok(FrameLayout {
            format,
            geometry,
            planes,
        })
    }

    pub fn planes(&self) -> &[PlaneLayout] {
        &self.planes
    }

    /// Bytes needed to hold every plane back to back.
    pub fn total_bytes(&self) -> Result<u64, Error> {
        self.planes.iter().try_fold(0u64, |acc, plane| {
            acc.checked_add(plane.len()?).ok_or(Error::Overflow)
        })
    }

    /// [`total_bytes`](Self::total_bytes) as an allocation length for this
    /// target.
    pub fn buffer_len(&self) -> Result<usize, Error> {
        usize::try_from(self.total_bytes()?).map_err(|_| Error::Overflow)
    }

    /// Byte offset of each plane within a contiguous buffer.
    pub fn plane_offsets(&self) -> Result<ArrayVec<u64, MAX_PLANES>, Error> {
        let mut offsets = ArrayVec::new();
        let mut offset = 0u64;
        for plane in &self.planes {
            offsets.push(offset);
            offset = offset.checked_add(plane.len()?).ok_or(Error::Overflow)?;
        }
        Ok(offsets)
    }
}

fn align_up(value: u64, align: u64) -> Result<u64, Error> {
    let mask = align - 1;
    value
        .checked_add(mask)
        .map(|v| v & !mask)
        .ok_or(Error::Overflow)
}

/// Average storage cost of one pixel, in bits.
///
/// Compressed formats have no fixed cost and yield `UnsupportedFormat`.
pub fn bits_per_pixel(format: PixelFormat) -> Result<u32, Error> {
    match format {
        PixelFormat::Rgba8888 | PixelFormat::Bgra8888 => Ok(32),
        PixelFormat::Yuyv | PixelFormat::Uyvy => Ok(16),
        PixelFormat::Nv12 | PixelFormat::Nv21 | PixelFormat::Yuv420p => Ok(12),
        PixelFormat::Jpeg => Err(Error::UnsupportedFormat),
    }
}

/// Minimum buffer size, in bytes, that holds one tightly packed frame.
///
/// Dimensions are signed so values handed across a managed-runtime
/// boundary can be passed through unchanged; anything not in
/// `1..=MAX_DIMENSION` is rejected with `InvalidGeometry`. For
/// [`PixelFormat::Rgba8888`] the result is exactly `width * height * 4`.
pub fn optimal_buffer_size(width: i64, height: i64, format: PixelFormat) -> Result<u64, Error> {
    let geometry = FrameGeometry::try_from((width, height))?;
    FrameLayout::new(geometry, format)?.total_bytes()
}

/// [`optimal_buffer_size`] for the default RGBA format.
pub fn optimal_buffer_size_rgba(width: i64, height: i64) -> Result<u64, Error> {
    optimal_buffer_size(width, height, PixelFormat::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(w: u32, h: u32) -> FrameGeometry {
        FrameGeometry::new(w, h).unwrap()
    }

    #[test]
    fn nv12_planes() {
        let layout = FrameLayout::new(geometry(1920, 1080), PixelFormat::Nv12).unwrap();
        assert_eq!(
            layout.planes(),
            &[
                PlaneLayout {
                    bytes_per_row: 1920,
                    rows: 1080
                },
                PlaneLayout {
                    bytes_per_row: 1920,
                    rows: 540
                },
            ]
        );
        assert_eq!(layout.plane_offsets().unwrap().as_slice(), &[0, 1920 * 1080]);
    }

    #[test]
    fn odd_dimensions_round_chroma_up() {
        let layout = FrameLayout::new(geometry(3, 3), PixelFormat::Yuv420p).unwrap();
        // 9 luma + 2 * (2 * 2) chroma
        assert_eq!(layout.total_bytes().unwrap(), 17);

        let packed = FrameLayout::new(geometry(3, 1), PixelFormat::Yuyv).unwrap();
        assert_eq!(packed.total_bytes().unwrap(), 8);
    }

    #[test]
    fn row_alignment_pads_each_plane() {
        let layout =
            FrameLayout::with_row_alignment(geometry(100, 10), PixelFormat::Rgba8888, 64).unwrap();
        assert_eq!(layout.planes()[0].bytes_per_row, 448);
        assert_eq!(layout.total_bytes().unwrap(), 4480);
    }

    #[test]
    fn rejects_bad_alignment() {
        let err = FrameLayout::with_row_alignment(geometry(8, 8), PixelFormat::Nv12, 3).unwrap_err();
        assert_eq!(err, Error::InvalidAlignment(3));
        assert!(FrameLayout::with_row_alignment(geometry(8, 8), PixelFormat::Nv12, 0).is_err());
    }

    #[test]
    fn align_up_overflow_is_reported() {
        assert_eq!(align_up(u64::MAX, 2), Err(Error::Overflow));
        assert_eq!(align_up(5, 1), Ok(5));
    }

    #[test]
    fn bits_per_pixel_matches_layout() {
        let g = geometry(64, 64);
        for pf in PixelFormat::ALL.into_iter().filter(PixelFormat::is_uncompressed) {
            let bits = u64::from(bits_per_pixel(pf).unwrap());
            let bytes = FrameLayout::new(g, pf).unwrap().total_bytes().unwrap();
            assert_eq!(bytes * 8, g.pixel_count() * bits, "{pf}");
        }
    }
}
