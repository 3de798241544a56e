use core::ffi::CStr;
use core::fmt;
use core::str::FromStr;

use arrayvec::ArrayVec;

use crate::error::Error;

/// Maximum number of output pixel formats per decoder capability.
const MAX_OUTPUT_FORMATS: usize = 8;

/// Largest width or height accepted for any frame.
pub const MAX_DIMENSION: u32 = 65535;

/// Pixel formats a decoded frame may be delivered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum PixelFormat {
    #[default]
    Rgba8888,
    Bgra8888,
    Nv12,
    Nv21,
    Yuv420p,
    Yuyv,
    Uyvy,
    Jpeg,
}

impl PixelFormat {
    /// Every known format, in declaration order.
    pub const ALL: [PixelFormat; 8] = [
        PixelFormat::Rgba8888,
        PixelFormat::Bgra8888,
        PixelFormat::Nv12,
        PixelFormat::Nv21,
        PixelFormat::Yuv420p,
        PixelFormat::Yuyv,
        PixelFormat::Uyvy,
        PixelFormat::Jpeg,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rgba8888 => "rgba8888",
            Self::Bgra8888 => "bgra8888",
            Self::Nv12 => "nv12",
            Self::Nv21 => "nv21",
            Self::Yuv420p => "yuv420p",
            Self::Yuyv => "yuyv",
            Self::Uyvy => "uyvy",
            Self::Jpeg => "jpeg",
        }
    }

    /// Whether frames in this format have a fixed, computable byte layout.
    pub fn is_uncompressed(&self) -> bool {
        !matches!(self, Self::Jpeg)
    }

    /// Map a FourCC code (as used by V4L2 and Core Video) to a format.
    pub fn from_fourcc(fourcc: u32) -> Result<Self, Error> {
        match fourcc {
            fourcc::RGBA => Ok(Self::Rgba8888),
            fourcc::BGRA => Ok(Self::Bgra8888),
            fourcc::CV_420V | fourcc::CV_420F | fourcc::NV12 => Ok(Self::Nv12),
            fourcc::NV21 => Ok(Self::Nv21),
            fourcc::CV_Y420 | fourcc::I420 => Ok(Self::Yuv420p),
            fourcc::CV_YUVS | fourcc::CV_YUV2 | fourcc::YUYV => Ok(Self::Yuyv),
            fourcc::CV_2VUY | fourcc::UYVY => Ok(Self::Uyvy),
            fourcc::JPEG => Ok(Self::Jpeg),
            _ => Err(Error::UnsupportedFormat),
        }
    }

    /// Canonical FourCC for this format.
    pub fn fourcc(&self) -> u32 {
        match self {
            Self::Rgba8888 => fourcc::RGBA,
            Self::Bgra8888 => fourcc::BGRA,
            Self::Nv12 => fourcc::CV_420V,
            Self::Nv21 => fourcc::NV21,
            Self::Yuv420p => fourcc::CV_Y420,
            Self::Yuyv => fourcc::CV_YUVS,
            Self::Uyvy => fourcc::CV_2VUY,
            Self::Jpeg => fourcc::JPEG,
        }
    }

    /// Map an Android `MediaCodecInfo.CodecCapabilities.COLOR_Format*`
    /// constant to a format.
    ///
    /// `COLOR_FormatYUV420Flexible` is rejected: its plane arrangement is
    /// only known per output buffer.
    pub fn from_android_color_format(color_format: i32) -> Result<Self, Error> {
        match color_format {
            15 => Ok(Self::Bgra8888),         // COLOR_Format32bitBGRA8888
            19 => Ok(Self::Yuv420p),          // COLOR_FormatYUV420Planar
            21 => Ok(Self::Nv12),             // COLOR_FormatYUV420SemiPlanar
            25 => Ok(Self::Yuyv),             // COLOR_FormatYCbYCr
            27 => Ok(Self::Uyvy),             // COLOR_FormatCbYCrY
            0x7F00_A000 => Ok(Self::Rgba8888), // COLOR_Format32bitABGR8888
            _ => Err(Error::UnsupportedFormat),
        }
    }
}

/// FourCC codes, big-endian as Core Video and V4L2 spell them.
mod fourcc {
    const fn code(chars: &[u8; 4]) -> u32 {
        u32::from_be_bytes(*chars)
    }

    pub(super) const RGBA: u32 = code(b"RGBA");
    pub(super) const BGRA: u32 = code(b"BGRA");
    pub(super) const NV12: u32 = code(b"NV12");
    pub(super) const NV21: u32 = code(b"NV21");
    pub(super) const I420: u32 = code(b"I420");
    pub(super) const YUYV: u32 = code(b"YUYV");
    pub(super) const UYVY: u32 = code(b"UYVY");
    pub(super) const JPEG: u32 = code(b"jpeg");
    // Core Video pixel format types
    pub(super) const CV_420V: u32 = code(b"420v");
    pub(super) const CV_420F: u32 = code(b"420f");
    pub(super) const CV_Y420: u32 = code(b"y420");
    pub(super) const CV_YUVS: u32 = code(b"yuvs");
    pub(super) const CV_YUV2: u32 = code(b"yuv2");
    pub(super) const CV_2VUY: u32 = code(b"2vuy");
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pf| pf.name().eq_ignore_ascii_case(s))
            .ok_or(Error::UnsupportedFormat)
    }
}

/// Compressed video codecs a decoder may handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum Codec {
    H264,
    H265,
    Vp8,
    Vp9,
    Av1,
}

impl Codec {
    pub const ALL: [Codec; 5] = [Codec::H264, Codec::H265, Codec::Vp8, Codec::Vp9, Codec::Av1];

    /// MIME type used by Android `MediaCodec`, nul-terminated for FFI.
    pub fn mime_type(&self) -> &'static CStr {
        match self {
            Self::H264 => c"video/avc",
            Self::H265 => c"video/hevc",
            Self::Vp8 => c"video/x-vnd.on2.vp8",
            Self::Vp9 => c"video/x-vnd.on2.vp9",
            Self::Av1 => c"video/av01",
        }
    }
}

/// Pixel dimensions of a frame.
///
/// Both sides are in `1..=MAX_DIMENSION`; the only way to build one is
/// through a validating constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGeometry", into = "RawGeometry"))]
pub struct FrameGeometry {
    width: u32,
    height: u32,
}

impl FrameGeometry {
    /// The largest representable geometry.
    pub const MAX: FrameGeometry = FrameGeometry {
        width: MAX_DIMENSION,
        height: MAX_DIMENSION,
    };

    /// 8K UHD, a common platform ceiling for hardware decoders.
    pub const UHD_8K: FrameGeometry = FrameGeometry {
        width: 7680,
        height: 4320,
    };

    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Error::InvalidGeometry {
                width: width.into(),
                height: height.into(),
            });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel count, exact for every valid geometry.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// True if neither side exceeds the corresponding side of `max`.
    pub fn fits_within(&self, max: &FrameGeometry) -> bool {
        self.width <= max.width && self.height <= max.height
    }
}

impl TryFrom<(i64, i64)> for FrameGeometry {
    type Error = Error;

    fn try_from((width, height): (i64, i64)) -> Result<Self, Self::Error> {
        let invalid = Error::InvalidGeometry { width, height };
        let w = u32::try_from(width).map_err(|_| invalid)?;
        let h = u32::try_from(height).map_err(|_| invalid)?;
        Self::new(w, h).map_err(|_| invalid)
    }
}

impl TryFrom<(i32, i32)> for FrameGeometry {
    type Error = Error;

    fn try_from((width, height): (i32, i32)) -> Result<Self, Self::Error> {
        Self::try_from((i64::from(width), i64::from(height)))
    }
}

impl fmt::Display for FrameGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawGeometry {
    width: u32,
    height: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGeometry> for FrameGeometry {
    type Error = Error;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

#[cfg(feature = "serde")]
impl From<FrameGeometry> for RawGeometry {
    fn from(g: FrameGeometry) -> Self {
        RawGeometry {
            width: g.width,
            height: g.height,
        }
    }
}

/// Describes one decoder a device exposes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderCapability {
    pub codec: Codec,
    /// Backed by dedicated media hardware rather than a software fallback.
    pub hardware: bool,
    /// Largest coded size the decoder accepts.
    pub max_size: FrameGeometry,
    output_formats: ArrayVec<PixelFormat, MAX_OUTPUT_FORMATS>,
}

impl DecoderCapability {
    /// Describe a decoder. Output formats beyond the inline capacity are
    /// dropped, as are duplicates.
    pub fn new(
        codec: Codec,
        hardware: bool,
        max_size: FrameGeometry,
        output_formats: impl IntoIterator<Item = PixelFormat>,
    ) -> Self {
        let mut formats = ArrayVec::new();
        for pf in output_formats {
            if formats.is_full() {
                break;
            }
            if !formats.contains(&pf) {
                formats.push(pf);
            }
        }
        DecoderCapability {
            codec,
            hardware,
            max_size,
            output_formats: formats,
        }
    }

    /// The pixel formats this decoder can deliver.
    pub fn output_formats(&self) -> &[PixelFormat] {
        &self.output_formats
    }

    pub fn supports_format(&self, format: PixelFormat) -> bool {
        self.output_formats.contains(&format)
    }
}
