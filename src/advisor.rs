use core::fmt;

use crate::device::{self, CapabilityProbe};
use crate::error::Error;
use crate::frame::FrameLayout;
use crate::types::{Codec, FrameGeometry, PixelFormat};

/// Tunables for an [`Advisor`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdvisorConfig {
    /// User preference; when off, hardware decode is never advised.
    pub hardware_acceleration: bool,
    /// Largest frame the advisor will size buffers for.
    pub max_geometry: FrameGeometry,
    /// Format assumed when a sizing request does not name one.
    pub default_format: PixelFormat,
    /// Row stride alignment in bytes. Must be a power of two.
    pub row_alignment: u32,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            hardware_acceleration: true,
            max_geometry: FrameGeometry::MAX,
            default_format: PixelFormat::default(),
            row_alignment: 1,
        }
    }
}

impl AdvisorConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.row_alignment.is_power_of_two() {
            return Err(Error::InvalidAlignment(self.row_alignment));
        }
        Ok(())
    }
}

/// A configuration a caller wants to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeRequest {
    pub codec: Codec,
    pub geometry: FrameGeometry,
    pub format: PixelFormat,
}

/// Why hardware acceleration was not advised.
///
/// Ordered from the coarsest check to the most specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum UnsupportedReason {
    DisabledByPreference,
    ProbeFailed,
    NoHardwareDecoder,
    CodecUnsupported,
    GeometryTooLarge,
    FormatUnsupported,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DisabledByPreference => "hardware acceleration disabled by preference",
            Self::ProbeFailed => "device capabilities could not be queried",
            Self::NoHardwareDecoder => "no hardware decoder present",
            Self::CodecUnsupported => "no hardware decoder for codec",
            Self::GeometryTooLarge => "frame exceeds hardware decoder limits",
            Self::FormatUnsupported => "hardware decoder cannot output pixel format",
        })
    }
}

/// Verdict on hardware acceleration. `reason` is set iff unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityReport {
    pub hardware_acceleration_available: bool,
    pub reason: Option<UnsupportedReason>,
}

impl CapabilityReport {
    pub const AVAILABLE: CapabilityReport = CapabilityReport {
        hardware_acceleration_available: true,
        reason: None,
    };

    pub fn unavailable(reason: UnsupportedReason) -> Self {
        CapabilityReport {
            hardware_acceleration_available: false,
            reason: Some(reason),
        }
    }
}

/// Answers sizing and capability questions for one device.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Advisor<P> {
    probe: P,
    config: AdvisorConfig,
}

impl<P: CapabilityProbe> Advisor<P> {
    pub fn new(probe: P) -> Self {
        Advisor {
            probe,
            config: AdvisorConfig::default(),
        }
    }

    pub fn with_config(probe: P, config: AdvisorConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Advisor { probe, config })
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Whether any hardware decode path is usable, honoring the user
    /// preference.
    pub fn is_hardware_acceleration_supported(&self) -> bool {
        self.config.hardware_acceleration && device::is_hardware_acceleration_supported(&self.probe)
    }

    /// Whether hardware decode is usable for `request`.
    ///
    /// Checks run from the coarsest to the most specific; the reason
    /// reported is the furthest check any hardware decoder got to.
    pub fn capability(&self, request: &DecodeRequest) -> CapabilityReport {
        let report = match self.evaluate(request) {
            Ok(()) => CapabilityReport::AVAILABLE,
            Err(reason) => CapabilityReport::unavailable(reason),
        };
        tracing::debug!(
            codec = ?request.codec,
            geometry = %request.geometry,
            format = %request.format,
            available = report.hardware_acceleration_available,
            reason = ?report.reason,
            "hardware acceleration verdict"
        );
        report
    }

    fn evaluate(&self, request: &DecodeRequest) -> Result<(), UnsupportedReason> {
        if !self.config.hardware_acceleration {
            return Err(UnsupportedReason::DisabledByPreference);
        }
        let decoders = self.probe.decoders().map_err(|e| {
            tracing::warn!(error = %e, "capability probe failed");
            UnsupportedReason::ProbeFailed
        })?;

        let mut furthest = UnsupportedReason::NoHardwareDecoder;
        for decoder in decoders.filter(|d| d.hardware) {
            let reason = if decoder.codec != request.codec {
                UnsupportedReason::CodecUnsupported
            } else if !request.geometry.fits_within(&decoder.max_size) {
                UnsupportedReason::GeometryTooLarge
            } else if !decoder.supports_format(request.format) {
                UnsupportedReason::FormatUnsupported
            } else {
                return Ok(());
            };
            furthest = furthest.max(reason);
        }
        Err(furthest)
    }

    /// Buffer size for one frame, padded per the configured row alignment.
    ///
    /// `format` falls back to the configured default.
    pub fn optimal_buffer_size(
        &self,
        geometry: FrameGeometry,
        format: Option<PixelFormat>,
    ) -> Result<u64, Error> {
        self.frame_layout(geometry, format)?.total_bytes()
    }

    /// Full plane layout behind [`optimal_buffer_size`](Self::optimal_buffer_size).
    pub fn frame_layout(
        &self,
        geometry: FrameGeometry,
        format: Option<PixelFormat>,
    ) -> Result<FrameLayout, Error> {
        if !geometry.fits_within(&self.config.max_geometry) {
            return Err(Error::InvalidGeometry {
                width: geometry.width().into(),
                height: geometry.height().into(),
            });
        }
        let format = format.unwrap_or(self.config.default_format);
        FrameLayout::with_row_alignment(geometry, format, self.config.row_alignment)
    }
}
