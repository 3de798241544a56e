use crate::types::{Codec, DecoderCapability};

/// Discover the decoders a device exposes.
///
/// This is the seam between the advisor and whatever the platform offers
/// for introspection (a codec list, VA-API profiles, `MediaCodec`).
pub trait CapabilityProbe {
    type Error: core::error::Error;

    fn decoders(&self) -> Result<impl Iterator<Item = DecoderCapability>, Self::Error>;

    /// Decoders for a single codec. The default filters [`decoders`](Self::decoders).
    fn decoders_for(
        &self,
        codec: Codec,
    ) -> Result<impl Iterator<Item = DecoderCapability>, Self::Error> {
        Ok(self.decoders()?.filter(move |d| d.codec == codec))
    }
}

impl<P: CapabilityProbe + ?Sized> CapabilityProbe for &P {
    type Error = P::Error;

    fn decoders(&self) -> Result<impl Iterator<Item = DecoderCapability>, Self::Error> {
        (**self).decoders()
    }

    fn decoders_for(
        &self,
        codec: Codec,
    ) -> Result<impl Iterator<Item = DecoderCapability>, Self::Error> {
        (**self).decoders_for(codec)
    }
}

/// A fixed device description, for simulation and tests or for platforms
/// whose capabilities are known ahead of time.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticProbe<'a> {
    decoders: &'a [DecoderCapability],
}

impl<'a> StaticProbe<'a> {
    pub const fn new(decoders: &'a [DecoderCapability]) -> Self {
        StaticProbe { decoders }
    }
}

impl CapabilityProbe for StaticProbe<'_> {
    type Error = core::convert::Infallible;

    fn decoders(&self) -> Result<impl Iterator<Item = DecoderCapability>, Self::Error> {
        Ok(self.decoders.iter().cloned())
    }
}

/// Whether the device behind `probe` offers any hardware decode path.
///
/// A failing probe counts as "no": callers fall back to software decode.
pub fn is_hardware_acceleration_supported<P: CapabilityProbe>(probe: &P) -> bool {
    match probe.decoders() {
        Ok(mut decoders) => decoders.any(|d| d.hardware),
        Err(e) => {
            tracing::warn!(error = %e, "capability probe failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FrameGeometry, PixelFormat};

    #[test]
    fn software_only_device_is_not_accelerated() {
        let decoders = [DecoderCapability::new(
            Codec::H264,
            false,
            FrameGeometry::UHD_8K,
            [PixelFormat::Yuv420p],
        )];
        assert!(!is_hardware_acceleration_supported(&StaticProbe::new(&decoders)));
        assert!(!is_hardware_acceleration_supported(&StaticProbe::default()));
    }

    #[test]
    fn decoders_for_filters_by_codec() {
        let decoders = [
            DecoderCapability::new(Codec::H264, true, FrameGeometry::UHD_8K, [PixelFormat::Nv12]),
            DecoderCapability::new(Codec::Vp9, true, FrameGeometry::UHD_8K, [PixelFormat::Nv12]),
        ];
        let probe = StaticProbe::new(&decoders);
        assert_eq!(probe.decoders_for(Codec::Vp9).unwrap().count(), 1);

        fn count<P: CapabilityProbe>(probe: P, codec: Codec) -> usize {
            probe.decoders_for(codec).map(Iterator::count).unwrap_or(0)
        }
        assert_eq!(count(&probe, Codec::H264), 1);
        assert_eq!(count(&probe, Codec::Av1), 0);
    }
}
