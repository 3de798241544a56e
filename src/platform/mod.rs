#[cfg(target_os = "android")]
pub mod android;

use crate::error::Error;
use crate::types::{Codec, DecoderCapability};

/// Name prefixes of the software decoders platforms ship as fallbacks.
const SOFTWARE_DECODER_PREFIXES: [&str; 4] =
    ["OMX.google.", "c2.android.", "OMX.ffmpeg.", "c2.ffmpeg."];

/// Whether a platform decoder name belongs to a software implementation.
#[cfg_attr(not(target_os = "android"), allow(dead_code))]
pub(crate) fn is_software_decoder_name(name: &str) -> bool {
    SOFTWARE_DECODER_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Gather per-codec probe results into one decoder list.
///
/// A codec whose query fails is logged and skipped. The scan fails only
/// when every attempt failed, with the last error.
#[cfg_attr(not(target_os = "android"), allow(dead_code))]
pub(crate) fn collect_decoders(
    attempts: impl IntoIterator<Item = (Codec, Result<Option<DecoderCapability>, Error>)>,
) -> Result<Vec<DecoderCapability>, Error> {
    let mut found = Vec::new();
    let mut answered = 0usize;
    let mut last_error = None;
    for (codec, result) in attempts {
        match result {
            Ok(capability) => {
                answered += 1;
                found.extend(capability);
            }
            Err(e) => {
                tracing::warn!(?codec, error = %e, "skipping codec");
                last_error = Some(e);
            }
        }
    }
    match last_error {
        Some(e) if answered == 0 => Err(e),
        _ => Ok(found),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlatformError;
    use crate::types::{FrameGeometry, PixelFormat};

    fn hardware(codec: Codec) -> Option<DecoderCapability> {
        Some(DecoderCapability::new(
            codec,
            true,
            FrameGeometry::UHD_8K,
            [PixelFormat::Nv12],
        ))
    }

    const NAME_FAILED: Error = Error::Platform(PlatformError::Status(-10000));

    #[test]
    fn recognizes_software_decoders() {
        assert!(is_software_decoder_name("c2.android.avc.decoder"));
        assert!(is_software_decoder_name("OMX.google.h264.decoder"));
        assert!(!is_software_decoder_name("c2.qti.avc.decoder"));
        assert!(!is_software_decoder_name("OMX.Exynos.avc.dec"));
    }

    #[test]
    fn one_failing_codec_keeps_the_others() {
        let found = collect_decoders([
            (Codec::H264, Ok(hardware(Codec::H264))),
            (Codec::Av1, Err(NAME_FAILED)),
            (Codec::H265, Ok(hardware(Codec::H265))),
        ])
        .unwrap();
        let codecs: Vec<_> = found.iter().map(|d| d.codec).collect();
        assert_eq!(codecs, [Codec::H264, Codec::H265]);
    }

    #[test]
    fn missing_decoders_are_not_failures() {
        let found = collect_decoders([(Codec::Vp8, Ok(None)), (Codec::Av1, Err(NAME_FAILED))]);
        assert!(found.unwrap().is_empty());
        assert!(collect_decoders([]).unwrap().is_empty());
    }

    #[test]
    fn fails_when_every_codec_fails() {
        let result = collect_decoders([
            (Codec::H264, Err(NAME_FAILED)),
            (Codec::H265, Err(NAME_FAILED)),
        ]);
        assert_eq!(result, Err(NAME_FAILED));
    }
}
