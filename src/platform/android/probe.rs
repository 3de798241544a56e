use std::ffi::{CStr, c_char};
use std::ptr;

use crate::device::CapabilityProbe;
use crate::error::{Error, PlatformError};
use crate::platform::android::ffi;
use crate::platform::{collect_decoders, is_software_decoder_name};
use crate::types::{Codec, DecoderCapability, FrameGeometry, PixelFormat};

/// Formats NDK decoders deliver in byte-buffer mode.
const BYTE_BUFFER_FORMATS: [PixelFormat; 2] = [PixelFormat::Nv12, PixelFormat::Yuv420p];

/// Probes decoders through the NDK `AMediaCodec` API.
///
/// The NDK has no capability listing, so each codec is probed by creating
/// its preferred decoder and inspecting the component name. The maximum
/// coded size is not queryable either and comes from
/// [`with_max_size`](Self::with_max_size) instead.
#[derive(Debug, Clone)]
pub struct AndroidMediaCodecProbe {
    codecs: Vec<Codec>,
    max_size: FrameGeometry,
}

impl Default for AndroidMediaCodecProbe {
    fn default() -> Self {
        AndroidMediaCodecProbe {
            codecs: Codec::ALL.to_vec(),
            max_size: FrameGeometry::UHD_8K,
        }
    }
}

impl AndroidMediaCodecProbe {
    /// Restrict probing to `codecs`.
    pub fn with_codecs(mut self, codecs: impl IntoIterator<Item = Codec>) -> Self {
        self.codecs = codecs.into_iter().collect();
        self
    }

    pub fn with_max_size(mut self, max_size: FrameGeometry) -> Self {
        self.max_size = max_size;
        self
    }

    fn probe_codec(&self, codec: Codec) -> Result<Option<DecoderCapability>, Error> {
        let Some(decoder) = OwnedCodec::create_decoder(codec) else {
            tracing::debug!(?codec, "no decoder");
            return Ok(None);
        };
        let name = decoder.name()?;
        let hardware = !is_software_decoder_name(&name);
        tracing::debug!(?codec, %name, hardware, "found decoder");
        Ok(Some(DecoderCapability::new(
            codec,
            hardware,
            self.max_size,
            BYTE_BUFFER_FORMATS,
        )))
    }
}

impl CapabilityProbe for AndroidMediaCodecProbe {
    type Error = Error;

    fn decoders(&self) -> Result<impl Iterator<Item = DecoderCapability>, Self::Error> {
        let attempts = self
            .codecs
            .iter()
            .map(|&codec| (codec, self.probe_codec(codec)));
        Ok(collect_decoders(attempts)?.into_iter())
    }
}

/// An `AMediaCodec` that is deleted on drop.
struct OwnedCodec {
    raw: *mut ffi::AMediaCodec,
}

impl OwnedCodec {
    fn create_decoder(codec: Codec) -> Option<Self> {
        let raw = unsafe { ffi::AMediaCodec_createDecoderByType(codec.mime_type().as_ptr()) };
        if raw.is_null() {
            None
        } else {
            Some(OwnedCodec { raw })
        }
    }

    fn name(&self) -> Result<String, Error> {
        let mut name: *mut c_char = ptr::null_mut();
        let status = unsafe { ffi::AMediaCodec_getName(self.raw, &mut name) };
        if status != ffi::AMEDIA_OK {
            return Err(Error::Platform(PlatformError::Status(status)));
        }
        if name.is_null() {
            return Err(Error::Platform(PlatformError::Message(
                "AMediaCodec_getName returned no name",
            )));
        }
        // SAFETY: getName succeeded, so `name` is a valid C string owned by
        // the codec until released below.
        let owned = unsafe { CStr::from_ptr(name) }.to_string_lossy().into_owned();
        unsafe { ffi::AMediaCodec_releaseName(self.raw, name) };
        Ok(owned)
    }
}

impl Drop for OwnedCodec {
    fn drop(&mut self) {
        unsafe { ffi::AMediaCodec_delete(self.raw) };
    }
}
