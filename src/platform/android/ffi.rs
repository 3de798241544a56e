//! Raw bindings to the subset of the NDK `AMediaCodec` API used for
//! capability probing.
//!
//! Reference: <https://developer.android.com/ndk/reference/group/media>

#![allow(non_camel_case_types)]

use std::os::raw::c_char;

/// Opaque handle to an `AMediaCodec` instance.
#[repr(C)]
pub struct AMediaCodec {
    _opaque: [u8; 0],
}

/// `media_status_t`, the result code of NDK media functions.
pub type media_status_t = i32;

pub const AMEDIA_OK: media_status_t = 0;

#[link(name = "mediandk")]
unsafe extern "C" {
    pub fn AMediaCodec_createDecoderByType(mime_type: *const c_char) -> *mut AMediaCodec;

    pub fn AMediaCodec_delete(codec: *mut AMediaCodec) -> media_status_t;

    /// Available since API level 28.
    pub fn AMediaCodec_getName(codec: *mut AMediaCodec, out_name: *mut *mut c_char)
    -> media_status_t;

    pub fn AMediaCodec_releaseName(codec: *mut AMediaCodec, name: *mut c_char);
}
