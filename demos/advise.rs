use hwframe::{
    Advisor, AdvisorConfig, Codec, DecodeRequest, DecoderCapability, FrameGeometry, PixelFormat,
    StaticProbe,
};

fn main() {
    #[cfg(target_os = "android")]
    {
        println!(
            "This device {} hardware decode.",
            if hwframe::platform::android::is_hardware_acceleration_supported() {
                "supports"
            } else {
                "does not support"
            }
        );
    }

    // A simulated phone: hardware H.264/H.265, software-only AV1.
    let decoders = [
        DecoderCapability::new(
            Codec::H264,
            true,
            FrameGeometry::new(4096, 2304).expect("valid geometry"),
            [PixelFormat::Nv12, PixelFormat::Yuv420p],
        ),
        DecoderCapability::new(Codec::H265, true, FrameGeometry::UHD_8K, [PixelFormat::Nv12]),
        DecoderCapability::new(Codec::Av1, false, FrameGeometry::UHD_8K, [PixelFormat::Yuv420p]),
    ];

    let config = AdvisorConfig {
        max_geometry: FrameGeometry::UHD_8K,
        ..AdvisorConfig::default()
    };
    let advisor =
        Advisor::with_config(StaticProbe::new(&decoders), config).expect("valid config");

    println!(
        "Hardware acceleration supported: {}",
        advisor.is_hardware_acceleration_supported()
    );

    let sizes = [(1280, 720), (1920, 1080), (3840, 2160), (7680, 4320)];
    for (w, h) in sizes {
        let geometry = FrameGeometry::new(w, h).expect("valid geometry");
        println!("\n{geometry}:");
        for format in [PixelFormat::Rgba8888, PixelFormat::Nv12, PixelFormat::Yuv420p] {
            let bytes = advisor
                .optimal_buffer_size(geometry, Some(format))
                .expect("sizable format");
            println!("  {format:<10} {bytes:>12} bytes");
        }
        for codec in [Codec::H264, Codec::H265, Codec::Av1] {
            let report = advisor.capability(&DecodeRequest {
                codec,
                geometry,
                format: PixelFormat::Nv12,
            });
            match report.reason {
                None => println!("  {codec:?}: hardware"),
                Some(reason) => println!("  {codec:?}: software ({reason})"),
            }
        }
    }
}
