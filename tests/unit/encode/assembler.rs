use super::*;
use crate::encode::sink::InMemorySink;
use image::AnimationDecoder;

fn solid(width: u32, height: u32, v: u8) -> Surface {
    Surface::from_rgba_image(image::RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([v, v, v, 255]),
    ))
    .unwrap()
}

fn nine_frames() -> Vec<Surface> {
    (0..9u8).map(|i| solid(6, 4, i * 25)).collect()
}

fn timing(ms: u32) -> AnimationTiming {
    AnimationTiming::from_millis(ms).unwrap()
}

#[test]
fn milliseconds_become_seconds_at_the_encoder_boundary() {
    let settings = GifSettings::from_timing(6, 4, timing(150));
    assert_eq!(settings.frame_duration_secs, 0.15);

    let mut sink = InMemorySink::new();
    drive_sink(&mut sink, &nine_frames(), settings).unwrap();
    assert_eq!(sink.config().unwrap().frame_duration_secs, 0.15);
    assert!(sink.ended());
    let indices: Vec<usize> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, (0..9).collect::<Vec<_>>());
}

#[test]
fn default_timing_is_120ms() {
    let settings = GifSettings::from_timing(6, 4, AnimationTiming::default());
    assert_eq!(settings.frame_duration_secs, 0.12);
}

#[test]
fn encodes_nine_frames_in_order() {
    let asset = GifAssembler::new()
        .encode_frames(&nine_frames(), 6, 4, timing(150))
        .unwrap();
    assert_eq!(asset.frame_count, 9);
    assert_eq!((asset.width, asset.height), (6, 4));
    assert_eq!(asset.frame_duration_ms, 150);

    let decoder =
        image::codecs::gif::GifDecoder::new(std::io::Cursor::new(asset.bytes.as_slice())).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 9);

    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(f64::from(num) / f64::from(den), 150.0);

    let grey: Vec<u8> = frames
        .iter()
        .map(|f| f.buffer().get_pixel(1, 1).0[0])
        .collect();
    assert!(grey.windows(2).all(|w| w[0] < w[1]), "frames out of order: {grey:?}");
}

#[test]
fn empty_sequence_is_an_encoding_error() {
    let err = GifAssembler::new()
        .encode_frames(&[], 6, 4, timing(120))
        .unwrap_err();
    assert!(matches!(err, AdcompError::AnimationEncoding(_)));
}

#[test]
fn size_mismatch_is_an_encoding_error() {
    let mut frames = nine_frames();
    frames[4] = solid(7, 4, 0);
    let err = GifAssembler::new()
        .encode_frames(&frames, 6, 4, timing(120))
        .unwrap_err();
    assert!(matches!(err, AdcompError::AnimationEncoding(_)));
}

#[test]
fn spawned_job_delivers_its_outcome_once() {
    let mut job = GifAssembler::new().spawn(nine_frames(), 6, 4, timing(120));
    let outcome = loop {
        if let Some(outcome) = job.try_result() {
            break outcome;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    };
    assert_eq!(outcome.unwrap().frame_count, 9);
    assert!(job.try_result().is_none());
}

#[test]
fn spawned_failure_is_reported_through_wait() {
    let err = GifAssembler::new()
        .spawn(Vec::new(), 6, 4, timing(120))
        .wait()
        .unwrap_err();
    assert!(matches!(err, AdcompError::AnimationEncoding(_)));
}

#[test]
fn trait_encode_runs_on_the_worker() {
    let encoder: &dyn AnimationEncoder = &GifAssembler::new();
    let asset = encoder.encode(nine_frames(), 6, 4, timing(100)).unwrap();
    assert!(asset.bytes.starts_with(b"GIF89a"));
    assert!(asset.to_data_uri().starts_with("data:image/gif;base64,"));
}

#[test]
fn write_to_persists_bytes() {
    let asset = GifAssembler::new()
        .encode_frames(&nine_frames(), 6, 4, timing(120))
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ai-animated-ad.gif");
    asset.write_to(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), asset.bytes);
}
