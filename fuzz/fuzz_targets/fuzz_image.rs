#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_form_data::image::{ImageFormat, ImagePolicy, validate_image};

fuzz_target!(|data: &[u8]| {
    let detected = ImageFormat::detect(data);

    match validate_image(data, ImagePolicy::Strict) {
        Ok(format) => assert_eq!(format, detected),
        Err(_) => assert!(data.is_empty() || detected.is_none()),
    }

    // Permissive は空でなければ常に受け付ける
    if !data.is_empty() {
        assert_eq!(validate_image(data, ImagePolicy::Permissive), Ok(detected));
    }
});
