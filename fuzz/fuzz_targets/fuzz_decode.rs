#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_form_data::{FormDataDecoder, FormDataLimits, decode};

fuzz_target!(|data: &[u8]| {
    // 様々な境界でデコードを試行
    let boundaries = ["boundary", "----WebKitFormBoundary", "abc123", "-", "XYZ"];

    for boundary in boundaries {
        // パニックしなければ OK
        let parts = decode(data, boundary).unwrap();
        for part in &parts {
            assert!(!part.name().is_empty());
            assert!(!part.data().is_empty());
            if let Some(text) = part.text_value() {
                assert!(!text.is_empty());
            }
        }

        let form = FormDataDecoder::new(boundary)
            .limits(FormDataLimits::unlimited())
            .decode(data)
            .unwrap();
        assert_eq!(form.into_parts(), parts);
    }
});
