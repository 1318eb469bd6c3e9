#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_form_data::content_type::{ContentType, boundary_from_content_type, is_text_like};

fuzz_target!(|data: &[u8]| {
    // UTF-8 文字列として解釈できる場合のみテスト
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(ct) = ContentType::parse(s) {
            let _ = ct.media_type();
            let _ = ct.subtype();
            let _ = ct.mime_type();
            let _ = ct.boundary();
            let _ = ct.is_form_data();
        }

        if let Ok(boundary) = boundary_from_content_type(s) {
            assert!(!boundary.is_empty());
            assert!(boundary.len() <= 70);
        }

        let _ = is_text_like(Some(s));
    }
});
