#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_form_data::content_disposition::DispositionParams;
use shiguredo_form_data::part_header::PartHeaders;

fuzz_target!(|data: &[u8]| {
    let block = String::from_utf8_lossy(data);

    // パニックしなければ OK
    let headers = PartHeaders::parse(&block);
    let _ = headers.name();
    let _ = headers.filename();
    let _ = headers.content_type();
    let _ = headers.other();

    let params = DispositionParams::parse(&block);

    // 引用符と改行を含まない name は生成して再パースしても変わらない
    if let Some(name) = params
        .name()
        .filter(|name| !name.contains(['"', '\r', '\n']))
    {
        let regenerated = DispositionParams::form_data(name).to_string();
        assert_eq!(DispositionParams::parse(&regenerated).name(), Some(name));
    }
});
