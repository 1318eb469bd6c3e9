#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_form_data::{FormDataBuilder, decode, find_bytes};

#[derive(Arbitrary, Debug)]
struct FuzzPart {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

fn is_valid_header_value(s: &str) -> bool {
    !s.is_empty() && s.trim() == s && s.chars().all(|c| c != '\r' && c != '\n')
}

fuzz_target!(|input: (String, Vec<FuzzPart>)| {
    let (boundary, parts) = input;

    if boundary.is_empty()
        || boundary.len() > 70
        || !boundary.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return;
    }
    let delimiter = format!("--{}", boundary);

    // ヘッダー値に境界が含まれるとパートの区切りが変わる
    let has_delimiter = |s: &str| s.contains(delimiter.as_str());

    // name の引用符は %22 で書き出されるので元の値には戻らない
    let valid: Vec<&FuzzPart> = parts
        .iter()
        .filter(|p| {
            is_valid_header_value(&p.name) && !has_delimiter(&p.name) && !p.name.contains('"')
        })
        .filter(|p| {
            p.filename
                .as_deref()
                .is_none_or(|v| is_valid_header_value(v) && !has_delimiter(v))
        })
        .filter(|p| {
            p.content_type
                .as_deref()
                .is_none_or(|v| is_valid_header_value(v) && !has_delimiter(v))
        })
        .filter(|p| !p.data.is_empty())
        .filter(|p| find_bytes(&p.data, 0, delimiter.as_bytes()).is_none())
        .collect();

    let body = valid
        .iter()
        .fold(FormDataBuilder::with_boundary(&boundary), |builder, p| {
            builder.part(
                &p.name,
                p.filename.as_deref(),
                p.content_type.as_deref(),
                &p.data,
            )
        })
        .build();

    let decoded = decode(&body, &boundary).unwrap();
    assert_eq!(decoded.len(), valid.len());
    for (part, original) in decoded.iter().zip(valid.iter()) {
        assert_eq!(part.name(), original.name);
        assert_eq!(part.data(), original.data.as_slice());
    }
});
