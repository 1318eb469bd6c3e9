//! 写真アップロードサーバーの例 (tokio + shiguredo_form_data)
//!
//! 使い方:
//!   # ポート 8080 で起動
//!   cargo run -p photo_upload_server
//!
//!   # ボディサイズ上限を 1MB にして、判定できない画像も受け付ける
//!   cargo run -p photo_upload_server -- --max-body-size 1048576 --permissive-images
//!
//! アップロード:
//!   curl -F caption=kitchen -F photo=@kitchen.jpg http://localhost:8080/api/photos

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use shiguredo_form_data::FormDataLimits;
use shiguredo_form_data::image::{ImagePolicy, validate_image};
use shiguredo_http11::{DecoderLimits, Request, RequestDecoder, Response};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_form_data::RequestExt;

/// リクエストヘッダー分としてボディ上限に上乗せするバッファサイズ
const HEADER_BUFFER_SIZE: usize = 64 * 1024;

const ALLOW_METHODS: &str = "POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

struct ServerOptions {
    port: u16,
    max_body_size: usize,
    permissive_images: bool,
}

struct UploadConfig {
    limits: FormDataLimits,
    image_policy: ImagePolicy,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args()?;

    let addr = format!("0.0.0.0:{}", options.port);
    let listener = TcpListener::bind(&addr).await?;

    let config = Arc::new(UploadConfig {
        limits: FormDataLimits::default().with_max_body_size(options.max_body_size),
        image_policy: if options.permissive_images {
            ImagePolicy::Permissive
        } else {
            ImagePolicy::Strict
        },
    });

    println!("Photo upload server listening on http://{}", addr);
    println!(
        "max body size: {} bytes, image policy: {:?}",
        config.limits.max_body_size, config.image_policy
    );

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let config = config.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, peer_addr, &config).await {
                eprintln!("Client error: {}", e);
            }
        });
    }
}

fn parse_args() -> Result<ServerOptions, Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "photo_upload_server";

    // --help フラグ
    noargs::HELP_FLAG.take_help(&mut args);

    // --version フラグ
    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    // --port オプション
    let port: u16 = noargs::opt("port")
        .short('p')
        .doc("Port to listen on")
        .default("8080")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --max-body-size オプション
    let max_body_size: usize = noargs::opt("max-body-size")
        .doc("Maximum request body size in bytes")
        .default("10485760")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --permissive-images フラグ
    let permissive_images: bool = noargs::flag("permissive-images")
        .doc("Accept uploads whose image format cannot be detected")
        .take(&mut args)
        .is_present();

    // 未知の引数があればエラー、ヘルプが返されたら表示
    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        std::process::exit(0);
    }

    Ok(ServerOptions {
        port,
        max_body_size,
        permissive_images,
    })
}

async fn handle_client(
    mut stream: TcpStream,
    peer_addr: SocketAddr,
    config: &UploadConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    println!("Connection from {}", peer_addr);

    let mut decoder = RequestDecoder::with_limits(DecoderLimits {
        max_buffer_size: config
            .limits
            .max_body_size
            .saturating_add(HEADER_BUFFER_SIZE),
        max_body_size: config.limits.max_body_size,
        ..Default::default()
    });
    let mut buf = [0u8; 8192];

    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            println!("Connection closed by {}", peer_addr);
            break;
        }

        if let Err(e) = decoder.feed(&buf[..n]) {
            return reject(&mut stream, peer_addr, &e).await;
        }

        loop {
            let request = match decoder.decode() {
                Ok(Some(request)) => request,
                Ok(None) => break,
                Err(e) => return reject(&mut stream, peer_addr, &e).await,
            };

            println!(
                "{} {} {} from {}",
                request.method, request.uri, request.version, peer_addr
            );

            let response = build_response(&request, config);
            println!(
                "{} {} -> {} {}",
                request.method, request.uri, response.status_code, response.reason_phrase
            );
            stream.write_all(&response.encode()).await?;

            if !request.is_keep_alive() {
                println!("Connection close requested by {}", peer_addr);
                return Ok(());
            }
        }
    }

    Ok(())
}

/// 読み込めなかったリクエストにエラーを返して接続を閉じる
async fn reject(
    stream: &mut TcpStream,
    peer_addr: SocketAddr,
    error: &shiguredo_http11::Error,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    eprintln!("Rejected request from {}: {}", peer_addr, error);
    let response = decode_error_response(error).header("Connection", "close");
    stream.write_all(&response.encode()).await?;
    Ok(())
}

fn decode_error_response(error: &shiguredo_http11::Error) -> Response {
    match error {
        shiguredo_http11::Error::BodyTooLarge { .. }
        | shiguredo_http11::Error::BufferOverflow { .. } => with_cors(json_error(
            413,
            "Payload Too Large",
            &error.to_string(),
        )),
        _ => with_cors(json_error(400, "Bad Request", &error.to_string())),
    }
}

fn build_response(request: &Request, config: &UploadConfig) -> Response {
    let path = request.uri.split('?').next().unwrap_or_default();

    let response = match (request.method.as_str(), path) {
        ("OPTIONS", _) => Response::new(204, "No Content"),
        ("POST", "/api/photos") => upload_photo(request, config),
        (_, "/api/photos") => json_error(405, "Method Not Allowed", "method not allowed")
            .header("Allow", ALLOW_METHODS),
        _ => json_error(404, "Not Found", "not found"),
    };

    with_cors(response)
}

fn upload_photo(request: &Request, config: &UploadConfig) -> Response {
    let form = match request.form_data(&config.limits) {
        Ok(form) => form,
        Err(e) if e.is_body_too_large() => {
            return json_error(413, "Payload Too Large", &e.to_string());
        }
        Err(e) => return json_error(400, "Bad Request", &e.to_string()),
    };

    let Some(photo) = form.files().next() else {
        return json_error(400, "Bad Request", "No photo file data found");
    };

    let format = match validate_image(photo.data(), config.image_policy) {
        Ok(format) => format,
        Err(e) => return json_error(400, "Bad Request", &e.to_string()),
    };

    let content_type = photo
        .content_type()
        .or(format.map(|format| format.mime_type()))
        .unwrap_or("application/octet-stream");

    // 同名のフィールドは最初の値を使う
    let mut fields = BTreeMap::new();
    for (name, value) in form.fields() {
        fields.entry(name).or_insert(value);
    }

    let body = nojson::json(|f| {
        f.object(|f| {
            f.member("fileName", photo.file_name())?;
            f.member("contentType", content_type)?;
            f.member("size", photo.len())?;
            f.member("format", format.map(|format| format.extension()))?;
            f.member("fields", &fields)
        })
    })
    .to_string();

    Response::new(200, "OK")
        .header("Content-Type", "application/json")
        .body(body.into_bytes())
}

fn json_error(status_code: u16, reason_phrase: &str, message: &str) -> Response {
    let body = nojson::json(|f| f.object(|f| f.member("error", message))).to_string();
    Response::new(status_code, reason_phrase)
        .header("Content-Type", "application/json")
        .body(body.into_bytes())
}

fn with_cors(response: Response) -> Response {
    response
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiguredo_form_data::FormDataBuilder;

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00];

    fn config(image_policy: ImagePolicy) -> UploadConfig {
        UploadConfig {
            limits: FormDataLimits::default(),
            image_policy,
        }
    }

    fn upload(builder: FormDataBuilder) -> Request {
        Request::new("POST", "/api/photos")
            .header("Content-Type", &builder.content_type())
            .body(builder.build())
    }

    fn body_text(response: &Response) -> &str {
        std::str::from_utf8(&response.body).unwrap()
    }

    fn assert_cors(response: &Response) {
        assert_eq!(response.get_header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(
            response.get_header("Access-Control-Allow-Methods"),
            Some(ALLOW_METHODS)
        );
        assert_eq!(
            response.get_header("Access-Control-Allow-Headers"),
            Some(ALLOW_HEADERS)
        );
    }

    #[test]
    fn test_upload_photo() {
        let request = upload(
            FormDataBuilder::with_boundary("upload")
                .text_field("caption", "kitchen")
                .text_field("homeId", "home-1")
                .file_field("photo", "k.png", "image/png", PNG),
        );

        let response = build_response(&request, &config(ImagePolicy::Strict));
        assert_eq!(response.status_code, 200);
        assert_cors(&response);

        let text = body_text(&response);
        assert!(nojson::RawJson::parse(text).is_ok());
        assert!(text.contains(r#""fileName":"k.png""#));
        assert!(text.contains(r#""contentType":"image/png""#));
        assert!(text.contains(r#""size":9"#));
        assert!(text.contains(r#""format":"png""#));
        assert!(text.contains(r#""caption":"kitchen""#));
        assert!(text.contains(r#""homeId":"home-1""#));
    }

    #[test]
    fn test_upload_without_file() {
        let request = upload(FormDataBuilder::with_boundary("upload").text_field("caption", "x"));

        let response = build_response(&request, &config(ImagePolicy::Strict));
        assert_eq!(response.status_code, 400);
        assert_cors(&response);
        assert!(body_text(&response).contains("No photo file data found"));
    }

    #[test]
    fn test_upload_unrecognized_image() {
        let builder = FormDataBuilder::with_boundary("upload").file_field(
            "photo",
            "notes.bin",
            "application/octet-stream",
            b"not an image",
        );

        let response = build_response(&upload(builder.clone()), &config(ImagePolicy::Strict));
        assert_eq!(response.status_code, 400);
        assert!(body_text(&response).contains("unrecognized image format"));

        let response = build_response(&upload(builder), &config(ImagePolicy::Permissive));
        assert_eq!(response.status_code, 200);
        let text = body_text(&response);
        assert!(text.contains(r#""format":null"#));
        assert!(text.contains(r#""contentType":"application/octet-stream""#));
    }

    #[test]
    fn test_upload_not_form_data() {
        let request = Request::new("POST", "/api/photos")
            .header("Content-Type", "application/json")
            .body(b"{}".to_vec());

        let response = build_response(&request, &config(ImagePolicy::Strict));
        assert_eq!(response.status_code, 400);
        assert_cors(&response);
    }

    #[test]
    fn test_upload_too_large() {
        let request = upload(
            FormDataBuilder::with_boundary("upload").file_field("photo", "k.png", "image/png", PNG),
        );
        let config = UploadConfig {
            limits: FormDataLimits::default().with_max_body_size(16),
            image_policy: ImagePolicy::Strict,
        };

        let response = build_response(&request, &config);
        assert_eq!(response.status_code, 413);
        assert_cors(&response);
    }

    #[test]
    fn test_options() {
        let request = Request::new("OPTIONS", "/api/photos");
        let response = build_response(&request, &config(ImagePolicy::Strict));
        assert_eq!(response.status_code, 204);
        assert!(response.body.is_empty());
        assert_cors(&response);
    }

    #[test]
    fn test_routes() {
        let config = config(ImagePolicy::Strict);

        let response = build_response(&Request::new("GET", "/api/photos"), &config);
        assert_eq!(response.status_code, 405);
        assert_eq!(response.get_header("Allow"), Some(ALLOW_METHODS));

        let response = build_response(&Request::new("POST", "/api/homes"), &config);
        assert_eq!(response.status_code, 404);
        assert_cors(&response);
    }

    #[test]
    fn test_decode_error_response() {
        let response = decode_error_response(&shiguredo_http11::Error::BodyTooLarge {
            size: 11,
            limit: 10,
        });
        assert_eq!(response.status_code, 413);
        assert_cors(&response);

        let response =
            decode_error_response(&shiguredo_http11::Error::InvalidData("bad".to_string()));
        assert_eq!(response.status_code, 400);
    }
}
