//! ImageKit Upload Client
//!
//! Upload API へのHTTPリクエスト（multipart/form-data）

use anyhow::{Context, Result};
use log::debug;
use reqwest::multipart::{Form, Part};

use super::models::{ErrorResponse, UploadResponse};
use super::retry::{error_chain_to_string, is_retryable_error, is_retryable_status};
use crate::adapter::config::Config;
use crate::domain::repositories::media_repository::{
    Payload, UploadError, UploadRequest, UploadedMedia,
};

/// ImageKit Upload API クライアント
///
/// 秘密鍵をユーザー名、空パスワードとしたBasic認証を使う
pub struct ImageKitClient {
    http: reqwest::Client,
    upload_endpoint: String,
    private_key: String,
}

impl ImageKitClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            upload_endpoint: config.upload_endpoint.clone(),
            private_key: config.private_key.clone(),
        })
    }

    pub fn upload_endpoint(&self) -> &str {
        &self.upload_endpoint
    }

    /// ファイルをアップロードする
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn upload(&self, request: &UploadRequest) -> Result<UploadedMedia, UploadError> {
        debug!(
            "POST {} ({} {} bytes)",
            self.upload_endpoint,
            request.payload.mode(),
            request.payload.len()
        );

        let response = self
            .http
            .post(&self.upload_endpoint)
            .basic_auth(&self.private_key, Some(""))
            .multipart(build_form(request))
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| transport_error(&e))?;

        parse_upload_response(status, &body)
    }
}

/// ファイル本体以外のフォームフィールド
pub fn form_fields(request: &UploadRequest) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("fileName", request.file_name.clone()),
        ("folder", request.folder.clone()),
        ("useUniqueFileName", request.use_unique_file_name.to_string()),
    ];

    if !request.tags.is_empty() {
        fields.push(("tags", request.tags.join(",")));
    }

    fields
}

/// multipart フォームを組み立てる
///
/// ペイロードは `Bytes` の共有で渡すので、再送時もファイル内容を複製しない
fn build_form(request: &UploadRequest) -> Form {
    let body = request.payload.body();
    let length = body.len() as u64;

    let file = match &request.payload {
        Payload::Binary(_) => {
            Part::stream_with_length(body, length).file_name(request.file_name.clone())
        }
        Payload::Encoded(_) => Part::stream_with_length(body, length),
    };
    let form = Form::new().part("file", file);

    form_fields(request)
        .into_iter()
        .fold(form, |form, (name, value)| form.text(name, value))
}

/// ステータスコードとレスポンス本文から結果を組み立てる
pub fn parse_upload_response(status: u16, body: &str) -> Result<UploadedMedia, UploadError> {
    if (200..300).contains(&status) {
        return serde_json::from_str::<UploadResponse>(body)
            .map(UploadedMedia::from)
            .map_err(|e| {
                UploadError::new(format!("Invalid upload response: {}", e)).with_status(status)
            });
    }

    let error = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => UploadError::new(parsed.message).with_help(parsed.help),
        Err(_) if body.trim().is_empty() => UploadError::new(format!("HTTP {}", status)),
        Err(_) => UploadError::new(format!("HTTP {}: {}", status, body.trim())),
    };

    Err(error
        .with_status(status)
        .retryable(is_retryable_status(status)))
}

fn transport_error(e: &reqwest::Error) -> UploadError {
    let message = error_chain_to_string(e);
    let retryable = e.is_timeout() || e.is_connect() || is_retryable_error(&message);
    UploadError::new(message).retryable(retryable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(payload: Payload, tags: Vec<&str>) -> UploadRequest {
        UploadRequest {
            payload,
            file_name: "cam1.mp4".to_string(),
            folder: "/videos".to_string(),
            use_unique_file_name: false,
            tags: tags.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_form_fields() {
        let fields = form_fields(&request(
            Payload::encoded("aGk="),
            vec!["website-asset", "video"],
        ));

        assert_eq!(
            fields,
            vec![
                ("fileName", "cam1.mp4".to_string()),
                ("folder", "/videos".to_string()),
                ("useUniqueFileName", "false".to_string()),
                ("tags", "website-asset,video".to_string()),
            ]
        );
    }

    #[test]
    fn test_form_fields_without_tags() {
        let fields = form_fields(&request(Payload::binary(vec![1, 2, 3]), vec![]));
        assert!(fields.iter().all(|(name, _)| *name != "tags"));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_parse_success() {
        let media = parse_upload_response(
            200,
            r#"{"fileId":"abc","url":"https://ik.imagekit.io/demo/videos/cam1.mp4","filePath":"/videos/cam1.mp4"}"#,
        )
        .unwrap();

        assert_eq!(media.url, "https://ik.imagekit.io/demo/videos/cam1.mp4");
        assert_eq!(media.file_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_parse_success_with_invalid_body() {
        let error = parse_upload_response(200, "<html>").unwrap_err();
        assert!(error.message.starts_with("Invalid upload response"));
        assert!(!error.retryable);
    }

    #[test]
    fn test_parse_api_error_keeps_message_and_help() {
        let error = parse_upload_response(
            400,
            r#"{"message":"A file with this name already exists","help":"Set overwriteFile"}"#,
        )
        .unwrap_err();

        assert_eq!(error.message, "A file with this name already exists");
        assert_eq!(error.help.as_deref(), Some("Set overwriteFile"));
        assert_eq!(error.status, Some(400));
        assert!(!error.retryable);
    }

    #[test]
    fn test_parse_rate_limited_is_retryable() {
        let error =
            parse_upload_response(429, r#"{"message":"Too many requests"}"#).unwrap_err();
        assert!(error.retryable);
        assert_eq!(error.status, Some(429));
    }

    #[test]
    fn test_parse_any_server_error_is_retryable() {
        for status in [501, 507, 520, 524] {
            let error = parse_upload_response(status, "").unwrap_err();
            assert!(error.retryable, "{} should be retryable", status);
            assert_eq!(error.message, format!("HTTP {}", status));
        }
    }

    #[test]
    fn test_build_form_twice_keeps_payload() {
        let payload = Payload::binary(vec![9u8; 4096]);
        let request = request(payload.clone(), vec!["website-asset"]);

        let first = build_form(&request);
        let second = build_form(&request);

        assert_ne!(first.boundary(), second.boundary());
        assert_eq!(request.payload, payload);
        assert_eq!(request.payload.body().as_ptr(), payload.body().as_ptr());
    }

    #[test]
    fn test_parse_non_json_error_body() {
        let error = parse_upload_response(502, "Bad Gateway").unwrap_err();
        assert_eq!(error.message, "HTTP 502: Bad Gateway");
        assert!(error.retryable);
    }

    #[test]
    fn test_parse_empty_error_body() {
        let error = parse_upload_response(401, "").unwrap_err();
        assert_eq!(error.message, "HTTP 401");
        assert!(!error.retryable);
    }

    #[test]
    fn test_client_new() {
        let config = Config {
            private_key: "private_key".to_string(),
            ..Config::default()
        };
        let client = ImageKitClient::new(&config).unwrap();
        assert_eq!(
            client.upload_endpoint(),
            "https://upload.imagekit.io/api/v1/files/upload"
        );
    }
}
