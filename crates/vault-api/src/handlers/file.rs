//! File handlers: upload, download, list, delete.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;

use vault_core::error::AppError;
use vault_storage::mime::mime_from_filename;

use crate::dto::response::{DeleteResponse, FileListResponse, UploadResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /upload (multipart field `file`)
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| AppError::validation(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| AppError::validation("The file field has no filename"))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;

        let record = state
            .gateway
            .upload(auth.username(), &filename, data)
            .await?;
        return Ok(Json(UploadResponse {
            filename: record.filename,
        }));
    }

    Err(AppError::validation("Missing multipart field 'file'").into())
}

/// GET /download/{filename}
pub async fn download(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let download = state.gateway.download(auth.username(), &filename).await?;
    let name = download.file.filename;

    let disposition = HeaderValue::from_str(&content_disposition(&name))
        .map_err(|e| AppError::internal(format!("Bad Content-Disposition: {e}")))?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime_from_filename(&name))
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from(download.data))
        .map_err(|e| AppError::internal(format!("Response build error: {e}")))?;
    Ok(response)
}

/// GET /files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<FileListResponse>, ApiError> {
    let files = state.gateway.list(auth.username()).await?;
    Ok(Json(FileListResponse {
        files: files.into_iter().map(|f| f.filename).collect(),
    }))
}

/// DELETE /delete/{filename}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let record = state.gateway.delete(auth.username(), &filename).await?;
    Ok(Json(DeleteResponse {
        detail: format!("{} deleted", record.filename),
    }))
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987
/// `filename*` for the exact name.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    let mut encoded = String::with_capacity(filename.len());
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
