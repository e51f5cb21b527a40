//! Encrypted file endpoints
//!
//! All handlers run behind `JwtAuth` and only see the files of the
//! authenticated user. Content is opaque ciphertext; the server stores and
//! returns it byte for byte.

use actix_web::{web, HttpResponse};

use crate::dto::files::{DeleteResponse, FileInfo, FileListResponse, UploadResponse};
use crate::handlers::handle_domain_error;
use crate::middleware::auth::AuthContext;

use lb_core::repositories::{BlobMetaRepository, BlobStorage};
use lb_core::services::BlobService;

/// Handler for GET /api/v1/files
///
/// Lists the caller's files, newest first.
pub async fn list_files<S, M>(blobs: web::Data<BlobService<S, M>>, auth: AuthContext) -> HttpResponse
where
    S: BlobStorage + 'static,
    M: BlobMetaRepository + 'static,
{
    match blobs.list(auth.user_id).await {
        Ok(metas) => HttpResponse::Ok().json(FileListResponse {
            files: metas.into_iter().map(FileInfo::from).collect(),
        }),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/v1/files/{filename}
///
/// The raw request body is the file content. Uploading an existing name
/// replaces the content and keeps the original creation time.
pub async fn upload_file<S, M>(
    blobs: web::Data<BlobService<S, M>>,
    auth: AuthContext,
    filename: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse
where
    S: BlobStorage + 'static,
    M: BlobMetaRepository + 'static,
{
    match blobs.upload(auth.user_id, &filename, &body).await {
        Ok(meta) => HttpResponse::Ok().json(UploadResponse {
            success: true,
            file: FileInfo::from(meta),
        }),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/files/{filename}
pub async fn download_file<S, M>(
    blobs: web::Data<BlobService<S, M>>,
    auth: AuthContext,
    filename: web::Path<String>,
) -> HttpResponse
where
    S: BlobStorage + 'static,
    M: BlobMetaRepository + 'static,
{
    match blobs.download(auth.user_id, &filename).await {
        Ok(data) => HttpResponse::Ok()
            .content_type("application/octet-stream")
            .body(data),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/v1/files/{filename}
pub async fn delete_file<S, M>(
    blobs: web::Data<BlobService<S, M>>,
    auth: AuthContext,
    filename: web::Path<String>,
) -> HttpResponse
where
    S: BlobStorage + 'static,
    M: BlobMetaRepository + 'static,
{
    match blobs.delete(auth.user_id, &filename).await {
        Ok(()) => HttpResponse::Ok().json(DeleteResponse { success: true }),
        Err(error) => handle_domain_error(error),
    }
}
