//! Routes of the mock node, answering the way a PermastoreIt node does

use crate::node::{NodeState, StoredFile};
use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_web::{get, post, web, HttpResponse, Result as ActixResult};
use common::digest::sha256_hex;
use common::{ErrorBody, FileMetadata, HealthReport, SearchHit, UploadResult, ZkProof};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info};

const NODE_ID: &str = "mock-node-1";

#[derive(MultipartForm)]
pub struct UploadForm {
    #[multipart(limit = "50MB")]
    pub file: TempFile,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub limit: Option<usize>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root)
        .service(status)
        .service(health)
        .service(upload)
        .service(download)
        .service(list_files)
        .service(file_info)
        .service(search)
        .service(zk_proof)
        .service(metrics);
}

fn not_found(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new(format!("{} not found", what)))
}

fn server_error<E: std::fmt::Display>(msg: &str, e: E) -> actix_web::Error {
    error!("{}: {}", msg, e);
    actix_web::error::ErrorInternalServerError(format!("{}: {}", msg, e))
}

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

#[get("/")]
async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({"message": "PermastoreIt node is running"}))
}

#[get("/status")]
async fn status(state: web::Data<NodeState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "online",
        "node_id": NODE_ID,
        "files_stored": state.files().len(),
        "uptime": 1.5,
    }))
}

#[get("/health")]
async fn health(state: web::Data<NodeState>) -> HttpResponse {
    let degraded = state.options.degraded;
    let mut components = BTreeMap::new();
    components.insert("storage".to_string(), true);
    components.insert("blockchain".to_string(), !degraded);
    components.insert("p2p".to_string(), true);

    HttpResponse::Ok().json(HealthReport {
        status: if degraded { "degraded" } else { "healthy" }.to_string(),
        components,
        node_id: Some(NODE_ID.to_string()),
        files_stored: Some(state.files().len() as u64),
        blockchain_length: Some(1),
        peers_connected: Some(0),
    })
}

#[post("/upload")]
async fn upload(
    MultipartForm(form): MultipartForm<UploadForm>,
    state: web::Data<NodeState>,
) -> ActixResult<HttpResponse> {
    let content = std::fs::read(form.file.file.path())
        .map_err(|e| server_error("Failed to read uploaded file", e))?;
    let filename = form
        .file
        .file_name
        .clone()
        .unwrap_or_else(|| "unnamed".to_string());
    let content_type = form
        .file
        .content_type
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let hash = sha256_hex(&content);

    info!("POST /upload - {} ({} bytes) -> {}", filename, content.len(), hash);

    let mut files = state.files();
    let duplicate = files.iter().any(|f| f.meta.hash == hash);
    let result = UploadResult {
        status: if duplicate { "duplicate" } else { "success" }.to_string(),
        hash: hash.clone(),
        size: content.len() as u64,
        content_type: Some(content_type.clone()),
        zkp_available: state.options.zkp_enabled,
        message: if duplicate {
            "File already exists".to_string()
        } else {
            "File stored".to_string()
        },
    };
    if duplicate {
        return Ok(HttpResponse::Ok().json(result));
    }

    files.push(StoredFile {
        meta: FileMetadata {
            hash,
            filename,
            size: content.len() as u64,
            content_type,
            timestamp: Some(now_secs()),
        },
        content,
    });
    Ok(HttpResponse::Created().json(result))
}

#[get("/download/{hash}")]
async fn download(path: web::Path<String>, state: web::Data<NodeState>) -> HttpResponse {
    let hash = path.into_inner();
    let files = state.files();
    match files.iter().find(|f| f.meta.hash == hash) {
        Some(file) => HttpResponse::Ok()
            .content_type(file.meta.content_type.clone())
            .body(file.content.clone()),
        None => not_found("File"),
    }
}

#[get("/files")]
async fn list_files(query: web::Query<ListQuery>, state: web::Data<NodeState>) -> HttpResponse {
    let files = state.files();
    let limit = query.limit.unwrap_or(usize::MAX);
    let listing: Vec<FileMetadata> = files
        .iter()
        .rev()
        .take(limit)
        .map(|f| f.meta.clone())
        .collect();
    HttpResponse::Ok().json(listing)
}

#[get("/file-info/{hash}")]
async fn file_info(path: web::Path<String>, state: web::Data<NodeState>) -> HttpResponse {
    let hash = path.into_inner();
    let files = state.files();
    match files.iter().find(|f| f.meta.hash == hash) {
        Some(file) => HttpResponse::Ok().json(&file.meta),
        None => not_found("File"),
    }
}

#[get("/search")]
async fn search(query: web::Query<SearchQuery>, state: web::Data<NodeState>) -> HttpResponse {
    let needle = query.query.to_lowercase();
    let files = state.files();
    let mut hits: Vec<SearchHit> = files
        .iter()
        .filter_map(|f| {
            let name = f.meta.filename.to_lowercase();
            if name == needle {
                Some((f, 1.0))
            } else if name.contains(&needle) {
                Some((f, 0.5))
            } else {
                None
            }
        })
        .map(|(f, similarity)| SearchHit {
            file: f.meta.clone(),
            similarity,
        })
        .collect();
    hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    hits.truncate(query.limit.unwrap_or(10));
    HttpResponse::Ok().json(hits)
}

#[get("/zk-proof/{hash}")]
async fn zk_proof(path: web::Path<String>, state: web::Data<NodeState>) -> HttpResponse {
    if !state.options.zkp_enabled {
        return HttpResponse::NotImplemented()
            .json(ErrorBody::new("ZKP functionality is not enabled on this node"));
    }
    let hash = path.into_inner();
    if !state.files().iter().any(|f| f.meta.hash == hash) {
        return not_found("File");
    }
    let challenge = sha256_hex(format!("challenge:{}", hash).as_bytes());
    HttpResponse::Ok().json(ZkProof {
        proof: sha256_hex(format!("{}:{}", hash, challenge).as_bytes()),
        challenge,
        algorithm: "sha256-commitment".to_string(),
        hash: Some(hash),
    })
}

#[get("/metrics")]
async fn metrics(state: web::Data<NodeState>) -> HttpResponse {
    if !state.options.metrics {
        return HttpResponse::NotFound().finish();
    }
    HttpResponse::Ok().json(json!({
        "uploads_total": state.files().len(),
        "avg_upload_ms": 3.2,
    }))
}
