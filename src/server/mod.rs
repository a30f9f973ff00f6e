use crate::cache::MappingCache;
use crate::config::ParecerConfig;
use crate::guide::{GuideContext, GuideEngine};
use crate::mapping::{ColumnLayout as InternalLayout, Mapping, StudentRoster};
use crate::resolve::{
    fetch_document, is_available, resolve_for_student, Document, FileKind as InternalFileKind,
};
use tonic::{Request, Response, Status};
use tracing::{debug, warn};

mod cors;

pub use cors::is_origin_allowed;

// Import generated protobuf types
pub mod proto {
    tonic::include_proto!("parecer");
}

use proto::parecer_daemon_server::ParecerDaemon;
use proto::*;

const NO_MATCH_MESSAGE: &str =
    "No documents found for this name. Check that the spreadsheet has been updated.";

pub struct ParecerDaemonService {
    config: ParecerConfig,
    cache: MappingCache,
    guide: GuideEngine,
}

impl ParecerDaemonService {
    pub fn new(config: ParecerConfig, guide: GuideEngine) -> Self {
        let cache = MappingCache::new(config.sheet_path.clone(), config.csv_delimiter_byte());
        Self {
            config,
            cache,
            guide,
        }
    }
}

#[tonic::async_trait]
impl ParecerDaemon for ParecerDaemonService {
    async fn list_students(
        &self,
        _request: Request<ListStudentsRequest>,
    ) -> Result<Response<ListStudentsResponse>, Status> {
        match self.cache.current().await {
            Ok(mapping) => {
                let roster = StudentRoster::from_entries(&mapping.entries);
                Ok(Response::new(ListStudentsResponse {
                    success: true,
                    error: String::new(),
                    students: roster.into_names(),
                    mapping: Some(mapping_info_to_proto(&mapping)),
                }))
            }
            Err(e) => Ok(Response::new(ListStudentsResponse {
                success: false,
                error: e.to_string(),
                students: vec![],
                mapping: None,
            })),
        }
    }

    async fn get_student_files(
        &self,
        request: Request<GetStudentFilesRequest>,
    ) -> Result<Response<GetStudentFilesResponse>, Status> {
        let req = request.into_inner();

        let mapping = match self.cache.current().await {
            Ok(mapping) => mapping,
            Err(e) => {
                return Ok(Response::new(GetStudentFilesResponse {
                    success: false,
                    error: e.to_string(),
                    files: vec![],
                    message: String::new(),
                }))
            }
        };

        let resolved =
            resolve_for_student(&mapping.entries, &req.student_name, &self.config.documents_dir);
        debug!(student = %req.student_name, files = resolved.len(), "Resolved student files");

        let message = if resolved.is_empty() {
            NO_MATCH_MESSAGE.to_string()
        } else {
            String::new()
        };

        let files = resolved
            .iter()
            .enumerate()
            .map(|(i, file)| ResolvedFile {
                index: i as u32 + 1,
                kind: file_kind_to_proto(file.kind) as i32,
                label: file.label.clone(),
                target: file.target.clone(),
                available: is_available(file),
            })
            .collect();

        Ok(Response::new(GetStudentFilesResponse {
            success: true,
            error: String::new(),
            files,
            message,
        }))
    }

    async fn download_file(
        &self,
        request: Request<DownloadFileRequest>,
    ) -> Result<Response<DownloadFileResponse>, Status> {
        let req = request.into_inner();

        let mapping = match self.cache.current().await {
            Ok(mapping) => mapping,
            Err(e) => return Ok(Response::new(download_error(e.to_string()))),
        };

        let resolved =
            resolve_for_student(&mapping.entries, &req.student_name, &self.config.documents_dir);

        let file = match (req.index as usize)
            .checked_sub(1)
            .and_then(|i| resolved.get(i))
        {
            Some(file) => file,
            None => {
                return Ok(Response::new(download_error(format!(
                    "Document #{} not found for '{}'",
                    req.index, req.student_name
                ))))
            }
        };

        match fetch_document(file).await {
            Ok(Document::Link { url }) => Ok(Response::new(DownloadFileResponse {
                success: true,
                error: String::new(),
                kind: FileKind::Remote as i32,
                url,
                file_name: String::new(),
                content: vec![],
                sha256: String::new(),
            })),
            Ok(Document::Download {
                file_name,
                bytes,
                sha256,
            }) => Ok(Response::new(DownloadFileResponse {
                success: true,
                error: String::new(),
                kind: FileKind::Local as i32,
                url: String::new(),
                file_name,
                content: bytes,
                sha256,
            })),
            Err(e) => {
                warn!(student = %req.student_name, index = req.index, "Download failed: {}", e);
                Ok(Response::new(download_error(e.to_string())))
            }
        }
    }

    async fn refresh_mapping(
        &self,
        _request: Request<RefreshMappingRequest>,
    ) -> Result<Response<RefreshMappingResponse>, Status> {
        match self.cache.refresh().await {
            Ok(mapping) => Ok(Response::new(RefreshMappingResponse {
                success: true,
                error: String::new(),
                mapping: Some(mapping_info_to_proto(&mapping)),
            })),
            Err(e) => Ok(Response::new(RefreshMappingResponse {
                success: false,
                error: e.to_string(),
                mapping: None,
            })),
        }
    }

    async fn get_guide(
        &self,
        _request: Request<GetGuideRequest>,
    ) -> Result<Response<GetGuideResponse>, Status> {
        let context = GuideContext::from_config(&self.config);
        match self.guide.render(&context) {
            Ok(markdown) => Ok(Response::new(GetGuideResponse { markdown })),
            Err(e) => Err(Status::internal(e.to_string())),
        }
    }
}

// Helper functions for converting internal types to proto types

fn download_error(error: String) -> DownloadFileResponse {
    DownloadFileResponse {
        success: false,
        error,
        kind: FileKind::Unspecified as i32,
        url: String::new(),
        file_name: String::new(),
        content: vec![],
        sha256: String::new(),
    }
}

fn file_kind_to_proto(kind: InternalFileKind) -> FileKind {
    match kind {
        InternalFileKind::Remote => FileKind::Remote,
        InternalFileKind::Local => FileKind::Local,
    }
}

fn mapping_info_to_proto(mapping: &Mapping) -> MappingInfo {
    MappingInfo {
        entry_count: mapping.entries.len() as u32,
        loaded_at: mapping.loaded_at.clone(),
        layout: match mapping.layout {
            InternalLayout::Headered { .. } => ColumnLayout::Headered as i32,
            InternalLayout::Positional => ColumnLayout::Positional as i32,
        },
    }
}
