use chrono::Utc;
use tracing::info;

use crate::auth::Actor;
use crate::database::models::{MediaFile, NewMediaFile};
use crate::error::ApiError;
use crate::schema::UploadMediaFileInput;
use crate::state::AppState;

/// Records metadata for a file already written to storage.
pub async fn upload_media_file(
    state: AppState,
    input: UploadMediaFileInput,
    uploaded_by: Actor,
) -> Result<MediaFile, ApiError> {
    let file = state
        .repos
        .media_files
        .create_media_file(NewMediaFile {
            filename: input.filename,
            original_name: input.original_name,
            mime_type: input.mime_type,
            file_size: input.file_size,
            file_path: input.file_path,
            uploaded_by: uploaded_by.id,
            created_at: Utc::now(),
        })
        .await?;

    info!(media_file_id = file.id, mime_type = %file.mime_type, size = file.file_size, "Media file recorded");
    Ok(file)
}

pub async fn get_media_files(state: AppState) -> Result<Vec<MediaFile>, ApiError> {
    Ok(state.repos.media_files.list_media_files().await?)
}
