use serde_json::Value;

use super::validate::{FromPayload, Payload, Positive, ValidationFailure};

/// Metadata for a file already placed in storage.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadMediaFileInput {
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub file_path: String,
}

impl FromPayload for UploadMediaFileInput {
    fn from_payload(value: &Value) -> Result<Self, ValidationFailure> {
        let mut p = Payload::new(value)?;
        let filename = p.required::<String>("filename", &[]);
        let original_name = p.required::<String>("original_name", &[]);
        let mime_type = p.required::<String>("mime_type", &[]);
        let file_size = p.required::<i64>("file_size", &[&Positive]);
        let file_path = p.required::<String>("file_path", &[]);

        p.finish(|| {
            Some(Self {
                filename: filename?,
                original_name: original_name?,
                mime_type: mime_type?,
                file_size: file_size?,
                file_path: file_path?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_size_must_be_a_positive_integer() {
        let body = json!({
            "filename": "a1b2.png",
            "original_name": "flood.png",
            "mime_type": "image/png",
            "file_size": 0,
            "file_path": "/media/a1b2.png"
        });
        let err = UploadMediaFileInput::from_payload(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["file_size"]);
    }

    #[test]
    fn files_past_two_gibibytes_are_accepted() {
        let body = json!({
            "filename": "survey.mp4",
            "original_name": "drone-survey.mp4",
            "mime_type": "video/mp4",
            "file_size": 5_368_709_120i64,
            "file_path": "/media/survey.mp4"
        });
        let input = UploadMediaFileInput::from_payload(&body).unwrap();
        assert_eq!(input.file_size, 5_368_709_120);
    }
}
