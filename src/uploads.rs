use std::{
    io,
    path::{Path, PathBuf},
};

use tracing::debug;

/// URL prefix under which stored images are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// A file part taken from a multipart request, held in memory until the
/// request has passed validation.
#[derive(Clone, Debug)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Writes uploaded images into one public directory under unique names.
#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub async fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persists `image` and returns its public path, e.g. `/uploads/1718000000000-42.jpg`.
    /// Content is stored as-is; no type or size checks happen here.
    pub async fn save(&self, image: &UploadedImage) -> io::Result<String> {
        let name = generate_file_name(&image.file_name);
        tokio::fs::write(self.dir.join(&name), &image.bytes).await?;
        debug!(file = %name, bytes = image.bytes.len(), "stored upload");
        Ok(format!("{UPLOADS_PREFIX}/{name}"))
    }
}

/// `<unix millis>-<random below 1e9><original extension>`.
pub fn generate_file_name(original: &str) -> String {
    let millis = jiff::Timestamp::now().as_millisecond();
    let suffix: u32 = rand::random_range(0..1_000_000_000);
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("{millis}-{suffix}{ext}")
}
