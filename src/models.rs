use axum::extract::Multipart;
use serde::{Deserialize, Serialize};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    uploads::{UploadStore, UploadedImage},
};

/// A movie as it travels over the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self { id: m.id, name: m.name, kind: m.kind, rating: m.rating, image_url: m.image_url }
    }
}

/// The four mutable columns, already coerced and ready to store.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieFields {
    pub name: String,
    pub kind: Option<String>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteMode {
    Create,
    Update,
}

/// Raw multipart payload of a create or update request.
#[derive(Clone, Debug, Default)]
pub struct MovieForm {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub rating: Option<String>,
    pub image_url_link: Option<String>,
    pub current_image_url: Option<String>,
    pub image: Option<UploadedImage>,
}

impl MovieForm {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = MovieForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "image" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                // An untouched file input still sends an empty, unnamed part.
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.image = Some(UploadedImage { file_name, bytes: bytes.to_vec() });
                continue;
            }

            let slot = match name.as_str() {
                "name" => &mut form.name,
                "type" => &mut form.kind,
                "rating" => &mut form.rating,
                "imageUrlLink" => &mut form.image_url_link,
                "currentImageUrl" => &mut form.current_image_url,
                _ => continue,
            };
            *slot = Some(field.text().await?);
        }

        Ok(form)
    }

    /// Checks the request without touching disk or database.
    pub fn validate(self, mode: WriteMode) -> AppResult<MovieDraft> {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(AppError::validation("Movie name is required")),
        };
        let rating = parse_rating(self.rating.as_deref())?;

        Ok(MovieDraft {
            name,
            kind: self.kind.filter(|k| !k.is_empty()),
            rating,
            image: self.image,
            image_url_link: self.image_url_link,
            current_image_url: match mode {
                WriteMode::Create => None,
                WriteMode::Update => self.current_image_url,
            },
        })
    }
}

/// A validated form whose image has not been resolved yet.
#[derive(Debug)]
pub struct MovieDraft {
    pub name: String,
    pub kind: Option<String>,
    pub rating: Option<f64>,
    pub image: Option<UploadedImage>,
    pub image_url_link: Option<String>,
    pub current_image_url: Option<String>,
}

impl MovieDraft {
    /// Stores the uploaded file, if any, and settles the final `image_url`.
    pub async fn into_fields(self, uploads: &UploadStore) -> std::io::Result<MovieFields> {
        let uploaded = match &self.image {
            Some(image) => Some(uploads.save(image).await?),
            None => None,
        };

        Ok(MovieFields {
            name: self.name,
            kind: self.kind,
            rating: self.rating,
            image_url: resolve_image_url(uploaded, self.image_url_link, self.current_image_url),
        })
    }
}

/// Absent or blank means no rating. Anything else must parse as a finite number.
pub fn parse_rating(raw: Option<&str>) -> AppResult<Option<f64>> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(AppError::validation("Rating must be a number")),
    }
}

/// Picks the stored image reference: fresh upload, then a typed link, then the
/// previously stored value. Empty strings count as absent.
pub fn resolve_image_url(
    uploaded: Option<String>,
    link: Option<String>,
    current: Option<String>,
) -> Option<String> {
    let present = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.is_empty());
    if uploaded.is_some() {
        uploaded
    } else if present(&link) {
        link
    } else if present(&current) {
        current
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn upload_beats_link_and_current() {
        let url = resolve_image_url(s("/uploads/new.jpg"), s("https://x/y.png"), s("/uploads/old.jpg"));
        assert_eq!(url.as_deref(), Some("/uploads/new.jpg"));
    }

    #[test]
    fn link_beats_current() {
        let url = resolve_image_url(None, s("https://x/y.png"), s("/uploads/old.jpg"));
        assert_eq!(url.as_deref(), Some("https://x/y.png"));
    }

    #[test]
    fn empty_link_falls_back_to_current() {
        assert_eq!(
            resolve_image_url(None, s(""), s("/uploads/x.jpg")).as_deref(),
            Some("/uploads/x.jpg")
        );
        assert_eq!(resolve_image_url(None, s(""), s("")), None);
        assert_eq!(resolve_image_url(None, None, None), None);
    }

    #[test]
    fn rating_coercion() {
        assert_eq!(parse_rating(None).unwrap(), None);
        assert_eq!(parse_rating(Some("")).unwrap(), None);
        assert_eq!(parse_rating(Some("   ")).unwrap(), None);
        assert_eq!(parse_rating(Some("8.5")).unwrap(), Some(8.5));
        assert_eq!(parse_rating(Some(" 7 ")).unwrap(), Some(7.0));
        assert_eq!(parse_rating(Some("-3")).unwrap(), Some(-3.0));
    }

    #[test]
    fn rating_rejects_garbage() {
        for raw in ["ten", "NaN", "inf", "8,5"] {
            let err = parse_rating(Some(raw)).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{raw}");
        }
    }

    #[test]
    fn validate_requires_name() {
        let missing = MovieForm::default().validate(WriteMode::Create).unwrap_err();
        assert_eq!(missing.to_string(), "Movie name is required");

        let blank = MovieForm { name: s("  "), ..Default::default() };
        assert!(blank.validate(WriteMode::Create).is_err());
    }

    #[test]
    fn create_ignores_current_image() {
        let form = MovieForm {
            name: s("Ran"),
            kind: s(""),
            current_image_url: s("/uploads/old.jpg"),
            ..Default::default()
        };
        let draft = form.clone().validate(WriteMode::Create).unwrap();
        assert_eq!(draft.kind, None);
        assert_eq!(draft.current_image_url, None);

        let draft = form.validate(WriteMode::Update).unwrap();
        assert_eq!(draft.current_image_url.as_deref(), Some("/uploads/old.jpg"));
    }

    #[test]
    fn serializes_type_key() {
        let movie = Movie { id: 1, name: "Ran".into(), kind: s("1985"), rating: None, image_url: None };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["type"], "1985");
        assert!(json["rating"].is_null());
    }
}
