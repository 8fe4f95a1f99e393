use serde::{Deserialize, Serialize};

pub const RATING_NOT_AVAILABLE: &str = "N/A";

/// One product card from a search results page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub title: String,
    pub rating: String,
    pub reviews: u64,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl ProductRecord {
    /// Returns `None` unless both `title` and `image_url` are non-blank.
    /// Both are stored trimmed.
    pub fn new(
        title: String,
        rating: String,
        reviews: u64,
        image_url: String,
    ) -> Option<ProductRecord> {
        let title = title.trim();
        let image_url = image_url.trim();
        if title.is_empty() || image_url.is_empty() {
            return None;
        }
        Some(ProductRecord {
            title: title.to_string(),
            rating,
            reviews,
            image_url: image_url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_requires_title_and_image() {
        assert!(ProductRecord::new("".into(), "N/A".into(), 0, "img.jpg".into()).is_none());
        assert!(ProductRecord::new("Kindle".into(), "N/A".into(), 0, "".into()).is_none());
        assert!(ProductRecord::new("Kindle".into(), "N/A".into(), 0, "img.jpg".into()).is_some());
    }

    #[test]
    fn whitespace_only_title_or_image_is_rejected() {
        assert!(ProductRecord::new("Kindle".into(), "N/A".into(), 0, "  \t ".into()).is_none());
        assert!(ProductRecord::new(" \n ".into(), "N/A".into(), 0, "img.jpg".into()).is_none());

        let record =
            ProductRecord::new(" Kindle ".into(), "N/A".into(), 0, " img.jpg\n".into()).unwrap();
        assert_eq!(record.title, "Kindle");
        assert_eq!(record.image_url, "img.jpg");
    }

    #[test]
    fn record_serializes_image_url_in_camel_case() {
        let record =
            ProductRecord::new("Kindle".into(), "4,7 de 5 estrelas".into(), 1234, "a.jpg".into())
                .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Kindle",
                "rating": "4,7 de 5 estrelas",
                "reviews": 1234,
                "imageUrl": "a.jpg",
            })
        );
    }
}
