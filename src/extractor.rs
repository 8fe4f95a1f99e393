use crate::data_models::{ProductRecord, RATING_NOT_AVAILABLE};
use crate::document::DocumentHandle;

/// Selectors and fallbacks used to turn a results page into records.
///
/// The upstream markup changes without notice, so everything site-specific
/// lives here and can be swapped without touching fetching or transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRules {
    pub container: String,
    pub title: String,
    pub rating: String,
    pub reviews: String,
    pub image: String,
    pub image_attribute: String,
    pub rating_fallback: String,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        ExtractionRules {
            container: "[data-component-type='s-search-result']".to_string(),
            title: "h2.a-text-normal".to_string(),
            rating: ".a-icon-alt".to_string(),
            reviews: ".a-size-base.s-underline-text".to_string(),
            image: ".s-image".to_string(),
            image_attribute: "src".to_string(),
            rating_fallback: RATING_NOT_AVAILABLE.to_string(),
        }
    }
}

/// Result of one extraction pass.
///
/// `candidates` counts every container that matched, including the ones
/// later dropped, so "page had no results markup" and "every result was
/// unusable" stay distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub candidates: usize,
    pub records: Vec<ProductRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordExtractor {
    rules: ExtractionRules,
}

impl RecordExtractor {
    pub fn new(rules: ExtractionRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ExtractionRules {
        &self.rules
    }

    pub fn extract<D: DocumentHandle>(&self, doc: &D) -> Extraction {
        let containers = doc.select_all(&self.rules.container);
        let candidates = containers.len();

        let records = containers
            .into_iter()
            .enumerate()
            .filter_map(|(position, container)| {
                let record = self.extract_record(doc, container);
                if record.is_none() {
                    log::debug!("dropping result #{position}: missing title or image");
                }
                record
            })
            .collect::<Vec<ProductRecord>>();

        Extraction {
            candidates,
            records,
        }
    }

    fn extract_record<'a, D: DocumentHandle>(
        &self,
        doc: &'a D,
        container: D::Element<'a>,
    ) -> Option<ProductRecord> {
        let title = extract_title(doc, container, &self.rules)?;
        let image_url = extract_image_url(doc, container, &self.rules)?;
        let rating = extract_rating(doc, container, &self.rules);
        let reviews = extract_reviews(doc, container, &self.rules);
        ProductRecord::new(title, rating, reviews, image_url)
    }
}

pub fn extract_title<'a, D: DocumentHandle>(
    doc: &'a D,
    container: D::Element<'a>,
    rules: &ExtractionRules,
) -> Option<String> {
    doc.select_one(&rules.title, container)
        .and_then(|el| doc.text_of(el))
}

pub fn extract_rating<'a, D: DocumentHandle>(
    doc: &'a D,
    container: D::Element<'a>,
    rules: &ExtractionRules,
) -> String {
    doc.select_one(&rules.rating, container)
        .and_then(|el| doc.text_of(el))
        .unwrap_or_else(|| rules.rating_fallback.clone())
}

pub fn extract_reviews<'a, D: DocumentHandle>(
    doc: &'a D,
    container: D::Element<'a>,
    rules: &ExtractionRules,
) -> u64 {
    doc.select_one(&rules.reviews, container)
        .and_then(|el| doc.text_of(el))
        .map(|text| parse_review_count(&text))
        .unwrap_or(0)
}

pub fn extract_image_url<'a, D: DocumentHandle>(
    doc: &'a D,
    container: D::Element<'a>,
    rules: &ExtractionRules,
) -> Option<String> {
    doc.select_one(&rules.image, container)
        .and_then(|el| doc.attribute_of(el, &rules.image_attribute))
}

/// Parse a review counter such as `"1.234"` or `"2,500"`.
///
/// Grouping separators are stripped, then the leading run of digits is read.
/// Anything without leading digits, or too large for a `u64`, counts as 0.
pub fn parse_review_count(text: &str) -> u64 {
    let cleaned = text.replace(['.', ','], "");
    let digits = cleaned
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>();
    digits.parse::<u64>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_count_strips_grouping_separators() {
        assert_eq!(parse_review_count("1.234"), 1234);
        assert_eq!(parse_review_count("2,500"), 2500);
        assert_eq!(parse_review_count("1.234.567"), 1234567);
        assert_eq!(parse_review_count("42"), 42);
    }

    #[test]
    fn review_count_reads_leading_digits_only() {
        assert_eq!(parse_review_count("1.234 avaliações"), 1234);
        assert_eq!(parse_review_count("  87"), 87);
    }

    #[test]
    fn review_count_never_fails() {
        assert_eq!(parse_review_count(""), 0);
        assert_eq!(parse_review_count("sem avaliações"), 0);
        assert_eq!(parse_review_count("(1.234)"), 0);
        assert_eq!(parse_review_count("-5"), 0);
        assert_eq!(parse_review_count("99999999999999999999999"), 0);
    }

    #[test]
    fn default_rules_target_the_search_result_markup() {
        let rules = ExtractionRules::default();
        assert_eq!(rules.container, "[data-component-type='s-search-result']");
        assert_eq!(rules.rating_fallback, "N/A");
        assert_eq!(rules.image_attribute, "src");
    }
}
