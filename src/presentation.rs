use crate::data_models::ProductRecord;

/// Substitution table applied to a rating string before it is shown.
///
/// Ratings come back in the marketplace's own locale ("4,5 de 5 estrelas");
/// each table swaps the decimal separator and the trailing phrase once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingLocale {
    pub decimal: (&'static str, &'static str),
    pub phrase: (&'static str, &'static str),
}

impl RatingLocale {
    /// Leaves ratings exactly as the marketplace wrote them.
    pub const SOURCE: RatingLocale = RatingLocale {
        decimal: (",", ","),
        phrase: ("de 5 estrelas", "de 5 estrelas"),
    };

    pub const ENGLISH: RatingLocale = RatingLocale {
        decimal: (",", "."),
        phrase: ("de 5 estrelas", "out of 5 stars"),
    };

    pub fn localize(&self, rating: &str) -> String {
        let (from, to) = self.decimal;
        let rating = rating.replacen(from, to, 1);
        let (from, to) = self.phrase;
        rating.replacen(from, to, 1)
    }
}

/// Plain-text card for terminal output.
pub fn render_card(record: &ProductRecord, locale: &RatingLocale) -> String {
    format!(
        "{}\n  rating:  {}\n  reviews: {} reviews\n  image:   {}",
        record.title,
        locale.localize(&record.rating),
        record.reviews,
        record.image_url
    )
}

pub fn render_cards(records: &[ProductRecord], locale: &RatingLocale) -> String {
    if records.is_empty() {
        return "No products found.".to_string();
    }
    records
        .iter()
        .map(|r| render_card(r, locale))
        .collect::<Vec<String>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rating: &str) -> ProductRecord {
        ProductRecord::new(
            "Echo Dot".to_string(),
            rating.to_string(),
            2500,
            "https://m.media/echo.jpg".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn english_rewrites_separator_and_phrase() {
        assert_eq!(
            RatingLocale::ENGLISH.localize("4,5 de 5 estrelas"),
            "4.5 out of 5 stars"
        );
    }

    #[test]
    fn only_the_first_occurrence_is_replaced() {
        assert_eq!(RatingLocale::ENGLISH.localize("4,5,1"), "4.5,1");
    }

    #[test]
    fn sentinel_passes_through() {
        assert_eq!(RatingLocale::ENGLISH.localize("N/A"), "N/A");
        assert_eq!(RatingLocale::SOURCE.localize("4,5 de 5 estrelas"), "4,5 de 5 estrelas");
    }

    #[test]
    fn card_shows_all_fields() {
        let card = render_card(&record("4,8 de 5 estrelas"), &RatingLocale::ENGLISH);
        assert!(card.starts_with("Echo Dot\n"));
        assert!(card.contains("4.8 out of 5 stars"));
        assert!(card.contains("2500 reviews"));
        assert!(card.contains("https://m.media/echo.jpg"));
    }

    #[test]
    fn empty_list_renders_a_notice() {
        assert_eq!(render_cards(&[], &RatingLocale::SOURCE), "No products found.");
    }
}
