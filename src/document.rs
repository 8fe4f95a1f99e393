use scraper::{ElementRef, Html, Selector};

/// Read-only view over a parsed markup tree.
///
/// The extractor only ever talks to this trait, so any HTML backend (or a
/// hand-built fake in tests) can sit behind it. None of the lookups fail:
/// anything that cannot be resolved comes back empty or `None`.
pub trait DocumentHandle {
    type Element<'a>: Copy
    where
        Self: 'a;

    /// All elements matching `selector`, in document order.
    fn select_all<'a>(&'a self, selector: &str) -> Vec<Self::Element<'a>>;

    /// First descendant of `within` matching `selector`.
    fn select_one<'a>(
        &'a self,
        selector: &str,
        within: Self::Element<'a>,
    ) -> Option<Self::Element<'a>>;

    /// Trimmed text content, `None` when there is no text at all.
    fn text_of<'a>(&'a self, element: Self::Element<'a>) -> Option<String>;

    fn attribute_of<'a>(&'a self, element: Self::Element<'a>, name: &str) -> Option<String>;
}

/// `DocumentHandle` backed by the `scraper` crate.
pub struct ScraperDocument {
    html: Html,
}

impl ScraperDocument {
    pub fn parse(raw_markup: &str) -> ScraperDocument {
        ScraperDocument {
            html: Html::parse_document(raw_markup),
        }
    }
}

fn compile(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            log::warn!("ignoring invalid selector {selector:?}: {e}");
            None
        }
    }
}

impl DocumentHandle for ScraperDocument {
    type Element<'a> = ElementRef<'a>;

    fn select_all<'a>(&'a self, selector: &str) -> Vec<ElementRef<'a>> {
        match compile(selector) {
            Some(selector) => self.html.select(&selector).collect(),
            None => Vec::new(),
        }
    }

    fn select_one<'a>(&'a self, selector: &str, within: ElementRef<'a>) -> Option<ElementRef<'a>> {
        let selector = compile(selector)?;
        within.select(&selector).next()
    }

    fn text_of<'a>(&'a self, element: ElementRef<'a>) -> Option<String> {
        let text = element.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    fn attribute_of<'a>(&'a self, element: ElementRef<'a>, name: &str) -> Option<String> {
        element.value().attr(name).map(|v| v.to_string())
    }
}
