//! Text normalization for search results.
//!
//! The search API returns titles and descriptions with highlight markup
//! (`<b>…</b>`), HTML entities and decorative punctuation. A [`Normalizer`]
//! runs an ordered list of [`TextTransform`] steps over each field:
//!
//! 1. [`TextTransform::StripTags`]
//! 2. [`TextTransform::StripEntities`]
//! 3. [`TextTransform::StripPunctuation`]
//! 4. [`TextTransform::CollapseWhitespace`]
//!
//! The pipeline is re-applied until the text stops changing, so normalizing
//! an already-normalized string returns it unchanged.

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::HarvestError;
use crate::models::{NormalizedRecord, RawItem};

/// Format of the `pubDate` field, e.g. `Mon, 02 Jan 2006 15:04:05 -0700`.
pub const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").unwrap());

/// A single cleanup step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTransform {
    /// Remove anything that looks like `<tag …>`.
    StripTags,
    /// Remove HTML entities. Non-breaking spaces become plain spaces.
    StripEntities,
    /// Remove quotation marks, brackets and decorative symbols. Sentence
    /// punctuation (`. , ! ? % - : /`) and `&` are kept.
    StripPunctuation,
    /// Replace whitespace runs with one space and trim both ends.
    CollapseWhitespace,
}

impl TextTransform {
    pub fn apply(&self, input: &str) -> String {
        match self {
            TextTransform::StripTags => TAG_RE.replace_all(input, "").into_owned(),
            TextTransform::StripEntities => ENTITY_RE
                .replace_all(input, |caps: &regex::Captures<'_>| match &caps[0] {
                    "&nbsp;" | "&#160;" | "&#xa0;" | "&#xA0;" => " ",
                    _ => "",
                })
                .into_owned(),
            TextTransform::StripPunctuation => {
                input.chars().filter(|c| !is_decorative(*c)).collect()
            }
            TextTransform::CollapseWhitespace => {
                input.split_whitespace().collect::<Vec<_>>().join(" ")
            }
        }
    }
}

fn is_decorative(c: char) -> bool {
    matches!(
        c,
        '"' | '\''
            | '`'
            | '<'
            | '>'
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '|'
            | '\\'
            | '^'
            | '~'
            | '*'
            | '#'
            | '@'
            | '“'
            | '”'
            | '‘'
            | '’'
            | '「'
            | '」'
            | '『'
            | '』'
            | '【'
            | '】'
            | '《'
            | '》'
            | '〈'
            | '〉'
            | '…'
            | '·'
            | '※'
            | '▶'
            | '▲'
            | '■'
            | '□'
            | '◆'
            | '◇'
            | '★'
            | '☆'
    )
}

/// An ordered text-cleanup pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    steps: Vec<TextTransform>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(vec![
            TextTransform::StripTags,
            TextTransform::StripEntities,
            TextTransform::StripPunctuation,
            TextTransform::CollapseWhitespace,
        ])
    }
}

impl Normalizer {
    pub fn new(steps: Vec<TextTransform>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[TextTransform] {
        &self.steps
    }

    /// Run the pipeline until the text reaches a fixed point.
    ///
    /// Every step only removes characters or turns whitespace into plain
    /// spaces, so the loop ends after a handful of passes.
    pub fn normalize(&self, input: &str) -> String {
        let mut current = self.apply_once(input);
        loop {
            let next = self.apply_once(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn apply_once(&self, input: &str) -> String {
        self.steps
            .iter()
            .fold(input.to_string(), |text, step| step.apply(&text))
    }

    /// Build a [`NormalizedRecord`] from a raw API item.
    ///
    /// # Errors
    ///
    /// [`HarvestError::MalformedResponse`] if `pubDate` does not match
    /// [`PUB_DATE_FORMAT`].
    pub fn normalize_item(&self, item: &RawItem) -> Result<NormalizedRecord, HarvestError> {
        Ok(NormalizedRecord {
            title: self.normalize(&item.title),
            description: self.normalize(&item.description),
            publish_date: parse_pub_date(&item.pub_date)?,
            link: item.link.clone(),
            original_link: item.original_link.clone(),
        })
    }
}

/// Parse a `pubDate` value into an offset-aware timestamp.
pub fn parse_pub_date(raw: &str) -> Result<DateTime<FixedOffset>, HarvestError> {
    DateTime::parse_from_str(raw.trim(), PUB_DATE_FORMAT).map_err(|e| {
        HarvestError::MalformedResponse(format!("unparsable pubDate {raw:?}: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use proptest::prelude::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            TextTransform::StripTags.apply("<b>Samsung</b> shares <i>rise</i>"),
            "Samsung shares rise"
        );
    }

    #[test]
    fn test_strip_entities() {
        assert_eq!(
            TextTransform::StripEntities.apply("&quot;Bull&quot;&nbsp;market &#39;24 &#x27;"),
            "Bull market 24 "
        );
        assert_eq!(TextTransform::StripEntities.apply("S&P 500"), "S&P 500");
    }

    #[test]
    fn test_strip_punctuation_keeps_sentence_marks() {
        assert_eq!(
            TextTransform::StripPunctuation.apply("[Breaking] \"KOSPI\" up 1.5%, analysts say: buy!"),
            "Breaking KOSPI up 1.5%, analysts say: buy!"
        );
        assert_eq!(TextTransform::StripPunctuation.apply("「주식」 시장…"), "주식 시장");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            TextTransform::CollapseWhitespace.apply("  a \t b\n\nc  "),
            "a b c"
        );
    }

    #[test]
    fn test_default_pipeline() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.normalize("  <b>주식</b> 시장, &quot;반등&quot;  세 \n"),
            "주식 시장, 반등 세"
        );
    }

    #[test]
    fn test_normalize_reaches_fixed_point() {
        // Removing the quote reassembles an entity; the second pass strips it.
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize("x &a\"mp; y"), "x y");
    }

    #[test]
    fn test_custom_pipeline_order() {
        let normalizer = Normalizer::new(vec![TextTransform::CollapseWhitespace]);
        assert_eq!(normalizer.steps(), &[TextTransform::CollapseWhitespace]);
        assert_eq!(normalizer.normalize(" <b>a</b>  b "), "<b>a</b> b");
    }

    #[test]
    fn test_parse_pub_date_with_offset() {
        let date = parse_pub_date("Mon, 02 Jan 2006 15:04:05 -0700").unwrap();
        assert_eq!(date.year(), 2006);
        assert_eq!(date.day(), 2);
        assert_eq!(date.hour(), 15);
        assert_eq!(date.offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_parse_pub_date_rejects_other_formats() {
        for raw in ["", "2006-01-02T15:04:05Z", "Mon, 02 Jan 2006"] {
            let err = parse_pub_date(raw).unwrap_err();
            assert!(matches!(err, HarvestError::MalformedResponse(_)), "{raw}");
        }
    }

    #[test]
    fn test_normalize_item() {
        let item = RawItem {
            title: "<b>반도체</b> 수출 &quot;역대 최대&quot;".to_string(),
            description: "<b>반도체</b>   수출이…".to_string(),
            pub_date: "Mon, 02 Jan 2006 15:04:05 +0900".to_string(),
            link: Some("https://n.news.example.com/1".to_string()),
            original_link: None,
            extra: Default::default(),
        };

        let record = Normalizer::default().normalize_item(&item).unwrap();
        assert_eq!(record.title, "반도체 수출 역대 최대");
        assert_eq!(record.description, "반도체 수출이");
        assert_eq!(record.publish_date.offset().local_minus_utc(), 9 * 3600);
        assert_eq!(record.link.as_deref(), Some("https://n.news.example.com/1"));
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(input in "\\PC{0,80}") {
            let normalizer = Normalizer::default();
            let once = normalizer.normalize(&input);
            let twice = normalizer.normalize(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_normalize_is_idempotent_on_markup(
            words in proptest::collection::vec("[a-zA-Z가-힣]{1,8}", 1..6),
        ) {
            let input = words
                .iter()
                .map(|w| format!("<b>{w}</b>&quot; "))
                .collect::<String>();
            let normalizer = Normalizer::default();
            let once = normalizer.normalize(&input);
            prop_assert_eq!(&once, &words.join(" "));
            prop_assert_eq!(normalizer.normalize(&once), once);
        }
    }
}
