//! Inline span markup shared by every annotator.
//!
//! Annotated text is plain text interspersed with
//! `<span class="CLASS">...</span>` wrappers. The class set is closed and
//! enumerated by [`SpanClass`]; the presentation layer keys its stylesheet on
//! these names.
//!
//! The [`Segments`] iterator walks annotated text back into `(class, text)`
//! pieces so terminal renderers can color it without a browser.

use serde::Serialize;

/// Opening tag prefix used by [`span`].
const SPAN_OPEN: &str = "<span class=\"";
/// Closing tag used by [`span`].
const SPAN_CLOSE: &str = "</span>";

/// Semantic class attached to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum SpanClass {
    SqlKeyword,
    SqlString,
    SqlNumber,
    SqlComment,
    JavaKeyword,
    JavaType,
    JavaMethod,
    JavaVariable,
    JavaComment,
    PlanKey,
    PlanValue,
    PlanTypeBad,
    PlanTypeGood,
    PlanIndex,
    PlanNull,
    PlanRowsBad,
    PlanRowsWarn,
    PlanRowsGood,
    PlanExtraWarn,
    PlanExtraGood,
    PlanRowHeader,
    PlanSeparator
}

/// Severity conveyed by a plan value class.
///
/// Ordered from least to most concerning so the worst severity of a report
/// is a plain `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    /// No judgement, rendered with the neutral value class
    Neutral,
    /// Efficient access path or small row estimate
    Good,
    /// Worth a look: filesort, temporary table, mid-sized row estimate
    Warn,
    /// Full table scan or large row estimate
    Bad
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Good => write!(f, "GOOD"),
            Self::Warn => write!(f, "WARN"),
            Self::Bad => write!(f, "BAD")
        }
    }
}

impl SpanClass {
    /// Every class, in stylesheet order.
    pub const ALL: [SpanClass; 22] = [
        Self::SqlKeyword,
        Self::SqlString,
        Self::SqlNumber,
        Self::SqlComment,
        Self::JavaKeyword,
        Self::JavaType,
        Self::JavaMethod,
        Self::JavaVariable,
        Self::JavaComment,
        Self::PlanKey,
        Self::PlanValue,
        Self::PlanTypeBad,
        Self::PlanTypeGood,
        Self::PlanIndex,
        Self::PlanNull,
        Self::PlanRowsBad,
        Self::PlanRowsWarn,
        Self::PlanRowsGood,
        Self::PlanExtraWarn,
        Self::PlanExtraGood,
        Self::PlanRowHeader,
        Self::PlanSeparator
    ];

    /// CSS class name as consumed by the presentation layer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SqlKeyword => "sql-keyword",
            Self::SqlString => "sql-string",
            Self::SqlNumber => "sql-number",
            Self::SqlComment => "sql-comment",
            Self::JavaKeyword => "java-keyword",
            Self::JavaType => "java-type",
            Self::JavaMethod => "java-method",
            Self::JavaVariable => "java-variable",
            Self::JavaComment => "java-comment",
            Self::PlanKey => "plan-key",
            Self::PlanValue => "plan-value",
            Self::PlanTypeBad => "plan-type-bad",
            Self::PlanTypeGood => "plan-type-good",
            Self::PlanIndex => "plan-index",
            Self::PlanNull => "plan-null",
            Self::PlanRowsBad => "plan-rows-bad",
            Self::PlanRowsWarn => "plan-rows-warn",
            Self::PlanRowsGood => "plan-rows-good",
            Self::PlanExtraWarn => "plan-extra-warn",
            Self::PlanExtraGood => "plan-extra-good",
            Self::PlanRowHeader => "plan-row-header",
            Self::PlanSeparator => "plan-separator"
        }
    }

    /// Look up a class by its CSS name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.as_str() == name)
    }

    /// Severity carried by a plan value class.
    ///
    /// `plan-index` counts as good and `plan-null` as neutral: a missing key is
    /// already reported through the `type` column.
    pub const fn severity(self) -> Severity {
        match self {
            Self::PlanTypeGood | Self::PlanRowsGood | Self::PlanExtraGood | Self::PlanIndex => {
                Severity::Good
            }
            Self::PlanRowsWarn | Self::PlanExtraWarn => Severity::Warn,
            Self::PlanTypeBad | Self::PlanRowsBad => Severity::Bad,
            _ => Severity::Neutral
        }
    }
}

impl From<SpanClass> for &'static str {
    fn from(class: SpanClass) -> Self {
        class.as_str()
    }
}

impl std::fmt::Display for SpanClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap `text` in a span carrying `class`.
pub fn span(class: SpanClass, text: &str) -> String {
    let mut out =
        String::with_capacity(SPAN_OPEN.len() + class.as_str().len() + text.len() + 9);
    out.push_str(SPAN_OPEN);
    out.push_str(class.as_str());
    out.push_str("\">");
    out.push_str(text);
    out.push_str(SPAN_CLOSE);
    out
}

/// Opening tag for `class`, as it appears in annotated text.
///
/// Passes that look for markup produced by earlier passes build their
/// patterns from this.
pub fn open_tag(class: SpanClass) -> String {
    format!("{}{}\">", SPAN_OPEN, class.as_str())
}

/// Escape the three markup-sensitive characters.
///
/// `&` goes first so the entities produced for `<` and `>` survive.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch)
        }
    }
    out
}

/// Count spans of `class` in annotated text.
pub fn count_spans(annotated: &str, class: SpanClass) -> usize {
    annotated.matches(open_tag(class).as_str()).count()
}

/// Piece of annotated text with the innermost enclosing class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub class: Option<SpanClass>,
    pub text:  String
}

/// Iterator over the styled segments of annotated text.
///
/// Nested spans resolve to the innermost class. Entities `&amp;`, `&lt;` and
/// `&gt;` are decoded unless the iterator is built with [`Segments::raw`].
/// Anything that is not span markup produced by this crate passes through
/// verbatim, so raw `<` in unescaped SQL is kept as text.
pub struct Segments<'a> {
    rest:            &'a str,
    stack:           Vec<Option<SpanClass>>,
    decode_entities: bool
}

impl<'a> Segments<'a> {
    /// Segments of escaped annotated text (snippets, plans).
    pub fn new(annotated: &'a str) -> Self {
        Self {
            rest:            annotated,
            stack:           Vec::new(),
            decode_entities: true
        }
    }

    /// Segments of unescaped annotated text (SQL). Entity-like text is kept.
    pub fn raw(annotated: &'a str) -> Self {
        Self {
            decode_entities: false,
            ..Self::new(annotated)
        }
    }

    fn current(&self) -> Option<SpanClass> {
        self.stack.iter().rev().flatten().next().copied()
    }

    /// Consume a tag at the head of `rest`, returning whether one was found.
    fn take_tag(&mut self) -> bool {
        if let Some(after) = self.rest.strip_prefix(SPAN_CLOSE) {
            if self.stack.pop().is_some() {
                self.rest = after;
                return true;
            }
            return false;
        }
        if let Some(after) = self.rest.strip_prefix(SPAN_OPEN)
            && let Some(end) = after.find("\">")
        {
            let name = &after[..end];
            if name.chars().all(|c| c.is_ascii_lowercase() || c == '-') {
                self.stack.push(SpanClass::from_name(name));
                self.rest = &after[end + 2..];
                return true;
            }
        }
        false
    }
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        while self.take_tag() {}
        if self.rest.is_empty() {
            return None;
        }
        let class = self.current();
        let mut text = String::new();
        loop {
            if self.rest.is_empty() {
                break;
            }
            if self.rest.starts_with('<') {
                let before = self.rest;
                let depth = self.stack.len();
                if self.take_tag() {
                    // Tag consumed; end this segment if the class changed.
                    if self.current() != class || self.stack.len() != depth {
                        break;
                    }
                    continue;
                }
                self.rest = before;
            }
            let Some(ch) = self.rest.chars().next() else {
                break;
            };
            if ch == '&' && self.decode_entities {
                let decoded = [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>')]
                    .into_iter()
                    .find(|(entity, _)| self.rest.starts_with(entity));
                if let Some((entity, plain)) = decoded {
                    text.push(plain);
                    self.rest = &self.rest[entity.len()..];
                    continue;
                }
            }
            text.push(ch);
            self.rest = &self.rest[ch.len_utf8()..];
        }
        if text.is_empty() {
            return self.next();
        }
        Some(Segment {
            class,
            text
        })
    }
}

/// Drop all span markup and decode entities.
pub fn strip(annotated: &str) -> String {
    Segments::new(annotated).map(|segment| segment.text).collect()
}

/// Drop all span markup, leaving entity-like text untouched.
pub fn strip_raw(annotated: &str) -> String {
    Segments::raw(annotated).map(|segment| segment.text).collect()
}
