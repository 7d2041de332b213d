//! Source snippet annotator.
//!
//! Tags keywords, type names, method calls and declared variables in a Java
//! source snippet. Like the SQL annotator it is a fixed sequence of regex
//! passes, with two additions:
//!
//! - the text is HTML-escaped before anything else, so markup inserted by later
//!   passes is never escaped itself;
//! - `//` comments are parked behind sentinels (see
//!   [`PlaceholderTable`](crate::placeholder::PlaceholderTable)) before any
//!   code pass runs and restored last, so comment bodies are never tokenized.
//!
//! Annotation is not idempotent: feeding annotated output back in escapes the
//! existing markup and tags it again. Annotate raw source exactly once.
//!
//! Pass order:
//!
//! 1. `escape` - `&`, `<`, `>`
//! 2. `park-comments` - `//` comments become sentinels
//! 3. `java-keywords` - case-sensitive keyword vocabulary
//! 4. `java-types` - fixed type names
//! 5. `java-methods` - `.name(` call sites, dot left outside the span
//! 6. `java-variables` - `Type<Inner> name =` then `Type name =`, reading the
//!    `java-type` markup from pass 4
//! 7. `restore-comments` - sentinels back to tagged comments

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{Level, debug, enabled};

use crate::{
    markup::{SpanClass, count_spans, escape_html, open_tag, span},
    pipeline::{Pass, PassContext, PassInfo, Pipeline}
};

/// Keyword vocabulary, matched case-sensitively on word boundaries.
pub const JAVA_KEYWORDS: &[&str] = &[
    "for",
    "while",
    "do",
    "if",
    "else",
    "switch",
    "case",
    "break",
    "continue",
    "return",
    "new",
    "public",
    "private",
    "protected",
    "static",
    "final",
    "void",
    "interface",
    "extends",
    "implements",
    "try",
    "catch",
    "finally",
    "throw",
    "throws",
    "import",
    "package"
];

/// Type names tagged as `java-type`.
pub const JAVA_TYPES: &[&str] = &[
    "List", "String", "Film", "Integer", "Boolean", "Double", "Float", "Long", "Char"
];

static COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[^\r\n]*").expect("valid regex"));

static KEYWORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", JAVA_KEYWORDS.join("|"))).expect("valid regex")
});

static TYPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", JAVA_TYPES.join("|"))).expect("valid regex")
});

static METHOD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(\w+)\(").expect("valid regex"));

/// `Type<Inner> name =` where `Type` is already tagged; `Inner` may or may not
/// be a known type.
static GENERIC_DECL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let ty = regex::escape(&open_tag(SpanClass::JavaType));
    Regex::new(&format!(
        r"({ty}\w+</span>&lt;(?:{ty}\w+</span>|\w+)&gt;\s+)([a-z]\w*)(\s*=)"
    ))
    .expect("valid regex")
});

/// `Type name =` where `Type` is already tagged.
static PLAIN_DECL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let ty = regex::escape(&open_tag(SpanClass::JavaType));
    Regex::new(&format!(r"({ty}\w+</span>\s+)([a-z]\w*)(\s*=)")).expect("valid regex")
});

static SNIPPET_PIPELINE: LazyLock<Pipeline> = LazyLock::new(|| {
    let passes: Vec<Box<dyn Pass>> = vec![
        Box::new(EscapePass),
        Box::new(ParkCommentsPass),
        Box::new(KeywordPass),
        Box::new(TypePass),
        Box::new(MethodPass),
        Box::new(VariablePass),
        Box::new(RestoreCommentsPass),
    ];
    Pipeline::new(passes).expect("valid pipeline")
});

/// The built-in snippet pipeline.
pub fn pipeline() -> &'static Pipeline {
    &SNIPPET_PIPELINE
}

/// Annotate a source snippet. Empty input gives empty output.
pub fn annotate_snippet(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let out = SNIPPET_PIPELINE.run(raw);
    if enabled!(Level::DEBUG) {
        debug!(
            input_len = raw.len(),
            keywords = count_spans(&out, SpanClass::JavaKeyword),
            types = count_spans(&out, SpanClass::JavaType),
            methods = count_spans(&out, SpanClass::JavaMethod),
            variables = count_spans(&out, SpanClass::JavaVariable),
            comments = count_spans(&out, SpanClass::JavaComment),
            "annotated snippet"
        );
    }
    out
}

/// Annotate a possibly absent snippet; `None` behaves like `""`.
pub fn annotate_snippet_opt(raw: Option<&str>) -> String {
    annotate_snippet(raw.unwrap_or_default())
}

pub struct EscapePass;

impl Pass for EscapePass {
    fn info(&self) -> PassInfo {
        PassInfo {
            id:       "escape",
            name:     "Escape markup-sensitive characters",
            requires: &[]
        }
    }

    fn apply(&self, text: String, _ctx: &mut PassContext) -> String {
        escape_html(&text)
    }
}

/// Swaps each `//` comment for a sentinel and records its tagged markup.
pub struct ParkCommentsPass;

impl Pass for ParkCommentsPass {
    fn info(&self) -> PassInfo {
        PassInfo {
            id:       "park-comments",
            name:     "Park line comments behind placeholders",
            requires: &["escape"]
        }
    }

    fn apply(&self, text: String, ctx: &mut PassContext) -> String {
        COMMENT_REGEX
            .replace_all(&text, |caps: &Captures| {
                ctx.placeholders
                    .park(span(SpanClass::JavaComment, &caps[0]))
            })
            .into_owned()
    }
}

pub struct KeywordPass;

impl Pass for KeywordPass {
    fn info(&self) -> PassInfo {
        PassInfo {
            id:       "java-keywords",
            name:     "Tag keywords",
            requires: &["park-comments"]
        }
    }

    fn apply(&self, text: String, _ctx: &mut PassContext) -> String {
        KEYWORD_REGEX
            .replace_all(&text, |caps: &Captures| span(SpanClass::JavaKeyword, &caps[0]))
            .into_owned()
    }
}

pub struct TypePass;

impl Pass for TypePass {
    fn info(&self) -> PassInfo {
        PassInfo {
            id:       "java-types",
            name:     "Tag type names",
            requires: &["park-comments", "java-keywords"]
        }
    }

    fn apply(&self, text: String, _ctx: &mut PassContext) -> String {
        TYPE_REGEX
            .replace_all(&text, |caps: &Captures| span(SpanClass::JavaType, &caps[0]))
            .into_owned()
    }
}

/// Tags the name in `.name(`; the dot and parenthesis stay outside.
pub struct MethodPass;

impl Pass for MethodPass {
    fn info(&self) -> PassInfo {
        PassInfo {
            id:       "java-methods",
            name:     "Tag method calls",
            requires: &["java-types"]
        }
    }

    fn apply(&self, text: String, _ctx: &mut PassContext) -> String {
        METHOD_REGEX
            .replace_all(&text, |caps: &Captures| {
                format!(".{}(", span(SpanClass::JavaMethod, &caps[1]))
            })
            .into_owned()
    }
}

/// Tags declared variables by reading the `java-type` markup.
///
/// The generic form runs first; once its variable is wrapped the plain form
/// can no longer match the same declaration.
pub struct VariablePass;

impl Pass for VariablePass {
    fn info(&self) -> PassInfo {
        PassInfo {
            id:       "java-variables",
            name:     "Tag declared variables",
            requires: &["java-types"]
        }
    }

    fn apply(&self, text: String, _ctx: &mut PassContext) -> String {
        let text = tag_declarations(&GENERIC_DECL_REGEX, &text);
        tag_declarations(&PLAIN_DECL_REGEX, &text)
    }
}

/// Wrap capture 2 of every match, skipping `==` comparisons.
fn tag_declarations(re: &Regex, text: &str) -> String {
    re.replace_all(text, |caps: &Captures| {
        let is_comparison = caps
            .get(0)
            .is_some_and(|m| text[m.end()..].starts_with('='));
        if is_comparison {
            caps[0].to_string()
        } else {
            format!(
                "{}{}{}",
                &caps[1],
                span(SpanClass::JavaVariable, &caps[2]),
                &caps[3]
            )
        }
    })
    .into_owned()
}

pub struct RestoreCommentsPass;

impl Pass for RestoreCommentsPass {
    fn info(&self) -> PassInfo {
        PassInfo {
            id:       "restore-comments",
            name:     "Restore parked comments",
            requires: &[
                "park-comments",
                "java-keywords",
                "java-types",
                "java-methods",
                "java-variables"
            ]
        }
    }

    fn apply(&self, text: String, ctx: &mut PassContext) -> String {
        ctx.placeholders.restore(text)
    }
}
