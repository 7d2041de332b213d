//! SQL annotator.
//!
//! Tags keywords, string literals, integer literals and `--` line comments in
//! raw SQL text. There is no lexer: four regex passes run in a fixed order,
//! each over the output of the previous one.
//!
//! | Pass | Class | Matches |
//! |------|-------|---------|
//! | `sql-keywords` | `sql-keyword` | whole-word vocabulary, any casing, shown upper-case |
//! | `sql-strings` | `sql-string` | `'...'` without escaped quotes |
//! | `sql-numbers` | `sql-number` | standalone integers |
//! | `sql-comments` | `sql-comment` | `--` to end of line |
//!
//! Because comments are tagged last, keywords and digits inside a comment are
//! tagged first and end up nested in the comment span. The same holds for
//! digits and keywords inside string literals. Downstream styling relies on
//! this shape, so it is kept.
//!
//! Annotation is not idempotent: running it over already annotated text wraps
//! the keywords and numbers again. Callers annotate raw text exactly once.
//!
//! The input is not HTML-escaped. Callers that render the result as HTML must
//! escape the SQL beforehand.
//!
//! # Example
//!
//! ```
//! use sql_tuning_annotator::sql::annotate_sql;
//!
//! let out = annotate_sql("select 1");
//! assert_eq!(
//!     out,
//!     "<span class=\"sql-keyword\">SELECT</span> <span class=\"sql-number\">1</span>"
//! );
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{Level, debug, enabled};

use crate::{
    markup::{SpanClass, count_spans, span},
    pipeline::{Pass, PassContext, PassInfo, Pipeline}
};

/// Keyword vocabulary, matched ASCII case-insensitively on word boundaries.
pub const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "JOIN", "INNER", "LEFT", "RIGHT", "OUTER", "ON", "AND", "OR",
    "ORDER", "BY", "GROUP", "HAVING", "LIMIT", "AS", "DISTINCT", "COUNT", "SUM", "AVG", "MAX",
    "MIN", "LIKE", "IN", "EXISTS", "BETWEEN", "IS", "NULL", "NOT", "CASE", "WHEN", "THEN", "ELSE",
    "END", "INSERT", "UPDATE", "DELETE", "CREATE", "ALTER", "DROP", "TABLE", "INDEX", "VIEW"
];

static KEYWORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?-u:{})\b", SQL_KEYWORDS.join("|"))).expect("valid regex")
});

/// Single-quoted literal; `''` escapes are not recognised.
static STRING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'[^']*'").expect("valid regex"));

static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]+\b").expect("valid regex"));

/// `--` up to, not including, the line terminator.
static COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--[^\r\n]*").expect("valid regex"));

static SQL_PIPELINE: LazyLock<Pipeline> = LazyLock::new(|| {
    let passes: Vec<Box<dyn Pass>> = vec![
        Box::new(KeywordPass),
        Box::new(StringPass),
        Box::new(NumberPass),
        Box::new(CommentPass),
    ];
    Pipeline::new(passes).expect("valid pipeline")
});

/// The built-in SQL pipeline.
pub fn pipeline() -> &'static Pipeline {
    &SQL_PIPELINE
}

/// Annotate raw SQL. Empty input gives empty output.
pub fn annotate_sql(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let out = SQL_PIPELINE.run(raw);
    if enabled!(Level::DEBUG) {
        debug!(
            input_len = raw.len(),
            keywords = count_spans(&out, SpanClass::SqlKeyword),
            strings = count_spans(&out, SpanClass::SqlString),
            numbers = count_spans(&out, SpanClass::SqlNumber),
            comments = count_spans(&out, SpanClass::SqlComment),
            "annotated sql"
        );
    }
    out
}

/// Annotate possibly absent SQL; `None` behaves like `""`.
pub fn annotate_sql_opt(raw: Option<&str>) -> String {
    annotate_sql(raw.unwrap_or_default())
}

/// Wraps vocabulary words, normalised to upper case.
pub struct KeywordPass;

impl Pass for KeywordPass {
    fn info(&self) -> PassInfo {
        PassInfo {
            id:       "sql-keywords",
            name:     "Tag SQL keywords",
            requires: &[]
        }
    }

    fn apply(&self, text: String, _ctx: &mut PassContext) -> String {
        KEYWORD_REGEX
            .replace_all(&text, |caps: &Captures| {
                span(SpanClass::SqlKeyword, &caps[0].to_ascii_uppercase())
            })
            .into_owned()
    }
}

/// Wraps single-quoted literals, quotes included.
pub struct StringPass;

impl Pass for StringPass {
    fn info(&self) -> PassInfo {
        PassInfo {
            id:       "sql-strings",
            name:     "Tag string literals",
            requires: &["sql-keywords"]
        }
    }

    fn apply(&self, text: String, _ctx: &mut PassContext) -> String {
        STRING_REGEX
            .replace_all(&text, |caps: &Captures| span(SpanClass::SqlString, &caps[0]))
            .into_owned()
    }
}

/// Wraps standalone integers.
pub struct NumberPass;

impl Pass for NumberPass {
    fn info(&self) -> PassInfo {
        PassInfo {
            id:       "sql-numbers",
            name:     "Tag integer literals",
            requires: &["sql-strings"]
        }
    }

    fn apply(&self, text: String, _ctx: &mut PassContext) -> String {
        NUMBER_REGEX
            .replace_all(&text, |caps: &Captures| span(SpanClass::SqlNumber, &caps[0]))
            .into_owned()
    }
}

/// Wraps `--` comments, including markup already inside them.
pub struct CommentPass;

impl Pass for CommentPass {
    fn info(&self) -> PassInfo {
        PassInfo {
            id:       "sql-comments",
            name:     "Tag line comments",
            requires: &["sql-keywords", "sql-numbers"]
        }
    }

    fn apply(&self, text: String, _ctx: &mut PassContext) -> String {
        COMMENT_REGEX
            .replace_all(&text, |caps: &Captures| span(SpanClass::SqlComment, &caps[0]))
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(word: &str) -> String {
        span(SpanClass::SqlKeyword, word)
    }

    #[test]
    fn test_pipeline_order() {
        assert_eq!(
            pipeline().pass_ids(),
            vec!["sql-keywords", "sql-strings", "sql-numbers", "sql-comments"]
        );
    }

    #[test]
    fn test_keywords_whole_word_only() {
        let out = annotate_sql("select selection from information");
        assert_eq!(out, format!("{} selection {} information", kw("SELECT"), kw("FROM")));
    }

    #[test]
    fn test_in_versus_inner_and_index() {
        let out = annotate_sql("inner join x on a in b index");
        assert_eq!(
            out,
            format!(
                "{} {} x {} a {} b {}",
                kw("INNER"),
                kw("JOIN"),
                kw("ON"),
                kw("IN"),
                kw("INDEX")
            )
        );
    }

    #[test]
    fn test_identifiers_with_digits_are_not_numbers() {
        let out = annotate_sql("fa2.film_id = 10");
        assert_eq!(out, format!("fa2.film_id = {}", span(SpanClass::SqlNumber, "10")));
    }

    #[test]
    fn test_comment_stops_at_crlf() {
        let out = annotate_sql("x -- note\r\ny");
        assert_eq!(out, format!("x {}\r\ny", span(SpanClass::SqlComment, "-- note")));
    }

    #[test]
    fn test_replacement_text_is_not_expanded() {
        let out = annotate_sql("'$1 ${x}'");
        let inner = format!("'${} ${{x}}'", span(SpanClass::SqlNumber, "1"));
        assert_eq!(out, span(SpanClass::SqlString, &inner));
    }
}
