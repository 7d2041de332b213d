// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_tuning_annotator::{
    catalog::ILLUSTRATIVE_SNIPPET,
    markup::{SpanClass, count_spans, span, strip},
    placeholder::contains_sentinel,
    snippet::{annotate_snippet, annotate_snippet_opt}
};

fn ty(name: &str) -> String {
    span(SpanClass::JavaType, name)
}

fn var(name: &str) -> String {
    span(SpanClass::JavaVariable, name)
}

#[test]
fn test_empty_and_absent_input() {
    assert_eq!(annotate_snippet(""), "");
    assert_eq!(annotate_snippet_opt(None), "");
}

#[test]
fn test_comment_body_is_not_tokenized() {
    let out = annotate_snippet("// return it");
    assert_eq!(out, span(SpanClass::JavaComment, "// return it"));
}

#[test]
fn test_trailing_comment_after_code() {
    let out = annotate_snippet("return x; // for later");
    assert_eq!(
        out,
        format!(
            "{} x; {}",
            span(SpanClass::JavaKeyword, "return"),
            span(SpanClass::JavaComment, "// for later")
        )
    );
}

#[test]
fn test_plain_declaration() {
    let out = annotate_snippet("String sql = \"SELECT 1\";");
    assert_eq!(out, format!("{} {} = \"SELECT 1\";", ty("String"), var("sql")));
}

#[test]
fn test_generic_declaration_with_unknown_inner() {
    let out = annotate_snippet("List<Actor> actors = load();");
    assert_eq!(out, format!("{}&lt;Actor&gt; {} = load();", ty("List"), var("actors")));
}

#[test]
fn test_comparison_is_not_a_declaration() {
    let out = annotate_snippet("Long a == b");
    assert_eq!(count_spans(&out, SpanClass::JavaVariable), 0);
}

#[test]
fn test_method_call_leaves_dot_outside() {
    let out = annotate_snippet("log.warn(x)");
    assert_eq!(out, format!("log.{}(x)", span(SpanClass::JavaMethod, "warn")));
}

#[test]
fn test_keywords_are_case_sensitive() {
    assert_eq!(count_spans(&annotate_snippet("Return RETURN"), SpanClass::JavaKeyword), 0);
}

#[test]
fn test_markup_characters_are_escaped() {
    let out = annotate_snippet("if (a < b && c > d) { }");
    assert!(out.contains("a &lt; b &amp;&amp; c &gt; d"));
    assert_eq!(strip(&out), "if (a < b && c > d) { }");
}

#[test]
fn test_illustrative_snippet() {
    let out = annotate_snippet(ILLUSTRATIVE_SNIPPET);
    assert!(!contains_sentinel(&out));
    assert_eq!(strip(&out), ILLUSTRATIVE_SNIPPET);
    assert_eq!(count_spans(&out, SpanClass::JavaComment), 1);
    assert!(out.contains(&format!("{} {} =", ty("String"), var("sql"))));
    assert!(out.contains(&format!("{} {} =", ty("Long"), var("startTime"))));
    assert!(out.contains(&format!(
        "{}&lt;{}&gt; {} =",
        ty("List"),
        ty("Film"),
        var("films")
    )));
    assert!(out.contains(&span(SpanClass::JavaMethod, "findFilmsByTitleFast")));
}

#[test]
fn test_input_that_looks_like_a_sentinel_survives() {
    let raw = "String s = \"\u{E000}0\u{E001}0\u{E002}\"; // note";
    let out = annotate_snippet(raw);
    assert_eq!(strip(&out), raw);
    assert_eq!(count_spans(&out, SpanClass::JavaComment), 1);
}

#[test]
fn test_many_comments_restore_by_exact_index() {
    let mut raw = String::new();
    for i in 0..12 {
        if i % 2 == 0 {
            raw.push_str(&format!("// step {} // nested {}\n", i, i));
        } else {
            raw.push_str(&format!("log.info(x{}); // after {}\n", i, i));
        }
    }
    let out = annotate_snippet(&raw);
    assert!(!contains_sentinel(&out));
    assert_eq!(strip(&out), raw);
    assert_eq!(count_spans(&out, SpanClass::JavaComment), 12);
    assert!(out.contains(&span(SpanClass::JavaComment, "// step 10 // nested 10")));
    assert!(out.contains(&span(SpanClass::JavaComment, "// after 11")));
}

#[test]
fn test_annotating_twice_escapes_first_markup() {
    let once = annotate_snippet("return x;");
    let twice = annotate_snippet(&once);
    assert_ne!(once, twice);
    assert!(twice.contains("&lt;span class="));
    assert_eq!(strip(&twice), once);
}
