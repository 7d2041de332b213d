// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use rayon::prelude::*;
use sql_tuning_annotator::{
    markup::{SpanClass, count_spans, span, strip},
    sql::{SQL_KEYWORDS, annotate_sql, annotate_sql_opt}
};

fn kw(word: &str) -> String {
    span(SpanClass::SqlKeyword, word)
}

#[test]
fn test_empty_and_absent_input() {
    assert_eq!(annotate_sql(""), "");
    assert_eq!(annotate_sql_opt(None), "");
    assert_eq!(annotate_sql_opt(Some("")), "");
}

#[test]
fn test_every_keyword_in_any_casing() {
    for word in SQL_KEYWORDS {
        let lower = word.to_lowercase();
        let mut mixed: String = String::new();
        for (i, c) in word.chars().enumerate() {
            if i % 2 == 0 {
                mixed.extend(c.to_lowercase());
            } else {
                mixed.push(c);
            }
        }
        assert_eq!(annotate_sql(&lower), kw(word), "lower-case {}", word);
        assert_eq!(annotate_sql(&mixed), kw(word), "mixed-case {}", word);
    }
}

#[test]
fn test_keyword_folding_is_ascii_only() {
    // U+212A KELVIN SIGN folds to 'k' under Unicode rules.
    assert_eq!(annotate_sql("li\u{212A}e x"), "li\u{212A}e x");
    assert_eq!(annotate_sql("\u{17F}elect"), "\u{17F}elect");
    assert_eq!(annotate_sql("like x"), format!("{} x", kw("LIKE")));
    assert_eq!(annotate_sql("\u{e9}in \u{e9}"), "\u{e9}in \u{e9}");
}

#[test]
fn test_annotating_twice_wraps_again() {
    let once = annotate_sql("select 1");
    let twice = annotate_sql(&once);
    assert_ne!(once, twice);
    assert_eq!(count_spans(&annotate_sql(&annotate_sql("select")), SpanClass::SqlKeyword), 2);
    assert_eq!(strip(&twice), "SELECT 1");
}

#[test]
fn test_keywords_need_word_boundaries() {
    assert_eq!(annotate_sql("selection"), "selection");
    assert_eq!(annotate_sql("film_in"), "film_in");
}

#[test]
fn test_string_literal_wrapped_with_quotes() {
    assert_eq!(
        annotate_sql("WHERE title = 'x'"),
        format!("{} title = {}", kw("WHERE"), span(SpanClass::SqlString, "'x'"))
    );
}

#[test]
fn test_simple_query() {
    let out = annotate_sql("select id from film where length >= 90 limit 10");
    assert_eq!(
        out,
        format!(
            "{} id {} film {} length >= {} {} {}",
            kw("SELECT"),
            kw("FROM"),
            kw("WHERE"),
            span(SpanClass::SqlNumber, "90"),
            kw("LIMIT"),
            span(SpanClass::SqlNumber, "10")
        )
    );
}

#[test]
fn test_digits_inside_identifiers_are_not_numbers() {
    let out = annotate_sql("SELECT fa2.film_id FROM film_actor fa2");
    assert_eq!(count_spans(&out, SpanClass::SqlNumber), 0);
}

#[test]
fn test_comment_keeps_nested_markup() {
    let out = annotate_sql("SELECT 1 -- from cache 2");
    let comment = format!(
        "-- {} cache {}",
        kw("FROM"),
        span(SpanClass::SqlNumber, "2")
    );
    assert_eq!(
        out,
        format!(
            "{} {} {}",
            kw("SELECT"),
            span(SpanClass::SqlNumber, "1"),
            span(SpanClass::SqlComment, &comment)
        )
    );
}

#[test]
fn test_comment_stops_at_line_end() {
    let out = annotate_sql("-- note\nSELECT 1");
    assert!(out.starts_with(&format!("{}\n", span(SpanClass::SqlComment, "-- note"))));
}

#[test]
fn test_unterminated_quote_left_alone() {
    let out = annotate_sql("WHERE title = 'open");
    assert_eq!(count_spans(&out, SpanClass::SqlString), 0);
}

#[test]
fn test_strip_recovers_upper_cased_text() {
    let raw = "select title from film where title like 'ACADEMY%' order by title";
    assert_eq!(
        strip(&annotate_sql(raw)),
        "SELECT title FROM film WHERE title LIKE 'ACADEMY%' ORDER BY title"
    );
}

#[test]
fn test_parallel_calls_match_sequential() {
    let inputs: Vec<String> = (0..64)
        .map(|i| format!("select {} from film where title like 'A{}%' -- run {}", i, i, i))
        .collect();
    let sequential: Vec<String> = inputs.iter().map(|s| annotate_sql(s)).collect();
    let parallel: Vec<String> = inputs.par_iter().map(|s| annotate_sql(s)).collect();
    assert_eq!(sequential, parallel);
}
