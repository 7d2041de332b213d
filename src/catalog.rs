//! Bundled SQL tuning demos.
//!
//! Each demo pairs a slow query with its tuned counterpart against the Sakila
//! sample schema, together with a representative EXPLAIN plan for each. They
//! are the fixtures the annotators are demonstrated on.

use crate::plan::{PlanRow, PlanValue};

/// Service-layer snippet shown next to the tuned query.
pub const ILLUSTRATIVE_SNIPPET: &str = r#"public FilmResponse searchFilmsByTitleFast(String title) {
    // Prefix match: return rows for idx_title without a full scan
    String sql = "SELECT film_id, title FROM film WHERE title LIKE ? ORDER BY title";
    Long startTime = System.currentTimeMillis();
    List<Film> films = filmMapper.findFilmsByTitleFast(title);
    Long executionTime = System.currentTimeMillis() - startTime;
    if (films.isEmpty()) {
        log.warn("no films matched {}", title);
    }
    return new FilmResponse(films, sql, executionTime);
}
"#;

/// One side of a slow/fast comparison.
#[derive(Debug, Clone, Copy)]
pub struct Variant {
    pub label: &'static str,
    pub sql:   &'static str,
    plan:      fn() -> Vec<PlanRow>
}

impl Variant {
    /// Representative EXPLAIN output for this query.
    pub fn plan(&self) -> Vec<PlanRow> {
        (self.plan)()
    }
}

/// A tuning lesson: the same result fetched two ways.
#[derive(Debug, Clone, Copy)]
pub struct Demo {
    pub id:     &'static str,
    pub title:  &'static str,
    pub lesson: &'static str,
    pub slow:   Variant,
    pub fast:   Variant
}

/// All bundled demos, in presentation order.
pub fn demos() -> &'static [Demo] {
    &DEMOS
}

/// Look up a demo by id (case-insensitive).
pub fn find_demo(id: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|d| d.id.eq_ignore_ascii_case(id))
}

static DEMOS: [Demo; 4] = [
    Demo {
        id:     "index-like",
        title:  "Index usage with LIKE",
        lesson: "A leading wildcard defeats the title index; a prefix match can use it.",
        slow:   Variant {
            label: "LIKE '%keyword%'",
            sql:   "SELECT film_id, title, description, release_year, language_id,
       original_language_id, rental_duration, rental_rate, length,
       replacement_cost, rating, special_features, last_update
FROM film
WHERE title LIKE '%ACADEMY%'
ORDER BY title",
            plan:  index_like_slow_plan
        },
        fast:   Variant {
            label: "LIKE 'keyword%'",
            sql:   "SELECT film_id, title, description, release_year, language_id,
       original_language_id, rental_duration, rental_rate, length,
       replacement_cost, rating, special_features, last_update
FROM film
WHERE title LIKE 'ACADEMY%' -- prefix match uses idx_title
ORDER BY title",
            plan:  index_like_fast_plan
        }
    },
    Demo {
        id:     "join-language",
        title:  "N+1 lookups versus JOIN",
        lesson: "Fetching the language per film issues one query per row; a join fetches it once.",
        slow:   Variant {
            label: "N+1 queries",
            sql:   "SELECT film_id, title, description, release_year, language_id,
       original_language_id, rental_duration, rental_rate, length,
       replacement_cost, rating, special_features, last_update
FROM film
LIMIT 100",
            plan:  join_language_slow_plan
        },
        fast:   Variant {
            label: "INNER JOIN",
            sql:   "SELECT f.film_id, f.title, f.description, f.release_year, f.language_id,
       f.original_language_id, f.rental_duration, f.rental_rate, f.length,
       f.replacement_cost, f.rating, f.special_features, f.last_update,
       l.name as language_name
FROM film f
INNER JOIN language l ON f.language_id = l.language_id
LIMIT 100",
            plan:  join_language_fast_plan
        }
    },
    Demo {
        id:     "subquery",
        title:  "Correlated subqueries versus JOIN and GROUP BY",
        lesson: "Scalar subqueries run once per outer row; joining and grouping runs once.",
        slow:   Variant {
            label: "Scalar subqueries",
            sql:   "SELECT f.film_id, f.title, f.description, f.release_year, f.language_id,
       f.original_language_id, f.rental_duration, f.rental_rate, f.length,
       f.replacement_cost, f.rating, f.special_features, f.last_update,
       (SELECT l.name FROM language l WHERE l.language_id = f.language_id) as language_name,
       (SELECT COUNT(*) FROM film_actor fa WHERE fa.film_id = f.film_id) as actor_count
FROM film f
WHERE f.length >= 90
AND EXISTS (
    SELECT 1 FROM film_actor fa2
    WHERE fa2.film_id = f.film_id
)
ORDER BY f.title
LIMIT 50",
            plan:  subquery_slow_plan
        },
        fast:   Variant {
            label: "JOIN + GROUP BY",
            sql:   "SELECT f.film_id, f.title, f.description, f.release_year, f.language_id,
       f.original_language_id, f.rental_duration, f.rental_rate, f.length,
       f.replacement_cost, f.rating, f.special_features, f.last_update,
       l.name as language_name,
       COUNT(DISTINCT fa.actor_id) as actor_count
FROM film f
INNER JOIN language l ON f.language_id = l.language_id
INNER JOIN film_actor fa ON f.film_id = fa.film_id
WHERE f.length >= 90
GROUP BY f.film_id, f.title, f.description, f.release_year, f.language_id,
         f.original_language_id, f.rental_duration, f.rental_rate, f.length,
         f.replacement_cost, f.rating, f.special_features, f.last_update,
         l.name
ORDER BY f.title
LIMIT 50",
            plan:  subquery_fast_plan
        }
    },
    Demo {
        id:     "customer-join",
        title:  "Filtering customers early",
        lesson: "Restricting to active customers before sorting shrinks the rows examined.",
        slow:   Variant {
            label: "All customers",
            sql:   "SELECT customer_id, first_name, last_name, email,
       active, create_date, last_update
FROM customer
ORDER BY customer_id
LIMIT 100",
            plan:  customer_slow_plan
        },
        fast:   Variant {
            label: "Active customers only",
            sql:   "SELECT customer_id, first_name, last_name, email,
       active, create_date, last_update
FROM customer
WHERE active = 1
ORDER BY customer_id
LIMIT 100",
            plan:  customer_fast_plan
        }
    }
];

fn explain_row(
    id: i64,
    table: &str,
    access: &str,
    key: Option<&str>,
    rows: i64,
    extra: Option<&str>
) -> PlanRow {
    PlanRow::new()
        .with("id", id)
        .with("select_type", if id == 1 { "PRIMARY" } else { "DEPENDENT SUBQUERY" })
        .with("table", table)
        .with("type", access)
        .with("possible_keys", PlanValue::from(key))
        .with("key", key)
        .with("rows", rows)
        .with("Extra", extra)
}

fn simple(row: PlanRow) -> PlanRow {
    row.with("select_type", "SIMPLE")
}

fn index_like_slow_plan() -> Vec<PlanRow> {
    vec![simple(explain_row(
        1,
        "film",
        "ALL",
        None,
        16_000,
        Some("Using where; Using filesort")
    ))]
}

fn index_like_fast_plan() -> Vec<PlanRow> {
    vec![simple(explain_row(
        1,
        "film",
        "range",
        Some("idx_title"),
        12,
        Some("Using index condition")
    ))]
}

fn join_language_slow_plan() -> Vec<PlanRow> {
    vec![simple(explain_row(1, "film", "ALL", None, 1_000, None))]
}

fn join_language_fast_plan() -> Vec<PlanRow> {
    vec![
        simple(explain_row(1, "l", "ALL", Some("PRIMARY"), 6, None)),
        simple(explain_row(
            1,
            "f",
            "ref",
            Some("idx_fk_language_id"),
            166,
            None
        )),
    ]
}

fn subquery_slow_plan() -> Vec<PlanRow> {
    vec![
        explain_row(1, "f", "ALL", None, 1_000, Some("Using where; Using filesort")),
        explain_row(4, "fa2", "ref", Some("idx_fk_film_id"), 5, Some("Using index")),
        explain_row(3, "fa", "ref", Some("idx_fk_film_id"), 5, Some("Using index")),
        explain_row(2, "l", "eq_ref", Some("PRIMARY"), 1, None),
    ]
}

fn subquery_fast_plan() -> Vec<PlanRow> {
    vec![
        simple(explain_row(
            1,
            "f",
            "ALL",
            None,
            1_000,
            Some("Using where; Using temporary; Using filesort")
        )),
        simple(explain_row(1, "l", "eq_ref", Some("PRIMARY"), 1, None)),
        simple(explain_row(
            1,
            "fa",
            "ref",
            Some("idx_fk_film_id"),
            5,
            Some("Using index")
        )),
    ]
}

fn customer_slow_plan() -> Vec<PlanRow> {
    vec![simple(explain_row(1, "customer", "index", Some("PRIMARY"), 599, None))]
}

fn customer_fast_plan() -> Vec<PlanRow> {
    vec![simple(explain_row(
        1,
        "customer",
        "index",
        Some("PRIMARY"),
        100,
        Some("Using where")
    ))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = demos().iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), demos().len());
    }

    #[test]
    fn test_find_demo_ignores_case() {
        assert_eq!(find_demo("SUBQUERY").map(|d| d.id), Some("subquery"));
        assert!(find_demo("missing").is_none());
    }

    #[test]
    fn test_simple_overrides_select_type_in_place() {
        let row = simple(explain_row(1, "film", "ALL", None, 1, None));
        let columns: Vec<_> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(columns[1], "select_type");
        assert_eq!(row.get("select_type"), Some(&PlanValue::from("SIMPLE")));
    }
}
