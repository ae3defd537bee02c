use scribe_editor_core::{
    Candidate, CandidateDirectory, FuzzyDirectory, MatchOptions, MentionQuery, Point,
    PlainTextBuffer, TextBuffer, demo_directory, mention_splice,
};

fn names(results: &[Candidate]) -> Vec<&str> {
    results.iter().map(|c| c.display_name.as_str()).collect()
}

#[test]
fn query_is_text_after_last_at() {
    let anchor = Point::new(4., 8.);
    let query = MentionQuery::extract("hello @jo", anchor);
    assert!(query.active);
    assert_eq!(query.query, "jo");
    assert_eq!(query.anchor, anchor);
}

#[test]
fn trailing_whitespace_stays_in_query() {
    let query = MentionQuery::extract("hello @jo ", Point::default());
    assert!(query.active);
    assert_eq!(query.query, "jo ");
}

#[test]
fn only_the_last_at_counts() {
    let query = MentionQuery::extract("a@b.com and @bo", Point::default());
    assert_eq!(query.query, "bo");
}

#[test]
fn extraction_ignores_the_caret() {
    // The whole node is scanned, so an `@` after the caret still counts.
    let buffer = PlainTextBuffer::new("@jo then text").with_caret(0);
    let query = MentionQuery::extract(buffer.text(), Point::default());
    assert!(query.active);
    assert_eq!(query.query, "jo then text");
}

#[test]
fn splice_replaces_query_up_to_caret() {
    let mut buffer = PlainTextBuffer::new("hi @jo");
    let splice = mention_splice(buffer.text(), buffer.caret(), "John Doe").unwrap();
    assert_eq!(splice.range, 3..6);
    splice.apply(&mut buffer);
    assert_eq!(buffer.text(), "hi @John Doe");
    assert_eq!(buffer.caret(), buffer.text().len());
}

#[test]
fn splice_keeps_text_after_caret() {
    let text = "hi @jo, bye";
    let mut buffer = PlainTextBuffer::new(text).with_caret(6);
    let splice = mention_splice(text, 6, "John Doe").unwrap();
    splice.apply(&mut buffer);
    assert_eq!(buffer.text(), "hi @John Doe, bye");
    assert_eq!(buffer.caret(), "hi @John Doe".len());
}

#[test]
fn splice_with_caret_before_at_runs_to_end() {
    let text = "x @jo";
    let splice = mention_splice(text, 0, "John Doe").unwrap();
    assert_eq!(splice.range, 2..text.len());
}

#[test]
fn splice_needs_a_trigger() {
    assert_eq!(mention_splice("plain", 5, "John Doe"), None);
}

#[test]
fn jo_matches_john_and_bob_ahead_of_jane() {
    let results = demo_directory().search("jo");
    let found = names(&results);
    assert!(found.contains(&"John Doe"));
    assert!(found.contains(&"Bob Johnson"));

    let position = |name| found.iter().position(|n| *n == name);
    if let Some(jane) = position("Jane Smith") {
        assert!(jane > position("John Doe").unwrap());
        assert!(jane > position("Bob Johnson").unwrap());
    }
}

#[test]
fn address_matches_count() {
    let results = demo_directory().search("bob@example");
    assert_eq!(names(&results).first(), Some(&"Bob Johnson"));
}

#[test]
fn matching_ignores_case() {
    let results = demo_directory().search("JANE");
    assert_eq!(names(&results).first(), Some(&"Jane Smith"));
}

#[test]
fn blank_query_matches_nothing() {
    assert!(demo_directory().search("").is_empty());
    assert!(demo_directory().search("   ").is_empty());
}

#[test]
fn unrelated_query_matches_nothing() {
    assert!(demo_directory().search("zzq").is_empty());
}

#[test]
fn zero_threshold_keeps_only_exact_strength_matches() {
    let directory = demo_directory().options(MatchOptions {
        threshold: 0.0,
        limit: None,
    });
    for (score, _) in directory.rank("jo") {
        assert!(score >= 1.0);
    }
}

#[test]
fn scores_are_sorted_best_first() {
    let directory = demo_directory().options(MatchOptions {
        threshold: 1.0,
        limit: None,
    });
    let ranked = directory.rank("j");
    assert!(!ranked.is_empty());
    assert!(ranked.windows(2).all(|pair| pair[0].0 >= pair[1].0));
}

#[test]
fn limit_truncates_results() {
    let directory = demo_directory().options(MatchOptions {
        threshold: 1.0,
        limit: Some(1),
    });
    assert_eq!(directory.search("o").len(), 1);
}

#[test]
fn custom_candidates_are_searchable() {
    let directory = FuzzyDirectory::new(vec![
        Candidate::new("a", "Ada Lovelace", "ada@engine.org", ""),
        Candidate::new("b", "Grace Hopper", "grace@navy.mil", ""),
    ]);
    assert_eq!(names(&directory.search("grace")), ["Grace Hopper"]);
}
