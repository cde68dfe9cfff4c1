//! End-to-end behaviour of grouped quad streams.

mod support;

use pretty_assertions::assert_eq;
use quadgroup_stream::{GroupedStreamParser, Quad, StreamError, StreamEvent, Term, TurtleError};
use support::{parse_ok, run, run_reader, subjects, ChunkReader};

const NO_CHUNKS: [&str; 0] = [];

#[test]
fn parses_the_empty_stream() {
    assert!(parse_ok(&NO_CHUNKS).is_empty());
}

#[test]
fn parses_the_zero_length_stream() {
    assert!(parse_ok(&[""]).is_empty());
}

#[test]
fn parses_a_bom_starting_stream() {
    assert!(parse_ok(&["\u{feff}"]).is_empty());
}

#[test]
fn parses_a_bom_starting_stream_after_an_empty_chunk() {
    assert!(parse_ok(&["", "\u{feff}"]).is_empty());
}

#[test]
fn parses_one_triple() {
    let quads = parse_ok(&["<a> <b> <c>."]);
    assert_eq!(
        quads,
        vec![Quad::new(Term::iri("a"), Term::iri("b"), Term::iri("c"))]
    );
}

#[test]
fn parses_two_triples() {
    let quads = parse_ok(&["<a> <b>", " <c>. <d> <e> ", "<f>."]);
    assert_eq!(subjects(&quads), vec!["a", "d"]);
}

#[test]
fn parses_decimals_split_across_chunks() {
    let input = "<sub> <pred> 11.2 .";
    let chunks: Vec<&[u8]> = input.as_bytes().chunks(2).collect();
    let quads = parse_ok(&chunks);

    assert_eq!(quads.len(), 1);
    assert_eq!(
        quads[0].o.as_literal().map(|(v, _, _)| v.lexical()),
        Some("11.2".to_string())
    );
}

#[test]
fn parses_non_breaking_spaces_split_across_chunks() {
    let buffer = "<sub> <pred> \"\u{a0}\" .".as_bytes();
    let quads = parse_ok(&[buffer, &buffer[..15], &buffer[15..]]);

    assert_eq!(quads.len(), 2);
    assert_eq!(quads[0], quads[1]);
    assert_eq!(quads[0].o, Term::string("\u{a0}"));
}

#[test]
fn rejects_an_invalid_stream() {
    let outcome = run(&["z."]);
    assert!(outcome.quads.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert!(matches!(
        outcome.errors[0],
        StreamError::Parse(TurtleError::Lexer { .. })
    ));
    assert!(outcome.errors[0].to_string().contains("line 1"));
}

#[test]
fn rejects_a_bom_in_the_middle_of_the_stream() {
    let outcome = run(&["<a> <b>", "\u{feff}", "<c>."]);
    assert!(outcome.quads.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].to_string().contains("U+FEFF"));
}

#[test]
fn emits_prefix_events() {
    let outcome =
        run(&["@prefix a: <http://a.org/#>. a:a a:b a:c. @prefix b: <http://b.org/#>."]);

    assert!(outcome.errors.is_empty());
    assert_eq!(
        outcome.prefixes,
        vec![
            ("a".to_string(), "http://a.org/#".to_string()),
            ("b".to_string(), "http://b.org/#".to_string()),
        ]
    );
    assert_eq!(outcome.quads[0].s, Term::iri("http://a.org/#a"));
}

#[test]
fn ignores_useless_comments() {
    let quads = parse_ok(&["# comment 1\n", "<a> <b> <c>. <d> <e> <f>."]);
    assert_eq!(quads.len(), 2);
}

#[test]
fn parses_one_group() {
    let quads = parse_ok(&[
        "# @group begin 1\n",
        "<a> <b> <c>.",
        " <d> <e> <f>.",
        "# @group end 1",
    ]);
    assert_eq!(subjects(&quads), vec!["a", "d"]);
}

#[test]
fn parses_two_overlapping_groups() {
    let quads = parse_ok(&[
        "# @group begin 1\n",
        "<a> <b> <c>.",
        "# @group begin 2\n",
        " <d> <e> <f>.",
        "# @group end 1\n",
        "<g> <h> <i>.",
        " <j> <k> <l>.",
        "# @group end 2",
    ]);
    assert_eq!(subjects(&quads), vec!["a", "d", "d", "g", "j"]);
}

#[test]
fn parses_two_nested_groups() {
    let quads = parse_ok(&[
        "# @group begin 1\n",
        "<a> <b> <c>.",
        "# @group begin 2\n",
        " <d> <e> <f>.",
        "<g> <h> <i>.",
        "# @group end 2\n",
        " <j> <k> <l>.",
        "# @group end 1",
    ]);
    assert_eq!(subjects(&quads), vec!["d", "g", "a", "d", "g", "j"]);
}

#[test]
fn overlapping_groups_in_one_chunk_release_at_each_end() {
    let mut parser = GroupedStreamParser::new();
    parser
        .feed_str("# @group begin 1\n<a><b><c>.# @group begin 2\n<d><e><f>.# @group end 1\n")
        .unwrap();
    assert_eq!(subjects(&quads_of(parser.drain_events())), vec!["a", "d"]);

    parser
        .feed_str("<g><h><i>.<j><k><l>.# @group end 2")
        .unwrap();
    assert!(parser.drain_events().is_empty());

    parser.finish().unwrap();
    assert_eq!(subjects(&quads_of(parser.drain_events())), vec!["d", "g", "j"]);
}

#[test]
fn overlapping_groups_in_one_chunk_through_a_reader() {
    let input = "# @group begin 1\n<a><b><c>.# @group begin 2\n<d><e><f>.# @group end 1\n<g><h><i>.<j><k><l>.# @group end 2";
    let events: Vec<StreamEvent> = GroupedStreamParser::new()
        .import(input.as_bytes())
        .collect::<Result<_, _>>()
        .unwrap();

    let quads: Vec<Quad> = events
        .iter()
        .filter_map(StreamEvent::as_quad)
        .cloned()
        .collect();
    assert_eq!(quads.len(), 5);
    assert_eq!(subjects(&quads), vec!["a", "d", "d", "g", "j"]);
}

#[test]
fn passes_through_without_directives() {
    let mut parser = GroupedStreamParser::new();
    parser.feed_str("<a><b><c>.").unwrap();
    parser.finish().unwrap();

    assert_eq!(
        parser.drain_events(),
        vec![StreamEvent::Quad(Quad::new(
            Term::iri("a"),
            Term::iri("b"),
            Term::iri("c")
        ))]
    );
}

#[test]
fn records_are_released_only_at_group_end() {
    let mut parser = GroupedStreamParser::new();
    parser.feed_str("# @group begin g\n").unwrap();
    for i in 0..3 {
        parser.feed_str(&format!("<s{i}> <p> <o> .\n")).unwrap();
        assert!(parser.next_event().is_none());
    }
    parser.feed_str("# @group end g\n").unwrap();

    assert_eq!(
        subjects(&quads_of(parser.drain_events())),
        vec!["s0", "s1", "s2"]
    );
}

#[test]
fn unmatched_end_has_no_effect() {
    let quads = parse_ok(&["# @group end 7\n<a> <b> <c> .\n# @group end 7\n<d> <e> <f> ."]);
    assert_eq!(subjects(&quads), vec!["a", "d"]);
}

#[test]
fn duplicate_begin_has_no_effect() {
    let quads = parse_ok(&[
        "# @group begin 1\n<a> <b> <c> .\n# @group begin 1\n<d> <e> <f> .\n# @group end 1\n<g> <h> <i> .",
    ]);
    assert_eq!(subjects(&quads), vec!["a", "d", "g"]);
}

#[test]
fn unclosed_groups_are_discarded_at_end_of_stream() {
    let quads = parse_ok(&["<a> <b> <c> .\n# @group begin 1\n<d> <e> <f> ."]);
    assert_eq!(subjects(&quads), vec!["a"]);
}

#[test]
fn syntax_error_discards_buffered_records() {
    let outcome = run(&[
        "<a> <b> <c> .\n# @group begin 1\n<d> <e> <f> .\n",
        "<g> <h> .\n",
        "# @group end 1\n<i> <j> <k> .",
    ]);

    assert_eq!(subjects(&outcome.quads), vec!["a"]);
    assert_eq!(outcome.errors.len(), 1);
    assert!(matches!(
        outcome.errors[0],
        StreamError::Parse(TurtleError::Parse { .. })
    ));
}

#[test]
fn group_closed_before_a_lexical_error_is_released() {
    let outcome = run(&["# @group begin 1\n<a> <b> <c> .\n<x> # @group end 1\n <y> z ."]);

    assert_eq!(subjects(&outcome.quads), vec!["a"]);
    assert_eq!(outcome.errors.len(), 1);
    assert!(matches!(
        outcome.errors[0],
        StreamError::Parse(TurtleError::Lexer { .. })
    ));
}

#[test]
fn objects_before_a_lexical_error_are_released() {
    let outcome = run(&["<a> <b> <c>, <d>, z ."]);

    assert_eq!(
        outcome.quads,
        vec![
            Quad::new(Term::iri("a"), Term::iri("b"), Term::iri("c")),
            Quad::new(Term::iri("a"), Term::iri("b"), Term::iri("d")),
        ]
    );
    assert_eq!(outcome.errors.len(), 1);
}

#[test]
fn passes_an_upstream_error() {
    let reader = ChunkReader::new(&["# @group begin 1\n<a> <b> <c> .\n"])
        .then_fail(std::io::Error::other("source failed"));
    let outcome = run_reader(reader);

    assert!(outcome.quads.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    match &outcome.errors[0] {
        StreamError::Io(e) => assert_eq!(e.to_string(), "source failed"),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn passes_an_upstream_error_before_any_data() {
    let reader = ChunkReader::new(&NO_CHUNKS).then_fail(std::io::Error::other("refused"));
    let outcome = run_reader(reader);

    assert!(outcome.quads.is_empty());
    assert_eq!(outcome.errors.len(), 1);
}

#[test]
fn graph_blocks_inside_groups() {
    let quads = parse_ok(&[
        "# @group begin tx\n<g> { <a> <b> <c> . <d> <e> <f> }\n# @group end tx\n",
    ]);
    assert_eq!(quads.len(), 2);
    assert!(quads.iter().all(|q| q.g == Some(Term::iri("g"))));
}

#[test]
fn directives_split_across_chunks() {
    let input = "# @group begin one\n<a> <b> <c> .\n# @group end one\n";
    for size in 1..8 {
        let chunks: Vec<&[u8]> = input.as_bytes().chunks(size).collect();
        let mut parser = GroupedStreamParser::new();
        let mut released_before_end = 0;
        for chunk in &chunks {
            parser.feed(chunk).unwrap();
            if !parser.open_groups().is_empty() {
                released_before_end += parser.drain_events().len();
            }
        }
        parser.finish().unwrap();

        assert_eq!(released_before_end, 0, "chunk size {size}");
        assert_eq!(quads_of(parser.drain_events()).len(), 1, "chunk size {size}");
    }
}

fn quads_of(events: Vec<StreamEvent>) -> Vec<Quad> {
    events.into_iter().filter_map(StreamEvent::into_quad).collect()
}
