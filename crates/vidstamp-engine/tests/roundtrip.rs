use pretty_assertions::assert_eq;
use rstest::rstest;
use vidstamp_engine::{Segment, TimeFormat, Timeline, extract, parse_document};

/// Text view -> timeline view -> text view, as the page does when switching tabs.
fn round_trip(raw: &str) -> String {
    let timeline = Timeline::from_doc(&parse_document(raw));
    extract(&timeline.to_html())
}

#[rstest]
#[case("")]
#[case("00:00 Start\n02:15 Introduction\n05:30 What is the budget?")]
#[case("00:00:00 Start\n01:12:05 Conclusion")]
#[case("01:30 line one\nline two\n02:00 next")]
#[case("01:00 see 02:15 & <compare> with 00:30")]
#[case("00:00\n00:10 empty before")]
fn canonical_text_is_a_fixed_point(#[case] canonical: &str) {
    assert_eq!(round_trip(canonical), canonical);
}

#[rstest]
#[case("0:05 a\n1:02:03 b")]
#[case("intro\n1:5:00 x\n  2:00   y  \n\n  continued  ")]
#[case("1:00 ok\nbad:line\n2:00 also ok")]
#[case("0:10 see 2:15 then 59:99\n83:45 late")]
#[case("12:00\n\n13:00 <b>bold</b> &amp;")]
fn round_trip_is_idempotent(#[case] raw: &str) {
    let once = round_trip(raw);
    let twice = round_trip(&once);
    assert_eq!(twice, once);
}

#[test]
fn mixed_formats_are_promoted_to_long() {
    assert_eq!(round_trip("0:05 a\n1:02:03 b"), "00:00:05 a\n01:02:03 b");
}

#[test]
fn round_trip_normalizes_whitespace_and_padding() {
    assert_eq!(
        round_trip("  just text\n 1:30   line one \n   line two  \n\n2:00"),
        "01:30 line one\nline two\n02:00"
    );
}

#[test]
fn html_extraction_matches_structured_text() {
    let raw = "0:00 Start\n0:45 Q&A <live> see 12:30\nand 1:05\n1:01:01 Wrap-up";
    let timeline = Timeline::from_doc(&parse_document(raw));
    assert_eq!(extract(&timeline.to_html()), timeline.to_text());
}

#[test]
fn inline_timestamp_is_interactive_and_surrounding_text_plain() {
    let timeline = Timeline::from_doc(&parse_document("0:10 see 2:15 for details"));
    let entry = &timeline.entries[0];

    assert_eq!(entry.description.len(), 3);
    assert_eq!(entry.description[0], Segment::Text("see ".to_string()));
    assert_eq!(entry.description[2], Segment::Text(" for details".to_string()));
    match &entry.description[1] {
        Segment::Timestamp(label) => assert_eq!(label.seconds, 135),
        other => panic!("expected inline timestamp, got {other:?}"),
    }

    let html = timeline.to_html();
    assert!(html.contains(r#"data-time="135">02:15</button>"#));
    assert!(html.contains("see <button"));
    assert!(html.contains("</button> for details"));
}

#[test]
fn inline_timestamp_after_thai_text_is_linked() {
    let timeline = Timeline::from_doc(&parse_document("0:00 ดูที่2:15"));
    let entry = &timeline.entries[0];

    assert_eq!(entry.description[0], Segment::Text("ดูที่".to_string()));
    let inline: Vec<u64> = entry.inline_timestamps().map(|l| l.seconds).collect();
    assert_eq!(inline, vec![135]);
    assert!(timeline.to_html().contains(r#"data-time="135">02:15</button>"#));
}

#[test]
fn records_glued_to_their_text_survive_round_trip() {
    let once = round_trip("0:00 Start\n0:05Intro\n1:30บทนำ ดูที่2:15");
    assert_eq!(once, "00:00 Start\n00:05 Intro\n01:30 บทนำ ดูที่02:15");
    assert_eq!(round_trip(&once), once);
}

#[test]
fn every_time_value_is_exposed_in_markup() {
    let timeline = Timeline::from_doc(&parse_document("0:10 a 0:20\n0:30 b 0:40 0:50"));
    let html = timeline.to_html();
    for target in timeline.seek_targets() {
        assert!(
            html.contains(&format!("data-time=\"{}\"", target.seconds)),
            "missing {}",
            target.seconds
        );
    }
    assert_eq!(timeline.seek_targets().len(), 5);
}

#[test]
fn malformed_records_do_not_affect_neighbours() {
    let doc = parse_document("1:00 ok\nbad:line\n2:00 also ok");
    let times: Vec<u64> = doc.records.iter().map(|r| r.time).collect();
    assert_eq!(times, vec![60, 120]);
    assert_eq!(doc.format, TimeFormat::Short);
}

#[test]
fn empty_input_renders_nothing() {
    for raw in ["", "\n\n"] {
        let timeline = Timeline::from_doc(&parse_document(raw));
        assert!(timeline.is_empty());
        assert_eq!(timeline.to_html(), "");
        assert_eq!(extract(&timeline.to_html()), "");
    }
}
