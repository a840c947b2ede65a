//! End-to-end day scenarios: parse, simulate, render, compare full output

use hall_sim_core::{parse_script, simulate, ScriptError};

fn day(input: &str) -> String {
    simulate(&parse_script(input).unwrap()).render()
}

#[test]
fn busy_evening_full_transcript() {
    let input = "\
3
09:00 19:00
10
08:48 1 client1
09:41 1 client1
09:48 1 client2
09:52 3 client1
09:54 2 client1 1
10:25 2 client2 2
10:58 1 client3
10:59 2 client3 3
11:30 1 client4
11:35 2 client4 2
11:45 3 client4
12:33 4 client1
12:43 4 client2
15:52 4 client4
";
    let expected = "\
09:00
08:48 1 client1
08:48 13 NotOpenYet
09:41 1 client1
09:48 1 client2
09:52 3 client1
09:52 13 ICanWaitNoLonger!
09:54 2 client1 1
10:25 2 client2 2
10:58 1 client3
10:59 2 client3 3
11:30 1 client4
11:35 2 client4 2
11:35 13 PlaceIsBusy
11:45 3 client4
12:33 4 client1
12:33 12 client4 1
12:43 4 client2
15:52 4 client4
19:00 11 client3
19:00
1 70 05:58
2 30 02:18
3 90 08:01
";
    assert_eq!(day(input), expected);
}

#[test]
fn rejection_prints_only_a_line_number() {
    // Header table count of zero: rejected at line 1
    let err = parse_script("0\n08:00 20:00\n100\n").unwrap_err();
    assert_eq!(err, ScriptError::Rejected { line: 1 });
}

#[test]
fn rejection_counts_past_blank_event_lines() {
    let input = "2\n08:00 20:00\n50\n\n08:10 1 ann\n\n\n08:05 1 bob\n";
    // Blank lines do not count: the backwards timestamp is event-section
    // line 5, not 8
    let err = parse_script(input).unwrap_err();
    assert_eq!(err.line(), 5);
}

#[test]
fn open_and_close_frame_the_transcript() {
    let out = day("4\n07:30 22:15\n9\n");
    assert!(out.starts_with("07:30\n"));
    assert!(out.contains("\n22:15\n"));
    assert!(out.ends_with("4 0 00:00\n"));
}

#[test]
fn seated_client_pays_through_closing() {
    // ann never leaves: settled by the sweep at 21:00, 12h30m -> 13 hours
    let out = day("1\n08:30 21:00\n100\n08:30 1 ann\n08:30 2 ann 1\n");
    assert_eq!(
        out,
        "08:30\n\
         08:30 1 ann\n\
         08:30 2 ann 1\n\
         21:00 11 ann\n\
         21:00\n\
         1 1300 12:30\n"
    );
}

#[test]
fn capacity_ejection_keeps_queue_at_n() {
    // N=2: ann+bob seated, cat+dan queue, eve is ejected
    let input = "\
2
08:00 20:00
5
08:00 1 ann
08:00 1 bob
08:01 2 ann 1
08:01 2 bob 2
08:02 3 cat
08:03 3 dan
08:04 3 eve
09:00 4 ann
";
    let out = day(input);
    assert!(out.contains("08:04 3 eve\n08:04 11 eve\n"));
    assert!(out.contains("09:00 4 ann\n09:00 12 cat 1\n"));
    // dan still queued at close; eve long gone
    assert!(out.contains("20:00 11 dan\n"));
    assert!(!out.contains("20:00 11 eve\n"));
}

#[test]
fn transcript_serializes_to_json() {
    let transcript = simulate(&parse_script("1\n08:00 09:00\n100\n08:10 1 ann\n").unwrap());
    let json = serde_json::to_value(&transcript).unwrap();
    assert_eq!(json["report"][0]["table"], 1);
    assert_eq!(json["lines"][0]["Open"]["time"], 480);
}
