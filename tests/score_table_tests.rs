use beatnik::runtime::data_structures::score_tables::{
    load_action_scores, load_character_scores, parse_action_scores, parse_character_scores,
    Action,
};
use beatnik::runtime::error::ErrorKind;
use test_case::test_case;

#[test]
fn character_table_with_comments() {
    let source = "# vowels are cheap\na = 1\n\nE=1   # upper case keys are folded\nz = 10\n";
    let scores = parse_character_scores("<table>", source).unwrap();

    assert_eq!(scores.len(), 3);
    assert_eq!(scores.points('e'), 1);
    assert_eq!(scores.score("Zea"), 12);
}

#[test]
fn action_table_by_name() {
    let source = "1 = push\n2 = OUTPUT\n-3 = bnz\n";
    let actions = parse_action_scores("<table>", source).unwrap();

    assert_eq!(actions.action_for(1), Some(Action::Push));
    assert_eq!(actions.action_for(2), Some(Action::Output));
    assert_eq!(actions.action_for(-3), Some(Action::BackwardIfNonZero));
    assert_eq!(actions.action_for(5), None);
}

#[test_case("a 1"; "missing equals")]
#[test_case("ab = 1"; "more than one letter")]
#[test_case("1 = 1"; "not a letter")]
#[test_case("a = -1"; "negative points")]
#[test_case("a = many"; "not a number")]
fn bad_character_tables(line: &str) {
    let source = format!("b = 3\n{}\n", line);
    let error = parse_character_scores("<table>", &source).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Config);
    assert_eq!(error.location().as_ref().map(|location| location.line()), Some(2));
}

#[test_case("five = push"; "score is not a number")]
#[test_case("5 = jump"; "unknown action")]
#[test_case("5"; "missing equals")]
fn bad_action_tables(line: &str) {
    let error = parse_action_scores("<table>", line).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Config);
    assert!(error.to_string().starts_with("<table> (1, 1): "));
}

#[test]
fn action_names_round_trip() {
    for action in Action::ALL {
        assert_eq!(action.name().parse::<Action>().unwrap(), action);
    }
}

#[test]
fn tables_load_from_files() {
    let directory = std::path::Path::new(env!("CARGO_TARGET_TMPDIR"));
    let characters = directory.join("score_table_tests_characters.txt");
    let actions = directory.join("score_table_tests_actions.txt");

    std::fs::write(&characters, "x = 3\n").unwrap();
    std::fs::write(&actions, "3 = quit\n").unwrap();

    let characters = load_character_scores(&characters.to_string_lossy()).unwrap();
    let actions = load_action_scores(&actions.to_string_lossy()).unwrap();

    assert_eq!(actions.action_for(characters.score("x")), Some(Action::Quit));
}

#[test]
fn missing_table_file() {
    let error = load_character_scores("/no/such/table.txt").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Io);
}
