use beatnik::lang::tokenizing::{is_word_character, tokenize_from_file, tokenize_from_source};
use beatnik::runtime::error::ErrorKind;
use test_case::test_case;

fn texts(source: &str) -> Vec<String> {
    tokenize_from_source("<test>", source)
        .iter()
        .map(|word| word.text().to_string())
        .collect()
}

#[test_case("", &[]; "empty text")]
#[test_case("   \n\t ", &[]; "only whitespace")]
#[test_case("!!! ... ???", &[]; "only punctuation")]
#[test_case("hello", &["hello"]; "single word")]
#[test_case("p/!!!x", &["p", "x"]; "punctuation separates")]
#[test_case("  Hello,   World!  ", &["Hello", "World"]; "case is preserved")]
#[test_case("one\ntwo\r\nthree", &["one", "two", "three"]; "line endings separate")]
#[test_case("don't", &["don", "t"]; "apostrophe splits")]
#[test_case("snake_case 42", &["snake_case", "42"]; "underscores and digits are word characters")]
#[test_case("café au lait", &["caf", "au", "lait"]; "non ascii letters separate")]
fn splits_into_words(source: &str, expected: &[&str]) {
    assert_eq!(texts(source), expected);
}

#[test]
fn word_characters() {
    for character in ['a', 'Z', '0', '9', '_'] {
        assert!(is_word_character(&character), "{:?}", character);
    }

    for character in [' ', '-', '\'', '\n', 'é'] {
        assert!(!is_word_character(&character), "{:?}", character);
    }
}

#[test]
fn words_carry_their_start_location() {
    let words = tokenize_from_source("<test>", "ab, cd\n  ef");
    let locations: Vec<(usize, usize)> = words
        .iter()
        .map(|word| (word.location().line(), word.location().column()))
        .collect();

    assert_eq!(locations, [(1, 1), (1, 5), (2, 3)]);
    assert!(words.iter().all(|word| word.location().path() == "<test>"));
}

#[test]
fn display_is_the_word_text() {
    let words = tokenize_from_source("<test>", "  Beat");

    assert_eq!(words[0].to_string(), "Beat");
    assert_eq!(format!("{:?}", words[0]), "<test> (1, 3): Beat");
}

#[test]
fn missing_file_is_an_io_error() {
    let error = tokenize_from_file("/this/path/does/not/exist.beatnik")
        .expect_err("reading a missing file should fail");

    assert_eq!(error.kind(), ErrorKind::Io);
    assert!(error.error().contains("exist.beatnik"));
}

#[test]
fn file_words_are_tagged_with_the_path() {
    let path = std::path::Path::new(env!("CARGO_TARGET_TMPDIR")).join("tokenize_file.beatnik");

    std::fs::write(&path, "Read this\nfile").unwrap();

    let path = path.to_string_lossy().to_string();
    let words = tokenize_from_file(&path).unwrap();

    assert_eq!(words.len(), 3);
    assert_eq!(words[2].location().path(), &path);
    assert_eq!(words[2].location().line(), 2);
}
