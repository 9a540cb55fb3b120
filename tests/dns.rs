use ddnsr::Message;
use pretty_assertions::assert_eq;
use regex::Regex;
use serde::Deserialize;
use std::fs;

const TEST_DATA_FILENAME: &str = "tests/test_data.yaml";

#[derive(Deserialize)]
struct TestCase {
    // Name of the test case.
    name: String,

    // Hex encoded reply datagram.
    binary: String,

    // Dig-ish formatted output.
    string: String,
}

fn load_tests() -> Vec<TestCase> {
    let s = fs::read(TEST_DATA_FILENAME).expect("failed read test input");
    serde_yaml::from_slice(&s).expect("failed to deserialise test input")
}

fn normalise_whitespace(s: &str) -> String {
    let re = Regex::new(r"[ ]+").unwrap();
    re.replace_all(s, " ").to_string()
}

fn decode(case: &TestCase) -> (Vec<u8>, Message) {
    let input = match hex::decode(&case.binary) {
        Err(e) => panic!("{}: Invalid test case input: {}", case.name, e),
        Ok(i) => i,
    };
    let m = match Message::from_slice(&input) {
        Err(e) => panic!("{}: Unable to parse: {}", case.name, e),
        Ok(p) => p,
    };
    (input, m)
}

#[test]
fn test_from_slice() {
    for case in load_tests() {
        let (_, m) = decode(&case);

        // Normalise the formatted output a little (to allow little whitespace changes).
        let got = normalise_whitespace(&format!("{}", m));
        let want = normalise_whitespace(&case.string);

        assert_eq!(got, want, "{}: Formatted string doesn't match", case.name);
    }
}

#[test]
fn test_to_vec() {
    for case in load_tests() {
        let (input, m) = decode(&case);

        // Replies written without compression may differ from the input,
        // but must decode to the same message.
        let buf = m.to_vec().unwrap_or_else(|e| panic!("{}: Unable to encode: {}", case.name, e));
        assert!(buf.len() >= input.len(), "{}: re-encoding shrank the message", case.name);

        let again = Message::from_slice(&buf).unwrap_or_else(|e| panic!("{}: Unable to re-parse: {}", case.name, e));
        assert_eq!(again.to_string(), m.to_string(), "{}: Re-encoded message differs", case.name);
        assert_eq!(again.to_vec().unwrap(), buf, "{}: Encoding is not stable", case.name);
    }
}

#[test]
fn test_truncated() {
    for case in load_tests() {
        let (input, _) = decode(&case);

        for len in 0..input.len() {
            assert!(
                Message::from_slice(&input[..len]).is_err(),
                "{}: parsed with only {} of {} bytes",
                case.name,
                len,
                input.len()
            );
        }
    }
}
