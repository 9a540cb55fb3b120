#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate ddnsr;

fuzz_target!(|data: &[u8]| {
    // Anything that parses must encode, and parse again to the same names.
    if let Ok(m) = ddnsr::Message::from_slice(data) {
        if let Ok(buf) = m.to_vec() {
            let again = ddnsr::Message::from_slice(&buf).expect("re-encoded message failed to parse");
            assert_eq!(m.questions, again.questions);
        }
    }
});
