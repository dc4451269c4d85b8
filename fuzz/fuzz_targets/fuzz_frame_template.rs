#![no_main]

use libfuzzer_sys::fuzz_target;
use mbus_telegen::util::hex::parse_telegram;
use mbus_telegen::FrameTemplate;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (header, footer) = text.split_once('|').unwrap_or((text, ""));

    if let Ok(template) = FrameTemplate::parse(header, footer) {
        let wire = template.assemble(&[]);
        if !wire.is_empty() {
            assert!(parse_telegram(&wire).is_ok());
        }
    }
});
