#![no_main]

use libfuzzer_sys::fuzz_target;
use wire_pole::core::{parse_pole_directory, write_pole_directory};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(poles) = parse_pole_directory(text) {
        // Was geparst wurde, muss sich auch wieder schreiben lassen
        let _ = write_pole_directory(&poles);
    }
});
