#![no_main]
use libfuzzer_sys::fuzz_target;
use memsight::view::format::{DumpFormat, DumpLine};

fuzz_target!(|data: &[u8]| {
    let Some((&radix, rest)) = data.split_first() else {
        return;
    };
    let format = DumpFormat {
        line_length: 16,
        radix: 2 + u32::from(radix) % 35,
        address_width: 8,
    };
    for (i, chunk) in rest.chunks(16).enumerate() {
        let text = DumpLine {
            address: (i * 16) as u64,
            bytes: chunk,
            file_len: rest.len() as u64,
        }
        .render(&format);
        assert!(text.ends_with('\n'));
        assert!(text.contains(" | "));
    }
});
