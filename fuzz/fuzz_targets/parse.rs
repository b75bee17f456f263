#![no_main]

use libfuzzer_sys::fuzz_target;
use veriform::decoder::Decoder;
use veriform::parser::Parser;

// Any byte string must either decode to an object tree or fail with a
// `ParseError`; it must never panic, and the parser's own invariants (the
// decoder's stack is consistent on every path) must hold regardless of how
// malformed the input is.
fuzz_target!(|data: &[u8]| {
    let _ = Parser::new().parse(data, Decoder::new());
});
