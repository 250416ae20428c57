//! Fuzz target: `/control` and command-pull bodies
//!
//! Feeds arbitrary text through both HTTP decoders and the enqueueing
//! handler. None of them may panic, and the handler may only answer
//! 200, 400 or 503.
//!
//! cargo fuzz run fuzz_control_body

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartwindow::adapters::http::{decode_control, decode_pull, handle_control};
use smartwindow::events::Inbox;

fuzz_target!(|data: &[u8]| {
    let Ok(body) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(cmd) = decode_control(Some(body), 0) {
        assert!(cmd.raw.len() <= smartwindow::app::commands::RAW_PAYLOAD_CAP);
    }
    let _ = decode_pull(200, body, 0);

    let inbox = Inbox::new();
    let reply = handle_control(Some(body), 0, &inbox);
    assert!(matches!(reply.status, 200 | 400 | 503));
    assert_eq!(reply.status == 200, inbox.len() == 1);
});
