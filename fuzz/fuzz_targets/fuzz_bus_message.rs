//! Fuzz target: bus topic/payload translation
//!
//! The first byte picks a split point; the rest becomes topic + payload.
//! Translation must never panic and any particulate it yields is finite.
//!
//! cargo fuzz run fuzz_bus_message

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartwindow::adapters::bus::translate;
use smartwindow::events::Inbound;
use smartwindow::sensors::ParticulateUpdate;

fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = core::str::from_utf8(rest) else {
        return;
    };
    let at = (split as usize).min(text.len());
    if !text.is_char_boundary(at) {
        return;
    }
    let (payload, leaf) = text.split_at(at);
    let topic = format!("s_window/{leaf}");

    if let Ok(Some(Inbound::Particulate(update))) = translate("s_window", &topic, payload, 0) {
        match update {
            ParticulateUpdate::Pm25(v) | ParticulateUpdate::Pm10(v) => assert!(v.is_finite()),
            ParticulateUpdate::Aqi(_) => {}
        }
    }
});
