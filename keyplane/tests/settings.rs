// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading settings from host storage.

#![cfg(feature = "serde")]

use keyplane::{Settings, Timing};

#[test]
fn partial_document_keeps_defaults() {
    let settings: Settings = serde_json::from_str(
        r#"{ "period_shortcut": true, "timing": { "backspace_repeat_ms": 50 } }"#,
    )
    .unwrap();
    assert!(settings.period_shortcut);
    assert!(!settings.auto_capitalization);
    assert!(settings.pool_views);
    assert_eq!(
        settings.timing,
        Timing {
            backspace_repeat_ms: 50,
            ..Timing::default()
        }
    );
}

#[test]
fn empty_document_is_default() {
    let settings: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn trait_poll_interval_is_optional() {
    let settings: Settings =
        serde_json::from_str(r#"{ "timing": { "trait_poll_interval_ms": 250 } }"#).unwrap();
    assert_eq!(settings.timing.trait_poll_interval_ms, Some(250));
}
