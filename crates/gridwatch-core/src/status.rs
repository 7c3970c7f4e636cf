// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of GridWatch.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! System status classification.
//!
//! The operator publishes status as loosely structured free text. Each rule
//! below recognizes one condition family; rules are evaluated top to bottom
//! and the first match wins, so an OP-7 declaration outranks an EEA mention
//! in the same text. Classification is total: anything unrecognized is the
//! Normal baseline, never an error.

use gridwatch_types::status::{
    STATUS_EEA, STATUS_EEA1, STATUS_EEA2, STATUS_EEA3, STATUS_MLCC2, STATUS_OP4, STATUS_OP7,
    Severity, StatusRecord,
};

/// One classification rule: matches on the lower-cased status text and
/// returns a record only when its condition family applies. The raw text
/// is passed alongside for branches that keep it as the status label.
type Rule = fn(&str, &str) -> Option<StatusRecord>;

/// Ordered decision list; first match wins, no fallthrough
const RULES: [Rule; 7] = [
    op7_emergency,
    eea_levels,
    op4_actions,
    mlcc_alert,
    power_warning,
    power_watch,
    power_caution,
];

/// Classify raw operator status text into a normalized record.
pub fn parse_status(status_text: &str) -> StatusRecord {
    let lower = status_text.to_lowercase();
    for rule in RULES {
        if let Some(record) = rule(&lower, status_text) {
            return record;
        }
    }
    StatusRecord::baseline(status_text)
}

fn op7_emergency(lower: &str, _raw: &str) -> Option<StatusRecord> {
    if !(lower.contains("op-7") || lower.contains("op7") || lower.contains("load shed")) {
        return None;
    }
    Some(StatusRecord {
        status: STATUS_OP7.to_owned(),
        severity: Severity::Emergency,
        op4_action: None,
        eea_level: None,
        description: "Emergency - Load shedding may occur".to_owned(),
        is_emergency: true,
    })
}

fn eea_levels(lower: &str, _raw: &str) -> Option<StatusRecord> {
    if !(lower.contains("eea") || lower.contains("energy emergency alert")) {
        return None;
    }
    let record = if lower.contains("eea 3") || lower.contains("eea level 3") {
        StatusRecord {
            status: STATUS_EEA3.to_owned(),
            severity: Severity::Emergency,
            op4_action: None,
            eea_level: Some(3),
            description: "Energy Emergency Alert Level 3".to_owned(),
            is_emergency: true,
        }
    } else if lower.contains("eea 2") || lower.contains("eea level 2") {
        StatusRecord {
            status: STATUS_EEA2.to_owned(),
            severity: Severity::Warning,
            op4_action: None,
            eea_level: Some(2),
            description: "Energy Emergency Alert Level 2".to_owned(),
            is_emergency: true,
        }
    } else if lower.contains("eea 1") || lower.contains("eea level 1") {
        StatusRecord {
            status: STATUS_EEA1.to_owned(),
            severity: Severity::Elevated,
            op4_action: None,
            eea_level: Some(1),
            description: "Energy Emergency Alert Level 1".to_owned(),
            is_emergency: false,
        }
    } else {
        // EEA declared but no recognizable level number
        StatusRecord {
            status: STATUS_EEA.to_owned(),
            severity: Severity::Elevated,
            op4_action: None,
            eea_level: None,
            description: "Energy Emergency Alert declared".to_owned(),
            is_emergency: false,
        }
    };
    Some(record)
}

fn op4_actions(lower: &str, _raw: &str) -> Option<StatusRecord> {
    if !(lower.contains("op-4") || lower.contains("op4")) {
        return None;
    }
    let mut record = StatusRecord {
        status: STATUS_OP4.to_owned(),
        severity: Severity::Elevated,
        op4_action: None,
        eea_level: None,
        description: "OP-4 Capacity Deficiency Procedure Active".to_owned(),
        is_emergency: false,
    };
    if let Some(action) = extract_op4_action(lower) {
        record.op4_action = Some(action);
        if action >= 10 {
            record.severity = Severity::Emergency;
            record.is_emergency = true;
            record.description = format!("OP-4 Action {action} - Critical");
        } else if action >= 6 {
            record.severity = Severity::Warning;
            record.is_emergency = true;
            record.description = format!("OP-4 Action {action} - Power Warning");
        } else if action >= 4 {
            record.severity = Severity::Watch;
            record.description = format!("OP-4 Action {action} - Power Watch");
        } else {
            record.description = format!("OP-4 Action {action} - Early Warning");
        }
    }
    Some(record)
}

fn mlcc_alert(lower: &str, _raw: &str) -> Option<StatusRecord> {
    if !(lower.contains("m/lcc") || lower.contains("mlcc") || lower.contains("abnormal")) {
        return None;
    }
    Some(StatusRecord {
        status: STATUS_MLCC2.to_owned(),
        severity: Severity::Advisory,
        op4_action: None,
        eea_level: None,
        description: "Abnormal conditions alert".to_owned(),
        is_emergency: false,
    })
}

// The power warning/watch/caution branches keep the raw operator text as
// the status label; only the procedure branches above normalize it.
fn power_warning(lower: &str, raw: &str) -> Option<StatusRecord> {
    lower.contains("power warning").then(|| StatusRecord {
        status: raw.to_owned(),
        severity: Severity::Warning,
        op4_action: None,
        eea_level: None,
        description: "Power Warning - Immediate reduction needed".to_owned(),
        is_emergency: true,
    })
}

fn power_watch(lower: &str, raw: &str) -> Option<StatusRecord> {
    lower.contains("power watch").then(|| StatusRecord {
        status: raw.to_owned(),
        severity: Severity::Watch,
        op4_action: None,
        eea_level: None,
        description: "Power Watch - Conservation may be needed".to_owned(),
        is_emergency: false,
    })
}

fn power_caution(lower: &str, raw: &str) -> Option<StatusRecord> {
    lower.contains("power caution").then(|| StatusRecord {
        status: raw.to_owned(),
        severity: Severity::Elevated,
        op4_action: None,
        eea_level: None,
        description: "Power Caution - Resources on alert".to_owned(),
        is_emergency: false,
    })
}

/// Extract an OP-4 action number (1-11) from the lower-cased status text.
///
/// Three patterns are tried in order: "action N", "op-4 action N" / "op4
/// action N", then the bare "op-4 N" / "op4 N". A hit outside 1-11 is
/// rejected and the next pattern is tried instead.
fn extract_op4_action(lower: &str) -> Option<u8> {
    let patterns: [&[&str]; 5] = [
        &["action"],
        &["op-4", "action"],
        &["op4", "action"],
        &["op-4"],
        &["op4"],
    ];
    for words in patterns {
        if let Some(number) = number_after(lower, words)
            && (1..=11).contains(&number)
        {
            return Some(number as u8);
        }
    }
    None
}

/// First occurrence of `words` (whitespace-separated) followed by a number
fn number_after(text: &str, words: &[&str]) -> Option<u32> {
    let first = words.first()?;
    let mut from = 0;
    while let Some(found) = text[from..].find(first) {
        let start = from + found;
        if let Some(number) = match_words_then_number(text, start, words) {
            return Some(number);
        }
        from = start + 1;
    }
    None
}

fn match_words_then_number(text: &str, start: usize, words: &[&str]) -> Option<u32> {
    let mut at = start;
    for (index, word) in words.iter().enumerate() {
        if index > 0 {
            let skipped = skip_ascii_whitespace(text, at);
            if skipped == at {
                return None;
            }
            at = skipped;
        }
        if !text[at..].starts_with(word) {
            return None;
        }
        at += word.len();
    }
    let digits_start = skip_ascii_whitespace(text, at);
    if digits_start == at {
        return None;
    }
    let bytes = text.as_bytes();
    let mut digits_end = digits_start;
    while digits_end < bytes.len() && bytes[digits_end].is_ascii_digit() {
        digits_end += 1;
    }
    if digits_end == digits_start {
        return None;
    }
    text[digits_start..digits_end].parse().ok()
}

fn skip_ascii_whitespace(text: &str, mut at: usize) -> usize {
    let bytes = text.as_bytes();
    while at < bytes.len() && bytes[at].is_ascii_whitespace() {
        at += 1;
    }
    at
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op7_wins_regardless_of_case_and_context() {
        for text in [
            "OP-7 Emergency declared",
            "system entered op7 at 14:00",
            "Load Shed directive issued for all zones",
            "EEA 3 escalated, OP-7 in effect",
        ] {
            let record = parse_status(text);
            assert_eq!(record.severity, Severity::Emergency, "{text}");
            assert!(record.is_emergency, "{text}");
            assert_eq!(record.status, STATUS_OP7, "{text}");
        }
    }

    #[test]
    fn eea_levels_map_to_expected_severity() {
        let record = parse_status("Energy Emergency Alert - EEA Level 3");
        assert_eq!(record.eea_level, Some(3));
        assert_eq!(record.severity, Severity::Emergency);
        assert!(record.is_emergency);

        let record = parse_status("EEA 2 declared");
        assert_eq!(record.eea_level, Some(2));
        assert_eq!(record.severity, Severity::Warning);
        assert!(record.is_emergency);

        let record = parse_status("eea level 1");
        assert_eq!(record.eea_level, Some(1));
        assert_eq!(record.severity, Severity::Elevated);
        assert!(!record.is_emergency);
    }

    #[test]
    fn eea_without_level_stays_on_eea_branch() {
        let record = parse_status("Energy Emergency Alert in effect");
        assert_eq!(record.status, STATUS_EEA);
        assert_eq!(record.eea_level, None);
        assert_eq!(record.severity, Severity::Elevated);
        assert!(!record.is_emergency);
    }

    #[test]
    fn op4_action_severity_step_function() {
        let cases = [
            (1, Severity::Elevated, false),
            (3, Severity::Elevated, false),
            (4, Severity::Watch, false),
            (5, Severity::Watch, false),
            (6, Severity::Warning, true),
            (9, Severity::Warning, true),
            (10, Severity::Emergency, true),
            (11, Severity::Emergency, true),
        ];
        for (action, severity, emergency) in cases {
            let record = parse_status(&format!("OP-4 Action {action} implemented"));
            assert_eq!(record.status, STATUS_OP4);
            assert_eq!(record.op4_action, Some(action), "action {action}");
            assert_eq!(record.severity, severity, "action {action}");
            assert_eq!(record.is_emergency, emergency, "action {action}");
        }
    }

    #[test]
    fn op4_action_nine_scenario() {
        let record = parse_status("System in OP-4 Action 9 - Industrial Curtailment");
        assert_eq!(record.status, STATUS_OP4);
        assert_eq!(record.op4_action, Some(9));
        assert_eq!(record.severity, Severity::Warning);
        assert!(record.is_emergency);
    }

    #[test]
    fn op4_out_of_range_action_is_treated_as_absent() {
        for text in ["OP-4 Action 12", "OP-4 Action 0", "op4 action 99"] {
            let record = parse_status(text);
            assert_eq!(record.op4_action, None, "{text}");
            assert_eq!(record.severity, Severity::Elevated, "{text}");
            assert_eq!(
                record.description,
                "OP-4 Capacity Deficiency Procedure Active"
            );
        }
    }

    #[test]
    fn op4_bare_number_pattern() {
        let record = parse_status("op-4 7 in effect");
        assert_eq!(record.op4_action, Some(7));
        assert_eq!(record.severity, Severity::Warning);
    }

    #[test]
    fn mlcc_and_power_statuses() {
        assert_eq!(parse_status("M/LCC 2 Alert").severity, Severity::Advisory);
        assert_eq!(
            parse_status("abnormal conditions reported").status,
            STATUS_MLCC2
        );

        let warning = parse_status("Power Warning issued");
        assert_eq!(warning.severity, Severity::Warning);
        assert!(warning.is_emergency);

        assert_eq!(parse_status("Power Watch").severity, Severity::Watch);
        assert_eq!(parse_status("POWER CAUTION").severity, Severity::Elevated);
    }

    #[test]
    fn power_branches_keep_raw_status_text() {
        let record = parse_status("Power Watch in effect until 9 PM");
        assert_eq!(record.status, "Power Watch in effect until 9 PM");
        assert_eq!(record.severity, Severity::Watch);

        let record = parse_status("Power Warning issued");
        assert_eq!(record.status, "Power Warning issued");

        let record = parse_status("POWER CAUTION");
        assert_eq!(record.status, "POWER CAUTION");
    }

    #[test]
    fn unrecognized_text_is_baseline_normal() {
        let record = parse_status("Normal");
        assert_eq!(record.severity, Severity::Normal);
        assert!(!record.is_emergency);
        assert_eq!(record.description, "Grid operating normally");
        assert_eq!(record.op4_action, None);
        assert_eq!(record.eea_level, None);
    }

    #[test]
    fn rule_order_op4_before_mlcc() {
        // Text matching both OP-4 and the abnormal-conditions family
        let record = parse_status("OP-4 declared due to abnormal conditions");
        assert_eq!(record.status, STATUS_OP4);
    }

    #[test]
    fn number_scanner_skips_incomplete_occurrences() {
        // First "action" has no number; the later one does
        assert_eq!(
            number_after("action pending, action 5 started", &["action"]),
            Some(5)
        );
        assert_eq!(number_after("no digits here", &["action"]), None);
        assert_eq!(number_after("action5", &["action"]), None); // whitespace required
    }
}
