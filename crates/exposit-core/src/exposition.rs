//! Prometheus text exposition (format version 0.0.4).
//!
//! `encode` is a pure function of the snapshots it is given: same input,
//! same bytes. Every metric is followed by a `<name>_created` gauge family
//! carrying its creation time as Unix epoch seconds.

use std::fmt::Write;

use crate::metric::{MetricSnapshot, MetricValue};

/// Content type for responses carrying [`encode`] output.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render snapshots in the given order.
pub fn encode(metrics: &[MetricSnapshot]) -> String {
    let mut out = String::new();
    for m in metrics {
        let help = escape_help(&m.help);
        let _ = writeln!(out, "# HELP {} {}", m.name, help);
        let _ = writeln!(out, "# TYPE {} {}", m.name, m.kind().as_str());
        match m.value {
            MetricValue::Counter(v) => {
                let _ = writeln!(out, "{} {}", m.name, format_float(v));
            }
            MetricValue::Summary { count, sum } => {
                // count goes through the float formatter too: `1.0`, not `1`
                let _ = writeln!(out, "{}_count {}", m.name, format_float(count as f64));
                let _ = writeln!(out, "{}_sum {}", m.name, format_float(sum));
            }
        }
        let _ = writeln!(out, "# HELP {}_created {}", m.name, help);
        let _ = writeln!(out, "# TYPE {}_created gauge", m.name);
        let _ = writeln!(out, "{}_created {}", m.name, format_float(m.created));
    }
    out
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Format a sample value.
///
/// Shortest round-trip digits, always with a fractional part in fixed
/// notation (`0.0`, `2.5`). Positive values of a million or more switch to
/// `d.ddde+NN` (`1.7568005416254878e+09`). Magnitudes below `1e-4` or from
/// `1e16` up use a signed two-digit exponent (`1e-05`).
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.25e-7".
    let sci = format!("{:e}", v.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let sign = if v < 0.0 { "-" } else { "" };

    if v > 0.0 && exp >= 6 {
        return scientific(sign, &digits, exp);
    }
    if (-4..16).contains(&exp) {
        return fixed(sign, &digits, exp);
    }
    scientific(sign, &digits, exp)
}

fn fixed(sign: &str, digits: &str, exp: i32) -> String {
    if exp < 0 {
        let zeros = "0".repeat((-exp - 1) as usize);
        return format!("{sign}0.{zeros}{digits}");
    }
    let int_len = exp as usize + 1;
    if digits.len() <= int_len {
        let pad = "0".repeat(int_len - digits.len());
        format!("{sign}{digits}{pad}.0")
    } else {
        let (int_part, frac) = digits.split_at(int_len);
        format!("{sign}{int_part}.{frac}")
    }
}

fn scientific(sign: &str, digits: &str, exp: i32) -> String {
    let (lead, rest) = digits.split_at(1);
    let exp_sign = if exp < 0 { '-' } else { '+' };
    if rest.is_empty() {
        format!("{sign}{lead}e{exp_sign}{:02}", exp.abs())
    } else {
        format!("{sign}{lead}.{rest}e{exp_sign}{:02}", exp.abs())
    }
}
