//! Canonicalises free-form algorithm text into a numbered step list.
//!
//! The first and last steps are always synthesised so every record gets the
//! same "Start the program" / "Stop the program" framing regardless of what
//! the user typed.

pub const START_STEP: &str = "Start the program";
pub const STOP_STEP: &str = "Stop the program";

/// Strip a leading `Step <n>` label followed by `:`, `-` or `.`.
/// Returns the input untouched when no complete label is present.
fn strip_step_label(line: &str) -> &str {
    let Some(prefix) = line.get(..4) else {
        return line;
    };
    if !prefix.eq_ignore_ascii_case("step") {
        return line;
    }
    let rest = line[4..].trim_start();
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return line;
    }
    let rest = rest[digits..].trim_start();
    match rest.strip_prefix([':', '-', '.']) {
        Some(body) => body.trim_start(),
        None => line,
    }
}

fn is_synthesised(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("start the program") || lower.contains("stop the program")
}

/// The cleaned, deduplicated middle steps of an algorithm, in input order.
pub fn algorithm_steps(raw: &str) -> Vec<String> {
    let mut steps: Vec<String> = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let cleaned = strip_step_label(line).trim();
        if cleaned.is_empty() || is_synthesised(cleaned) {
            continue;
        }
        if !steps.iter().any(|s| s == cleaned) {
            steps.push(cleaned.to_string());
        }
    }
    steps
}

/// Normalise algorithm text into `Step 1: Start the program`, the renumbered
/// input steps, and a closing `Step N: Stop the program`, joined by newlines.
pub fn normalize_algorithm(raw: &str) -> String {
    let steps = algorithm_steps(raw);
    let mut out = Vec::with_capacity(steps.len() + 2);
    out.push(format!("Step 1: {START_STEP}"));
    for (i, step) in steps.iter().enumerate() {
        out.push(format!("Step {}: {}", i + 2, step));
    }
    out.push(format!("Step {}: {STOP_STEP}", steps.len() + 2));
    log::debug!("algorithm normalised to {} steps", out.len());
    out.join("\n")
}
