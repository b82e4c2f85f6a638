//! User-Friendly Error Formatting
//!
//! Turns replay failures into messages with troubleshooting hints.

use std::fmt::Write;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Format error for user consumption
///
/// The whole context chain is inspected to pick the hints; the chain itself
/// is printed under "Technical Details".
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        &mut output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(&mut output).ok();

    let chain = format!("{:#}", error);

    if chain.contains("timed out") {
        format_timeout_error(&mut output);
    } else if chain.contains("gesture #") {
        format_gesture_error(&mut output);
    } else if chain.contains("gesture script") {
        format_script_error(&mut output);
    } else if chain.contains("config") {
        format_config_error(&mut output);
    } else {
        format_generic_error(&mut output, &error.to_string());
    }

    writeln!(&mut output).ok();
    writeln!(&mut output, "{}", RULE).ok();
    writeln!(&mut output, "Technical Details:").ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "{}", chain).ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "{}", RULE).ok();
    writeln!(
        &mut output,
        "  Run with -vv for per-gesture logs: lamco-gesture-replay -vv -s script.toml"
    )
    .ok();

    output
}

fn format_config_error(output: &mut String) {
    writeln!(output, "Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "Problem with configuration file.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Invalid TOML syntax").ok();
    writeln!(output, "     → Check for typos, missing quotes, etc.").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Out-of-range values").ok();
    writeln!(output, "     → Speeds and spans must be positive").ok();
    writeln!(output, "     → pacing.flush_interval_ms must be at least 1").ok();
    writeln!(
        output,
        "     → target.default_source must be \"touch\" or \"mouse\""
    )
    .ok();
}

fn format_script_error(output: &mut String) {
    writeln!(output, "Gesture Script Error").ok();
    writeln!(output).ok();
    writeln!(output, "The gesture script could not be read.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. No [[gesture]] entries").ok();
    writeln!(output, "     → Each gesture is its own [[gesture]] table").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Unknown gesture type").ok();
    writeln!(
        output,
        "     → type must be \"smooth_scroll\", \"pinch\" or \"tap\""
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  3. Missing fields").ok();
    writeln!(output, "     → smooth_scroll needs anchor and distances").ok();
    writeln!(output, "     → pinch needs anchor and scale_factor").ok();
    writeln!(output, "     → tap needs position").ok();
}

fn format_gesture_error(output: &mut String) {
    writeln!(output, "Invalid Gesture Parameters").ok();
    writeln!(output).ok();
    writeln!(output, "A gesture in the script was rejected.").ok();
    writeln!(output).ok();
    writeln!(output, "Check the entry named below:").ok();
    writeln!(output).ok();
    writeln!(output, "  - Positions and distances must be finite").ok();
    writeln!(output, "  - speed_px_s and scale_factor must be positive").ok();
    writeln!(
        output,
        "  - Scroll segments after the first must be long enough to take time"
    )
    .ok();
}

fn format_timeout_error(output: &mut String) {
    writeln!(output, "Replay Timed Out").ok();
    writeln!(output).ok();
    writeln!(output, "The gesture queue did not drain in time.").ok();
    writeln!(output).ok();
    writeln!(output, "  - Raise pacing.max_duration_ms").ok();
    writeln!(output, "  - Shorten long taps or slow scrolls").ok();
    writeln!(output, "  - Lower pacing.ack_latency_frames").ok();
}

fn format_generic_error(output: &mut String, error: &str) {
    writeln!(output, "Replay Error").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_user_error() {
        let error = anyhow::anyhow!("Failed to parse config file");
        let formatted = format_user_error(&error);
        assert!(formatted.contains("ERROR"));
        assert!(formatted.contains("Configuration Error"));
    }

    #[test]
    fn test_context_chain_selects_hints() {
        let error = anyhow::anyhow!("gesture #2: invalid scale factor -1")
            .context("Failed to load gestures");
        let formatted = format_user_error(&error);
        assert!(formatted.contains("Invalid Gesture Parameters"));
        assert!(formatted.contains("gesture #2"));
    }

    #[test]
    fn test_timeout_hints() {
        let error = anyhow::anyhow!("Replay timed out after 100 ms with 1 gestures pending");
        assert!(format_user_error(&error).contains("max_duration_ms"));
    }
}
