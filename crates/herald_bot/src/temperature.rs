//! Temperature-conversion message event.
//!
//! Watches guild chatter for temperature mentions (`75F`, `23.5°C`,
//! `10 degrees C`) and offers the other scale. Whether the event fires at
//! all is a per-guild configuration toggle checked by the message handler.

use regex::Regex;
use std::sync::LazyLock;

static TEMPERATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d+(?:\.\d+)?)\s*(?:degrees?\s*)?°?([FfCc])\b").expect("valid pattern")
});

/// Extract every temperature mention in `content` and convert it to the
/// other scale, one formatted conversion per mention, in order.
pub fn scan_temperatures(content: &str) -> Vec<String> {
    let mut conversions = Vec::new();
    for caps in TEMPERATURE.captures_iter(content) {
        let shown = &caps[1];
        let Ok(value) = shown.parse::<f64>() else {
            continue;
        };
        match caps[2].to_ascii_uppercase().as_str() {
            "F" => {
                let celsius = (value - 32.0) * 5.0 / 9.0;
                conversions.push(format!("{shown}°F = {celsius:.1}°C"));
            }
            "C" => {
                let fahrenheit = value * 9.0 / 5.0 + 32.0;
                conversions.push(format!("{shown}°C = {fahrenheit:.1}°F"));
            }
            _ => {}
        }
    }
    conversions
}

/// The full reply for a message, or `None` when it mentions no
/// temperatures.
pub fn conversion_reply(content: &str) -> Option<String> {
    let conversions = scan_temperatures(content);
    if conversions.is_empty() {
        None
    } else {
        Some(format!("🌡️ {}", conversions.join(" | ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_fahrenheit_to_celsius() {
        assert_eq!(scan_temperatures("it hit 75F today"), vec!["75°F = 23.9°C"]);
    }

    #[test]
    fn converts_celsius_to_fahrenheit() {
        assert_eq!(scan_temperatures("about 0C outside"), vec!["0°C = 32.0°F"]);
    }

    #[test]
    fn accepts_degree_symbol_and_word() {
        assert_eq!(scan_temperatures("23.5°C"), vec!["23.5°C = 74.3°F"]);
        assert_eq!(scan_temperatures("10 degrees C"), vec!["10°C = 50.0°F"]);
    }

    #[test]
    fn handles_negative_values() {
        assert_eq!(scan_temperatures("-40F"), vec!["-40°F = -40.0°C"]);
    }

    #[test]
    fn collects_multiple_mentions_in_order() {
        let reply = conversion_reply("went from 32F to 100F").unwrap();
        assert_eq!(reply, "🌡️ 32°F = 0.0°C | 100°F = 37.8°C");
    }

    #[test]
    fn ignores_messages_without_temperatures() {
        assert!(conversion_reply("no numbers here").is_none());
        assert!(conversion_reply("fahrenheit is a word, 451 is a number").is_none());
    }

    #[test]
    fn does_not_match_inside_words() {
        assert!(scan_temperatures("x86Fork").is_empty());
    }
}
