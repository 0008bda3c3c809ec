//! Conversions between domain values and their persisted text form.
//!
//! Colours are stored as `#RRGGBB` (opaque) or `#RRGGBBAA` hex strings and
//! schedules as comma-joined weekday tags such as `Mon,Wed,Fri`. Both
//! directions are lossless for every value the domain can hold.

use crate::{
    error::{Result, TrackerError},
    models::{Color, Schedule, WeekDay},
};

/// Column name reported when a colour fails to decode.
pub const COLOR_FIELD: &str = "color_hex";
/// Column name reported when a schedule fails to decode.
pub const SCHEDULE_FIELD: &str = "schedule";

const SCHEDULE_DELIMITER: &str = ",";

/// Formats a colour as uppercase hex, omitting the alpha byte when opaque.
pub fn color_to_hex(color: &Color) -> String {
    if color.is_opaque() {
        format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
    } else {
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            color.red, color.green, color.blue, color.alpha
        )
    }
}

/// Parses `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
pub fn hex_to_color(hex: &str) -> Result<Color> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TrackerError::Decoding { field: COLOR_FIELD });
    }

    let channel = |at: usize| {
        u8::from_str_radix(&digits[at..at + 2], 16)
            .map_err(|_| TrackerError::Decoding { field: COLOR_FIELD })
    };

    let alpha = if digits.len() == 8 { channel(6)? } else { u8::MAX };
    Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
}

/// Joins the schedule's days in Monday-first order.
pub fn schedule_to_string(schedule: &Schedule) -> String {
    schedule
        .iter()
        .map(|day| day.as_str())
        .collect::<Vec<_>>()
        .join(SCHEDULE_DELIMITER)
}

/// Splits a delimited weekday list back into a schedule.
///
/// Blank segments are ignored, so the empty string is the empty schedule.
pub fn string_to_schedule(s: &str) -> Result<Schedule> {
    s.split(SCHEDULE_DELIMITER)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| {
            tag.parse::<WeekDay>()
                .map_err(|_| TrackerError::Decoding {
                    field: SCHEDULE_FIELD,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_color_uses_short_form() {
        assert_eq!(color_to_hex(&Color::rgb(0xFD, 0x4C, 0x49)), "#FD4C49");
    }

    #[test]
    fn test_translucent_color_keeps_alpha() {
        assert_eq!(color_to_hex(&Color::rgba(0, 0x7B, 0xFA, 0x80)), "#007BFA80");
    }

    #[test]
    fn test_color_round_trip_over_channel_extremes() {
        let colors = [
            Color::rgba(0, 0, 0, 0),
            Color::rgb(0, 0, 0),
            Color::rgb(255, 255, 255),
            Color::rgba(1, 2, 3, 254),
            Color::rgba(0x12, 0xAB, 0xEF, 0x01),
        ];
        for color in colors {
            let hex = color_to_hex(&color);
            assert_eq!(hex_to_color(&hex).unwrap(), color, "round trip of {hex}");
        }
    }

    #[test]
    fn test_hex_parsing_is_lenient_about_prefix_and_case() {
        assert_eq!(hex_to_color("fd4c49").unwrap(), Color::rgb(0xFD, 0x4C, 0x49));
        assert_eq!(hex_to_color(" #Fd4C49 ").unwrap(), Color::rgb(0xFD, 0x4C, 0x49));
    }

    #[test]
    fn test_malformed_hex_is_a_decoding_error() {
        for bad in ["", "#", "#12345", "#1234567", "#GG0000", "+FFFFF", "#ÿÿÿ"] {
            match hex_to_color(bad) {
                Err(TrackerError::Decoding { field }) => assert_eq!(field, COLOR_FIELD),
                other => panic!("expected decoding error for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_schedule_string_is_monday_first() {
        let schedule: Schedule = [WeekDay::Sunday, WeekDay::Wednesday, WeekDay::Monday]
            .into_iter()
            .collect();
        assert_eq!(schedule_to_string(&schedule), "Mon,Wed,Sun");
    }

    #[test]
    fn test_schedule_round_trip() {
        let samples = [
            Schedule::new(),
            Schedule::daily(),
            [WeekDay::Saturday].into_iter().collect(),
            [WeekDay::Monday, WeekDay::Wednesday, WeekDay::Friday]
                .into_iter()
                .collect(),
        ];
        for schedule in samples {
            let encoded = schedule_to_string(&schedule);
            assert_eq!(string_to_schedule(&encoded).unwrap(), schedule);
        }
    }

    #[test]
    fn test_schedule_parsing_collapses_duplicates() {
        let schedule = string_to_schedule("mon, Monday ,,Tue").unwrap();
        assert_eq!(schedule.len(), 2);
        assert!(schedule.contains(WeekDay::Monday));
        assert!(schedule.contains(WeekDay::Tuesday));
    }

    #[test]
    fn test_unknown_weekday_tag_is_a_decoding_error() {
        assert!(matches!(
            string_to_schedule("Mon,Funday"),
            Err(TrackerError::Decoding {
                field: SCHEDULE_FIELD
            })
        ));
    }
}
