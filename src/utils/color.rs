use crate::upload::Severity;
use eframe::egui::Color32;

pub trait ColorExt {
    fn from_hex(hex: &str) -> Option<Self>
    where
        Self: Sized;
}

impl ColorExt for Color32 {
    fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color32::from_rgb(r, g, b))
    }
}

pub const ACCENT: &str = "#00bcd4";

pub fn severity_color(severity: Severity) -> Color32 {
    let hex = match severity {
        Severity::Success => "#00e676",
        Severity::Info => "#2979ff",
        Severity::Warning => "#ffc400",
        Severity::Error => "#ff1744",
    };
    Color32::from_hex(hex).unwrap_or(Color32::GRAY)
}

pub fn accent() -> Color32 {
    Color32::from_hex(ACCENT).unwrap_or(Color32::LIGHT_BLUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(Color32::from_hex("#ff1744"), Some(Color32::from_rgb(255, 23, 68)));
        assert_eq!(Color32::from_hex("fff"), None);
        assert_eq!(Color32::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn every_severity_has_a_palette_entry() {
        for severity in [Severity::Success, Severity::Info, Severity::Warning, Severity::Error] {
            assert_ne!(severity_color(severity), Color32::GRAY);
        }
    }
}
