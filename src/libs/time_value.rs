//! Hour/minute values as they live inside the time picker.
//!
//! Both fields are kept as text. While a field is being edited it may hold a
//! partial value (`""`, `"2"`), once normalized it always holds two digits.

use serde::Serialize;

/// Text a field falls back to whenever it cannot be normalized.
pub const DEFAULT_FIELD: &str = "00";

/// Maximum number of characters a field accepts while typing.
pub const MAX_FIELD_LEN: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum TimeField {
    Hour,
    Minute,
}

/// Outcome of parsing the raw text of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldText {
    Empty,
    Number(u32),
    /// Anything that is not a plain run of ASCII digits
    Invalid,
}

impl FieldText {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return FieldText::Empty;
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return FieldText::Invalid;
        }
        raw.parse::<u32>()
            .map(FieldText::Number)
            .unwrap_or(FieldText::Invalid)
    }
}

impl TimeField {
    /// Inclusive upper bound of the field.
    pub const fn max(self) -> u32 {
        match self {
            TimeField::Hour => 23,
            TimeField::Minute => 59,
        }
    }

    /// Whether `raw` may stay in the field after a keystroke.
    ///
    /// Empty text is allowed so the user can clear the field and type again.
    pub fn accepts_keystroke(self, raw: &str) -> bool {
        if raw.chars().count() > MAX_FIELD_LEN {
            return false;
        }
        match FieldText::parse(raw) {
            FieldText::Empty => true,
            FieldText::Number(n) => n <= self.max(),
            FieldText::Invalid => false,
        }
    }

    /// Whether `raw` is taken as an initial value when the picker is mounted.
    ///
    /// Zero is rejected here even though it is a valid hour and minute.
    pub fn accepts_initial(self, raw: &str) -> bool {
        raw.chars().count() <= MAX_FIELD_LEN
            && matches!(FieldText::parse(raw), FieldText::Number(n) if n > 0 && n <= self.max())
    }

    /// Turn whatever the field holds into its focus-lost form, always two
    /// digits.
    pub fn normalize(self, value: &str) -> String {
        match FieldText::parse(value) {
            FieldText::Number(n) if n <= self.max() => format!("{n:02}"),
            _ => DEFAULT_FIELD.to_string(),
        }
    }
}

/// Left-pad `value` with '0' up to two characters. Longer input is untouched.
pub fn pad_two(value: &str) -> String {
    let len = value.chars().count();
    if len >= MAX_FIELD_LEN {
        value.to_string()
    } else {
        format!("{}{}", "0".repeat(MAX_FIELD_LEN - len), value)
    }
}

/// Integer value of the leading decimal digits of `s`, 0 when there are none.
fn leading_number(s: &str) -> u32 {
    s.trim_start()
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0u32, |acc, d| acc.saturating_mul(10).saturating_add(d))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeValue {
    hour: String,
    minute: String,
}

impl Default for TimeValue {
    fn default() -> Self {
        Self {
            hour: DEFAULT_FIELD.to_string(),
            minute: DEFAULT_FIELD.to_string(),
        }
    }
}

impl TimeValue {
    pub fn get(&self, field: TimeField) -> &str {
        match field {
            TimeField::Hour => &self.hour,
            TimeField::Minute => &self.minute,
        }
    }

    pub fn set<T: Into<String>>(&mut self, field: TimeField, value: T) {
        let value = value.into();
        match field {
            TimeField::Hour => self.hour = value,
            TimeField::Minute => self.minute = value,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Snapshot the current value as a confirmed selection.
    pub fn selection(&self) -> SelectedTime {
        SelectedTime {
            hour: self.hour.clone(),
            minute: self.minute.clone(),
            total_minutes: leading_number(&self.hour)
                .saturating_mul(60)
                .saturating_add(leading_number(&self.minute)),
        }
    }
}

/// Payload of a confirmed selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedTime {
    pub hour: String,
    pub minute: String,
    pub total_minutes: u32,
}

impl std::fmt::Display for SelectedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} ({} minutes)",
            self.hour, self.minute, self.total_minutes
        )
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn default_is_midnight() {
        let value = TimeValue::default();
        assert_eq!(value.get(TimeField::Hour), "00");
        assert_eq!(value.get(TimeField::Minute), "00");
    }

    #[test]
    fn parse_field_text() {
        assert_eq!(FieldText::parse(""), FieldText::Empty);
        assert_eq!(FieldText::parse("7"), FieldText::Number(7));
        assert_eq!(FieldText::parse("07"), FieldText::Number(7));
        assert_eq!(FieldText::parse("-1"), FieldText::Invalid);
        assert_eq!(FieldText::parse("+1"), FieldText::Invalid);
        assert_eq!(FieldText::parse(" 1"), FieldText::Invalid);
        assert_eq!(FieldText::parse("1e1"), FieldText::Invalid);
        assert_eq!(FieldText::parse("a"), FieldText::Invalid);
        assert_eq!(FieldText::parse("99999999999"), FieldText::Invalid);
    }

    #[test]
    fn keystroke_bounds() {
        assert!(TimeField::Hour.accepts_keystroke(""));
        assert!(TimeField::Hour.accepts_keystroke("2"));
        assert!(TimeField::Hour.accepts_keystroke("23"));
        assert!(!TimeField::Hour.accepts_keystroke("24"));
        assert!(!TimeField::Hour.accepts_keystroke("x"));
        assert!(TimeField::Minute.accepts_keystroke("59"));
        assert!(!TimeField::Minute.accepts_keystroke("60"));
        // maxlength
        assert!(!TimeField::Minute.accepts_keystroke("005"));
    }

    #[test]
    fn initial_value_rejects_zero() {
        assert!(!TimeField::Hour.accepts_initial("0"));
        assert!(!TimeField::Hour.accepts_initial("00"));
        assert!(TimeField::Hour.accepts_initial("1"));
        assert!(TimeField::Hour.accepts_initial("23"));
        assert!(!TimeField::Hour.accepts_initial("24"));
        assert!(TimeField::Minute.accepts_initial("59"));
        assert!(!TimeField::Minute.accepts_initial("60"));
        assert!(!TimeField::Minute.accepts_initial("abc"));
        assert!(!TimeField::Minute.accepts_initial("7.5"));
        assert!(!TimeField::Hour.accepts_initial("007"));
        assert!(!TimeField::Minute.accepts_initial("0059"));
    }

    #[test]
    fn normalize_on_blur() {
        assert_eq!(TimeField::Hour.normalize(""), "00");
        assert_eq!(TimeField::Minute.normalize("5"), "05");
        assert_eq!(TimeField::Hour.normalize("24"), "00");
        assert_eq!(TimeField::Hour.normalize("ab"), "00");
        assert_eq!(TimeField::Minute.normalize("0"), "00");
        assert_eq!(TimeField::Hour.normalize("007"), "07");
        assert_eq!(TimeField::Minute.normalize("0059"), "59");
    }

    #[test]
    fn normalize_is_idempotent() {
        for field in [TimeField::Hour, TimeField::Minute] {
            for n in 0..=field.max() {
                let text = format!("{n:02}");
                assert_eq!(field.normalize(&text), text);
                assert_eq!(field.normalize(&field.normalize(&text)), text);
            }
        }
    }

    #[test]
    fn pad_two_characters() {
        assert_eq!(pad_two(""), "00");
        assert_eq!(pad_two("5"), "05");
        assert_eq!(pad_two("a"), "0a");
        assert_eq!(pad_two("12"), "12");
        assert_eq!(pad_two("123"), "123");
    }

    #[test]
    fn selection_total_minutes() {
        let mut value = TimeValue::default();
        value.set(TimeField::Hour, "02");
        value.set(TimeField::Minute, "15");
        let selection = value.selection();
        assert_eq!(selection.hour, "02");
        assert_eq!(selection.minute, "15");
        assert_eq!(selection.total_minutes, 135);
        assert_eq!(selection.to_string(), "02:15 (135 minutes)");

        value.set(TimeField::Hour, "xx");
        assert_eq!(value.selection().total_minutes, 15);
    }

    #[test]
    fn selection_json() {
        let mut value = TimeValue::default();
        value.set(TimeField::Hour, "23");
        value.set(TimeField::Minute, "59");
        assert_snapshot!(
            serde_json::to_string(&value.selection()).unwrap(),
            @r#"{"hour":"23","minute":"59","totalMinutes":1439}"#
        );
    }
}
