//! Hours/minutes duration entry normalised to `HH:MM`.

/// Which half of the duration is receiving keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationPart {
    #[default]
    Hours,
    Minutes,
}

/// Two-part duration editor.
///
/// Only digits are accepted. Hours keep at most two digits, minutes above 59
/// clamp to `59`. [`value`](Self::value) renders both parts zero-padded, or
/// an empty string when nothing has been typed.
///
/// # Example
///
/// ```
/// use zentask::domain::duration::DurationInput;
///
/// let mut input = DurationInput::default();
/// for c in "3:7".chars() {
///     input.push(c);
/// }
/// assert_eq!(input.value(), "03:07");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationInput {
    hours: String,
    minutes: String,
    part: DurationPart,
}

impl DurationInput {
    /// Parses a stored `H:M` value.
    ///
    /// Anything without a colon, or with non-numeric halves, yields empty parts.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let Some((h, m)) = value.split_once(':') else {
            return Self::default();
        };
        let hours = h.trim().parse::<u32>().map(|n| n.to_string()).unwrap_or_default();
        let minutes = m.trim().parse::<u32>().map(|n| n.to_string()).unwrap_or_default();
        let mut input = Self {
            hours: String::new(),
            minutes: String::new(),
            part: DurationPart::Hours,
        };
        input.set_hours(&hours);
        input.set_minutes(&minutes);
        input
    }

    #[must_use]
    pub const fn part(&self) -> DurationPart {
        self.part
    }

    /// Feeds one keystroke.
    ///
    /// `:` (or a third hour digit) moves to the minutes part.
    pub fn push(&mut self, c: char) {
        match (self.part, c) {
            (DurationPart::Hours, ':') => self.part = DurationPart::Minutes,
            (DurationPart::Hours, d) if d.is_ascii_digit() => {
                if self.hours.len() >= 2 {
                    self.part = DurationPart::Minutes;
                    self.push(d);
                } else {
                    let next = format!("{}{d}", self.hours);
                    self.set_hours(&next);
                }
            }
            (DurationPart::Minutes, d) if d.is_ascii_digit() && self.minutes.len() < 2 => {
                let next = format!("{}{d}", self.minutes);
                self.set_minutes(&next);
            }
            _ => {}
        }
    }

    /// Deletes the last digit, stepping back into hours once minutes are empty.
    pub fn pop(&mut self) {
        if self.part == DurationPart::Minutes {
            if self.minutes.pop().is_none() {
                self.part = DurationPart::Hours;
                self.hours.pop();
            }
        } else {
            self.hours.pop();
        }
    }

    fn set_hours(&mut self, raw: &str) {
        let digits: String = raw.chars().filter(char::is_ascii_digit).take(2).collect();
        self.hours = digits;
    }

    fn set_minutes(&mut self, raw: &str) {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        self.minutes = match digits.parse::<u32>() {
            Ok(n) if n > 59 => "59".to_string(),
            _ => digits,
        };
    }

    /// `HH:MM`, or empty when neither part has digits.
    #[must_use]
    pub fn value(&self) -> String {
        if self.hours.is_empty() && self.minutes.is_empty() {
            return String::new();
        }
        let h = if self.hours.is_empty() { "0" } else { &self.hours };
        let m = if self.minutes.is_empty() { "0" } else { &self.minutes };
        format!("{h:0>2}:{m:0>2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> DurationInput {
        let mut input = DurationInput::default();
        keys.chars().for_each(|c| input.push(c));
        input
    }

    #[test]
    fn empty_input_has_empty_value() {
        assert_eq!(DurationInput::default().value(), "");
    }

    #[test]
    fn hours_only_pads_minutes() {
        assert_eq!(typed("4").value(), "04:00");
    }

    #[test]
    fn third_hour_digit_spills_into_minutes() {
        assert_eq!(typed("123").value(), "12:03");
    }

    #[test]
    fn minutes_clamp_to_fifty_nine() {
        assert_eq!(typed("1:75").value(), "01:59");
    }

    #[test]
    fn non_digits_are_ignored() {
        assert_eq!(typed("2a:b3").value(), "02:03");
    }

    #[test]
    fn parse_round_trips_stored_values() {
        assert_eq!(DurationInput::parse("3:25").value(), "03:25");
        assert_eq!(DurationInput::parse("3h 25min").value(), "");
    }

    #[test]
    fn backspace_walks_back_into_hours() {
        let mut input = typed("12:3");
        input.pop();
        input.pop();
        assert_eq!(input.part(), DurationPart::Hours);
        assert_eq!(input.value(), "01:00");
    }
}
