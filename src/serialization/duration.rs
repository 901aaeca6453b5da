//! ISO 8601 durations (`P1DT2H30M`, `PT0.5S`) as used by `Edm.Duration`.
//!
//! Only fixed-length components are supported: weeks, days, hours, minutes
//! and seconds. Years and months have no fixed length and are rejected.

use chrono::TimeDelta;

use crate::errors::{Error, Result};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Parses an ISO 8601 duration into a [`TimeDelta`].
pub fn parse(value: &str) -> Result<TimeDelta> {
    let trimmed = value.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let Some(body) = rest.strip_prefix('P').or_else(|| rest.strip_prefix('p')) else {
        return Err(Error::invalid_duration(value, "missing leading 'P'"));
    };
    if body.is_empty() {
        return Err(Error::invalid_duration(value, "no components"));
    }

    let mut total = TimeDelta::zero();
    let mut in_time = false;
    let mut seen_component = false;
    let mut seen_time_component = false;
    let mut last_rank = 0;
    let mut number = String::new();

    for ch in body.chars() {
        match ch {
            '0'..='9' | '.' | ',' => number.push(if ch == ',' { '.' } else { ch }),
            'T' | 't' => {
                if in_time || !number.is_empty() {
                    return Err(Error::invalid_duration(value, "misplaced 'T'"));
                }
                in_time = true;
            }
            designator => {
                if !number.bytes().any(|b| b.is_ascii_digit()) {
                    return Err(Error::invalid_duration(value, "designator without a number"));
                }
                let designator = designator.to_ascii_uppercase();
                let part = component(value, &number, designator, in_time)?;
                let rank = component_rank(designator, in_time);
                if rank <= last_rank {
                    return Err(Error::invalid_duration(value, "components repeated or out of order"));
                }
                last_rank = rank;
                total = total
                    .checked_add(&part)
                    .ok_or_else(|| Error::invalid_duration(value, "duration overflows"))?;
                number.clear();
                seen_component = true;
                seen_time_component |= in_time;
            }
        }
    }

    if !number.is_empty() {
        return Err(Error::invalid_duration(value, "trailing number without designator"));
    }
    if !seen_component {
        return Err(Error::invalid_duration(value, "no components"));
    }
    if in_time && !seen_time_component {
        return Err(Error::invalid_duration(value, "'T' without time components"));
    }

    Ok(if negative { -total } else { total })
}

/// Position of a designator in `PnWnDTnHnMnS`; components must strictly increase.
fn component_rank(designator: char, in_time: bool) -> u8 {
    match (designator, in_time) {
        ('W', false) => 1,
        ('D', false) => 2,
        ('H', true) => 3,
        ('M', true) => 4,
        _ => 5,
    }
}

fn component(source: &str, number: &str, designator: char, in_time: bool) -> Result<TimeDelta> {
    let seconds_per_unit: i64 = match (designator, in_time) {
        ('W', false) => 7 * 86_400,
        ('D', false) => 86_400,
        ('H', true) => 3_600,
        ('M', true) => 60,
        ('S', true) => 1,
        ('Y', false) | ('M', false) => {
            return Err(Error::invalid_duration(source, "years and months are not fixed-length"));
        }
        _ => return Err(Error::invalid_duration(source, "unexpected designator")),
    };

    let (whole, fraction) = match number.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (number, ""),
    };
    if !fraction.is_empty() && designator != 'S' {
        return Err(Error::invalid_duration(source, "fractions are only supported on seconds"));
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| Error::invalid_duration(source, "component is not a number"))?
    };
    let seconds = whole
        .checked_mul(seconds_per_unit)
        .ok_or_else(|| Error::invalid_duration(source, "duration overflows"))?;

    let mut nanos: i64 = 0;
    let mut scale = NANOS_PER_SECOND / 10;
    for digit in fraction.chars().take(9) {
        let digit = digit
            .to_digit(10)
            .ok_or_else(|| Error::invalid_duration(source, "component is not a number"))?;
        nanos += i64::from(digit) * scale;
        scale /= 10;
    }

    TimeDelta::try_seconds(seconds)
        .and_then(|delta| delta.checked_add(&TimeDelta::nanoseconds(nanos)))
        .ok_or_else(|| Error::invalid_duration(source, "duration overflows"))
}

/// Formats a [`TimeDelta`] as the shortest ISO 8601 form (`PT0S` for zero).
pub fn format(value: &TimeDelta) -> String {
    let negative = *value < TimeDelta::zero();
    let magnitude = value.abs();

    let total_seconds = magnitude.num_seconds();
    let nanos = magnitude.subsec_nanos();
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('P');
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }

    let has_time = hours > 0 || minutes > 0 || seconds > 0 || nanos > 0;
    if has_time || days == 0 {
        out.push('T');
    }
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        out.push_str(&format!("{seconds}.{}S", fraction.trim_end_matches('0')));
    } else if seconds > 0 || (!has_time && days == 0) {
        out.push_str(&format!("{seconds}S"));
    }
    out
}
