//! Date helper functions

use chrono::{DateTime, Datelike, TimeZone};

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

fn month_name(month0: usize, language: &str) -> &'static str {
    if is_portuguese(language) {
        MONTHS_PT_BR[month0]
    } else {
        MONTHS_EN[month0]
    }
}

fn is_portuguese(language: &str) -> bool {
    language.to_ascii_lowercase().starts_with("pt")
}

/// Abbreviated month name (`mar`, `Mar`)
fn month_abbr(month0: usize, language: &str) -> String {
    month_name(month0, language).chars().take(3).collect()
}

/// Format a date using a date-fns style pattern
///
/// Supported tokens: `d dd M MM MMM MMMM y yy yyy yyyy`. Every other
/// character is copied through.
///
/// # Examples
/// ```ignore
/// format_date(&date, "d MMM yyyy", "pt-BR") // -> "2 mar 2021"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, pattern: &str, language: &str) -> String {
    let month0 = date.month0() as usize;
    let chars: Vec<char> = pattern.chars().collect();
    let mut result = String::with_capacity(pattern.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        match (c, run) {
            ('d', 1) => result.push_str(&date.day().to_string()),
            ('d', _) => result.push_str(&format!("{:02}", date.day())),
            ('M', 1) => result.push_str(&date.month().to_string()),
            ('M', 2) => result.push_str(&format!("{:02}", date.month())),
            ('M', 3) => result.push_str(&month_abbr(month0, language)),
            ('M', _) => result.push_str(month_name(month0, language)),
            ('y', 2) => result.push_str(&format!("{:02}", date.year() % 100)),
            ('y', _) => result.push_str(&date.year().to_string()),
            _ => {
                for _ in 0..run {
                    result.push(c);
                }
            }
        }

        i += run;
    }

    result
}

/// Format an optional publication date; unpublished documents show nothing
pub fn publication_date<Tz: TimeZone>(
    date: Option<&DateTime<Tz>>,
    pattern: &str,
    language: &str,
) -> String {
    date.map(|d| format_date(d, pattern, language))
        .unwrap_or_default()
}
