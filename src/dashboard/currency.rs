//! Display formatting for amounts in CFA francs.

const THOUSANDS_SEPARATOR: char = '\u{202F}';

/// Formats an amount the way the dashboard shows it: `1 234,50 F CFA`.
///
/// Two decimals, comma as the decimal separator and a narrow no-break space between
/// thousands groups. Non-finite amounts render as zero.
pub fn format_cfa(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped},{:02} F CFA", cents % 100)
}
