//! Text rendering shared by the console and the output files.

use std::collections::BTreeMap;
use crate::config::ConsoleConfig;

/// Significant digits used for every value that is not part of the time table.
pub const GENERAL_PRECISION: usize = 6;

/// Format `value` in `%g` style with six significant digits.
///
/// Fixed notation is used while the decimal exponent lies in `[-4, 6)`,
/// scientific otherwise; trailing zeros are dropped in both cases.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Round to the target precision first; the exponent may shift (9.999995 -> 1e+01).
    let scientific = format!("{:.*e}", GENERAL_PRECISION - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= GENERAL_PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (GENERAL_PRECISION as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// `"<event> : <value>"`, the console echo format.
pub fn event_line(event: &str, value: f64) -> String {
    format!("{} : {}", event, format_general(value))
}

/// `"<event> <value>"`, one line of the aggregate time file.
pub fn time_line(event: &str, value: f64) -> String {
    format!("{} {}", event, format_general(value))
}

/// `"<n>\t<v1>\t<v2>\t...\t"`, one line of the per-step file.
pub fn step_line<'a>(step: i64, values: impl IntoIterator<Item = &'a f64>) -> String {
    let mut line = format!("{}\t", step);
    for value in values {
        line.push_str(&format_general(*value));
        line.push('\t');
    }
    line
}

/// Aggregate time table: one row per event, a rule, then the `TOTAL` row.
///
/// Starts with an empty line so it stands apart from preceding console output.
pub fn render_time_table(totals: &BTreeMap<String, f64>, layout: &ConsoleConfig) -> String {
    let mut table = String::from("\n");
    for (event, seconds) in totals {
        table.push_str(&table_row(event, *seconds, layout));
    }
    table.push_str(&"-".repeat(layout.key_width + layout.value_width));
    table.push('\n');
    // an empty float sum is -0.0, which would print as "-0.0000"
    let total = totals.values().fold(0.0, |acc, seconds| acc + seconds);
    table.push_str(&table_row("TOTAL", total, layout));
    table
}

fn table_row(label: &str, seconds: f64, layout: &ConsoleConfig) -> String {
    format!(
        "{:>kw$}{:>vw$.p$}\n",
        label,
        seconds,
        kw = layout.key_width,
        vw = layout.value_width,
        p = layout.precision
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_general_fixed() {
        assert_eq!(format_general(1.25), "1.25");
        assert_eq!(format_general(2.5), "2.5");
        assert_eq!(format_general(60.0), "60");
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(-40.0), "-40");
        assert_eq!(format_general(0.1234567), "0.123457");
        assert_eq!(format_general(123456.0), "123456");
        assert_eq!(format_general(0.0001), "0.0001");
    }

    #[test]
    fn test_format_general_scientific() {
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(1_790_000_000.0), "1.79e+09");
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(-2.5e-7), "-2.5e-07");
    }

    #[test]
    fn test_format_general_rounding_moves_exponent() {
        assert_eq!(format_general(999999.7), "1e+06");
        assert_eq!(format_general(9.9999999), "10");
    }

    #[test]
    fn test_format_general_non_finite() {
        assert_eq!(format_general(f64::INFINITY), "inf");
        assert_eq!(format_general(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_general(f64::NAN), "nan");
    }

    #[test]
    fn test_lines() {
        assert_eq!(event_line("solve", 0.5), "solve : 0.5");
        assert_eq!(time_line("solve", 12.0), "solve 12");
        assert_eq!(step_line(5, &[1.25, 2.5]), "5\t1.25\t2.5\t");
        assert_eq!(step_line(0, &Vec::<f64>::new()), "0\t");
    }

    #[test]
    fn test_render_time_table() {
        let mut totals = BTreeMap::new();
        totals.insert("advect".to_string(), 1.5);
        totals.insert("solve".to_string(), 0.25);

        let table = render_time_table(&totals, &ConsoleConfig::default());
        let expected = format!(
            "\n{:>24}{:>13}\n{:>24}{:>13}\n{}\n{:>24}{:>13}\n",
            "advect", "1.5000", "solve", "0.2500", "-".repeat(37), "TOTAL", "1.7500"
        );
        assert_eq!(table, expected);
    }

    #[test]
    fn test_render_empty_table() {
        let layout = ConsoleConfig {
            key_width: 6,
            value_width: 8,
            precision: 2,
        };
        let table = render_time_table(&BTreeMap::new(), &layout);
        assert_eq!(table, "\n--------------\n TOTAL    0.00\n");
    }
}
