//! Number formatting for displaying amounts of money.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format `number` as dollars with two decimal places, e.g. "-$1,234.50".
pub fn currency(number: f64) -> String {
    static FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::currency("$")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    });

    let sign = if number < 0.0 { "-" } else { "" };

    let formatted = match fmt {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        _ if number == 0.0 => return "$0.00".to_owned(),
        Some(fmt) => fmt.fmt_string(number.abs()),
        None => format!("${:.2}", number.abs()),
    };

    // numfmt omits trailing zeros, so we must add them ourselves.
    // For example, "12.30" is rendered as "12.3" so we append "0".
    let decimals = formatted
        .rfind('.')
        .map_or(0, |point| formatted.len() - point - 1);

    match decimals {
        0 => format!("{sign}{formatted}.00"),
        1 => format!("{sign}{formatted}0"),
        _ => format!("{sign}{formatted}"),
    }
}
