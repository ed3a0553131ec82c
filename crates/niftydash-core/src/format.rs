//! Display formatting for prices, changes and volumes (INR conventions).

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

/// `₹2,945.60`
pub fn format_currency(amount: f64) -> String {
    format!("₹{}", group_thousands(&format!("{amount:.2}")))
}

/// `+1.24%` for gains, `-0.48%` / `0.00%` otherwise.
pub fn format_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{change:.2}%")
    } else {
        format!("{change:.2}%")
    }
}

/// Crore / lakh abbreviations above one lakh, grouped digits below.
pub fn format_volume(volume: u64) -> String {
    let value = volume as f64;
    if value >= CRORE {
        format!("{:.1}Cr", value / CRORE)
    } else if value >= LAKH {
        format!("{:.1}L", value / LAKH)
    } else {
        group_thousands(&volume.to_string())
    }
}

/// Market cap in thousand-crore units: `₹1990.00K Cr`.
pub fn format_market_cap(market_cap: f64) -> String {
    format!("₹{:.2}K Cr", market_cap / (CRORE * 1_000.0))
}

/// Inserts `,` every three integer digits of an already formatted number.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
