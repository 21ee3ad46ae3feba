//! Counter formatting for the info boxes and the table.

const SUFFIXES: [(f64, &str); 4] = [(1e12, "t"), (1e9, "b"), (1e6, "m"), (1e3, "k")];

/// One decimal with a magnitude suffix: `1234` -> `1.2k`, `999` -> `999.0`.
pub fn abbreviate(n: u64) -> String {
    let value = n as f64;
    for (i, &(base, suffix)) in SUFFIXES.iter().enumerate() {
        if value >= base {
            let scaled = (value / base * 10.0).round() / 10.0;
            // 999_960 rounds to 1000.0k; report it as 1.0m instead
            if scaled >= 1000.0 && i > 0 {
                let (bigger, bigger_suffix) = SUFFIXES[i - 1];
                return format!("{:.1}{bigger_suffix}", value / bigger);
            }
            return format!("{scaled:.1}{suffix}");
        }
    }
    format!("{value:.1}")
}

/// "Today" delta as shown under an info box title.
pub fn pretty_print_stat(n: u64) -> String {
    if n == 0 {
        "+0".to_string()
    } else {
        format!("+{}", abbreviate(n))
    }
}

/// Thousands-separated integer: `1234567` -> `1,234,567`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
