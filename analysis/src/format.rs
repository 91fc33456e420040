/// queries slower than this are flagged in the report
pub const SLOW_QUERY_MS: f64 = 100.0;
pub const WARNING_MARKER: &str = "⚠️";
pub const NOT_AVAILABLE: &str = "N/A";

const NS_PER_US: f64 = 1_000.0;
const NS_PER_MS: f64 = 1_000_000.0;
const NS_PER_S: f64 = 1_000_000_000.0;

/// whether a latency crosses [`SLOW_QUERY_MS`]
pub fn is_slow(ns: f64) -> bool {
    ns / NS_PER_MS > SLOW_QUERY_MS
}

/// Format a latency in nanoseconds with a unit picked by magnitude.
///
/// With `indicator` set, latencies above [`SLOW_QUERY_MS`] are prefixed with
/// [`WARNING_MARKER`], independent of the unit used for display.
pub fn format_time(ns: f64, indicator: bool) -> String {
    let formatted = if ns >= NS_PER_S {
        format!("{:.3}s", ns / NS_PER_S)
    } else if ns >= NS_PER_MS {
        format!("{:.2}ms", ns / NS_PER_MS)
    } else if ns >= NS_PER_US {
        format!("{:.2}μs", ns / NS_PER_US)
    } else {
        format!("{ns:.0}ns")
    };

    if indicator && is_slow(ns) {
        format!("{WARNING_MARKER} {formatted}")
    } else {
        formatted
    }
}

/// format records per second, scaled to thousands or millions
pub fn format_throughput(throughput: f64) -> String {
    if throughput >= 1_000_000.0 {
        format!("{:.2}M", throughput / 1_000_000.0)
    } else if throughput >= 1_000.0 {
        format!("{:.2}K", throughput / 1_000.0)
    } else {
        format!("{throughput:.2}")
    }
}

/// integer with `,` as thousands separator
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }

    formatted
}
