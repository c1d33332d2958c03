//! Human-readable byte counts

use std::fs;
use std::path::Path;

const SI_PREFIXES: [char; 6] = ['k', 'M', 'G', 'T', 'P', 'E'];
const BINARY_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const BINARY_UNITS_LOWER_K: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

/// Format a byte count with SI (base 1000) prefixes
///
/// Examples: "999 B", "1.0 kB", "1.5 MB", "-2.3 GB"
pub fn format_size_si(bytes: i64) -> String {
    if -1000 < bytes && bytes < 1000 {
        return format!("{} B", bytes);
    }

    let mut value = bytes;
    let mut prefix = 0;
    while value <= -999_950 || value >= 999_950 {
        value /= 1000;
        prefix += 1;
    }

    // One decimal of value / 1000, rounded half away from zero.
    let tenths = (value.unsigned_abs() + 50) / 100;
    let sign = if value < 0 { "-" } else { "" };
    let prefix = SI_PREFIXES[prefix.min(SI_PREFIXES.len() - 1)];

    format!("{}{}.{} {}B", sign, tenths / 10, tenths % 10, prefix)
}

/// Format a byte count with binary (base 1024) units
///
/// Examples: "0", "1,023 B", "1.5 KB", "2 MB". Sizes past the TB range stay in TB.
pub fn readable_file_size(size: i64) -> String {
    format_binary(size, &BINARY_UNITS)
}

/// Size label for the file at `path`; missing files read as "0"
pub fn file_size_label(path: &Path) -> String {
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    format_binary(i64::try_from(size).unwrap_or(i64::MAX), &BINARY_UNITS_LOWER_K)
}

fn format_binary(size: i64, units: &[&str]) -> String {
    if size <= 0 {
        return "0".to_string();
    }

    let size = size as u64;
    let mut group = 0;
    let mut divisor: u64 = 1;
    while group + 1 < units.len() && size / divisor >= 1024 {
        divisor *= 1024;
        group += 1;
    }

    format!("{} {}", group_thousands(size as f64 / divisor as f64), units[group])
}

/// `#,##0.#`: thousands separators, at most one decimal, ties to even
fn group_thousands(value: f64) -> String {
    let tenths = (value * 10.0).round_ties_even() as u64;
    let whole = (tenths / 10).to_string();
    let fraction = tenths % 10;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 2);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction != 0 {
        grouped.push('.');
        grouped.push(char::from(b'0' + fraction as u8));
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_si_small_values_are_plain_bytes() {
        for bytes in [-999, -1, 0, 1, 42, 999] {
            assert_eq!(format_size_si(bytes), format!("{} B", bytes));
        }
    }

    #[test]
    fn test_si_scaling() {
        assert_eq!(format_size_si(1000), "1.0 kB");
        assert_eq!(format_size_si(1250), "1.3 kB");
        assert_eq!(format_size_si(999_949), "999.9 kB");
        assert_eq!(format_size_si(999_950), "1.0 MB");
        assert_eq!(format_size_si(1_500_000), "1.5 MB");
        assert_eq!(format_size_si(-1_500_000), "-1.5 MB");
        assert_eq!(format_size_si(2_300_000_000), "2.3 GB");
        assert_eq!(format_size_si(i64::MAX), "9.2 EB");
        assert_eq!(format_size_si(i64::MIN), "-9.2 EB");
    }

    #[test]
    fn test_binary_non_positive_is_zero() {
        assert_eq!(readable_file_size(0), "0");
        assert_eq!(readable_file_size(-1), "0");
        assert_eq!(readable_file_size(i64::MIN), "0");
    }

    #[test]
    fn test_binary_scaling() {
        assert_eq!(readable_file_size(100), "100 B");
        assert_eq!(readable_file_size(1023), "1,023 B");
        assert_eq!(readable_file_size(1024), "1 KB");
        assert_eq!(readable_file_size(1536), "1.5 KB");
        assert_eq!(readable_file_size(1024 * 1024), "1 MB");
        assert_eq!(readable_file_size(1024 * 1024 * 1024), "1 GB");
        assert_eq!(readable_file_size(1024_i64.pow(4)), "1 TB");
    }

    #[test]
    fn test_binary_clamps_to_terabytes() {
        assert_eq!(readable_file_size(1024_i64.pow(5)), "1,024 TB");
    }

    #[test]
    fn test_binary_rounds_half_even() {
        // 1.25 MB sits exactly between 1.2 and 1.3
        assert_eq!(readable_file_size(1_310_720), "1.2 MB");
        assert_eq!(readable_file_size(1_383), "1.4 KB");
    }

    #[test]
    fn test_file_size_label() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.bin");
        std::fs::write(&file, vec![0u8; 1536]).unwrap();

        assert_eq!(file_size_label(&file), "1.5 kB");
        assert_eq!(file_size_label(&dir.path().join("missing")), "0");
    }
}
