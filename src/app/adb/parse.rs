/// Parses `adb devices -l` output into (serial, run status) pairs in line
/// order. The banner, blank lines, daemon startup notices and lines with
/// fewer than two tokens are skipped; trailing columns (`model:`,
/// `transport_id:`...) are ignored because details come from getprop.
pub fn parse_device_lines(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with('*'))
        .filter(|line| !line.starts_with("List of devices"))
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let serial = tokens.next()?;
            let state = tokens.next()?;
            Some((serial.to_string(), state.to_string()))
        })
        .collect()
}
