/// Parse a frequency such as `"437.5MHz"`, `"145 800 kHz"` or `"2.2e9"`.
pub fn parse_frequency_hz(value: &str) -> Option<f64> {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();
    let lower = compact.to_ascii_lowercase();

    let (number, scale) = [("ghz", 1e9), ("mhz", 1e6), ("khz", 1e3), ("hz", 1.0)]
        .iter()
        .find_map(|(suffix, scale)| lower.strip_suffix(suffix).map(|n| (n, *scale)))
        .unwrap_or((lower.as_str(), 1.0));

    let hz = number.parse::<f64>().ok()? * scale;
    (hz.is_finite() && hz > 0.0).then_some(hz)
}
