//! Location hierarchy expansion.
//!
//! A free-text place name like `"Uval, Zaamin District, Jizzakh Region,
//! Uzbekistan"` broadens by dropping one leading comma-delimited segment at
//! a time, ending at the most general fragment (typically the country).

/// Expands a comma-separated place name into progressively broader queries.
///
/// The first element is the input itself; each subsequent element drops one
/// more leading segment. For an input with N comma-separated segments the
/// result has exactly N elements. An empty input yields `[""]` — the
/// aggregator still runs one (hopeless) level rather than erroring.
#[must_use]
pub fn expand_hierarchy(location_name: &str) -> Vec<String> {
    let segments: Vec<&str> = location_name.split(',').map(str::trim).collect();

    let mut levels = Vec::with_capacity(segments.len());
    levels.push(location_name.to_owned());
    for start in 1..segments.len() {
        levels.push(segments[start..].join(", "));
    }
    levels
}
