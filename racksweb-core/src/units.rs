//! Affichage des capacités (unités binaires) et débits (unités décimales).

use crate::models::Size;

const BYTE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
const BIT_RATE_UNITS: [&str; 5] = ["b/s", "Kb/s", "Mb/s", "Gb/s", "Tb/s"];

/// 32·1024³ → `32 GB`, 1536 → `1.5 KB`
pub fn human_bytes(bytes: u64) -> String {
    scaled(bytes, 1024, &BYTE_UNITS)
}

/// 10·1000³ → `10 Gb/s`
pub fn human_bandwidth(bits_per_second: u64) -> String {
    scaled(bits_per_second, 1000, &BIT_RATE_UNITS)
}

pub fn human_size(size: &Size) -> String {
    match size {
        Size::Bytes(bytes) => human_bytes(*bytes),
        Size::Literal(text) => text.clone(),
    }
}

fn scaled(value: u64, base: u64, units: &[&str]) -> String {
    let mut unit = 0;
    let mut divisor = 1u64;
    while unit + 1 < units.len() && value / divisor >= base {
        divisor *= base;
        unit += 1;
    }
    // 1023.96 KB s'affiche `1 MB`, pas `1024 KB`
    if unit + 1 < units.len() && value % divisor != 0 && rounded(value, divisor) >= base as f64 {
        divisor *= base;
        unit += 1;
    }

    if value % divisor == 0 {
        format!("{} {}", value / divisor, units[unit])
    } else {
        let text = format!("{:.1}", rounded(value, divisor));
        format!("{} {}", text.trim_end_matches(".0"), units[unit])
    }
}

fn rounded(value: u64, divisor: u64) -> f64 {
    (value as f64 / divisor as f64 * 10.0).round() / 10.0
}
