//! Human-readable elapsed time and byte size formatting.

const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;

/// Format seconds as `<h>h<m>m<s>s`, omitting zero components.
///
/// `0` renders as the empty string.
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if seconds > 0 {
        out.push_str(&format!("{seconds}s"));
    }
    out
}

/// Format a byte count as GB / MB / KB with one decimal (binary units).
///
/// Anything below 1 MiB is shown in KB, including sub-kilobyte sizes.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn format_size(bytes: u64) -> String {
    if bytes >= GIB {
        format!("{:.1}GB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1}MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.1}KB", bytes as f64 / KIB as f64)
    }
}
