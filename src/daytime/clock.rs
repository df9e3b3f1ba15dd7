//! Timestamp payload rendering.

use chrono::Local;

/// Render the current local time in the classic `ctime(3)` shape,
/// e.g. `"Wed Aug 26 14:03:07 2026\n"`. ASCII, newline-terminated, no
/// length prefix; the connection close delimits the message.
pub fn daytime_now() -> String {
    Local::now().format("%a %b %e %H:%M:%S %Y\n").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_ascii_and_newline_terminated() {
        let payload = daytime_now();
        assert!(payload.is_ascii());
        assert!(payload.ends_with('\n'));
        // "Www Mmm dd hh:mm:ss yyyy\n" is 25 bytes; %e pads single-digit
        // days with a space so the width is stable.
        assert_eq!(payload.len(), 25);
    }

    #[test]
    fn payload_contains_current_year() {
        use chrono::Datelike;
        let payload = daytime_now();
        assert!(payload.trim_end().ends_with(&Local::now().year().to_string()));
    }
}
