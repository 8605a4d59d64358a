const MARKER: &str = "#";

/// Comments out fstab entries mounting `device`, or anything at `mount_point`,
/// so that the device is not mounted again on the next boot.
///
/// An entry matches on either field: entries naming the device by
/// `UUID=` or `LABEL=` are only caught through their mount point.
/// Octal escapes such as `\040` in both fields are decoded before comparing.
///
/// Returns the new fstab text and the number of entries disabled.
pub fn disable_entries(original: &str, device: &str, mount_point: &str) -> (String, usize) {
    let mut disabled = 0;

    let lines: Vec<String> = original
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with(MARKER) {
                return line.to_string();
            }

            let mut fields = trimmed.split_whitespace();
            let spec = fields.next().map(unescape);
            let file = fields.next().map(unescape);

            if spec.as_deref() == Some(device) || file.as_deref() == Some(mount_point) {
                disabled += 1;
                return format!("{MARKER} {line}");
            }

            line.to_string()
        })
        .collect();

    let mut result = lines.join("\n");
    if original.ends_with('\n') {
        result.push('\n');
    }

    (result, disabled)
}

/// Decodes the `\NNN` octal escapes fstab uses for whitespace
/// and backslashes in its fields
fn unescape(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            let octal = bytes
                .get(i + 1..i + 4)
                .filter(|digits| digits.iter().all(|d| (b'0'..=b'7').contains(d)))
                .and_then(|digits| std::str::from_utf8(digits).ok())
                .and_then(|digits| u8::from_str_radix(digits, 8).ok());

            if let Some(b) = octal {
                decoded.push(b);
                i += 4;
                continue;
            }
        }

        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}
