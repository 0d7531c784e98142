/// Build a globally-unique storage key for an uploaded photo: six random
/// lowercase hex characters plus the original extension (everything from the
/// last `.` of the filename, inclusive). A filename with no `.` yields a key
/// with no extension.
pub fn storage_key(original_filename: &str) -> String {
    let nonce: [u8; 3] = rand::random();
    format!("{}{}", hex::encode(nonce), extension_of(original_filename))
}

/// Extract the extension, filtered to characters safe for an object key.
fn extension_of(filename: &str) -> String {
    match filename.rfind('.') {
        Some(idx) => {
            let ext: String = filename[idx..]
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
                .collect();
            if ext == "." { String::new() } else { ext }
        }
        None => String::new(),
    }
}
