/// Removes the file extension from a filename string slice.
pub fn trim_extension(filename: &str) -> &str {
    if let Some(dot_index) = filename.rfind('.') {
        &filename[..dot_index]
    } else {
        filename
    }
}

/// Cuts a filename at its first dot, so "Game.v2.zip" and "Game.png" both become "Game".
pub fn base_name(filename: &str) -> &str {
    match filename.find('.') {
        Some(dot_index) => &filename[..dot_index],
        None => filename,
    }
}

/// Shortens long titles so they fit on one line: `max_len - 2` characters followed by "...".
pub fn ellipsize(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_len.saturating_sub(2)).collect();
    format!("{kept}...")
}
