const RESERVED_CHARS: &[char] = &[
    '~', ':', '/', '\\', '?', '#', '[', ']', '@', '!', '$', '&', '\'', '(', ')', '*', '+', ',', ';',
    '=', '{', '}', '|', '"', '<', '>',
];

/// Builds the slug of a post from its title.
///
/// Whitespace (and an existing `-`) becomes `-`, letters are kept and anything
/// else is dropped.
/// Doubled hyphens are collapsed in a single pass, so three or more
/// consecutive separators are only partially collapsed (`"a   b"` gives `"a--b"`).
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_whitespace() || c == '-' {
            slug.push('-');
        } else if c.is_alphabetic() {
            slug.push(c);
        }
    }

    slug.replace("--", "-").to_lowercase()
}

/// Normalizes a name (usually a tag) into something usable as a file or path segment.
/// `+` and `#` are spelled out so that `C++` and `C#` keep their meaning.
pub fn normalize_file_name(name: &str) -> String {
    let name = name.replace('+', "plus").replace('#', "sharp");
    optimize_file_name(&name)
}

/// Makes a file name safe for both file systems and URLs.
pub fn optimize_file_name(name: &str) -> String {
    let ascii = unidecode::unidecode(name.trim());

    let mut file_name = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for c in ascii.chars() {
        if c.is_whitespace() {
            pending_dash = !file_name.is_empty();
            continue;
        }
        if c.is_control() || RESERVED_CHARS.contains(&c) {
            continue;
        }
        if pending_dash {
            file_name.push('-');
            pending_dash = false;
        }
        file_name.push(c.to_ascii_lowercase());
    }

    file_name.trim_matches('.').to_string()
}
