//! Path and filter utilities

use std::collections::HashMap;

use crate::types::Subset;

/// Child listing URL: storage root URL concatenated with the folder's API path.
/// No separator handling; the API path is appended verbatim.
pub fn child_url(root_url: &str, api_path: &str) -> String {
    format!("{root_url}{api_path}")
}

/// True when `ext` is unset or `name` ends with it. Multi-part suffixes (`.nii.gz`)
/// are compared whole.
pub fn matches_extension(name: &str, ext: Option<&str>) -> bool {
    match ext {
        None => true,
        Some(ext) => name.ends_with(ext),
    }
}

/// Manifest `path` for a materialized path.
///
/// Without a subset the single leading `/` is dropped. With a subset its anchored
/// prefix is removed first, then a leading `/` if one remains. A file sitting
/// exactly at the subset prefix maps to `""`.
pub fn relative_manifest_path(materialized: &str, subset: Option<&Subset>) -> String {
    let rest = match subset {
        None => materialized,
        Some(subset) => {
            let prefix = subset.prefix();
            materialized.strip_prefix(prefix.as_str()).unwrap_or(materialized)
        }
    };
    rest.strip_prefix('/').unwrap_or(rest).to_string()
}

/// Directory holding a manifest path: the path itself when it ends with `/`,
/// otherwise everything before the last segment (`""` for a bare file name).
pub fn containing_dir(path: &str) -> &str {
    if path.ends_with('/') {
        return path;
    }
    match path.rfind('/') {
        Some(i) => &path[..i],
        None => "",
    }
}

/// Render a `{column}` template against one manifest row.
/// Fails on an unknown column or an unterminated placeholder. `{{` and `}}` are literal braces.
pub fn render_template(template: &str, row: &HashMap<&str, &str>) -> Result<String, String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut key = String::new();
                let mut closed = false;
                for k in chars.by_ref() {
                    if k == '}' {
                        closed = true;
                        break;
                    }
                    key.push(k);
                }
                if !closed {
                    return Err(format!("unterminated placeholder {{{key}"));
                }
                match row.get(key.as_str()) {
                    Some(v) => out.push_str(v),
                    None => return Err(format!("unknown column {key:?}")),
                }
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}
