//! Lint: key-hint text like `[C]` must be rendered as a click target.
//!
//! On phones there is no keyboard, so every `[X]` label in a `render.rs` has to
//! go through `push_clickable()`. A plain `cl.push(...)` renders a button that
//! cannot be tapped.

use std::fs;
use std::path::{Path, PathBuf};

/// `[X]` where X is a single key character.
fn contains_bracket_key(s: &str) -> bool {
    s.as_bytes().windows(3).any(|w| {
        w[0] == b'[' && w[2] == b']' && (w[1].is_ascii_alphanumeric() || b"-=!~{}|\\".contains(&w[1]))
    })
}

/// `(line number, line)` for every non-clickable push carrying a key hint.
fn find_bracket_key_in_push(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//")
                && contains_bracket_key(line)
                && line.contains(".push(")
                && !line.contains("push_clickable(")
        })
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}

fn render_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            render_files(&path, out);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            out.push(path);
        }
    }
}

#[test]
fn no_bracket_keys_in_non_clickable_push() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut files = Vec::new();
    render_files(&src, &mut files);
    assert!(
        files.iter().any(|p| p.ends_with("moonbase/render.rs")),
        "moonbase render.rs not found under {}",
        src.display()
    );

    let mut msg = String::new();
    for path in &files {
        let Ok(source) = fs::read_to_string(path) else {
            continue;
        };
        for (line_num, line) in find_bracket_key_in_push(&source) {
            msg.push_str(&format!("  {}:{}: {}\n", path.display(), line_num, line));
        }
    }
    assert!(
        msg.is_empty(),
        "key-hint text [X] in non-clickable push(); use push_clickable():\n{}",
        msg
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_bracket_key_in_push() {
        let source = r#"cl.push(Line::from(" [C] INNOVATE!"));"#;
        assert_eq!(find_bracket_key_in_push(source).len(), 1);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"cl.push_clickable(Line::from("[R] Play Again"), PLAY_AGAIN);"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn ignores_comments() {
        let source = r#"// cl.push(Line::from("[S] Skip"));"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn bracket_key_detection() {
        assert!(contains_bracket_key("[N] Next"));
        assert!(contains_bracket_key("[1]"));
        assert!(contains_bracket_key("[-]"));
        assert!(!contains_bracket_key("[]"));
        assert!(!contains_bracket_key("[IC]"));
        assert!(!contains_bracket_key("plain"));
    }
}
