//! Property tests for append idempotence.

use camino::{Utf8Path, Utf8PathBuf};
use proptest::prelude::*;
use std::fs;
use themefix_edit::append_once;

const MARKER: &str = "STAB_MARKER";

fn write_fixture(content: &str) -> (tempfile::TempDir, Utf8PathBuf) {
    let td = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8 tempdir");
    if !content.is_empty() {
        fs::write(root.join("target.css"), content).expect("seed file");
    }
    (td, root)
}

proptest! {
    // Blocks carry their marker on the first line, the shape every rule uses.
    #[test]
    fn appending_twice_equals_appending_once(
        content in "[ -~\n]{0,200}",
        body in "[ -~\n]{1,80}",
    ) {
        prop_assume!(!content.contains(MARKER));
        let block = format!("/* {MARKER} */\n{body}");
        let (_td, root) = write_fixture(&content);
        let rel = Utf8Path::new("target.css");

        prop_assert!(append_once(&root, rel, MARKER, &block).unwrap());
        let first = fs::read_to_string(root.join(rel)).unwrap();

        prop_assert!(!append_once(&root, rel, MARKER, &block).unwrap());
        let second = fs::read_to_string(root.join(rel)).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert!(second.ends_with('\n'));
        prop_assert!(second.contains(MARKER));
    }

    #[test]
    fn content_already_carrying_marker_is_never_written(
        prefix in "[ -~\n]{0,100}",
        suffix in "[ -~\n]{0,100}",
        body in "[ -~\n]{1,80}",
    ) {
        let content = format!("{prefix}{MARKER}{suffix}");
        let block = format!("/* {MARKER} */\n{body}");
        let (_td, root) = write_fixture(&content);
        let rel = Utf8Path::new("target.css");

        prop_assert!(!append_once(&root, rel, MARKER, &block).unwrap());
        prop_assert_eq!(fs::read_to_string(root.join(rel)).unwrap(), content);
    }
}
