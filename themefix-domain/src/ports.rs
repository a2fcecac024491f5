use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;

/// Read-only repository access.
///
/// Detectors run entirely against this trait so rules can be tested against
/// an in-memory implementation later. Applicators read through it too and
/// write through the `themefix-edit` primitives, keyed off `root()`.
pub trait RepoView {
    fn root(&self) -> &Utf8Path;

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String>;

    fn exists(&self, rel: &Utf8Path) -> bool;

    /// Glob-style enumeration relative to the root, in deterministic order.
    /// `node_modules` trees are never reported.
    fn find(&self, pattern: &str) -> anyhow::Result<Vec<Utf8PathBuf>>;
}

/// File-system backed `RepoView`.
#[derive(Debug, Clone)]
pub struct FsRepoView {
    root: Utf8PathBuf,
}

impl FsRepoView {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    fn abs(&self, rel: &Utf8Path) -> Utf8PathBuf {
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.root.join(rel)
        }
    }
}

impl RepoView for FsRepoView {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
        let abs = self.abs(rel);
        fs::read_to_string(&abs).with_context(|| format!("read {}", abs))
    }

    fn exists(&self, rel: &Utf8Path) -> bool {
        self.abs(rel).exists()
    }

    fn find(&self, pattern: &str) -> anyhow::Result<Vec<Utf8PathBuf>> {
        let full = self.root.join(pattern);
        let full_str = full.as_str();

        let mut out = Vec::new();
        for entry in glob(full_str).with_context(|| format!("glob {}", full_str))? {
            let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
            let abs = Utf8PathBuf::from_path_buf(path)
                .map_err(|p| anyhow::anyhow!("non-utf8 path: {}", p.display()))?;
            let rel = abs.strip_prefix(&self.root).unwrap_or(&abs).to_path_buf();
            if rel.components().any(|c| c.as_str() == "node_modules") {
                continue;
            }
            out.push(rel);
        }

        // Deterministic order matters.
        out.sort();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    fn temp_view() -> (tempfile::TempDir, FsRepoView) {
        let td = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8 tempdir");
        (td, FsRepoView::new(root))
    }

    #[test]
    fn find_reports_sorted_relative_paths() {
        let (_td, view) = temp_view();
        std_fs::create_dir_all(view.root().join("sections")).unwrap();
        std_fs::write(view.root().join("sections/z.liquid"), "z").unwrap();
        std_fs::write(view.root().join("sections/a.liquid"), "a").unwrap();

        let found = view.find("**/*.liquid").unwrap();
        let found: Vec<&str> = found.iter().map(|p| p.as_str()).collect();
        assert_eq!(found, vec!["sections/a.liquid", "sections/z.liquid"]);
    }

    #[test]
    fn find_skips_node_modules() {
        let (_td, view) = temp_view();
        std_fs::create_dir_all(view.root().join("node_modules/pkg")).unwrap();
        std_fs::write(view.root().join("node_modules/pkg/x.liquid"), "x").unwrap();
        std_fs::write(view.root().join("top.liquid"), "t").unwrap();

        let found = view.find("**/*.liquid").unwrap();
        let found: Vec<&str> = found.iter().map(|p| p.as_str()).collect();
        assert_eq!(found, vec!["top.liquid"]);
    }

    #[test]
    fn read_missing_file_errors_with_path_context() {
        let (_td, view) = temp_view();
        let err = view
            .read_to_string(Utf8Path::new("layout/theme.liquid"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("theme.liquid"));
    }
}
