//! Locator and inliner - from an include statement back to its partial

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::PartialError;
use crate::host::Host;
use crate::partials::Partials;
use crate::resolver::display_path;
use crate::text::{indent_block, leading_indent};

/// Where a reference written in a file may live on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub reference: String,
    /// Candidate paths in lookup order, with the file found for each
    pub candidates: Vec<(PathBuf, Option<PathBuf>)>,
}

impl Resolution {
    /// First candidate that exists on disk
    pub fn found(&self) -> Option<&Path> {
        self.candidates.iter().find_map(|(_, found)| found.as_deref())
    }
}

/// Result of inlining a partial into the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inlining {
    pub partial: PathBuf,
    /// Text that replaced the include line
    pub replacement: String,
    pub deleted: bool,
}

impl Partials {
    /// Every place `reference`, written in `current_file`, may resolve to
    pub fn resolve(&self, current_file: &Path, reference: &str) -> Result<Resolution, PartialError> {
        debug!(?current_file, %reference, "Partials::resolve: called");
        let (_, extension) = self.registry().rule_for_path(current_file)?;

        let mut suffixes = vec![extension.as_str()];
        if reference.ends_with(extension.as_str()) {
            suffixes.push("");
        }

        let mut candidates = Vec::new();
        for base in self.resolver().reference_bases(current_file) {
            for suffix in &suffixes {
                let candidate = self.resolver().join_reference(&base, reference, suffix)?;
                let found = self.resolver().find_on_disk(self.fs(), &candidate);
                candidates.push((candidate, found));
            }
        }

        Ok(Resolution {
            reference: reference.to_string(),
            candidates,
        })
    }

    /// Find the partial referenced by the include statement on `line`
    pub fn locate(&self, current_file: &Path, line: &str) -> Result<PathBuf, PartialError> {
        debug!(?current_file, %line, "Partials::locate: called");
        let (rule, _) = self.registry().rule_for_path(current_file)?;
        let matcher = rule.matcher()?;

        let Some(reference) = matcher.reference(line) else {
            debug!("Partials::locate: no include statement on line");
            return Err(PartialError::PartialNotFound);
        };

        let resolution = match self.resolve(current_file, reference) {
            Ok(resolution) => resolution,
            Err(e) => {
                debug!(%e, "Partials::locate: reference did not resolve");
                return Err(PartialError::PartialNotFound);
            }
        };

        match resolution.found() {
            Some(path) => {
                debug!(?path, "Partials::locate: found");
                Ok(path.to_path_buf())
            }
            None => Err(PartialError::PartialNotFound),
        }
    }

    /// Open the partial referenced on `line`
    pub fn navigate(&self, host: &mut dyn Host, current_file: &Path, line: &str) -> Result<PathBuf, PartialError> {
        debug!(?current_file, "Partials::navigate: called");
        let path = self.locate(current_file, line)?;
        host.open_file(&path)?;
        Ok(path)
    }

    /// Replace the include statement on the current line with the partial's
    /// contents, then offer to delete the partial.
    pub fn dispose(&self, host: &mut dyn Host, current_file: &Path, line: &str) -> Result<Inlining, PartialError> {
        debug!(?current_file, "Partials::dispose: called");
        let partial = self.locate(current_file, line)?;

        let contents = self.fs().read_to_string(&partial).map_err(|e| {
            debug!(%e, "Partials::dispose: failed to read partial");
            PartialError::PartialNotFound
        })?;

        let replacement = indent_block(&contents, leading_indent(line));
        host.replace_current_line(&replacement).map_err(|e| {
            debug!(%e, "Partials::dispose: failed to replace line");
            PartialError::PartialNotFound
        })?;
        info!(path = %display_path(&partial), "Inlined partial");

        let question = format!("Delete {}?", display_path(&partial));
        // The buffer is already edited; a failed delete only keeps the partial
        let deleted = host.confirm(&question)
            && match self.fs().remove_file(&partial) {
                Ok(()) => true,
                Err(e) => {
                    warn!(path = %display_path(&partial), error = %e, "Failed to delete partial");
                    host.show_error(&format!("Could not delete {}: {}", display_path(&partial), e));
                    false
                }
            };

        Ok(Inlining {
            partial,
            replacement,
            deleted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::fs::{FileSystem, LocalFs};
    use crate::host::MemoryHost;
    use std::fs;
    use std::io;
    use tempfile::tempdir;

    /// Local files that can never be deleted
    struct ReadOnlyFs;

    impl FileSystem for ReadOnlyFs {
        fn exists(&self, path: &Path) -> bool {
            LocalFs.exists(path)
        }

        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            LocalFs.create_dir_all(path)
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            LocalFs.read_to_string(path)
        }

        fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
            LocalFs.write(path, contents)
        }

        fn remove_file(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    fn host_on_line(path: &Path, text: &str, line: usize) -> MemoryHost {
        let buffer = Buffer::new(Some(path.to_path_buf()), text).cursor_at_line(line).unwrap();
        MemoryHost::new(buffer)
    }

    #[test]
    fn test_locate_underscored_partial() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("base")).unwrap();
        fs::write(temp.path().join("base/_reset.scss"), "* { margin: 0; }").unwrap();
        let partials = Partials::default();

        let path = partials
            .locate(&temp.path().join("main.scss"), "  @import 'base/reset';")
            .unwrap();
        assert_eq!(path, temp.path().join("base/_reset.scss"));
    }

    #[test]
    fn test_locate_plain_partial() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("header.dust"), "<h1/>").unwrap();
        let partials = Partials::default();

        let path = partials
            .locate(&temp.path().join("page.dust"), "{> \"header\" /}")
            .unwrap();
        assert_eq!(path, temp.path().join("header.dust"));
    }

    #[test]
    fn test_locate_reference_with_extension() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("print.css"), "body {}").unwrap();
        let partials = Partials::default();

        let path = partials
            .locate(&temp.path().join("site.css"), "@import url('print.css');")
            .unwrap();
        assert_eq!(path, temp.path().join("print.css"));
    }

    #[test]
    fn test_locate_from_root_convention() {
        let temp = tempdir().unwrap();
        let views = temp.path().join("app/views");
        fs::create_dir_all(views.join("shared")).unwrap();
        fs::create_dir_all(views.join("users")).unwrap();
        fs::write(views.join("shared/_card.html.erb"), "<div/>").unwrap();
        let partials = Partials::default();

        let path = partials
            .locate(&views.join("users/show.html.erb"), "<%= render 'shared/card' %>")
            .unwrap();
        assert_eq!(path, views.join("shared/_card.html.erb"));
    }

    #[test]
    fn test_locate_falls_back_to_current_dir_under_root() {
        let temp = tempdir().unwrap();
        let users = temp.path().join("app/views/users");
        fs::create_dir_all(&users).unwrap();
        fs::write(users.join("_row.html.erb"), "<tr/>").unwrap();
        let partials = Partials::default();

        let path = partials
            .locate(&users.join("index.html.erb"), "<%= render 'row' %>")
            .unwrap();
        assert_eq!(path, users.join("_row.html.erb"));
    }

    #[test]
    fn test_locate_missing_partial() {
        let temp = tempdir().unwrap();
        let partials = Partials::default();

        let err = partials
            .locate(&temp.path().join("main.scss"), "@import 'nowhere';")
            .unwrap_err();
        assert!(matches!(err, PartialError::PartialNotFound));
    }

    #[test]
    fn test_locate_line_without_include() {
        let temp = tempdir().unwrap();
        let partials = Partials::default();

        let err = partials.locate(&temp.path().join("main.scss"), "color: red;").unwrap_err();
        assert!(matches!(err, PartialError::PartialNotFound));
    }

    #[test]
    fn test_locate_escaping_reference_is_not_found() {
        let temp = tempdir().unwrap();
        let partials = Partials::default();

        let err = partials
            .locate(&temp.path().join("main.scss"), "@import '../secret';")
            .unwrap_err();
        assert!(matches!(err, PartialError::PartialNotFound));
    }

    #[test]
    fn test_locate_unsupported_file_type() {
        let temp = tempdir().unwrap();
        let partials = Partials::default();

        let err = partials.locate(&temp.path().join("notes.txt"), "anything").unwrap_err();
        assert!(matches!(err, PartialError::UnsupportedFileType { .. }));
    }

    #[test]
    fn test_resolve_lists_candidates_in_order() {
        let temp = tempdir().unwrap();
        let views = temp.path().join("views");
        fs::create_dir_all(views.join("pages")).unwrap();
        fs::write(views.join("pages/_nav.slim"), "nav").unwrap();
        let partials = Partials::default();

        let resolution = partials.resolve(&views.join("pages/home.slim"), "nav").unwrap();

        assert_eq!(resolution.candidates.len(), 2);
        assert_eq!(resolution.candidates[0], (views.join("nav.slim"), None));
        assert_eq!(
            resolution.candidates[1],
            (views.join("pages/nav.slim"), Some(views.join("pages/_nav.slim")))
        );
        assert_eq!(resolution.found(), Some(views.join("pages/_nav.slim").as_path()));
    }

    #[test]
    fn test_navigate_opens_partial() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("_footer.haml"), "%footer").unwrap();
        let current = temp.path().join("layout.haml");
        let partials = Partials::default();
        let mut host = host_on_line(&current, "%body\n  = render 'footer'\n", 2);

        let line = host.current_line();
        let path = partials.navigate(&mut host, &current, &line).unwrap();

        assert_eq!(path, temp.path().join("_footer.haml"));
        assert_eq!(host.opened, vec![temp.path().join("_footer.haml")]);
    }

    #[test]
    fn test_dispose_inlines_with_indentation_and_keeps_file() {
        let temp = tempdir().unwrap();
        let partial = temp.path().join("_colors.scss");
        fs::write(&partial, ".a {\n  color: red;\n}\n").unwrap();
        let current = temp.path().join("main.scss");
        let partials = Partials::default();
        let mut host = host_on_line(&current, "body {\n  @import 'colors';\n}\n", 2).with_answers([false]);

        let line = host.current_line();
        let inlining = partials.dispose(&mut host, &current, &line).unwrap();

        assert_eq!(host.buffer.text(), "body {\n  .a {\n    color: red;\n  }\n}\n");
        assert_eq!(inlining.partial, partial);
        assert!(!inlining.deleted);
        assert!(partial.exists());
        assert_eq!(host.questions.len(), 1);
    }

    #[test]
    fn test_dispose_deletes_when_confirmed() {
        let temp = tempdir().unwrap();
        let partial = temp.path().join("_menu.slim");
        fs::write(&partial, "ul\n  li\n").unwrap();
        let current = temp.path().join("page.slim");
        let partials = Partials::default();
        let mut host = host_on_line(&current, "== render 'menu'\n", 1).with_answers([true]);

        let line = host.current_line();
        let inlining = partials.dispose(&mut host, &current, &line).unwrap();

        assert!(inlining.deleted);
        assert!(!partial.exists());
        assert_eq!(host.buffer.text(), "ul\n  li\n");
    }

    #[test]
    fn test_dispose_missing_partial_leaves_buffer() {
        let temp = tempdir().unwrap();
        let current = temp.path().join("main.less");
        let partials = Partials::default();
        let mut host = host_on_line(&current, "@import 'gone';\n", 1).with_answers([true]);

        let line = host.current_line();
        let err = partials.dispose(&mut host, &current, &line).unwrap_err();

        assert!(matches!(err, PartialError::PartialNotFound));
        assert_eq!(host.buffer.text(), "@import 'gone';\n");
        assert!(host.questions.is_empty());
    }

    #[test]
    fn test_dispose_failed_delete_still_reports_inlining() {
        let temp = tempdir().unwrap();
        let partial = temp.path().join("_colors.scss");
        fs::write(&partial, "color: red;\n").unwrap();
        let current = temp.path().join("main.scss");
        let partials = Partials::default().with_fs(ReadOnlyFs);
        let mut host = host_on_line(&current, "@import 'colors';\n", 1).with_answers([true]);

        let line = host.current_line();
        let inlining = partials.dispose(&mut host, &current, &line).unwrap();

        assert!(!inlining.deleted);
        assert_eq!(host.buffer.text(), "color: red;\n");
        assert!(partial.exists());
        assert_eq!(host.errors.len(), 1);
        assert!(host.errors[0].contains("denied"));
    }
}
