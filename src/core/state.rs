use std::env;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

/// Session state that outlives a single command.
///
/// The working directory is the only thing builtins mutate; it is kept
/// here and threaded through the executor instead of being read ad hoc.
#[derive(Debug, Clone)]
pub struct ShellState {
    current_dir: PathBuf,
}

impl ShellState {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            current_dir: env::current_dir()?,
        })
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Changes the process working directory. Fails only when the change
    /// itself fails, and then nothing changes.
    pub fn change_dir(&mut self, path: &Path) -> io::Result<()> {
        env::set_current_dir(path)?;
        self.current_dir = settled_dir(&self.current_dir, path, env::current_dir());
        Ok(())
    }
}

/// The directory recorded after a successful `chdir`. When the kernel cannot
/// report it (the directory was unlinked), the requested path is kept,
/// resolved against the previous directory.
fn settled_dir(previous: &Path, requested: &Path, reported: io::Result<PathBuf>) -> PathBuf {
    match reported {
        Ok(dir) => dir,
        Err(e) => {
            warn!("cannot read working directory after cd: {}", e);
            previous.join(requested)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_change_dir_tracks_process_cwd() {
        let original = env::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let mut state = ShellState::new().unwrap();

        state.change_dir(temp.path()).unwrap();
        assert_eq!(state.current_dir(), env::current_dir().unwrap());
        assert_eq!(
            state.current_dir(),
            temp.path().canonicalize().unwrap()
        );

        env::set_current_dir(original).unwrap();
    }

    #[test]
    #[serial]
    fn test_failed_change_keeps_dir() {
        let mut state = ShellState::new().unwrap();
        let before = state.current_dir().to_path_buf();

        assert!(state.change_dir(Path::new("/path/that/does/not/exist")).is_err());
        assert_eq!(state.current_dir(), before);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_change_dir_inside_unlinked_directory_succeeds() {
        let original = env::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let doomed = temp.path().join("doomed");
        std::fs::create_dir(&doomed).unwrap();

        let mut state = ShellState::new().unwrap();
        state.change_dir(&doomed).unwrap();
        let recorded = state.current_dir().to_path_buf();
        std::fs::remove_dir(&doomed).unwrap();

        // chdir(".") still works, getcwd does not.
        assert!(env::current_dir().is_err());
        assert!(state.change_dir(Path::new(".")).is_ok());
        assert!(state.current_dir().starts_with(&recorded));

        env::set_current_dir(original).unwrap();
    }

    #[test]
    fn test_settled_dir() {
        let reported = settled_dir(Path::new("/a"), Path::new("b"), Ok(PathBuf::from("/x")));
        assert_eq!(reported, PathBuf::from("/x"));

        let failed = || Err(io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(
            settled_dir(Path::new("/a"), Path::new("b"), failed()),
            PathBuf::from("/a/b")
        );
        assert_eq!(
            settled_dir(Path::new("/a"), Path::new("/c"), failed()),
            PathBuf::from("/c")
        );
    }
}
