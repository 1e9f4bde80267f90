//! Save-file dialog capability used for captures without a file name.

/// Asks the user where to save a file.
///
/// Returns `None` when the user cancels or the dialog cannot be shown.
pub trait SaveFileDialog {
    fn request_save_file_path(&mut self) -> Option<String>;
}

/// A dialog that never yields a path (headless use).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSaveDialog;

impl SaveFileDialog for NoSaveDialog {
    fn request_save_file_path(&mut self) -> Option<String> {
        None
    }
}

/// The platform's native save dialog.
#[cfg(feature = "native-dialog")]
#[derive(Debug, Clone, Default)]
pub struct NativeSaveDialog {
    /// Dialog window title.
    pub title: Option<String>,
}

#[cfg(feature = "native-dialog")]
impl SaveFileDialog for NativeSaveDialog {
    fn request_save_file_path(&mut self) -> Option<String> {
        let mut dialog = rfd::FileDialog::new();
        if let Some(title) = &self.title {
            dialog = dialog.set_title(title);
        }
        let path = dialog.save_file()?;
        match path.into_os_string().into_string() {
            Ok(path) => Some(path),
            Err(path) => {
                log::warn!("save dialog returned a non UTF-8 path: {path:?}");
                None
            }
        }
    }
}

/// The dialog a new viewer starts with.
#[must_use]
pub fn default_save_dialog() -> Box<dyn SaveFileDialog> {
    #[cfg(feature = "native-dialog")]
    {
        Box::new(NativeSaveDialog::default())
    }
    #[cfg(not(feature = "native-dialog"))]
    {
        Box::new(NoSaveDialog)
    }
}

/// A dialog that returns the given answers in order, then `None`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSaveDialog {
    answers: std::collections::VecDeque<Option<String>>,
}

impl ScriptedSaveDialog {
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
        }
    }
}

impl SaveFileDialog for ScriptedSaveDialog {
    fn request_save_file_path(&mut self) -> Option<String> {
        self.answers.pop_front().flatten()
    }
}
