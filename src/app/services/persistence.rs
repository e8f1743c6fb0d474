use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::rtf;
use super::status::StatusReverter;
use super::text_ops::extract_filename;
use crate::app::controllers::attribute_tracker::TextEdit;
use crate::app::controllers::tabs::SessionManager;
use crate::app::domain::document::Document;
use crate::app::domain::file_format::FileFormat;
use crate::app::domain::settings::PlainSaveMode;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::error_report::ErrorSink;
use crate::app::infrastructure::prompts::{
    OPEN_ERROR, REPORT_WRITE_ERROR, SAVE_ERROR, UNEXPECTED_ERROR, UserPrompts, WRITE_ERROR,
};

/// Result of a user-driven file operation.
///
/// Cancelling the chooser and declining the formatting warning are normal
/// outcomes; only `Failed` has been reported.
#[derive(Debug)]
pub enum Outcome<T> {
    Done(T),
    Cancelled,
    Declined,
    Failed(AppError),
}

impl<T> Outcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub index: usize,
    pub path: PathBuf,
    pub format: FileFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opened {
    pub index: usize,
    pub path: PathBuf,
    pub edit: TextEdit,
}

/// Which save workflow applies to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRoute {
    /// Ask for a destination.
    Prompt,
    /// Write over the associated file with the format stored alongside it.
    Overwrite(PathBuf, Option<FileFormat>),
}

impl SaveRoute {
    /// A document without a file, or whose file vanished from disk, goes
    /// through the prompt.
    pub fn for_document(doc: &Document) -> Self {
        match doc.file_path() {
            Some(path) if path.exists() => {
                SaveRoute::Overwrite(path.to_path_buf(), doc.file_format())
            }
            Some(path) => {
                tracing::info!("{} no longer exists, asking for a new path", path.display());
                SaveRoute::Prompt
            }
            None => SaveRoute::Prompt,
        }
    }
}

/// Moves documents between the session and the file system.
pub struct PersistenceService {
    reverter: StatusReverter,
    errors: Arc<dyn ErrorSink>,
    plain_mode: PlainSaveMode,
}

impl PersistenceService {
    pub fn new(reverter: StatusReverter, errors: Arc<dyn ErrorSink>, plain_mode: PlainSaveMode) -> Self {
        Self {
            reverter,
            errors,
            plain_mode,
        }
    }

    /// Save the active document through whichever workflow applies.
    pub fn save_active(&self, tabs: &mut SessionManager, prompts: &mut dyn UserPrompts) -> Outcome<Saved> {
        let Some(index) = tabs.active_index() else {
            return Outcome::Cancelled;
        };
        let route = match tabs.document(index) {
            Some(doc) => SaveRoute::for_document(doc),
            None => return Outcome::Cancelled,
        };
        match route {
            SaveRoute::Prompt => self.save(tabs, index, prompts),
            SaveRoute::Overwrite(path, format) => self.overwrite(tabs, index, &path, format, prompts),
        }
    }

    /// Save tab `index` to a path chosen by the user.
    pub fn save(&self, tabs: &mut SessionManager, index: usize, prompts: &mut dyn UserPrompts) -> Outcome<Saved> {
        let Some(path) = prompts.choose_save_path() else {
            tracing::debug!("Save cancelled");
            return Outcome::Cancelled;
        };
        let format = FileFormat::from_path(&path);
        let name = extract_filename(&path);

        let failure_message = match format {
            FileFormat::Styled => SAVE_ERROR,
            FileFormat::PlainText => {
                if !prompts.confirm_format_loss(&name) {
                    tracing::info!("Plain text save of {} declined", name);
                    return Outcome::Declined;
                }
                WRITE_ERROR
            }
        };

        self.write_and_finish(tabs, index, path, format, failure_message, prompts)
    }

    /// Write tab `index` over `path` using the format decided when the file
    /// was associated. The path is not re-classified.
    pub fn overwrite(
        &self,
        tabs: &mut SessionManager,
        index: usize,
        path: &Path,
        format: Option<FileFormat>,
        prompts: &mut dyn UserPrompts,
    ) -> Outcome<Saved> {
        let Some(format) = format else {
            tracing::error!("No format recorded for {}", path.display());
            prompts.show_error(UNEXPECTED_ERROR);
            return Outcome::Failed(AppError::UnrecognizedFormat);
        };
        self.write_and_finish(tabs, index, path.to_path_buf(), format, WRITE_ERROR, prompts)
    }

    /// Ask for a file and load it into a new tab.
    ///
    /// The tab is created and selected before reading, and stays (empty)
    /// when the read fails.
    pub fn open(&self, tabs: &mut SessionManager, prompts: &mut dyn UserPrompts) -> Outcome<Opened> {
        let Some(path) = prompts.choose_open_path() else {
            tracing::debug!("Open cancelled");
            return Outcome::Cancelled;
        };
        let index = tabs.create_document();
        let format = FileFormat::from_path(&path);

        let loaded = match tabs.document_mut(index) {
            Some(doc) => load_into(doc, &path, format),
            None => Err(AppError::InvalidIndex(index)),
        };

        match loaded {
            Ok(edit) => {
                if let Some(doc) = tabs.document_mut(index) {
                    doc.associate_file(path.clone(), format);
                }
                if let Err(e) = tabs.set_title(index, extract_filename(&path)) {
                    tracing::debug!("Tab title not updated: {}", e);
                }
                tracing::info!("Opened {} as {}", path.display(), format.as_str());
                Outcome::Done(Opened { index, path, edit })
            }
            Err(e) => self.fail(prompts, OPEN_ERROR, e),
        }
    }

    fn write_and_finish(
        &self,
        tabs: &mut SessionManager,
        index: usize,
        path: PathBuf,
        format: FileFormat,
        failure_message: &str,
        prompts: &mut dyn UserPrompts,
    ) -> Outcome<Saved> {
        let written = match tabs.document(index) {
            Some(doc) => write_document(doc, &path, format, self.plain_mode),
            None => Err(AppError::InvalidIndex(index)),
        };
        if let Err(e) = written {
            return self.fail(prompts, failure_message, e);
        }

        let name = extract_filename(&path);
        if let Some(doc) = tabs.document_mut(index) {
            doc.associate_file(path.clone(), format);
        }
        if let Err(e) = tabs.set_title(index, name.clone()) {
            tracing::debug!("Tab title not updated: {}", e);
        }
        self.reverter
            .announce_transient(&format!("{} saved successfully...", name));
        tracing::info!("Saved {} as {}", path.display(), format.as_str());

        Outcome::Done(Saved { index, path, format })
    }

    fn fail<T>(&self, prompts: &mut dyn UserPrompts, message: &str, error: AppError) -> Outcome<T> {
        tracing::warn!("{}: {}", message, error);
        if let Err(report_err) = self.errors.report(&error) {
            tracing::error!("{}", AppError::ErrorReport(report_err));
            prompts.show_error(REPORT_WRITE_ERROR);
        }
        prompts.show_error(message);
        Outcome::Failed(error)
    }
}

/// Serialize `doc` to `path` in `format`.
pub fn write_document(doc: &Document, path: &Path, format: FileFormat, plain_mode: PlainSaveMode) -> Result<()> {
    match format {
        FileFormat::Styled => {
            let mut encoded = Vec::new();
            rtf::write_rtf(&mut encoded, doc.content(), 0..doc.character_count())?;
            let mut out = BufWriter::new(File::create(path)?);
            out.write_all(&encoded)?;
            out.flush()?;
        }
        FileFormat::PlainText => {
            let mut options = OpenOptions::new();
            options.create(true);
            match plain_mode {
                PlainSaveMode::Append => options.append(true),
                PlainSaveMode::Truncate => options.write(true).truncate(true),
            };
            let mut out = BufWriter::new(options.open(path)?);
            writeln!(out, "{}", doc.text())?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Read `path` into the (empty) document. Styled files keep their runs;
/// plain files get the document's active attributes.
pub fn load_into(doc: &mut Document, path: &Path, format: FileFormat) -> Result<TextEdit> {
    match format {
        FileFormat::Styled => {
            let bytes = fs::read(path)?;
            let styled = rtf::read_rtf(&bytes, doc.active_attributes())?;
            doc.insert_styled(0, &styled)
        }
        FileFormat::PlainText => {
            let reader = BufReader::new(File::open(path)?);
            let mut data = String::new();
            for line in reader.lines() {
                data.push_str(&line?);
                data.push('\n');
            }
            doc.insert(0, &data)
        }
    }
}
