//! Paged dump view over a mapped file.
//!
//! A `WindowedView` borrows a `MappedFile`, keeps a page-aligned cursor into
//! it and renders the page under the cursor as an address/hex/text dump. The
//! rendered text is cached and only rebuilt when the cursor moves.

pub mod format;

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::io::MappedFile;
use crate::view::format::{write_header, DumpFormat, DumpLine};
use tracing::trace;

/// Stateful page cursor and renderer over a mapped file.
pub struct WindowedView<'a> {
    file: &'a MappedFile,
    label: String,
    format: DumpFormat,
    page_size: u64,
    offset: u64,
    last_rendered: Option<u64>,
    // Only the first `page_len` bytes belong to the current page.
    scratch: Vec<u8>,
    page_len: usize,
    text: String,
    copies: u64,
}

impl<'a> WindowedView<'a> {
    /// Creates a view positioned at the start of `file`.
    ///
    /// `label` is shown in the dump header.
    pub fn new(file: &'a MappedFile, label: impl Into<String>, config: &ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(file, label.into(), config))
    }

    /// Creates a view with the default layout, labelled with the file name.
    pub fn with_defaults(file: &'a MappedFile) -> Self {
        let label = file
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.path().display().to_string());
        Self::build(file, label, &ViewerConfig::default())
    }

    fn build(file: &'a MappedFile, label: String, config: &ViewerConfig) -> Self {
        // No page can hold more bytes than the file has.
        let file_len = usize::try_from(file.len()).unwrap_or(usize::MAX);
        Self {
            file,
            label,
            format: DumpFormat::from(config),
            page_size: config.page_size as u64,
            offset: 0,
            last_rendered: None,
            scratch: vec![0u8; config.page_size.min(file_len)],
            page_len: 0,
            text: String::new(),
            copies: 0,
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of pages needed to cover the file.
    pub fn page_count(&self) -> u64 {
        self.file.len().div_ceil(self.page_size)
    }

    pub fn current_page(&self) -> u64 {
        self.offset / self.page_size
    }

    /// How many times page bytes have been copied out of the mapping.
    pub fn copy_count(&self) -> u64 {
        self.copies
    }

    /// Moves forward one page, snapping to the start of the last page at the end.
    pub fn scroll_forward(&mut self) {
        let len = self.file.len();
        if len == 0 {
            return;
        }
        let next = self.offset.saturating_add(self.page_size);
        self.offset = if next > len {
            trace!(requested = next, len, "Clamped forward scroll");
            (len / self.page_size) * self.page_size
        } else {
            next
        };
    }

    /// Moves back one page, stopping at the start of the file.
    pub fn scroll_backward(&mut self) {
        self.offset = self.offset.saturating_sub(self.page_size);
    }

    /// Moves to the page containing `offset`, clamped to the file length.
    pub fn scroll_to(&mut self, offset: u64) {
        let clamped = offset.min(self.file.len());
        self.offset = (clamped / self.page_size) * self.page_size;
    }

    /// Renders the current page, reusing the previous text if the cursor has not moved.
    pub fn render(&mut self) -> &str {
        if self.last_rendered == Some(self.offset) {
            return &self.text;
        }

        let len = self.file.len();
        let page_start = self.offset.min(len);
        let page_end = page_start.saturating_add(self.page_size).min(len);
        // page_end - page_start <= min(page_size, len), which is the scratch length.
        let count = (page_end - page_start) as usize;

        let copied = self.file.copy_to(page_start, &mut self.scratch[..count]);
        self.copies += 1;
        self.page_len = copied;

        self.text.clear();
        write_header(&mut self.text, &self.label, len);
        let line_length = self.format.line_length;
        for (i, chunk) in self.scratch[..copied].chunks(line_length).enumerate() {
            let line = DumpLine {
                address: page_start + (i * line_length) as u64,
                bytes: chunk,
                file_len: len,
            };
            line.write_to(&mut self.text, &self.format);
        }

        self.last_rendered = Some(self.offset);
        trace!(
            label = %self.label,
            offset = page_start,
            bytes = copied,
            "Rendered page"
        );
        &self.text
    }

    /// Lines of the most recently rendered page.
    pub fn lines(&self) -> impl Iterator<Item = DumpLine<'_>> + '_ {
        let file_len = self.file.len();
        let start = self.last_rendered.unwrap_or(0).min(file_len);
        let line_length = self.format.line_length;
        self.scratch[..self.page_len]
            .chunks(line_length)
            .enumerate()
            .map(move |(i, bytes)| DumpLine {
                address: start + (i * line_length) as u64,
                bytes,
                file_len,
            })
    }
}
