//! Export formatter - turns the filtered record sequence into a tabular document
//!
//! The document always carries the full filtered set, never just the page
//! on screen. Three renderings are supported: a paginated PDF laid out by
//! `printpdf`, CSV, and a paginated plain-text document.

use crate::model::record::EventRecord;
use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Column headers, in export order
pub const HEADERS: [&str; 4] = ["Event", "Date", "Speaker", "Status"];

/// Title printed at the top of every text page
pub const DOCUMENT_TITLE: &str = "Table Data";

/// Base file name used when saving
pub const FILE_STEM: &str = "table-data";

/// Widest a text column may grow before cells are truncated
const MAX_COLUMN_WIDTH: usize = 40;

// A4 landscape, in millimetres
const PDF_PAGE_WIDTH: f32 = 297.0;
const PDF_PAGE_HEIGHT: f32 = 210.0;
const PDF_MARGIN: f32 = 15.0;
const PDF_ROW_HEIGHT: f32 = 7.0;

/// Left edge of each PDF column, relative to the margin
const PDF_COLUMN_OFFSETS: [f32; 4] = [0.0, 110.0, 150.0, 220.0];

/// Characters that fit in each PDF column at body size
const PDF_COLUMN_CHARS: [usize; 4] = [50, 16, 30, 20];

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Paginated PDF document
    #[default]
    Pdf,
    /// Paginated plain-text document
    Text,
    /// Comma-separated values
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
        }
    }
}

/// A tabular document ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub title: String,
    pub rows: Vec<[String; 4]>,
}

impl ExportDocument {
    /// One row per record, preserving sequence order
    pub fn from_records(records: &[&EventRecord]) -> Self {
        let rows = records
            .iter()
            .map(|record| {
                [
                    record.event_name.clone(),
                    record.date_label(),
                    record.speaker.clone(),
                    record.status.label().to_string(),
                ]
            })
            .collect();

        Self {
            title: DOCUMENT_TITLE.to_string(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the document as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(HEADERS)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Column widths fitted to the widest cell, capped at `MAX_COLUMN_WIDTH`
    fn column_widths(&self) -> [usize; 4] {
        let mut widths = HEADERS.map(|h| h.width());
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.width());
            }
        }
        widths.map(|w| w.min(MAX_COLUMN_WIDTH))
    }

    /// Render a paginated plain-text document
    ///
    /// Every page repeats the title and the header row and ends with a
    /// `Page n of m` footer. Pages are separated by a form feed. An empty
    /// document still renders one page containing only the header.
    pub fn render_text(&self, rows_per_page: usize) -> String {
        let rows_per_page = rows_per_page.max(1);
        let widths = self.column_widths();
        let chunks: Vec<&[[String; 4]]> = if self.rows.is_empty() {
            vec![&self.rows[..]]
        } else {
            self.rows.chunks(rows_per_page).collect()
        };
        let page_count = chunks.len();

        let header_line = format_row(&HEADERS.map(str::to_string), &widths);
        let separator = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");

        let pages: Vec<String> = chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| {
                let mut page = String::new();
                page.push_str(&self.title);
                page.push_str("\n\n");
                page.push_str(&header_line);
                page.push('\n');
                page.push_str(&separator);
                page.push('\n');
                for row in chunk.iter() {
                    page.push_str(&format_row(row, &widths));
                    page.push('\n');
                }
                page.push('\n');
                page.push_str(&format!("Page {} of {}", index + 1, page_count));
                page.push('\n');
                page
            })
            .collect();

        pages.join("\u{c}")
    }
}

impl ExportDocument {
    /// Write the document as a paginated PDF
    ///
    /// Each page carries the title, the header row, up to `rows_per_page`
    /// rows, and a `Page n of m` footer. Rows that would run past the bottom
    /// margin move to the next page.
    pub fn write_pdf<W: Write>(&self, writer: W, rows_per_page: usize) -> Result<()> {
        let usable = PDF_PAGE_HEIGHT - 2.0 * PDF_MARGIN - 4.0 * PDF_ROW_HEIGHT;
        let fits = (usable / PDF_ROW_HEIGHT).floor().max(1.0) as usize;
        let rows_per_page = rows_per_page.clamp(1, fits);
        let chunks: Vec<&[[String; 4]]> = if self.rows.is_empty() {
            vec![&self.rows[..]]
        } else {
            self.rows.chunks(rows_per_page).collect()
        };
        let page_count = chunks.len();

        let (doc, first_page, first_layer) = PdfDocument::new(
            self.title.as_str(),
            Mm(PDF_PAGE_WIDTH),
            Mm(PDF_PAGE_HEIGHT),
            "Table",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow!("Failed to load PDF font: {:?}", e))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| anyhow!("Failed to load PDF font: {:?}", e))?;

        for (index, chunk) in chunks.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PDF_PAGE_WIDTH), Mm(PDF_PAGE_HEIGHT), "Table")
            };
            let layer = doc.get_page(page).get_layer(layer);

            let mut y = PDF_PAGE_HEIGHT - PDF_MARGIN;
            layer.use_text(self.title.as_str(), 16.0, Mm(PDF_MARGIN), Mm(y), &bold);
            y -= 2.0 * PDF_ROW_HEIGHT;

            for (header, offset) in HEADERS.iter().zip(PDF_COLUMN_OFFSETS) {
                layer.use_text(*header, 11.0, Mm(PDF_MARGIN + offset), Mm(y), &bold);
            }
            y -= PDF_ROW_HEIGHT;

            for row in chunk.iter() {
                for ((cell, offset), chars) in
                    row.iter().zip(PDF_COLUMN_OFFSETS).zip(PDF_COLUMN_CHARS)
                {
                    layer.use_text(
                        truncate_chars(cell, chars),
                        10.0,
                        Mm(PDF_MARGIN + offset),
                        Mm(y),
                        &regular,
                    );
                }
                y -= PDF_ROW_HEIGHT;
            }

            layer.use_text(
                format!("Page {} of {}", index + 1, page_count),
                9.0,
                Mm(PDF_MARGIN),
                Mm(PDF_MARGIN / 2.0),
                &regular,
            );
        }

        let mut writer = BufWriter::new(writer);
        doc.save(&mut writer)
            .map_err(|e| anyhow!("Failed to write PDF: {:?}", e))?;
        writer.flush()?;
        Ok(())
    }
}

/// Cut `text` to at most `max` characters, ending in `...` when cut
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Pad or truncate each cell to its column width and join with separators
fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| fit_to_width(cell, *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Fit `text` into exactly `width` display columns
fn fit_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        let padding = width - text.width();
        return format!("{}{}", text, " ".repeat(padding));
    }

    let budget = width.saturating_sub(3);
    let mut used = 0;
    let mut truncated = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        truncated.push(c);
    }
    let dots = "...".chars().take(width - used).collect::<String>();
    truncated.push_str(&dots);
    let fill = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(fill))
}

/// Write the document into `dir` as `table-data.<ext>`
pub fn save(
    document: &ExportDocument,
    dir: &Path,
    format: ExportFormat,
    rows_per_page: usize,
) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    }

    let path = dir.join(format!("{}.{}", FILE_STEM, format.extension()));
    match format {
        ExportFormat::Pdf => {
            let file = fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            document.write_pdf(file, rows_per_page)?;
        }
        ExportFormat::Csv => {
            let file = fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            document.write_csv(file)?;
        }
        ExportFormat::Text => {
            fs::write(&path, document.render_text(rows_per_page))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    Ok(path)
}
