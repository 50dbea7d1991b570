// file: src/report/documents.rs
// description: human-readable report of the backend's stored documents
// reference: GET /api/documents

use crate::error::{OpsError, Result};
use crate::models::{DocumentInfo, DocumentsResponse};
use std::io::Write;

pub const DEFAULT_PREVIEW_LINES: usize = 20;

/// Leading lines of a document plus how many were cut.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview<'a> {
    pub lines: Vec<&'a str>,
    pub remaining: usize,
}

impl<'a> Preview<'a> {
    pub fn of(text: &'a str, max_lines: usize) -> Self {
        let all: Vec<&str> = text.lines().collect();
        let shown = all.len().min(max_lines);
        Self {
            lines: all[..shown].to_vec(),
            remaining: all.len() - shown,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.remaining > 0
    }
}

pub struct DocumentReport {
    preview_lines: usize,
}

impl DocumentReport {
    pub fn new(preview_lines: usize) -> Self {
        Self {
            preview_lines: preview_lines.max(1),
        }
    }

    /// Writes one entry per document and returns how many were written.
    /// A response flagged unsuccessful writes nothing and yields
    /// `OpsError::Api` carrying the backend's message.
    pub fn render<W: Write>(&self, response: &DocumentsResponse, out: &mut W) -> Result<usize> {
        if !response.success {
            return Err(OpsError::Api(response.failure_message()));
        }

        writeln!(
            out,
            "Total documents: {} (showing {})",
            response.total_count,
            response.documents.len()
        )?;

        if response.documents.is_empty() {
            writeln!(out, "No documents indexed yet.")?;
            return Ok(0);
        }

        for (idx, document) in response.documents.iter().enumerate() {
            writeln!(out)?;
            self.render_document(idx + 1, document, out)?;
        }

        Ok(response.documents.len())
    }

    fn render_document<W: Write>(
        &self,
        position: usize,
        document: &DocumentInfo,
        out: &mut W,
    ) -> Result<()> {
        writeln!(out, "{}", "=".repeat(80))?;
        writeln!(out, "Document {}", position)?;
        writeln!(out, "  ID: {}", document.id)?;
        writeln!(out, "  Source URL: {}", document.source_url)?;
        writeln!(out, "  Content length: {} characters", document.content_length())?;
        writeln!(out, "  Content preview:")?;

        let preview = Preview::of(&document.full_text, self.preview_lines);
        for line in &preview.lines {
            writeln!(out, "    {}", line)?;
        }
        if preview.is_truncated() {
            writeln!(out, "    ... ({} more lines)", preview.remaining)?;
        }

        Ok(())
    }
}

impl Default for DocumentReport {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_LINES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbered_lines(count: usize) -> String {
        (1..=count)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn response_with(text: String) -> DocumentsResponse {
        DocumentsResponse {
            success: true,
            total_count: 1,
            documents: vec![DocumentInfo {
                id: "doc-1".to_string(),
                source_url: "http://localhost:3000/news".to_string(),
                full_text: text,
            }],
            message: None,
            detail: None,
        }
    }

    fn render(response: &DocumentsResponse) -> (Result<usize>, String) {
        let mut out = Vec::new();
        let result = DocumentReport::default().render(response, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_preview_truncates() {
        let text = numbered_lines(25);
        let preview = Preview::of(&text, 20);
        assert_eq!(preview.lines.len(), 20);
        assert_eq!(preview.lines[19], "line 20");
        assert_eq!(preview.remaining, 5);
    }

    #[test]
    fn test_preview_short_text() {
        let preview = Preview::of("a\nb", 20);
        assert_eq!(preview.lines, vec!["a", "b"]);
        assert!(!preview.is_truncated());
    }

    #[test]
    fn test_long_document_shows_twenty_lines_and_notice() {
        let (result, output) = render(&response_with(numbered_lines(23)));
        assert_eq!(result.unwrap(), 1);
        assert!(output.contains("    line 20\n"));
        assert!(!output.contains("line 21"));
        assert!(output.contains("... (3 more lines)"));
    }

    #[test]
    fn test_exactly_twenty_lines_has_no_notice() {
        let (_, output) = render(&response_with(numbered_lines(20)));
        assert!(output.contains("    line 20\n"));
        assert!(!output.contains("more lines"));
    }

    #[test]
    fn test_document_fields_rendered() {
        let (_, output) = render(&response_with("Harbor news".to_string()));
        assert!(output.starts_with("Total documents: 1 (showing 1)\n"));
        assert!(output.contains("Document 1\n"));
        assert!(output.contains("  ID: doc-1\n"));
        assert!(output.contains("  Source URL: http://localhost:3000/news\n"));
        assert!(output.contains("  Content length: 11 characters\n"));
    }

    #[test]
    fn test_failure_writes_nothing() {
        let response = DocumentsResponse {
            success: false,
            message: Some("Vector store not ready".to_string()),
            documents: vec![DocumentInfo {
                id: "ignored".to_string(),
                source_url: String::new(),
                full_text: String::new(),
            }],
            ..DocumentsResponse::default()
        };

        let (result, output) = render(&response);
        assert_eq!(output, "");
        match result {
            Err(OpsError::Api(message)) => assert_eq!(message, "Vector store not ready"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_listing() {
        let response = DocumentsResponse {
            success: true,
            ..DocumentsResponse::default()
        };
        let (result, output) = render(&response);
        assert_eq!(result.unwrap(), 0);
        assert!(output.contains("No documents indexed yet."));
    }
}
