//! Text report
//!
//! Writes the two result buffers in the capture report layout:
//!
//! ```text
//! --Sorted Max 32 Values--
//! <largest samples, smallest first>
//! --Last 32 Values--
//! <most recent samples, oldest first>
//! ```

use crate::error::{Error, Result};
use crate::topk::TopK;
use crate::window::RetentionWindow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Header preceding the largest samples
pub const MAX_HEADER: &str = "--Sorted Max 32 Values--";

/// Header preceding the most recent samples
pub const WINDOW_HEADER: &str = "--Last 32 Values--";

/// Write the report to any writer
pub fn render<W: Write>(writer: &mut W, window: &RetentionWindow, top_k: &TopK) -> io::Result<()> {
    writeln!(writer, "{}", MAX_HEADER)?;
    for value in top_k.ascending() {
        writeln!(writer, "{}", value)?;
    }

    writeln!(writer, "{}", WINDOW_HEADER)?;
    for value in window.as_slice() {
        writeln!(writer, "{}", value)?;
    }

    Ok(())
}

/// Create or truncate `path` and write the report into it
pub fn render_to_file(
    path: impl AsRef<Path>,
    window: &RetentionWindow,
    top_k: &TopK,
) -> Result<()> {
    let path = path.as_ref();
    let failed = |e: io::Error| Error::Render {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut writer = BufWriter::new(File::create(path).map_err(failed)?);
    render(&mut writer, window, top_k).map_err(failed)?;
    writer.flush().map_err(failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SampleBatch;

    fn rendered(window: &RetentionWindow, top_k: &TopK) -> String {
        let mut out = Vec::new();
        render(&mut out, window, top_k).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_layout() {
        let batch = SampleBatch::from_slice(&[7, 4095, 0, 12]);
        let mut window = RetentionWindow::new();
        let mut top_k = TopK::new();
        window.append(&batch);
        top_k.insert(&batch);

        let expected = "--Sorted Max 32 Values--\n0\n7\n12\n4095\n--Last 32 Values--\n7\n4095\n0\n12\n";
        assert_eq!(rendered(&window, &top_k), expected);
    }

    #[test]
    fn test_render_empty() {
        let text = rendered(&RetentionWindow::new(), &TopK::new());
        assert_eq!(text, "--Sorted Max 32 Values--\n--Last 32 Values--\n");
    }

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.out");

        let batch = SampleBatch::from_slice(&[1, 2]);
        let mut window = RetentionWindow::new();
        let mut top_k = TopK::new();
        window.append(&batch);
        top_k.insert(&batch);

        render_to_file(&path, &window, &top_k).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "--Sorted Max 32 Values--\n1\n2\n--Last 32 Values--\n1\n2\n");
    }

    #[test]
    fn test_render_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("report.out");
        let result = render_to_file(&path, &RetentionWindow::new(), &TopK::new());
        assert!(matches!(result, Err(Error::Render { .. })));
    }
}
