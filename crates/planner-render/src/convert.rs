//! PDF output: native rendering or conversion of the saved `.docx`

use crate::model::PlannerDocument;
use crate::pdf::render_pdf;
use crate::types::*;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;

/// Executables tried, in order, for LibreOffice conversion
const LIBREOFFICE_COMMANDS: &[&str] = &["soffice", "libreoffice"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdfEngine {
    /// Render the document model directly
    #[default]
    Native,
    /// Convert the saved `.docx` with a headless LibreOffice
    LibreOffice,
}

/// Produce `pdf_path` from `doc` (native) or from the file at `docx_path`
pub async fn convert_to_pdf(
    engine: PdfEngine,
    doc: Arc<PlannerDocument>,
    docx_path: &Path,
    pdf_path: &Path,
) -> Result<()> {
    match engine {
        PdfEngine::Native => {
            // PDF generation is CPU-bound, spawn blocking
            let bytes = tokio::task::spawn_blocking(move || render_pdf(&doc)).await??;
            crate::io::save(pdf_path, &bytes).await
        }
        PdfEngine::LibreOffice => libreoffice(docx_path, pdf_path).await,
    }
}

async fn libreoffice(docx_path: &Path, pdf_path: &Path) -> Result<()> {
    let out_dir = match docx_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    for program in LIBREOFFICE_COMMANDS {
        let output = Command::new(program)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(&out_dir)
            .arg(docx_path)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} not found on PATH", program);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::ConversionFailed(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        // LibreOffice names the file after the input's stem
        let produced = out_dir.join(docx_path.with_extension("pdf").file_name().unwrap_or_default());
        if !tokio::fs::try_exists(&produced).await? {
            return Err(RenderError::ConversionFailed(format!(
                "{} reported success but {} is missing",
                program,
                produced.display()
            )));
        }
        if produced != pdf_path {
            tokio::fs::rename(&produced, pdf_path).await?;
        }
        log::info!("Converted {} with {}", docx_path.display(), program);
        return Ok(());
    }

    Err(RenderError::ConverterMissing(LIBREOFFICE_COMMANDS.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_is_default() {
        assert_eq!(PdfEngine::default(), PdfEngine::Native);
    }
}
