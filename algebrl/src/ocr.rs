//! Reading problems from images.
use crate::error::AppError;
use algebrl_algebra::normalize_problem_text;
use anyhow::{Context, Result};
use log::debug;
use std::{
    path::{Path, PathBuf},
    process::Command,
};

/// Extracts a problem statement from an image.
pub trait TextExtractor {
    fn extract(&self, image: &Path) -> Result<String>;
}

/// Picks the problem out of recognized text.
///
/// Lines are normalized; the first one with an `=` wins, otherwise the first
/// non-empty line.
pub fn pick_problem(text: &str) -> Option<String> {
    let lines = text
        .lines()
        .map(normalize_problem_text)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>();
    lines
        .iter()
        .find(|l| l.contains('='))
        .or_else(|| lines.first())
        .cloned()
}

/// Runs the `tesseract` command line tool as `tesseract <image> stdout`.
pub struct TesseractOcr {
    command: PathBuf,
    args: Vec<String>,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self {
            command: PathBuf::from("tesseract"),
            args: vec!["stdout".to_string()],
        }
    }
}

impl TesseractOcr {
    /// Sets the executable.
    pub fn command(mut self, command: impl AsRef<Path>) -> Self {
        self.command = command.as_ref().to_path_buf();
        self
    }

    /// Sets the arguments following the image path.
    pub fn args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl TextExtractor for TesseractOcr {
    fn extract(&self, image: &Path) -> Result<String> {
        let output = Command::new(&self.command)
            .arg(image)
            .args(&self.args)
            .output()
            .with_context(|| format!("Failed to run {:?}", self.command))?;
        if !output.status.success() {
            return Err(AppError::Command {
                command: self.command.display().to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let text = String::from_utf8_lossy(&output.stdout);
        debug!("Recognized {:?}", text);
        pick_problem(&text).ok_or_else(|| AppError::NoText(image.display().to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_problem() {
        let text = "Solve for x\n\n1. 5x \u{2212} 3 = 12\n";
        assert_eq!(pick_problem(text), Some("5x - 3 = 12".to_string()));
        assert_eq!(pick_problem("Solve\n"), Some("Solve".to_string()));
        assert_eq!(pick_problem(" \n\n"), None);

        // Scanner artifacts around the equation
        let text = "\u{2022} Exercise 4:\n| 2(x + 3) = 14 |\n";
        let problem = pick_problem(text).unwrap();
        assert_eq!(problem, "2(x + 3) = 14");
        assert!(algebrl_algebra::parse(&problem).is_ok());
    }

    #[test]
    fn test_extract_with_command() -> Result<()> {
        // `echo` prints the image path back
        let ocr = TesseractOcr::default().command("echo").args(vec![]);
        let text = ocr.extract(Path::new("1. 2x + 1 = 5"))?;
        assert_eq!(text, "2x + 1 = 5");
        Ok(())
    }

    #[test]
    fn test_missing_command() {
        let ocr = TesseractOcr::default().command("/nonexistent/tesseract");
        assert!(ocr.extract(Path::new("image.png")).is_err());
    }
}
