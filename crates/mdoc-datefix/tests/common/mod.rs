// Test infrastructure and utilities for mdoc-datefix tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for creating SerialEM-style MDOC test content
pub struct MdocBuilder {
    header_date: Option<String>,
    images: Vec<(f64, String)>,
    line_ending: &'static str,
}

impl MdocBuilder {
    pub fn new() -> Self {
        Self { header_date: Some("05-Jan-23".to_string()), images: Vec::new(), line_ending: "\n" }
    }

    pub fn header_date(mut self, date: impl Into<String>) -> Self {
        self.header_date = Some(date.into());
        self
    }

    pub fn no_header(mut self) -> Self {
        self.header_date = None;
        self
    }

    /// Add one image section with the given tilt angle and DateTime value
    pub fn image(mut self, tilt: f64, datetime: impl Into<String>) -> Self {
        self.images.push((tilt, datetime.into()));
        self
    }

    pub fn crlf(mut self) -> Self {
        self.line_ending = "\r\n";
        self
    }

    pub fn build(self) -> String {
        let mut lines = vec![
            "PixelSpacing = 1.35".to_string(),
            "Voltage = 300".to_string(),
            "ImageFile = TS_01.mrc".to_string(),
            "ImageSize = 5760 4092".to_string(),
            "DataMode = 1".to_string(),
            String::new(),
            "[T = SerialEM: Digitized on EMBL Krios]".to_string(),
        ];
        if let Some(date) = &self.header_date {
            lines.push(format!("[T =     Tilt axis angle = 84.9, binning = 1  {}  10:22:15]", date));
        }
        lines.push(String::new());

        for (z, (tilt, datetime)) in self.images.iter().enumerate() {
            lines.push(format!("[ZValue = {}]", z));
            lines.push(format!("TiltAngle = {:.4}", tilt));
            lines.push("StagePosition = 123.456 -78.9".to_string());
            lines.push("ExposureTime = 0.5".to_string());
            lines.push(format!("DateTime = {}", datetime));
            lines.push(String::new());
        }

        lines.iter().map(|l| format!("{}{}", l, self.line_ending)).collect()
    }
}

impl Default for MdocBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A typical three-image tilt series with inconsistent DateTime fields
pub fn sample_mdoc() -> String {
    MdocBuilder::new()
        .image(0.0, "04-Jan-22  14:30:05")
        .image(3.0, "04-Jan-22  14:31:10")
        .image(-3.0, "31-Dec-99  14:32:15")
        .build()
}

/// Create `<temp>/<name>` holding the given files
pub fn create_input_dir(temp: &TempDir, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = temp.path().join(name);
    fs::create_dir_all(&dir).unwrap();
    for (file, content) in files {
        fs::write(dir.join(file), content).unwrap();
    }
    dir
}

/// Sorted file names directly inside `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Lines of `content` whose label is `DateTime`
pub fn datetime_lines(content: &str) -> Vec<&str> {
    content.lines().filter(|l| l.trim_start().starts_with("DateTime")).collect()
}
