//! PNG output to a file or stdout

use std::io::{Cursor, IsTerminal, Write};

use image::{GrayAlphaImage, ImageFormat};

use crate::error::OutputError;

/// Output target: `-` writes to stdout, anything else is a file path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(arg.to_string())
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, OutputTarget::Stdout)
    }

    /// Fail early when PNG bytes would go to a terminal.
    pub fn check(&self) -> Result<(), OutputError> {
        if self.is_stdout() && std::io::stdout().is_terminal() {
            return Err(OutputError::TerminalStdout);
        }
        Ok(())
    }

    pub fn display_name(&self) -> &str {
        match self {
            OutputTarget::Stdout => "stdout",
            OutputTarget::File(path) => path,
        }
    }
}

/// Encode and write a gray + alpha PNG.
pub fn write_png(img: &GrayAlphaImage, target: &OutputTarget) -> Result<(), OutputError> {
    target.check()?;
    match target {
        OutputTarget::File(path) => img.save_with_format(path, ImageFormat::Png).map_err(|source| {
            OutputError::Image {
                path: path.clone(),
                source,
            }
        }),
        OutputTarget::Stdout => {
            let mut bytes = Cursor::new(Vec::new());
            img.write_to(&mut bytes, ImageFormat::Png)
                .map_err(|source| OutputError::Image {
                    path: "stdout".to_string(),
                    source,
                })?;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes.get_ref())
                .and_then(|_| stdout.flush())
                .map_err(|source| OutputError::Io {
                    path: "stdout".to_string(),
                    source,
                })
        }
    }
}

/// Path for the `index`-th file of a batch: `maps/cave.png` -> `maps/cave_3.png`.
pub fn batch_path(base: &str, index: usize) -> String {
    let path = std::path::Path::new(base);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("map");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("png");
    let name = format!("{}_{}.{}", stem, index, ext);
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name).display().to_string(),
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(OutputTarget::parse("-"), OutputTarget::Stdout);
        assert_eq!(OutputTarget::parse("out.png"), OutputTarget::File("out.png".to_string()));
    }

    #[test]
    fn test_batch_path() {
        assert_eq!(batch_path("cave.png", 0), "cave_0.png");
        assert_eq!(batch_path("maps/cave.png", 3), "maps/cave_3.png");
        assert_eq!(batch_path("cave", 1), "cave_1.png");
    }

    #[test]
    fn test_png_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("cave_tiles_out_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tiny.png").display().to_string();

        let img = GrayAlphaImage::from_pixel(4, 2, image::LumaA([0x80, 0xff]));
        write_png(&img, &OutputTarget::File(path.clone())).unwrap();

        let loaded = image::open(&path).unwrap().to_luma_alpha8();
        assert_eq!(loaded, img);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
