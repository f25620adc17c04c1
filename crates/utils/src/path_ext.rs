use std::path::Path;

/// Extends path types with the small queries every format crate repeats
pub trait PathExt {
    /// Lowercase file extension without the leading dot
    ///
    /// ```rust
    /// # use hmf_utils::PathExt;
    /// assert_eq!("mesh.HMF".extension_lower(), Some("hmf".to_string()));
    /// assert_eq!("archive".extension_lower(), None);
    /// ```
    fn extension_lower(&self) -> Option<String>;

    /// File name with the final extension removed
    ///
    /// Falls back to `default` for paths with no usable stem, e.g. `..`.
    ///
    /// ```rust
    /// # use hmf_utils::PathExt;
    /// assert_eq!("/tmp/out.tmf".stem_or("mesh"), "out");
    /// assert_eq!("..".stem_or("mesh"), "mesh");
    /// ```
    fn stem_or(&self, default: &str) -> String;

    /// True if the extension matches any of `extensions`, ignoring case
    fn has_extension(&self, extensions: &[&str]) -> bool;
}

impl<P: AsRef<Path>> PathExt for P {
    fn extension_lower(&self) -> Option<String> {
        self.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    fn stem_or(&self, default: &str) -> String {
        self.as_ref()
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    fn has_extension(&self, extensions: &[&str]) -> bool {
        match self.extension_lower() {
            Some(ext) => extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)),
            None => false,
        }
    }
}
