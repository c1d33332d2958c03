//! File-type icons keyed by extension

use super::file_extension;

/// Icon shown next to a file of a known type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileIcon {
    Apk,
    Dmg,
    Exe,
    Txt,
    Doc,
    Rtf,
    Key,
    Rar,
    Zip,
    Xls,
    Pdf,
    Ppt,
}

impl FileIcon {
    /// Icon for an extension (case-sensitive, without the dot)
    pub fn from_extension(extension: &str) -> Option<Self> {
        let icon = match extension {
            "apk" => Self::Apk,
            "dmg" => Self::Dmg,
            "exe" => Self::Exe,
            "txt" => Self::Txt,
            "doc" | "docx" => Self::Doc,
            "rtf" => Self::Rtf,
            "key" => Self::Key,
            "rar" => Self::Rar,
            "zip" => Self::Zip,
            "xls" | "xlsx" => Self::Xls,
            "pdf" => Self::Pdf,
            "ppt" | "pptx" => Self::Ppt,
            _ => return None,
        };
        Some(icon)
    }

    /// Static drawable resource name
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Apk => "ic_file_apk",
            Self::Dmg => "ic_file_dmg",
            Self::Exe => "ic_file_exe",
            Self::Txt => "ic_file_txt",
            Self::Doc => "ic_file_doc",
            Self::Rtf => "ic_file_rtf",
            Self::Key => "ic_file_key",
            Self::Rar => "ic_file_rar",
            Self::Zip => "ic_file_zip",
            Self::Xls => "ic_file_xls",
            Self::Pdf => "ic_file_pdf",
            Self::Ppt => "ic_file_ppt",
        }
    }
}

/// Icon for the file at `path`, `None` for unknown or missing extensions
pub fn file_icon(path: &str) -> Option<FileIcon> {
    FileIcon::from_extension(file_extension(path))
}
