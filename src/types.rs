//! Type definitions shared between the UI and the file server.
//!
//! Only `name` is required in a file descriptor; the remaining fields are
//! what the reference server sends along and are shown when present.

use serde::{Deserialize, Serialize};

/// One entry of the `/files` response.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RemoteFile {
    pub name: String,
    /// Human-readable size, e.g. "1.2 MB".
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    /// Modification time as formatted by the server.
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
}

impl RemoteFile {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), size: None, size_bytes: None, modified: None, created: None, extension: None }
    }

    /// Secondary line for the list row: size and modification time, whichever are known.
    pub fn details(&self) -> Option<String> {
        let size = self.size.clone().or_else(|| self.size_bytes.map(fmt_bytes));
        match (size, self.modified.as_deref()) {
            (Some(s), Some(m)) => Some(format!("{} · {}", s, m)),
            (Some(s), None) => Some(s),
            (None, Some(m)) => Some(m.to_string()),
            (None, None) => None,
        }
    }
}

/// Visual style of a notification banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

// Format bytes using binary units
pub fn fmt_bytes(n: u64) -> String {
    let mut v = n as f64;
    let units = ["B", "KB", "MB", "GB", "TB", "PB"];
    let mut i = 0usize;
    while v >= 1024.0 && i < units.len() - 1 {
        v /= 1024.0;
        i += 1;
    }
    if i == 0 {
        format!("{} B", n)
    } else if v >= 10.0 {
        format!("{:.0} {}", v, units[i])
    } else {
        format!("{:.1} {}", v, units[i])
    }
}
