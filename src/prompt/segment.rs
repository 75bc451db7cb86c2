//! Segment content resolution
//!
//! Maps each segment type to the record its template is evaluated against
//! and to the template used when the theme does not provide one.

use super::context::PromptContext;
use super::template::{self, TemplateData};
use crate::config::theme::Segment;
use crate::template_data;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shell version reported by the `shell` segment
pub const SHELL_VERSION: &str = "7.4.0";

/// Branch reported by the `git` segment
pub const GIT_BRANCH: &str = "main";

pub const OS_ICON: &str = "💻";
pub const ROOT_ICON: &str = "⚡";

/// Segment types understood by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SegmentKind {
    Shell,
    Path,
    Git,
    Time,
    Session,
    User,
    Root,
    Status,
    Exit,
    Text,
    Os,
    /// Any other type name, kept verbatim
    Unknown(String),
}

impl SegmentKind {
    pub fn as_str(&self) -> &str {
        match self {
            SegmentKind::Shell => "shell",
            SegmentKind::Path => "path",
            SegmentKind::Git => "git",
            SegmentKind::Time => "time",
            SegmentKind::Session => "session",
            SegmentKind::User => "user",
            SegmentKind::Root => "root",
            SegmentKind::Status => "status",
            SegmentKind::Exit => "exit",
            SegmentKind::Text => "text",
            SegmentKind::Os => "os",
            SegmentKind::Unknown(name) => name,
        }
    }

    /// Template used when the segment does not declare one
    pub fn default_template(&self) -> &'static str {
        match self {
            SegmentKind::Shell => " {{ .Name }} ",
            SegmentKind::Path => " {{ .Path }} ",
            SegmentKind::Git => " {{ .HEAD }} ",
            SegmentKind::Time => " {{ .currentTime }} ",
            SegmentKind::Session => " {{ .UserName }}@{{ .HostName }} ",
            SegmentKind::User => " {{ .UserName }} ",
            SegmentKind::Root => " ⚡ ",
            SegmentKind::Status | SegmentKind::Exit => " {{ if .Error }}✗{{ else }}✓{{ end }} ",
            SegmentKind::Os => " {{ .Icon }} ",
            SegmentKind::Text | SegmentKind::Unknown(_) => " ",
        }
    }
}

impl Default for SegmentKind {
    fn default() -> Self {
        SegmentKind::Unknown(String::new())
    }
}

impl From<&str> for SegmentKind {
    fn from(name: &str) -> Self {
        match name {
            "shell" => SegmentKind::Shell,
            "path" => SegmentKind::Path,
            "git" => SegmentKind::Git,
            "time" => SegmentKind::Time,
            "session" => SegmentKind::Session,
            "user" => SegmentKind::User,
            "root" => SegmentKind::Root,
            "status" => SegmentKind::Status,
            "exit" => SegmentKind::Exit,
            "text" => SegmentKind::Text,
            "os" => SegmentKind::Os,
            other => SegmentKind::Unknown(other.to_string()),
        }
    }
}

impl From<String> for SegmentKind {
    fn from(name: String) -> Self {
        SegmentKind::from(name.as_str())
    }
}

impl From<SegmentKind> for String {
    fn from(kind: SegmentKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a segment's content using the local clock.
///
/// An empty result means the segment is not shown.
pub fn resolve(segment: &Segment, context: &PromptContext) -> String {
    resolve_at(segment, context, Local::now().naive_local())
}

/// Render a segment's content as of `now`
pub fn resolve_at(segment: &Segment, context: &PromptContext, now: NaiveDateTime) -> String {
    let template = match segment.template.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => segment.kind.default_template(),
    };

    match segment_data(&segment.kind, context, now) {
        Some(data) => template::render(template, &data),
        None => String::new(),
    }
}

/// Record fed to the template, or `None` when the segment is hidden
fn segment_data(kind: &SegmentKind, ctx: &PromptContext, now: NaiveDateTime) -> Option<TemplateData> {
    let data = match kind {
        SegmentKind::Shell => template_data! {
            "Name" => ctx.shell.to_uppercase(),
            "Version" => SHELL_VERSION,
        },
        SegmentKind::Path => template_data! {
            "Path" => ctx.display_path(),
            "PWD" => ctx.pwd.as_str(),
        },
        SegmentKind::Git => template_data! {
            "HEAD" => GIT_BRANCH,
            "Branch" => GIT_BRANCH,
            "Working" => template_data! { "Changed" => false },
            "Staging" => template_data! { "Changed" => false },
        },
        SegmentKind::Time => template_data! {
            "currentDate" => now.format("%-m/%-d/%Y").to_string(),
            "currentTime" => now.format("%-I:%M:%S %p").to_string(),
        },
        SegmentKind::Session | SegmentKind::User => template_data! {
            "UserName" => ctx.user_name.as_str(),
            "HostName" => ctx.host_name.as_str(),
        },
        SegmentKind::Root if !ctx.root => return None,
        SegmentKind::Root | SegmentKind::Text | SegmentKind::Unknown(_) => TemplateData::new(),
        SegmentKind::Status | SegmentKind::Exit => template_data! {
            "Code" => ctx.code,
            "Error" => ctx.code != 0,
        },
        SegmentKind::Os => template_data! {
            "Icon" => OS_ICON,
            "WSL" => ctx.wsl,
        },
    };
    Some(data)
}
