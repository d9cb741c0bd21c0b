//! Public share links and the platform clipboard.

use crate::error::NoteError;
use notes_types::NoteId;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Route of the read-only share view, relative to the dashboard origin
pub const PUBLIC_VIEW_PATH: &str = "/public";

/// `{origin}/public/{id}`. Pure; no network call.
pub fn build_public_link(origin: &str, id: &NoteId) -> String {
    format!(
        "{}{}/{}",
        origin.trim_end_matches('/'),
        PUBLIC_VIEW_PATH,
        urlencoding::encode(id.as_str())
    )
}

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), NoteError>;
}

/// Build the link and put it on the clipboard. A clipboard failure is an
/// error, never a silent success.
pub fn copy_public_link(
    clipboard: &dyn Clipboard,
    origin: &str,
    id: &NoteId,
) -> Result<String, NoteError> {
    let link = build_public_link(origin, id);
    clipboard.write_text(&link)?;
    log::info!("[SHARE] Copied public link {}", link);
    Ok(link)
}

/// Copy tools tried in order, with the arguments that make them read stdin
const COPY_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Clipboard backed by whichever platform copy tool is on PATH
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    program: PathBuf,
    args: &'static [&'static str],
}

impl SystemClipboard {
    pub fn detect() -> Result<Self, NoteError> {
        COPY_TOOLS
            .iter()
            .find_map(|&(name, args)| {
                which::which(name).ok().map(|program| Self { program, args })
            })
            .ok_or_else(|| {
                NoteError::ClipboardUnavailable(
                    "no clipboard tool found (tried pbcopy, wl-copy, xclip, xsel, clip)".to_string(),
                )
            })
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), NoteError> {
        let unavailable =
            |e: std::io::Error| NoteError::ClipboardUnavailable(format!("{}: {}", self.program.display(), e));

        let mut child = Command::new(&self.program)
            .args(self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(unavailable)?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                drop(stdin);
                let _ = child.kill();
                let _ = child.wait();
                return Err(unavailable(e));
            }
        }

        let status = child.wait().map_err(unavailable)?;
        if !status.success() {
            return Err(NoteError::ClipboardUnavailable(format!(
                "{} exited with {}",
                self.program.display(),
                status
            )));
        }
        Ok(())
    }
}
