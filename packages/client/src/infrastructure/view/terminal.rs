//! Terminal rendering of the chat transcript and the registration banner.

use std::{
    io::Write,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use roomlink_shared::time::timestamp_to_jst_clock;

use crate::domain::{Banner, BannerKind, ChatView, FormView, LineKind, TranscriptLine, ViewError};

const ITALIC: &str = "\x1b[3m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

fn write_error(e: std::io::Error) -> ViewError {
    ViewError::Write(e.to_string())
}

/// Visibility of the send form, shared between the view and the input reader.
///
/// Starts open. Once closed it stays closed.
#[derive(Debug, Clone)]
pub struct SendForm(Arc<AtomicBool>);

impl SendForm {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_open(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn close(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for SendForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Transcript written line by line to `out`.
///
/// Status lines are italic and the verification warning is highlighted when
/// `styled` is set; otherwise plain text is written.
pub struct TerminalChatView<W: Write + Send> {
    out: W,
    styled: bool,
    send_form: SendForm,
    lines_written: usize,
}

impl<W: Write + Send> TerminalChatView<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self {
            out,
            styled,
            send_form: SendForm::new(),
            lines_written: 0,
        }
    }

    pub fn form_visible(&self) -> bool {
        self.send_form.is_open()
    }

    /// Handle for whatever reads the send form's input.
    pub fn send_form(&self) -> SendForm {
        self.send_form.clone()
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    fn render(&self, line: &TranscriptLine) -> String {
        let clock = timestamp_to_jst_clock(line.received_at.value());
        match (line.kind, self.styled) {
            (LineKind::Message, _) => format!("[{clock}] {}", line.text),
            (LineKind::Status, true) => format!("[{clock}] {ITALIC}{}{RESET}", line.text),
            (LineKind::Status, false) => format!("[{clock}] * {}", line.text),
            (LineKind::Warning, true) => format!("{YELLOW}! {}{RESET}", line.text),
            (LineKind::Warning, false) => format!("! {}", line.text),
        }
    }
}

impl<W: Write + Send> ChatView for TerminalChatView<W> {
    fn append_line(&mut self, line: TranscriptLine) -> Result<(), ViewError> {
        let rendered = self.render(&line);
        writeln!(self.out, "{rendered}").map_err(write_error)?;
        self.lines_written += 1;
        Ok(())
    }

    fn scroll_to_bottom(&mut self) -> Result<(), ViewError> {
        // The terminal follows its output; pushing it out is all that is needed.
        self.out.flush().map_err(write_error)
    }

    fn hide_send_form(&mut self) -> Result<(), ViewError> {
        self.send_form.close();
        Ok(())
    }

    fn clear_input(&mut self) {
        // rustyline hands over a finished line and starts an empty prompt.
    }
}

/// Name and email as currently entered on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
}

/// Registration form rendered to a terminal.
///
/// `banner_out` is the banner container; without one, banners cannot be shown.
pub struct TerminalFormView<W: Write + Send> {
    banner_out: Option<W>,
    styled: bool,
    current: Option<Banner>,
    pub fields: FormFields,
}

impl<W: Write + Send> TerminalFormView<W> {
    pub fn new(banner_out: Option<W>, styled: bool) -> Self {
        Self {
            banner_out,
            styled,
            current: None,
            fields: FormFields::default(),
        }
    }

    /// The banner currently shown, if any.
    pub fn banner(&self) -> Option<&Banner> {
        self.current.as_ref()
    }
}

impl<W: Write + Send> FormView for TerminalFormView<W> {
    fn show_banner(&mut self, banner: Banner) -> Result<(), ViewError> {
        let Some(out) = self.banner_out.as_mut() else {
            return Err(ViewError::MissingBannerContainer);
        };

        let tag = format!("[{}]", banner.kind.as_str());
        let rendered = if self.styled {
            let color = match banner.kind {
                BannerKind::Success => GREEN,
                BannerKind::Danger => RED,
            };
            format!("{color}{tag}{RESET} {}", banner.message)
        } else {
            format!("{tag} {}", banner.message)
        };
        writeln!(out, "{rendered}").map_err(write_error)?;
        out.flush().map_err(write_error)?;

        self.current = Some(banner);
        Ok(())
    }

    fn reset_form(&mut self) {
        self.fields = FormFields::default();
    }
}
